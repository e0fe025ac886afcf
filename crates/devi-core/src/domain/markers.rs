//! Escape markers rewritten after the templating pass.

use serde::{Deserialize, Serialize};

/// Literal `(marker, replacement)` pairs, applied in order.
///
/// Lets templates carry `<?php` without tripping editors and linters while
/// they are being authored. Applied strictly after template evaluation so the
/// output of an expression is never re-read as a marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscapeMarkers {
    pairs: Vec<(String, String)>,
}

impl Default for EscapeMarkers {
    fn default() -> Self {
        Self::from_pairs([("[?php]", "<?php"), ("[?]", "<?")])
    }
}

impl EscapeMarkers {
    pub fn none() -> Self {
        Self { pairs: Vec::new() }
    }

    pub fn from_pairs<I, M, R>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (M, R)>,
        M: Into<String>,
        R: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(m, r)| (m.into(), r.into()))
                .collect(),
        }
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn apply(&self, content: &str) -> String {
        self.pairs
            .iter()
            .fold(content.to_owned(), |acc, (marker, replacement)| {
                acc.replace(marker, replacement)
            })
    }
}
