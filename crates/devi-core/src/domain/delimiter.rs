//! Token delimiter strategy shared by path resolution and content rendering.

use std::fmt;
use std::sync::Arc;

use regex::{NoExpand, Regex};

use super::SubstitutionMap;

/// Builds the expression matching one token. Receives the token name already
/// escaped for use inside a regular expression.
pub type PatternFactory = Arc<dyn Fn(&str) -> Regex + Send + Sync>;

/// How a token reference is written in templates.
#[derive(Clone)]
pub enum Delimiter {
    /// Literal open/close markers around the token name, e.g. `{{name}}`.
    Wrapped { open: String, close: String },
    /// Caller-supplied expression per token.
    Pattern(PatternFactory),
}

impl Delimiter {
    /// `{{name}}`
    pub fn double_brace() -> Self {
        Self::wrapped("{{", "}}")
    }

    /// `[[name]]`, used by older template sets.
    pub fn double_bracket() -> Self {
        Self::wrapped("[[", "]]")
    }

    pub fn wrapped(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self::Wrapped {
            open: open.into(),
            close: close.into(),
        }
    }

    pub fn from_factory<F>(factory: F) -> Self
    where
        F: Fn(&str) -> Regex + Send + Sync + 'static,
    {
        Self::Pattern(Arc::new(factory))
    }

    /// Replace every reference to `key` in `haystack` with `value`.
    pub fn replace_all(&self, haystack: &str, key: &str, value: &str) -> String {
        match self {
            Self::Wrapped { open, close } => {
                haystack.replace(&format!("{open}{key}{close}"), value)
            }
            Self::Pattern(factory) => factory(&regex::escape(key))
                .replace_all(haystack, NoExpand(value))
                .into_owned(),
        }
    }

    /// Replace every known scalar token. Unknown tokens stay as written.
    pub fn substitute(&self, haystack: &str, substitutions: &SubstitutionMap) -> String {
        substitutions
            .tokens()
            .iter()
            .fold(haystack.to_owned(), |acc, (key, value)| {
                self.replace_all(&acc, key, value)
            })
    }

    /// Regular expression source matching the literal reference to `key`.
    ///
    /// Used to build filters over template file names that still contain
    /// unresolved tokens.
    pub fn token_pattern(&self, key: &str) -> String {
        match self {
            Self::Wrapped { open, close } => regex::escape(&format!("{open}{key}{close}")),
            Self::Pattern(factory) => factory(&regex::escape(key)).as_str().to_owned(),
        }
    }
}

impl Default for Delimiter {
    fn default() -> Self {
        Self::double_brace()
    }
}

impl fmt::Debug for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wrapped { open, close } => f
                .debug_struct("Wrapped")
                .field("open", open)
                .field("close", close)
                .finish(),
            Self::Pattern(_) => f.write_str("Pattern(<factory>)"),
        }
    }
}
