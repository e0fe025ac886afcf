//! Token substitution renderer for template sets without templating logic.

use devi_core::{
    application::ports::TemplateRenderer,
    domain::{Delimiter, EscapeMarkers, SubstitutionMap},
    error::DeviResult,
};
use tracing::instrument;

/// Literal token pass followed by escape markers.
#[derive(Debug, Clone, Default)]
pub struct SimpleRenderer {
    delimiter: Delimiter,
    markers: EscapeMarkers,
}

impl SimpleRenderer {
    /// Create a renderer with the `{{name}}` delimiter and PHP markers.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_markers(mut self, markers: EscapeMarkers) -> Self {
        self.markers = markers;
        self
    }
}

impl TemplateRenderer for SimpleRenderer {
    #[instrument(skip_all, fields(bytes = content.len()))]
    fn render(&self, content: &str, substitutions: &SubstitutionMap) -> DeviResult<String> {
        let substituted = self.delimiter.substitute(content, substitutions);
        Ok(self.markers.apply(&substituted))
    }
}
