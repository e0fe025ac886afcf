use regex::Regex;

use super::DomainError;

/// Inclusion allow-list over template paths.
///
/// Empty keeps every file. Otherwise a file is kept when at least one
/// pattern matches its `/`-separated path relative to the scan root.
/// Patterns are unanchored, as with `Regex::is_match`.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    patterns: Vec<Regex>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile a list of pattern sources.
    pub fn from_patterns<I, S>(patterns: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        patterns
            .into_iter()
            .map(|source| {
                let source = source.as_ref();
                Regex::new(source).map_err(|e| DomainError::InvalidPattern {
                    pattern: source.to_owned(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(|patterns| Self { patterns })
    }

    pub fn with_pattern(mut self, pattern: Regex) -> Self {
        self.patterns.push(pattern);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the scanner keeps the file at `path`.
    pub fn is_included(&self, path: &str) -> bool {
        self.patterns.is_empty() || self.patterns.iter().any(|p| p.is_match(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_includes_everything() {
        let filter = FilterSet::new();
        assert!(filter.is_included("EntitySchema.ts"));
        assert!(filter.is_included("nested/dir/anything.txt"));
        assert!(filter.is_included(""));
    }

    #[test]
    fn non_empty_filter_is_allow_list() {
        let filter = FilterSet::from_patterns(["Schema.*"]).unwrap();
        assert!(filter.is_included("EntitySchema.ts"));
        assert!(!filter.is_included("EntityView.ts"));
    }

    #[test]
    fn any_pattern_is_enough() {
        let filter = FilterSet::from_patterns(["^en", "^pt-br"]).unwrap();
        assert!(filter.is_included("en.json"));
        assert!(filter.is_included("pt-br.json"));
        assert!(!filter.is_included("es.json"));
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let err = FilterSet::from_patterns(["("]).unwrap_err();
        assert!(matches!(err, DomainError::InvalidPattern { pattern, .. } if pattern == "("));
    }
}
