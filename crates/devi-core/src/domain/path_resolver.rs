//! Template path → target path.

use std::path::PathBuf;

use super::{Delimiter, DomainError, RelativePath, SubstitutionMap};

/// Rewrites template-relative paths into target-relative paths.
///
/// Two passes: token substitution over the whole path, then extension
/// un-bracketing on the file name (`Entity.controller.[php].tmplt` becomes
/// `Entity.controller.php`).
#[derive(Debug, Clone, Default)]
pub struct PathResolver {
    delimiter: Delimiter,
}

impl PathResolver {
    pub fn new(delimiter: Delimiter) -> Self {
        Self { delimiter }
    }

    pub fn delimiter(&self) -> &Delimiter {
        &self.delimiter
    }

    /// Resolve one path.
    ///
    /// Fails with [`DomainError::InvalidTargetPath`] when a substituted value
    /// would move the result outside the target root.
    pub fn resolve(
        &self,
        relative: &RelativePath,
        substitutions: &SubstitutionMap,
    ) -> Result<RelativePath, DomainError> {
        let substituted = self
            .delimiter
            .substitute(&relative.to_slash_string(), substitutions);

        let mut segments: Vec<&str> = substituted
            .split('/')
            .filter(|s| !s.is_empty() && *s != ".")
            .collect();

        let Some(file_name) = segments.pop() else {
            return Err(DomainError::InvalidTargetPath { path: substituted });
        };
        let file_name = unbracket_extension(file_name);

        let path: PathBuf = segments
            .into_iter()
            .chain(std::iter::once(file_name.as_str()))
            .collect();
        RelativePath::try_new(path)
    }
}

/// Drop the authoring extension and unwrap the bracketed real extension.
///
/// The last dot-segment is discarded and the new last segment loses one
/// bracket wrapper: `[[txt]]` and `[txt]` both become `txt`. Names with a
/// single segment, or whose kept part would be empty (`.gitkeep`), are
/// returned unchanged.
pub fn unbracket_extension(file_name: &str) -> String {
    let mut segments: Vec<&str> = file_name.split('.').collect();
    if segments.len() < 2 {
        return file_name.to_owned();
    }
    segments.pop();

    let Some(last) = segments.pop() else {
        return file_name.to_owned();
    };
    if last.is_empty() && segments.is_empty() {
        return file_name.to_owned();
    }

    let unwrapped = unwrap_brackets(last);
    segments.push(unwrapped);
    segments.join(".")
}

fn unwrap_brackets(segment: &str) -> &str {
    if let Some(inner) = segment
        .strip_prefix("[[")
        .and_then(|s| s.strip_suffix("]]"))
    {
        return inner;
    }
    let segment = segment.strip_prefix('[').unwrap_or(segment);
    segment.strip_suffix(']').unwrap_or(segment)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(path: &str) -> RelativePath {
        RelativePath::try_new(path).unwrap()
    }

    #[test]
    fn unbrackets_single_brackets() {
        assert_eq!(
            unbracket_extension("Entity.controller.[php].tmplt"),
            "Entity.controller.php"
        );
    }

    #[test]
    fn unbrackets_double_brackets() {
        assert_eq!(unbracket_extension("greeting.[[txt]].tmplt"), "greeting.txt");
    }

    #[test]
    fn drops_marker_without_brackets() {
        assert_eq!(unbracket_extension("index.ts.tmplt"), "index.ts");
        assert_eq!(unbracket_extension("Dockerfile.tmplt"), "Dockerfile");
    }

    #[test]
    fn single_segment_is_unchanged() {
        assert_eq!(unbracket_extension("Makefile"), "Makefile");
    }

    #[test]
    fn dotfile_is_unchanged() {
        assert_eq!(unbracket_extension(".gitkeep"), ".gitkeep");
    }

    #[test]
    fn resolves_tokens_and_extension() {
        let subs = SubstitutionMap::named()
            .with("domain", "Admin/Sales")
            .with("entity", "Customer");
        let resolved = PathResolver::default()
            .resolve(&rel("{{domain}}/{{entity}}.controller.[php].tmplt"), &subs)
            .unwrap();
        assert_eq!(resolved.to_string(), "Admin/Sales/Customer.controller.php");
    }

    #[test]
    fn unknown_tokens_stay_in_path() {
        let resolved = PathResolver::default()
            .resolve(&rel("{{missing}}/a.[ts].tmplt"), &SubstitutionMap::named())
            .unwrap();
        assert_eq!(resolved.to_string(), "{{missing}}/a.ts");
    }

    #[test]
    fn legacy_delimiter_is_honoured() {
        let subs = SubstitutionMap::named().with("entity", "Customer");
        let resolved = PathResolver::new(Delimiter::double_bracket())
            .resolve(&rel("[[entity]]Schema.[ts].tmplt"), &subs)
            .unwrap();
        assert_eq!(resolved.to_string(), "CustomerSchema.ts");
    }

    #[test]
    fn parent_traversal_in_values_is_rejected() {
        let subs = SubstitutionMap::named().with("domain", "../../etc");
        let result = PathResolver::default().resolve(&rel("{{domain}}/x.[txt].tmplt"), &subs);
        assert!(matches!(result, Err(DomainError::InvalidTargetPath { .. })));
    }

    #[test]
    fn empty_result_is_rejected() {
        let subs = SubstitutionMap::named().with("name", "");
        let result = PathResolver::default().resolve(&rel("{{name}}"), &subs);
        assert!(result.is_err());
    }
}
