//! Template tree discovery.

use std::path::Path;

use tracing::{debug, instrument, trace};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{FilterSet, RelativePath, TemplateFile},
    error::DeviResult,
};

/// Enumerates the template files of one source root.
pub struct TreeScanner<'a> {
    filesystem: &'a dyn Filesystem,
}

impl<'a> TreeScanner<'a> {
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self { filesystem }
    }

    /// Files below `root` kept by `filter`, in walk order.
    ///
    /// Directories are always descended into; the filter only applies to
    /// files, matched against their `/`-separated path relative to `root`.
    #[instrument(skip_all, fields(root = %root.display(), patterns = filter.len()))]
    pub fn scan(&self, root: &Path, filter: &FilterSet) -> DeviResult<Vec<TemplateFile>> {
        if !self.filesystem.is_dir(root) {
            return Err(ApplicationError::SourceNotFound {
                path: root.to_path_buf(),
            }
            .into());
        }

        let mut files = Vec::new();
        for absolute in self.filesystem.walk_files(root)? {
            let relative = RelativePath::strip_root(&absolute, root)?;
            if filter.is_included(&relative.to_slash_string()) {
                files.push(TemplateFile { absolute, relative });
            } else {
                trace!(file = %relative, "Excluded by filter");
            }
        }

        debug!(count = files.len(), "Template files discovered");
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::application::ports::MockFilesystem;

    fn filesystem_with(files: &'static [&'static str]) -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().returning(|_| true);
        fs.expect_walk_files()
            .returning(move |root| Ok(files.iter().map(|f| root.join(f)).collect()));
        fs
    }

    #[test]
    fn empty_filter_returns_every_file() {
        let fs = filesystem_with(&["a/b.txt", "c.txt"]);
        let files = TreeScanner::new(&fs)
            .scan(Path::new("/tpl"), &FilterSet::new())
            .unwrap();

        let relative: Vec<_> = files.iter().map(|f| f.relative.to_string()).collect();
        assert_eq!(relative, ["a/b.txt", "c.txt"]);
        assert_eq!(files[1].absolute, PathBuf::from("/tpl/c.txt"));
    }

    #[test]
    fn filter_keeps_matching_files_in_any_directory() {
        let fs = filesystem_with(&["nested/EntitySchema.ts", "nested/EntityView.ts", "EntitySchema.ts"]);
        let filter = FilterSet::from_patterns(["Schema.*"]).unwrap();
        let files = TreeScanner::new(&fs).scan(Path::new("/tpl"), &filter).unwrap();

        let relative: Vec<_> = files.iter().map(|f| f.relative.to_string()).collect();
        assert_eq!(relative, ["nested/EntitySchema.ts", "EntitySchema.ts"]);
    }

    #[test]
    fn missing_root_is_source_not_found() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().returning(|_| false);
        fs.expect_walk_files().never();

        let err = TreeScanner::new(&fs)
            .scan(Path::new("/missing"), &FilterSet::new())
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::DeviError::Application(ApplicationError::SourceNotFound { .. })
        ));
    }
}
