use std::fmt;
use std::path::{Component, Path, PathBuf};

use super::DomainError;

/// A filesystem path guaranteed to stay **inside** the root it is joined to.
///
/// Invariant: never absolute, never contains `..`. Enforced at construction.
/// Resolved target paths are built from user-supplied substitution values, so
/// this is what keeps generation from writing outside the target root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Fallible constructor.
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        if path.is_absolute() || path.has_root() {
            return Err(DomainError::AbsolutePathNotAllowed {
                path: path.display().to_string(),
            });
        }
        if path.components().any(|c| matches!(c, Component::ParentDir)) {
            return Err(DomainError::InvalidTargetPath {
                path: path.display().to_string(),
            });
        }
        Ok(Self(path))
    }

    /// Relative path of `path` below `root`, using the components as found on disk.
    pub fn strip_root(path: &Path, root: &Path) -> Result<Self, DomainError> {
        let relative = path
            .strip_prefix(root)
            .map_err(|_| DomainError::InvalidTargetPath {
                path: path.display().to_string(),
            })?;
        Self::try_new(relative)
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// `/`-separated form, stable across platforms.
    ///
    /// Filter patterns and prompt messages use this form.
    pub fn to_slash_string(&self) -> String {
        self.0
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_slash_string())
    }
}
