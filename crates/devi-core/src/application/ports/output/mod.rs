//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.

use std::path::{Path, PathBuf};

use crate::domain::SubstitutionMap;
use crate::error::DeviResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `devi_adapters::filesystem::LocalFilesystem` (production)
/// - `devi_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> DeviResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> DeviResult<()>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> DeviResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Every regular file below `root`, depth-first: each directory's
    /// subdirectories come before its own files.
    fn walk_files(&self, root: &Path) -> DeviResult<Vec<PathBuf>>;
}

/// Port for content rendering.
///
/// Implemented by:
/// - `devi_adapters::renderer::HandlebarsRenderer` (token pass + Handlebars)
/// - `devi_adapters::renderer::SimpleRenderer` (token pass only)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Render one file's content. Unknown tokens must survive unchanged.
    fn render(&self, content: &str, substitutions: &SubstitutionMap) -> DeviResult<String>;
}

/// Port for synchronous questions to the user.
///
/// Blocks until answered. Implementations return `default` when no answer
/// is available.
#[cfg_attr(test, mockall::automock)]
pub trait Prompt: Send + Sync {
    fn ask(&self, message: &str, default: &str) -> DeviResult<String>;
}
