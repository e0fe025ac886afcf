//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not business
//! rules. Business rule errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while running generation jobs.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Scan root is missing or not a directory.
    #[error("Template source not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// A discovered template file could not be read.
    #[error("Failed to read template {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    /// The templating pass failed for one file.
    #[error("Failed to render '{path}': {reason}")]
    TemplateRenderError { path: String, reason: String },

    /// Raised by renderer adapters, which do not know the file being rendered.
    /// The orchestrator rewraps it as [`Self::TemplateRenderError`].
    #[error("Template rendering failed: {reason}")]
    RenderingFailed { reason: String },

    /// Creating the parent directories or writing the file failed.
    #[error("Failed to write {path}: {reason}")]
    WriteError { path: PathBuf, reason: String },

    /// Any other filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The confirmation or metadata prompt could not be answered.
    #[error("Prompt failed: {reason}")]
    PromptFailed { reason: String },

    /// No template set with that name under the templates directory.
    #[error("Template set '{name}' not found in {path}")]
    TemplateSetNotFound { name: String, path: PathBuf },

    /// The project has no settings file.
    #[error("Project settings not found at {path}")]
    SettingsNotFound { path: PathBuf },

    /// The project settings file could not be parsed.
    #[error("Invalid project settings at {path}: {reason}")]
    InvalidSettings { path: PathBuf, reason: String },

    /// In-memory adapter lock was poisoned.
    #[error("Adapter state lock poisoned")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::SourceNotFound { path } => vec![
                format!("Template directory does not exist: {}", path.display()),
                "Check the --templates directory and the selected template".into(),
                "Try: devi list to see available templates".into(),
            ],
            Self::ReadError { path, .. } => vec![
                format!("Could not read: {}", path.display()),
                "Check that template files are readable UTF-8 text".into(),
            ],
            Self::TemplateRenderError { path, .. } => vec![
                format!("Template '{}' contains an invalid expression", path),
                "Check for unbalanced {{#if}} / {{/if}} blocks".into(),
                "Use --continue-on-error to generate the remaining files".into(),
            ],
            Self::WriteError { path, .. } | Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Check available disk space".into(),
            ],
            Self::TemplateSetNotFound { name, .. } => vec![
                format!("No template set named '{}'", name),
                "Try: devi list to see available templates".into(),
                "Or select one explicitly with --template".into(),
            ],
            Self::SettingsNotFound { path } => vec![
                format!("Expected a project settings file at {}", path.display()),
                "Run devi from the project root".into(),
                "Or point to the project with --project".into(),
            ],
            Self::InvalidSettings { reason, .. } => vec![
                format!("Settings could not be parsed: {}", reason),
                "Check the JSON syntax of .devitools.json".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::SourceNotFound { .. }
            | Self::TemplateSetNotFound { .. }
            | Self::SettingsNotFound { .. } => ErrorCategory::NotFound,
            Self::InvalidSettings { .. } => ErrorCategory::Configuration,
            Self::TemplateRenderError { .. } | Self::RenderingFailed { .. } => {
                ErrorCategory::Validation
            }
            Self::ReadError { .. }
            | Self::WriteError { .. }
            | Self::FilesystemError { .. }
            | Self::PromptFailed { .. }
            | Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
