// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reports carry them per file)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid domain '{input}': {reason}")]
    InvalidDomain { input: String, reason: String },

    #[error("Invalid filter pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Resolved target path '{path}' escapes the target root")]
    InvalidTargetPath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Invalid substitution '{input}': expected KEY=VALUE")]
    InvalidSubstitution { input: String },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("Invalid template layout: {0}")]
    InvalidLayout(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidDomain { input, .. } => vec![
                format!("'{}' is not a valid domain", input),
                "Use at least two dot-separated fragments: <domain>.<entity>".into(),
                "Example: devi add admin.customer-order".into(),
            ],
            Self::InvalidPattern { pattern, reason } => vec![
                format!("The filter '{}' is not a valid regular expression", pattern),
                format!("Details: {}", reason),
            ],
            Self::InvalidTargetPath { path } | Self::AbsolutePathNotAllowed { path } => vec![
                format!("Template file name resolves to '{}'", path),
                "Check the substitution values used in file names".into(),
                "Values must not contain '..' or start with '/'".into(),
            ],
            Self::InvalidSubstitution { .. } => vec![
                "Pass substitutions as KEY=VALUE".into(),
                "Example: --set name=World".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidDomain { .. }
            | Self::InvalidPattern { .. }
            | Self::InvalidSubstitution { .. }
            | Self::MissingRequiredField { .. } => ErrorCategory::Validation,
            Self::InvalidTargetPath { .. } | Self::AbsolutePathNotAllowed { .. } => {
                ErrorCategory::Validation
            }
            Self::InvalidLayout(_) => ErrorCategory::Configuration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    Internal,
}
