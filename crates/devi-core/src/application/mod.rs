//! Application layer for devi.
//!
//! This layer contains:
//! - **Services**: use case orchestration (`GenerationService`, `AddDomainService`)
//! - **Ports**: interface definitions (traits) for external dependencies
//! - **Reports**: per-file outcomes of a job
//! - **Errors**: application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! generation rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod report;
pub mod services;

pub use services::{
    AddDomainRequest, AddDomainService, FailurePolicy, GenerationService, TreeScanner,
};

pub use ports::{Filesystem, Prompt, TemplateRenderer};

pub use error::ApplicationError;
pub use report::{FileOutcome, FileReport, GenerationReport};
