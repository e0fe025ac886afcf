//! devi core - template-driven code generation.
//!
//! This crate provides the domain and application layers of the devi
//! generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             devi-cli (CLI)              │
//! │   (arguments, config, prompts, output)  │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │          Application Services           │
//! │ (GenerationService, AddDomainService)   │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Application Ports (Traits)       │
//! │    (Filesystem, TemplateRenderer,       │
//! │     Prompt)                             │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     devi-adapters (Infrastructure)      │
//! │ (LocalFilesystem, HandlebarsRenderer)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (SubstitutionMap, PathResolver, Filter, │
//! │  ConflictPolicy, EscapeMarkers)         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use devi_core::prelude::*;
//!
//! let job = GenerationJob::new(
//!     "greeting",
//!     "templates/greeting",
//!     "out",
//!     SubstitutionMap::named().with("name", "World"),
//! );
//!
//! // adapters come from devi-adapters or the CLI
//! let service = GenerationService::new(filesystem, renderer, prompt);
//! let report = service.generate(&job)?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

/// Public API - what external crates should use.
pub mod prelude {
    pub use crate::application::{
        AddDomainRequest, AddDomainService, FailurePolicy, FileOutcome, GenerationReport,
        GenerationService,
        ports::{Filesystem, Prompt, TemplateRenderer},
    };
    pub use crate::domain::{
        ConflictPolicy, Delimiter, DomainName, EscapeMarkers, FilterSet, GenerationEntry,
        GenerationJob, PathResolver, ProjectSettings, RelativePath, SubstitutionMap,
        TemplateLayout,
    };
    pub use crate::error::{DeviError, DeviResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
