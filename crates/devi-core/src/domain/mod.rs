//! Core domain layer for devi.
//!
//! Pure generation rules: how tokens are written and replaced, how template
//! paths map to target paths, which files a filter keeps, and when an existing
//! file may be overwritten. All I/O goes through ports defined in the
//! application layer.
//!
//! - **No I/O**: no filesystem or prompt calls
//! - **Immutable values**: jobs snapshot their substitutions
//! - **Strategy, not inheritance**: the token delimiter is a value

pub mod common;
pub mod conflict;
pub mod delimiter;
pub mod domain_name;
pub mod entities;
pub mod error;
pub mod filter;
pub mod markers;
pub mod naming;
pub mod path_resolver;
pub mod settings;
pub mod substitution;

pub use common::RelativePath;
pub use conflict::{AFFIRMATIVE, ConflictPolicy, Decision};
pub use delimiter::{Delimiter, PatternFactory};
pub use domain_name::DomainName;
pub use entities::{GenerationEntry, GenerationJob, TemplateFile};
pub use error::{DomainError, ErrorCategory};
pub use filter::FilterSet;
pub use markers::EscapeMarkers;
pub use path_resolver::{PathResolver, unbracket_extension};
pub use settings::{
    BackLayout, BackSettings, FrontLayout, FrontSettings, ProjectSettings, SETTINGS_FILE,
    TemplateLayout,
};
pub use substitution::SubstitutionMap;
