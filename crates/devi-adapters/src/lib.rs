//! Infrastructure adapters for devi.
//!
//! This crate implements the ports defined in `devi_core::application::ports`
//! and reads the on-disk inputs of a generation run (project settings and
//! template sets). It contains all I/O.

pub mod filesystem;
pub mod project_settings;
pub mod renderer;
pub mod template_loader;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use project_settings::{load_project_settings, settings_path};
pub use renderer::{HandlebarsRenderer, SimpleRenderer};
pub use template_loader::{TemplateSet, TemplateSetLoader};
