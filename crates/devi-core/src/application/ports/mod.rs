//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `devi-adapters` and `devi-cli`
//! implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: template discovery, reads and writes
//!   - `TemplateRenderer`: content rendering
//!   - `Prompt`: overwrite confirmation and metadata questions

pub mod output;

pub use output::{Filesystem, Prompt, TemplateRenderer};

#[cfg(test)]
pub use output::{MockFilesystem, MockPrompt, MockTemplateRenderer};
