pub mod job;

pub use job::{GenerationEntry, GenerationJob, TemplateFile};
