//! Application services - orchestrate use cases.
//!
//! `GenerationService` runs a single job; `AddDomainService` builds and runs
//! the jobs of one `add` invocation.

pub mod add_domain_service;
pub mod generation_service;
pub mod scanner;

pub use add_domain_service::{AddDomainRequest, AddDomainService};
pub use generation_service::{FailurePolicy, GenerationService};
pub use scanner::TreeScanner;
