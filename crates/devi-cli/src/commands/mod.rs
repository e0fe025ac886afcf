//! Command handlers, one module per subcommand.
//!
//! Handlers translate arguments into core requests and print the results.
//! No generation logic lives here.

pub mod add;
pub mod completions;
pub mod config;
pub mod generate;
pub mod init;
pub mod list;

use devi_adapters::{HandlebarsRenderer, LocalFilesystem, SimpleRenderer};
use devi_core::application::{
    FailurePolicy, GenerationReport, GenerationService, Prompt, TemplateRenderer,
};
use tracing::debug;

use crate::{
    cli::Engine,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Wire a [`GenerationService`] against the local filesystem.
///
/// Path tokens and content tokens share the configured delimiter.
pub(crate) fn build_service(
    config: &AppConfig,
    engine: Engine,
    continue_on_error: bool,
    prompt: Box<dyn Prompt>,
) -> GenerationService {
    let delimiter = config.delimiter();
    let markers = config.markers();

    let renderer: Box<dyn TemplateRenderer> = match engine {
        Engine::Handlebars => Box::new(
            HandlebarsRenderer::new()
                .with_delimiter(delimiter.clone())
                .with_markers(markers),
        ),
        Engine::Plain => Box::new(
            SimpleRenderer::new()
                .with_delimiter(delimiter.clone())
                .with_markers(markers),
        ),
    };

    let policy = if continue_on_error || config.generation.continue_on_error {
        FailurePolicy::Continue
    } else {
        FailurePolicy::AbortJob
    };
    debug!(%engine, ?policy, "Generation service configured");

    GenerationService::new(Box::new(LocalFilesystem::new()), renderer, prompt)
        .with_delimiter(delimiter)
        .with_failure_policy(policy)
}

/// Print every report and fail when any file could not be generated.
pub(crate) fn print_reports(reports: &[GenerationReport], output: &OutputManager) -> CliResult<()> {
    for report in reports {
        output.report(report)?;
    }

    let failed: usize = reports.iter().map(|r| r.failures().count()).sum();
    if failed > 0 {
        return Err(CliError::IncompleteGeneration { failed });
    }
    Ok(())
}
