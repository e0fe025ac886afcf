//! Implementation of the `devi generate` command: one job, two directories.

use tracing::instrument;

use devi_core::{
    domain::{FilterSet, GenerationJob, SubstitutionMap},
    error::DeviError,
};

use crate::{
    cli::GenerateArgs,
    commands::{build_service, print_reports},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
    prompt::select_prompt,
};

#[instrument(skip_all, fields(source = %args.source.display(), target = %args.target.display()))]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let substitutions = SubstitutionMap::from_pairs(&args.set).map_err(DeviError::from)?;
    let filter = FilterSet::from_patterns(&args.filter).map_err(DeviError::from)?;

    let job = GenerationJob::new("generate", &args.source, &args.target, substitutions)
        .with_filter(filter)
        .with_override_all(args.override_all);

    let engine = args.engine.unwrap_or(config.templates.engine);
    let service = build_service(&config, engine, args.continue_on_error, select_prompt(args.yes));

    let report = if args.dry_run {
        service.dry_run(&job)?
    } else {
        service.generate(&job)?
    };

    if report.files.is_empty() {
        output.warning("No template files matched")?;
    }
    print_reports(std::slice::from_ref(&report), &output)
}
