//! Implementation of the `devi add` command.
//!
//! Resolves the project, its settings and the template set, then hands the
//! whole invocation to [`AddDomainService`].

use serde_json::{Map, Value};
use tracing::{debug, instrument};

use devi_adapters::{TemplateSetLoader, load_project_settings};
use devi_core::{
    application::{AddDomainRequest, AddDomainService},
    domain::DomainName,
    error::DeviError,
};

use crate::{
    cli::AddArgs,
    commands::{build_service, print_reports},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    prompt::select_prompt,
};

/// Format of the timestamp in generated migration names.
const MIGRATION_TIMESTAMP: &str = "%Y_%m_%d_%H%M%S";

#[instrument(skip_all, fields(domain = %args.domain))]
pub fn execute(args: AddArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let domain = DomainName::parse(&args.domain).map_err(DeviError::from)?;
    let parameters = parameters(&args)?;

    let project_root = match &args.project {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };
    let settings = load_project_settings(&project_root)?;

    let template_name = args
        .template
        .clone()
        .or_else(|| settings.template.clone())
        .unwrap_or_else(|| config.templates.default.clone());
    let templates_dir = args.templates.clone().unwrap_or_else(|| config.templates_dir());
    let template_set = TemplateSetLoader::new(&templates_dir).load(&template_name)?;
    debug!(template = %template_set.name, root = %template_set.root.display(), "Template set loaded");

    let request = AddDomainRequest {
        domain,
        parameters,
        settings,
        layout: template_set.layout,
        template_root: template_set.root,
        project_root: project_root.clone(),
        timestamp: chrono::Local::now().format(MIGRATION_TIMESTAMP).to_string(),
        override_all: args.override_all,
        dry_run: args.dry_run,
    };

    let generation = build_service(
        &config,
        config.templates.engine,
        false,
        select_prompt(args.yes),
    );
    let reports = AddDomainService::new(generation).add(&request)?;

    if reports.is_empty() {
        output.warning(&format!(
            "Nothing to generate: set front.type or back.type in {}",
            devi_adapters::settings_path(&project_root).display()
        ))?;
        return Ok(());
    }

    print_reports(&reports, &output)?;
    if args.dry_run {
        output.info("Dry run: no files were written")?;
    } else {
        output.success(&format!("Domain '{}' added", args.domain.trim()))?;
    }
    Ok(())
}

/// The free-form `parameters` bag: `builtin`, `array` and every `--param`.
fn parameters(args: &AddArgs) -> CliResult<Map<String, Value>> {
    let mut map = Map::new();
    map.insert("builtin".into(), Value::Bool(args.builtin));
    map.insert("array".into(), Value::Bool(args.array));

    for param in &args.params {
        let (key, value) = param
            .split_once('=')
            .map(|(k, v)| (k.trim(), v))
            .filter(|(k, _)| !k.is_empty())
            .ok_or_else(|| {
                CliError::invalid_input(format!("Expected KEY=VALUE, got '{param}'"))
            })?;
        map.insert(key.to_owned(), parse_value(value));
    }
    Ok(map)
}

fn parse_value(raw: &str) -> Value {
    match raw.parse::<bool>() {
        Ok(b) => Value::Bool(b),
        Err(_) => Value::String(raw.to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(params: &[&str]) -> AddArgs {
        AddArgs {
            domain: "admin.customer".into(),
            override_all: false,
            template: None,
            builtin: true,
            array: false,
            params: params.iter().map(|p| p.to_string()).collect(),
            project: None,
            templates: None,
            dry_run: false,
            yes: true,
        }
    }

    #[test]
    fn flags_become_parameters() {
        let map = parameters(&args(&[])).unwrap();
        assert_eq!(map["builtin"], Value::Bool(true));
        assert_eq!(map["array"], Value::Bool(false));
    }

    #[test]
    fn params_parse_booleans_and_strings() {
        let map = parameters(&args(&["readonly=true", "icon = people", "label=a=b"])).unwrap();
        assert_eq!(map["readonly"], Value::Bool(true));
        assert_eq!(map["icon"], Value::String(" people".into()));
        assert_eq!(map["label"], Value::String("a=b".into()));
    }

    #[test]
    fn param_without_equals_is_invalid_input() {
        let err = parameters(&args(&["readonly"])).unwrap_err();
        assert!(matches!(err, CliError::InvalidInput { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn param_with_empty_key_is_invalid_input() {
        assert!(parameters(&args(&["=x"])).is_err());
    }
}
