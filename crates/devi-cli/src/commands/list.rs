//! Implementation of the `devi list` command.

use devi_adapters::{TemplateSet, TemplateSetLoader};

use crate::{
    cli::{ListArgs, ListFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let templates_dir = args.templates.unwrap_or_else(|| config.templates_dir());
    let sets = TemplateSetLoader::new(&templates_dir).load_all()?;

    match args.format {
        ListFormat::Table => {
            if sets.is_empty() {
                output.warning(&format!(
                    "No template sets found in {}",
                    templates_dir.display()
                ))?;
                return Ok(());
            }
            output.header(&format!("Template sets in {}:", templates_dir.display()))?;
            for set in &sets {
                output.print(&table_row(set, &config.templates.default))?;
            }
        }

        ListFormat::Json => {
            // stdout directly: JSON must stay parseable under --quiet and in pipes
            let json = serde_json::to_string_pretty(&sets).map_err(|e| CliError::IoError {
                message: format!("Failed to serialise template sets: {e}"),
                source: e.into(),
            })?;
            println!("{json}");
        }

        ListFormat::List => {
            for set in &sets {
                println!("{}", set.name);
            }
        }
    }

    Ok(())
}

fn table_row(set: &TemplateSet, default: &str) -> String {
    let marker = if set.name == default { "*" } else { " " };
    let kinds = |kinds: &[String]| {
        if kinds.is_empty() {
            "-".to_owned()
        } else {
            kinds.join(", ")
        }
    };

    let mut row = format!(
        "{marker} {:<16} front: {:<16} back: {}",
        set.name,
        kinds(&set.front_kinds),
        kinds(&set.back_kinds)
    );
    if let Some(description) = set.description.as_deref().or(set.display_name.as_deref()) {
        row.push_str(&format!("  ({description})"));
    }
    row
}
