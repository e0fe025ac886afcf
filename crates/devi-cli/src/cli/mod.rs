//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No generation logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "devi",
    bin_name = "devi",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Template-driven domain scaffolding",
    long_about = "devi generates frontend and backend code for a domain entity \
                  from a set of template trees.",
    after_help = "EXAMPLES:\n\
        \x20 devi add admin.customer\n\
        \x20 devi add sales.order --template default --builtin\n\
        \x20 devi generate ./templates/greeting ./out --set name=World\n\
        \x20 devi list\n\
        \x20 devi completions bash > /usr/share/bash-completion/completions/devi",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate the code of one domain entity into the current project.
    #[command(
        visible_alias = "a",
        about = "Add a domain entity to the project",
        after_help = "EXAMPLES:\n\
            \x20 devi add admin.customer\n\
            \x20 devi add admin.sales.order --override\n\
            \x20 devi add general.country --builtin --param readonly=true"
    )]
    Add(AddArgs),

    /// Run a single generation job between two directories.
    #[command(
        visible_alias = "g",
        about = "Generate files from one template directory",
        after_help = "EXAMPLES:\n\
            \x20 devi generate ./tpl ./out --set name=World\n\
            \x20 devi generate ./tpl ./out --filter 'Schema.*' --dry-run"
    )]
    Generate(GenerateArgs),

    /// List available template sets.
    #[command(
        visible_alias = "ls",
        about = "List available template sets",
        after_help = "EXAMPLES:\n\
            \x20 devi list\n\
            \x20 devi list --format json\n\
            \x20 devi list --templates ./templates"
    )]
    List(ListArgs),

    /// Initialise a devi configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 devi init           # default location\n\
            \x20 devi init --local   # .devi.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 devi completions bash > ~/.local/share/bash-completion/completions/devi\n\
            \x20 devi completions zsh  > ~/.zfunc/_devi\n\
            \x20 devi completions fish > ~/.config/fish/completions/devi.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the devi configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 devi config get templates.default\n\
            \x20 devi config set templates.engine plain\n\
            \x20 devi config list"
    )]
    Config(ConfigCommands),
}

// ── add ───────────────────────────────────────────────────────────────────────

/// Arguments for `devi add`.
#[derive(Debug, Args)]
pub struct AddArgs {
    /// Dotted `<domain>.<entity>`, e.g. `admin.customer-order`.
    #[arg(value_name = "DOMAIN", help = "Domain and entity, e.g. admin.customer")]
    pub domain: String,

    /// Overwrite existing files without asking.
    #[arg(short = 'o', long = "override", help = "Overwrite existing files")]
    pub override_all: bool,

    /// Template set name.
    #[arg(
        short = 't',
        long = "template",
        value_name = "NAME",
        help = "Template set (default: project setting, then config)"
    )]
    pub template: Option<String>,

    /// Generate only the schema and settings of a built-in entity.
    #[arg(long = "builtin", help = "Frontend schema and settings only")]
    pub builtin: bool,

    /// Generate only the schema and settings of an array entity.
    #[arg(long = "array", help = "Frontend schema and settings only, array entity")]
    pub array: bool,

    /// Extra template parameters.
    #[arg(
        long = "param",
        value_name = "KEY=VALUE",
        help = "Extra template parameter (repeatable)"
    )]
    pub params: Vec<String>,

    /// Project root holding `.devitools.json`.
    #[arg(long = "project", value_name = "DIR", help = "Project root (default: CWD)")]
    pub project: Option<PathBuf>,

    /// Directory containing template sets.
    #[arg(long = "templates", value_name = "DIR", help = "Template sets directory")]
    pub templates: Option<PathBuf>,

    /// List what would be generated without writing.
    #[arg(long = "dry-run", help = "Show what would be generated")]
    pub dry_run: bool,

    /// Accept every default answer without asking.
    #[arg(short = 'y', long = "yes", help = "Accept default answers")]
    pub yes: bool,
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `devi generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Template directory.
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Output directory.
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Substitution value.
    #[arg(
        short = 's',
        long = "set",
        value_name = "KEY=VALUE",
        help = "Substitution (repeatable)"
    )]
    pub set: Vec<String>,

    /// Inclusion pattern; files matching none are skipped.
    #[arg(
        short = 'f',
        long = "filter",
        value_name = "REGEX",
        help = "Keep only files matching a pattern (repeatable)"
    )]
    pub filter: Vec<String>,

    /// Overwrite existing files without asking.
    #[arg(short = 'o', long = "override", help = "Overwrite existing files")]
    pub override_all: bool,

    /// List what would be generated without writing.
    #[arg(long = "dry-run", help = "Show what would be generated")]
    pub dry_run: bool,

    /// Keep going after a file fails to render.
    #[arg(long = "continue-on-error", help = "Record render failures and continue")]
    pub continue_on_error: bool,

    /// Content engine, overriding the configuration.
    #[arg(long = "engine", value_enum, help = "Content engine")]
    pub engine: Option<Engine>,

    /// Accept every default answer without asking.
    #[arg(short = 'y', long = "yes", help = "Accept default answers")]
    pub yes: bool,
}

/// How file contents are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// Token substitution, then Handlebars.
    #[default]
    Handlebars,
    /// Token substitution only.
    Plain,
}

impl std::fmt::Display for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Handlebars => write!(f, "handlebars"),
            Self::Plain => write!(f, "plain"),
        }
    }
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `devi list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Directory containing template sets.
    #[arg(long = "templates", value_name = "DIR", help = "Template sets directory")]
    pub templates: Option<PathBuf>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `devi init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.devi.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `devi completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `devi config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `templates.default`.
        key: String,
    },
    /// Set a configuration key to a value.
    Set {
        /// Dotted key path.
        key: String,
        /// New value.
        value: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
