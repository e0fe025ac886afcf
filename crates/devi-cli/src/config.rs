//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `DEVI__TEMPLATES__ENGINE=plain`
//! 3. Local `.devi.toml` in the current directory
//! 4. Config file (`--config` or the platform config directory)
//! 5. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use devi_core::domain::{Delimiter, EscapeMarkers};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cli::Engine;
use crate::error::{CliError, CliResult};

/// File name of the per-directory configuration.
pub const LOCAL_CONFIG_FILE: &str = ".devi.toml";

const ENV_PREFIX: &str = "DEVI";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where template sets live and how they are rendered.
    pub templates: TemplateConfig,
    /// Job behaviour.
    pub generation: GenerationConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory containing template sets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Template set used when neither `--template` nor the project names one.
    pub default: String,
    pub engine: Engine,
    pub delimiter: DelimiterConfig,
    /// Literal rewrites applied after rendering, in order.
    pub markers: Vec<MarkerRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelimiterConfig {
    pub open: String,
    pub close: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerRule {
    pub marker: String,
    pub replacement: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Record render failures instead of aborting the job.
    pub continue_on_error: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            path: None,
            default: "default".into(),
            engine: Engine::default(),
            delimiter: DelimiterConfig::default(),
            markers: EscapeMarkers::default()
                .pairs()
                .iter()
                .map(|(marker, replacement)| MarkerRule {
                    marker: marker.clone(),
                    replacement: replacement.clone(),
                })
                .collect(),
        }
    }
}

impl Default for DelimiterConfig {
    fn default() -> Self {
        Self {
            open: "{{".into(),
            close: "}}".into(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "human".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration, starting from defaults.
    ///
    /// `config_file` is the path passed via `--config`; `None` uses
    /// [`Self::config_path`]. Missing files are not an error.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let global = config_file.cloned().unwrap_or_else(Self::config_path);
        debug!(path = %global.display(), "Loading configuration");

        let config = Config::builder()
            .add_source(File::from(global).format(FileFormat::Toml).required(false))
            .add_source(
                File::from(PathBuf::from(LOCAL_CONFIG_FILE))
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app_config: AppConfig = config.try_deserialize()?;
        app_config.validate()?;
        Ok(app_config)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.devi.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("io", "devitools", "devi")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// Directory holding template sets: the configured one, else the
    /// platform data directory.
    pub fn templates_dir(&self) -> PathBuf {
        self.templates.path.clone().unwrap_or_else(|| {
            directories::ProjectDirs::from("io", "devitools", "devi")
                .map(|d| d.data_dir().join("templates"))
                .unwrap_or_else(|| PathBuf::from("templates"))
        })
    }

    pub fn delimiter(&self) -> Delimiter {
        let DelimiterConfig { open, close } = &self.templates.delimiter;
        if open == "{{" && close == "}}" {
            Delimiter::double_brace()
        } else {
            Delimiter::wrapped(open.as_str(), close.as_str())
        }
    }

    pub fn markers(&self) -> EscapeMarkers {
        EscapeMarkers::from_pairs(
            self.templates
                .markers
                .iter()
                .map(|rule| (rule.marker.as_str(), rule.replacement.as_str())),
        )
    }

    fn validate(&self) -> anyhow::Result<()> {
        let DelimiterConfig { open, close } = &self.templates.delimiter;
        if open.is_empty() || close.is_empty() {
            anyhow::bail!("templates.delimiter.open and templates.delimiter.close must not be empty");
        }
        if self.templates.default.trim().is_empty() {
            anyhow::bail!("templates.default must not be empty");
        }
        Ok(())
    }

    /// Set a dotted `key` in the TOML file at `path` and write it back.
    ///
    /// The value is stored as a boolean or integer when it parses as one. The
    /// updated file must still deserialize into an [`AppConfig`].
    pub fn set_value(path: &Path, key: &str, value: &str) -> CliResult<()> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => {
                return Err(CliError::IoError {
                    message: format!("Failed to read config '{}'", path.display()),
                    source: e,
                });
            }
        };

        let mut document: toml::Table = toml::from_str(&raw).map_err(|e| CliError::ConfigError {
            message: format!("Failed to parse '{}': {e}", path.display()),
            source: Some(Box::new(e)),
        })?;
        insert_dotted(&mut document, key, parse_scalar(value))?;

        let updated = toml::to_string_pretty(&document).map_err(|e| CliError::ConfigError {
            message: format!("Failed to serialise config: {e}"),
            source: Some(Box::new(e)),
        })?;
        toml::from_str::<AppConfig>(&updated).map_err(|e| CliError::ConfigError {
            message: format!("Invalid value for '{key}': {e}"),
            source: Some(Box::new(e)),
        })?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| CliError::IoError {
                message: format!("Failed to create config directory '{}'", parent.display()),
                source: e,
            })?;
        }
        std::fs::write(path, updated).map_err(|e| CliError::IoError {
            message: format!("Failed to write config to '{}'", path.display()),
            source: e,
        })
    }
}

fn parse_scalar(value: &str) -> toml::Value {
    if let Ok(b) = value.parse::<bool>() {
        toml::Value::Boolean(b)
    } else if let Ok(i) = value.parse::<i64>() {
        toml::Value::Integer(i)
    } else {
        toml::Value::String(value.to_owned())
    }
}

fn insert_dotted(table: &mut toml::Table, key: &str, value: toml::Value) -> CliResult<()> {
    let invalid = || CliError::ConfigError {
        message: format!("Invalid config key: '{key}'"),
        source: None,
    };

    let mut parts: Vec<&str> = key.split('.').collect();
    let leaf = parts.pop().filter(|p| !p.is_empty()).ok_or_else(invalid)?;

    let mut current = table;
    for part in parts {
        if part.is_empty() {
            return Err(invalid());
        }
        current = current
            .entry(part)
            .or_insert_with(|| toml::Value::Table(toml::Table::new()))
            .as_table_mut()
            .ok_or_else(invalid)?;
    }
    current.insert(leaf.to_owned(), value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn default_engine_is_handlebars() {
        assert_eq!(AppConfig::default().templates.engine, Engine::Handlebars);
    }

    #[test]
    fn default_no_color_is_false() {
        assert!(!AppConfig::default().output.no_color);
    }

    #[test]
    fn default_markers_rewrite_php_tags() {
        let markers = AppConfig::default().markers();
        assert_eq!(markers.apply("[?php] [?]"), "<?php <?");
    }

    #[test]
    fn load_missing_file_returns_defaults() {
        let temp = TempDir::new().unwrap();
        let cfg = AppConfig::load(Some(&temp.path().join("absent.toml"))).unwrap();
        assert_eq!(cfg.templates.default, "default");
    }

    #[test]
    fn load_reads_partial_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            "[templates]\nengine = \"plain\"\n\n[templates.delimiter]\nopen = \"[[\"\nclose = \"]]\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();

        assert_eq!(cfg.templates.engine, Engine::Plain);
        assert_eq!(cfg.templates.default, "default");
        assert_eq!(
            cfg.delimiter().substitute("[[x]]", &devi_core::domain::SubstitutionMap::named().with("x", "1")),
            "1"
        );
    }

    #[test]
    fn set_value_creates_nested_keys() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/config.toml");

        AppConfig::set_value(&path, "generation.continue_on_error", "true").unwrap();
        AppConfig::set_value(&path, "templates.default", "vue").unwrap();

        let cfg: AppConfig = toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(cfg.generation.continue_on_error);
        assert_eq!(cfg.templates.default, "vue");
    }

    #[test]
    fn set_value_rejects_wrong_type() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        let err = AppConfig::set_value(&path, "templates.engine", "jinja").unwrap_err();
        assert!(matches!(err, CliError::ConfigError { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
