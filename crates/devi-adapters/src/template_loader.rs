//! Filesystem-based template set loader.
//!
//! Each immediate subdirectory of the templates directory is one template
//! set. A set may carry a `template.toml` manifest describing it and
//! overriding where its sources live; without one the default layout applies.
//!
//! # Directory layout expected
//!
//! ```text
//! templates/
//! └── default/
//!     ├── template.toml          ← manifest (optional)
//!     ├── front/
//!     │   └── quasar/
//!     │       ├── source/domains/
//!     │       └── resources/views/
//!     ├── back/
//!     │   └── laravel/
//!     │       ├── Domains/
//!     │       ├── Http/Controllers/
//!     │       └── migrations/
//!     └── lang/
//! ```
//!
//! # `template.toml` format
//!
//! ```toml
//! [template]
//! name        = "Default"                 # optional display name
//! description = "Quasar + Laravel CRUD"   # optional
//!
//! [layout]                                 # optional, every key defaults
//! lang = "lang"
//!
//! [layout.front]
//! root    = "front"
//! domains = "source/domains"
//! views   = "resources/views"
//!
//! [layout.back]
//! root        = "back"
//! domains     = "Domains"
//! controllers = "Http/Controllers"
//! migrations  = "migrations"
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use devi_core::{
    application::ApplicationError,
    domain::TemplateLayout,
    error::{DeviError, DeviResult},
};

/// File name of the optional manifest inside a template set.
pub const MANIFEST_FILE: &str = "template.toml";

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised representation of a `template.toml` file.
#[derive(Debug, Default, Deserialize, Clone)]
#[serde(default)]
pub struct TemplateManifest {
    pub template: TemplateSection,
    pub layout: TemplateLayout,
}

/// `[template]` section - human-facing information.
#[derive(Debug, Default, Deserialize, Clone)]
#[serde(default)]
pub struct TemplateSection {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// One loaded template set.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateSet {
    /// Directory name, used with `--template`.
    pub name: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub root: PathBuf,
    #[serde(skip)]
    pub layout: TemplateLayout,
    /// Frontend kinds present under the front root (e.g. `quasar`).
    pub front_kinds: Vec<String>,
    /// Backend kinds present under the back root (e.g. `laravel`).
    pub back_kinds: Vec<String>,
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Loads [`TemplateSet`]s from a directory of template sets.
pub struct TemplateSetLoader {
    templates_dir: PathBuf,
}

impl TemplateSetLoader {
    /// Create a loader pointed at `templates_dir`.
    ///
    /// The directory does not need to exist yet; [`Self::load_all`] fails if
    /// it is missing when called.
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
        }
    }

    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    /// Load every template set, sorted by name.
    ///
    /// Sets whose manifest is malformed are skipped with a `WARN` log rather
    /// than failing the whole listing.
    #[instrument(skip(self), fields(dir = %self.templates_dir.display()))]
    pub fn load_all(&self) -> DeviResult<Vec<TemplateSet>> {
        if !self.templates_dir.is_dir() {
            return Err(ApplicationError::SourceNotFound {
                path: self.templates_dir.clone(),
            }
            .into());
        }

        let mut sets = Vec::new();
        for name in subdirectories(&self.templates_dir)? {
            match self.load(&name) {
                Ok(set) => sets.push(set),
                Err(e) => {
                    // one bad set must not hide the others
                    warn!(set = %name, error = %e, "Skipping template set");
                }
            }
        }

        debug!(count = sets.len(), "Finished loading template sets");
        Ok(sets)
    }

    /// Load one template set by directory name.
    ///
    /// # Errors
    ///
    /// `TemplateSetNotFound` when the directory is missing; a configuration
    /// error when `template.toml` is unreadable, malformed, or points outside
    /// the set.
    #[instrument(skip(self))]
    pub fn load(&self, name: &str) -> DeviResult<TemplateSet> {
        let root = self.templates_dir.join(name);
        if name.is_empty() || !root.is_dir() {
            return Err(ApplicationError::TemplateSetNotFound {
                name: name.to_owned(),
                path: root,
            }
            .into());
        }

        let manifest = read_manifest(&root)?;
        manifest.layout.validate()?;

        let layout = manifest.layout;
        let front_kinds = subdirectories(&root.join(&layout.front.root)).unwrap_or_default();
        let back_kinds = subdirectories(&root.join(&layout.back.root)).unwrap_or_default();

        debug!(?front_kinds, ?back_kinds, "Loaded template set");
        Ok(TemplateSet {
            name: name.to_owned(),
            display_name: manifest.template.name,
            description: manifest.template.description,
            root,
            layout,
            front_kinds,
            back_kinds,
        })
    }
}

fn read_manifest(root: &Path) -> DeviResult<TemplateManifest> {
    let path = root.join(MANIFEST_FILE);
    if !path.exists() {
        return Ok(TemplateManifest::default());
    }

    let raw = fs::read_to_string(&path).map_err(|e| DeviError::Configuration {
        message: format!("failed to read '{}': {e}", path.display()),
    })?;
    toml::from_str(&raw).map_err(|e| DeviError::Configuration {
        message: format!("failed to parse '{}': {e}", path.display()),
    })
}

/// Sorted names of the directories directly below `dir`.
fn subdirectories(dir: &Path) -> DeviResult<Vec<String>> {
    let read_dir = fs::read_dir(dir).map_err(|e| ApplicationError::FilesystemError {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut names: Vec<String> = read_dir
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_dir())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    Ok(names)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
