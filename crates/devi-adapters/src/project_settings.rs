//! Reads `.devitools.json` from a project root.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use devi_core::{
    application::ApplicationError,
    domain::{ProjectSettings, SETTINGS_FILE},
    error::DeviResult,
};
use tracing::{debug, instrument};

/// Location of the settings file for `project_root`.
pub fn settings_path(project_root: &Path) -> PathBuf {
    project_root.join(SETTINGS_FILE)
}

/// Load and parse the project settings.
///
/// # Errors
///
/// `SettingsNotFound` when the file is missing, `InvalidSettings` when it is
/// not valid JSON for [`ProjectSettings`].
#[instrument(skip_all, fields(root = %project_root.display()))]
pub fn load_project_settings(project_root: &Path) -> DeviResult<ProjectSettings> {
    let path = settings_path(project_root);
    let raw = fs::read_to_string(&path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ApplicationError::SettingsNotFound { path: path.clone() },
        _ => ApplicationError::InvalidSettings {
            path: path.clone(),
            reason: e.to_string(),
        },
    })?;

    let settings: ProjectSettings =
        serde_json::from_str(&raw).map_err(|e| ApplicationError::InvalidSettings {
            path: path.clone(),
            reason: e.to_string(),
        })?;

    debug!(
        front = ?settings.front.selected_kind(),
        back = ?settings.back.selected_kind(),
        lang = ?settings.lang,
        "Loaded project settings"
    );
    Ok(settings)
}
