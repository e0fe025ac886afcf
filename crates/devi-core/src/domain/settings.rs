//! Project settings (`.devitools.json`) and template set layout (`template.toml`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{DomainError, RelativePath};

/// File name of the per-project settings, looked up in the project root.
pub const SETTINGS_FILE: &str = ".devitools.json";

/// Where generated code lands inside a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, with = "one_or_many")]
    pub lang: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(default)]
    pub front: FrontSettings,
    #[serde(default)]
    pub back: BackSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontSettings {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub root: String,
    pub domains: String,
    pub views: String,
}

impl Default for FrontSettings {
    fn default() -> Self {
        Self {
            kind: None,
            root: "front".into(),
            domains: "src/domains".into(),
            views: "src/views".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackSettings {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub root: String,
    pub domains: String,
    pub controllers: String,
    pub migrations: String,
}

impl Default for BackSettings {
    fn default() -> Self {
        Self {
            kind: None,
            root: "back".into(),
            domains: "app/Domains".into(),
            controllers: "app/Http/Controllers".into(),
            migrations: "database/migrations".into(),
        }
    }
}

/// `front` / `back` kinds are only honoured when non-blank.
fn selected(kind: &Option<String>) -> Option<&str> {
    kind.as_deref().map(str::trim).filter(|k| !k.is_empty())
}

impl FrontSettings {
    pub fn selected_kind(&self) -> Option<&str> {
        selected(&self.kind)
    }

    pub fn domains_dir(&self, project_root: &Path) -> PathBuf {
        under(project_root, &[&self.root, &self.domains])
    }

    pub fn views_dir(&self, project_root: &Path) -> PathBuf {
        under(project_root, &[&self.root, &self.views])
    }
}

impl BackSettings {
    pub fn selected_kind(&self) -> Option<&str> {
        selected(&self.kind)
    }

    pub fn domains_dir(&self, project_root: &Path) -> PathBuf {
        under(project_root, &[&self.root, &self.domains])
    }

    pub fn controllers_dir(&self, project_root: &Path) -> PathBuf {
        under(project_root, &[&self.root, &self.controllers])
    }

    pub fn migrations_dir(&self, project_root: &Path) -> PathBuf {
        under(project_root, &[&self.root, &self.migrations])
    }
}

/// Join settings paths below `root`, ignoring their leading `/`.
fn under(root: &Path, parts: &[&str]) -> PathBuf {
    parts
        .iter()
        .map(|p| p.trim_start_matches(['/', '\\']))
        .filter(|p| !p.is_empty())
        .fold(root.to_path_buf(), |acc, p| acc.join(p))
}

/// Source directories inside one template set, relative to its root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateLayout {
    pub front: FrontLayout,
    pub back: BackLayout,
    pub lang: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontLayout {
    pub root: String,
    pub domains: String,
    pub views: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackLayout {
    pub root: String,
    pub domains: String,
    pub controllers: String,
    pub migrations: String,
}

impl Default for TemplateLayout {
    fn default() -> Self {
        Self {
            front: FrontLayout::default(),
            back: BackLayout::default(),
            lang: "lang".into(),
        }
    }
}

impl Default for FrontLayout {
    fn default() -> Self {
        Self {
            root: "front".into(),
            domains: "source/domains".into(),
            views: "resources/views".into(),
        }
    }
}

impl Default for BackLayout {
    fn default() -> Self {
        Self {
            root: "back".into(),
            domains: "Domains".into(),
            controllers: "Http/Controllers".into(),
            migrations: "migrations".into(),
        }
    }
}

impl TemplateLayout {
    /// Every entry must stay inside the template set.
    pub fn validate(&self) -> Result<(), DomainError> {
        let entries = [
            ("front.root", &self.front.root),
            ("front.domains", &self.front.domains),
            ("front.views", &self.front.views),
            ("back.root", &self.back.root),
            ("back.domains", &self.back.domains),
            ("back.controllers", &self.back.controllers),
            ("back.migrations", &self.back.migrations),
            ("lang", &self.lang),
        ];
        for (field, value) in entries {
            RelativePath::try_new(value.as_str())
                .map_err(|e| DomainError::InvalidLayout(format!("{field}: {e}")))?;
        }
        Ok(())
    }

    /// `<template>/front/<kind>`
    pub fn front_root(&self, template_root: &Path, kind: &str) -> PathBuf {
        template_root.join(&self.front.root).join(kind)
    }

    /// `<template>/back/<kind>`
    pub fn back_root(&self, template_root: &Path, kind: &str) -> PathBuf {
        template_root.join(&self.back.root).join(kind)
    }

    pub fn lang_root(&self, template_root: &Path) -> PathBuf {
        template_root.join(&self.lang)
    }
}

mod one_or_many {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        Ok(match OneOrMany::deserialize(deserializer)? {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        })
    }

    pub fn serialize<S: Serializer>(values: &[String], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_settings_with_single_lang() {
        let settings: ProjectSettings = serde_json::from_str(
            r#"{
                "name": "shop",
                "lang": "en",
                "template": "default",
                "front": { "type": "quasar", "root": "/front" },
                "back": { "type": "laravel" }
            }"#,
        )
        .unwrap();

        assert_eq!(settings.lang, ["en"]);
        assert_eq!(settings.front.selected_kind(), Some("quasar"));
        assert_eq!(settings.front.domains, "src/domains");
        assert_eq!(settings.back.selected_kind(), Some("laravel"));
    }

    #[test]
    fn parses_lang_list() {
        let settings: ProjectSettings =
            serde_json::from_str(r#"{ "lang": ["en", "pt-br"] }"#).unwrap();
        assert_eq!(settings.lang, ["en", "pt-br"]);
        assert_eq!(settings.front.selected_kind(), None);
    }

    #[test]
    fn blank_kind_is_not_selected() {
        let settings: ProjectSettings =
            serde_json::from_str(r#"{ "front": { "type": " " } }"#).unwrap();
        assert_eq!(settings.front.selected_kind(), None);
    }

    #[test]
    fn leading_slashes_are_ignored() {
        let front = FrontSettings {
            root: "/front".into(),
            domains: "/src/domains".into(),
            ..FrontSettings::default()
        };
        assert_eq!(
            front.domains_dir(Path::new("/project")),
            PathBuf::from("/project/front/src/domains")
        );
    }

    #[test]
    fn default_layout_is_valid() {
        assert!(TemplateLayout::default().validate().is_ok());
    }

    #[test]
    fn layout_rejects_escaping_entries() {
        let layout = TemplateLayout {
            lang: "../lang".into(),
            ..TemplateLayout::default()
        };
        assert!(matches!(layout.validate(), Err(DomainError::InvalidLayout(_))));
    }

    #[test]
    fn layout_roots() {
        let layout = TemplateLayout::default();
        assert_eq!(
            layout.front_root(Path::new("/tpl/default"), "quasar"),
            PathBuf::from("/tpl/default/front/quasar")
        );
        assert_eq!(
            layout.lang_root(Path::new("/tpl/default")),
            PathBuf::from("/tpl/default/lang")
        );
    }
}
