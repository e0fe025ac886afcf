//! Generation jobs and the entries they produce.

use std::fmt;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::domain::{FilterSet, RelativePath, SubstitutionMap};

/// One (source root, target root, substitutions, filter) unit of work.
///
/// The substitution map is a snapshot: later changes by the caller never
/// affect a job already built.
#[derive(Debug, Clone)]
pub struct GenerationJob {
    pub id: Uuid,
    pub label: String,
    pub source_root: PathBuf,
    pub target_root: PathBuf,
    pub substitutions: SubstitutionMap,
    pub filter: FilterSet,
    pub override_all: bool,
}

impl GenerationJob {
    pub fn new(
        label: impl Into<String>,
        source_root: impl Into<PathBuf>,
        target_root: impl Into<PathBuf>,
        substitutions: SubstitutionMap,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: label.into(),
            source_root: source_root.into(),
            target_root: target_root.into(),
            substitutions,
            filter: FilterSet::new(),
            override_all: false,
        }
    }

    pub fn with_filter(mut self, filter: FilterSet) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_override_all(mut self, override_all: bool) -> Self {
        self.override_all = override_all;
        self
    }
}

/// A file found by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    pub absolute: PathBuf,
    pub relative: RelativePath,
}

/// Where one template file goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationEntry {
    pub source: RelativePath,
    pub target: RelativePath,
}

impl GenerationEntry {
    pub fn target_in(&self, target_root: &Path) -> PathBuf {
        target_root.join(self.target.as_path())
    }
}

impl fmt::Display for GenerationEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}
