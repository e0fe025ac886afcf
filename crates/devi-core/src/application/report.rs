//! Per-file results of a generation job.

use std::path::PathBuf;

use uuid::Uuid;

use crate::domain::GenerationEntry;
use crate::error::DeviError;

#[derive(Debug, Clone)]
pub enum FileOutcome {
    Written,
    /// The user declined to overwrite an existing file.
    Skipped,
    Failed(DeviError),
    /// Dry run: would have been generated.
    Planned,
}

#[derive(Debug, Clone)]
pub struct FileReport {
    pub entry: GenerationEntry,
    pub outcome: FileOutcome,
}

#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub job_id: Uuid,
    pub label: String,
    pub target_root: PathBuf,
    pub files: Vec<FileReport>,
}

impl GenerationReport {
    pub fn new(job_id: Uuid, label: impl Into<String>, target_root: impl Into<PathBuf>) -> Self {
        Self {
            job_id,
            label: label.into(),
            target_root: target_root.into(),
            files: Vec::new(),
        }
    }

    pub fn record(&mut self, entry: GenerationEntry, outcome: FileOutcome) {
        self.files.push(FileReport { entry, outcome });
    }

    pub fn written(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Written))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Skipped))
    }

    pub fn planned(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Planned))
    }

    pub fn failures(&self) -> impl Iterator<Item = (&GenerationEntry, &DeviError)> {
        self.files.iter().filter_map(|f| match &f.outcome {
            FileOutcome::Failed(e) => Some((&f.entry, e)),
            _ => None,
        })
    }

    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.files.iter().filter(|f| pred(&f.outcome)).count()
    }
}
