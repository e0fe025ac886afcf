//! Generation Service - drives one job through scan, resolve, render,
//! conflict resolution and write.
//!
//! Jobs are processed sequentially, one file at a time. Writes are not
//! transactional: an aborted job leaves the files it already wrote.

use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError, FileOutcome, GenerationReport,
        ports::{Filesystem, Prompt, TemplateRenderer},
        services::TreeScanner,
    },
    domain::{
        ConflictPolicy, Decision, Delimiter, GenerationEntry, GenerationJob, PathResolver,
        TemplateFile,
    },
    error::{DeviError, DeviResult},
};

/// What to do when a file fails to render.
///
/// Read errors always abort the job and write errors never do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop at the first render error.
    #[default]
    AbortJob,
    /// Record the failure in the report and move on.
    Continue,
}

/// Main generation service.
pub struct GenerationService {
    filesystem: Box<dyn Filesystem>,
    renderer: Box<dyn TemplateRenderer>,
    prompt: Box<dyn Prompt>,
    resolver: PathResolver,
    failure_policy: FailurePolicy,
}

impl GenerationService {
    /// Create a new generation service with the given adapters.
    ///
    /// Paths use the default `{{name}}` delimiter; see [`Self::with_delimiter`].
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        renderer: Box<dyn TemplateRenderer>,
        prompt: Box<dyn Prompt>,
    ) -> Self {
        Self {
            filesystem,
            renderer,
            prompt,
            resolver: PathResolver::default(),
            failure_policy: FailurePolicy::default(),
        }
    }

    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.resolver = PathResolver::new(delimiter);
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn delimiter(&self) -> &Delimiter {
        self.resolver.delimiter()
    }

    pub fn prompt(&self) -> &dyn Prompt {
        self.prompt.as_ref()
    }

    /// Entries the job would produce, without reading, rendering or writing.
    #[instrument(skip_all, fields(job = %job.label))]
    pub fn plan(&self, job: &GenerationJob) -> DeviResult<Vec<GenerationEntry>> {
        self.scan(job)?
            .into_iter()
            .map(|file| self.entry_for(&file, job))
            .collect()
    }

    /// [`Self::plan`] as a report whose files are all [`FileOutcome::Planned`].
    pub fn dry_run(&self, job: &GenerationJob) -> DeviResult<GenerationReport> {
        let mut report = GenerationReport::new(job.id, &job.label, &job.target_root);
        for entry in self.plan(job)? {
            report.record(entry, FileOutcome::Planned);
        }
        Ok(report)
    }

    /// Run one job.
    ///
    /// Returns `Err` for structural failures (missing source root, unreadable
    /// template, unresolvable path) and, under [`FailurePolicy::AbortJob`],
    /// for render failures. Everything else is recorded per file.
    #[instrument(
        skip_all,
        fields(
            job = %job.label,
            id = %job.id,
            source = %job.source_root.display(),
            target = %job.target_root.display()
        )
    )]
    pub fn generate(&self, job: &GenerationJob) -> DeviResult<GenerationReport> {
        let files = self.scan(job)?;
        let policy = ConflictPolicy::new(job.override_all);
        let mut report = GenerationReport::new(job.id, &job.label, &job.target_root);

        for file in files {
            let entry = self.entry_for(&file, job)?;
            let outcome = self.process(&file, &entry, job, &policy)?;
            match &outcome {
                FileOutcome::Written => debug!(file = %entry.target, "Written"),
                FileOutcome::Skipped => info!(file = %entry.target, "Skipped existing file"),
                FileOutcome::Failed(e) => warn!(file = %entry.target, error = %e, "File failed"),
                FileOutcome::Planned => {}
            }
            report.record(entry, outcome);
        }

        info!(
            written = report.written(),
            skipped = report.skipped(),
            failed = report.failures().count(),
            "Job completed"
        );
        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn scan(&self, job: &GenerationJob) -> DeviResult<Vec<TemplateFile>> {
        TreeScanner::new(self.filesystem.as_ref()).scan(&job.source_root, &job.filter)
    }

    fn entry_for(&self, file: &TemplateFile, job: &GenerationJob) -> DeviResult<GenerationEntry> {
        let target = self.resolver.resolve(&file.relative, &job.substitutions)?;
        Ok(GenerationEntry {
            source: file.relative.clone(),
            target,
        })
    }

    /// Read, render, decide and write one file.
    fn process(
        &self,
        file: &TemplateFile,
        entry: &GenerationEntry,
        job: &GenerationJob,
        policy: &ConflictPolicy,
    ) -> DeviResult<FileOutcome> {
        let content = self
            .filesystem
            .read_to_string(&file.absolute)
            .map_err(|e| ApplicationError::ReadError {
                path: file.absolute.clone(),
                reason: e.to_string(),
            })?;

        let rendered = match self.renderer.render(&content, &job.substitutions) {
            Ok(rendered) => rendered,
            Err(e) => {
                let err: DeviError = ApplicationError::TemplateRenderError {
                    path: entry.source.to_string(),
                    reason: render_reason(e),
                }
                .into();
                return match self.failure_policy {
                    FailurePolicy::AbortJob => Err(err),
                    FailurePolicy::Continue => Ok(FileOutcome::Failed(err)),
                };
            }
        };

        let target = entry.target_in(&job.target_root);
        let decision = policy.decide(
            &entry.target,
            || self.filesystem.exists(&target),
            |message, default| self.prompt.ask(message, default),
        )?;

        Ok(match decision {
            Decision::Skip => FileOutcome::Skipped,
            Decision::Write => match self.write(&target, &rendered) {
                Ok(()) => FileOutcome::Written,
                Err(e) => FileOutcome::Failed(e),
            },
        })
    }

    fn write(&self, target: &Path, content: &str) -> DeviResult<()> {
        let as_write_error = |e: DeviError| -> DeviError {
            ApplicationError::WriteError {
                path: target.to_path_buf(),
                reason: e.to_string(),
            }
            .into()
        };

        if let Some(parent) = target.parent() {
            self.filesystem
                .create_dir_all(parent)
                .map_err(as_write_error)?;
        }
        self.filesystem
            .write_file(target, content)
            .map_err(as_write_error)
    }
}

/// Renderer adapters report `RenderingFailed`; keep just its reason.
fn render_reason(err: DeviError) -> String {
    match err {
        DeviError::Application(ApplicationError::RenderingFailed { reason }) => reason,
        other => other.to_string(),
    }
}
