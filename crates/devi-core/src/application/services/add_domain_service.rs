//! Add Domain Service - the full `add` invocation.
//!
//! Builds the shared substitutions for a domain/entity pair, gathers the
//! metadata only the user knows, and runs the frontend and backend jobs in
//! order. Substitutions only grow between jobs: keys set for one job are
//! never removed for a later one.

use std::path::PathBuf;

use serde_json::{Map, Value};
use tracing::{info, instrument, warn};

use crate::{
    application::{GenerationReport, services::GenerationService},
    domain::{
        DomainName, FilterSet, GenerationJob, ProjectSettings, SubstitutionMap, TemplateLayout,
        naming,
    },
    error::DeviResult,
};

/// Everything the caller resolved before the first job runs.
#[derive(Debug, Clone)]
pub struct AddDomainRequest {
    pub domain: DomainName,
    /// Template-author flags (`builtin`, `array`, …).
    pub parameters: Map<String, Value>,
    pub settings: ProjectSettings,
    pub layout: TemplateLayout,
    /// Root of the selected template set.
    pub template_root: PathBuf,
    pub project_root: PathBuf,
    /// `%Y_%m_%d_%H%M%S`, used in migration file names.
    pub timestamp: String,
    pub override_all: bool,
    pub dry_run: bool,
}

pub struct AddDomainService {
    generation: GenerationService,
}

impl AddDomainService {
    pub fn new(generation: GenerationService) -> Self {
        Self { generation }
    }

    /// Run every job the project settings ask for.
    ///
    /// Returns one report per job, frontend jobs first. An empty result
    /// means neither `front.type` nor `back.type` is configured.
    #[instrument(skip_all, fields(domain = %request.domain))]
    pub fn add(&self, request: &AddDomainRequest) -> DeviResult<Vec<GenerationReport>> {
        let mut substitutions = request
            .domain
            .substitutions(Value::Object(request.parameters.clone()));
        let mut reports = Vec::new();

        if let Some(kind) = request.settings.front.selected_kind() {
            for job in self.front_jobs(request, kind, &mut substitutions)? {
                reports.push(self.run(&job, request.dry_run)?);
            }
        }

        if let Some(kind) = request.settings.back.selected_kind() {
            for job in self.back_jobs(request, kind, &mut substitutions)? {
                reports.push(self.run(&job, request.dry_run)?);
            }
        }

        if reports.is_empty() {
            warn!("Neither front.type nor back.type is set; nothing to generate");
        } else {
            info!(jobs = reports.len(), "Domain generated");
        }
        Ok(reports)
    }

    fn front_jobs(
        &self,
        request: &AddDomainRequest,
        kind: &str,
        substitutions: &mut SubstitutionMap,
    ) -> DeviResult<Vec<GenerationJob>> {
        let prompt = self.generation.prompt();
        let icon = prompt.ask("Icon used on the interface", "folder")?;
        substitutions.insert("entity.icon", non_empty_or(icon, "folder"));
        for (key, message) in [
            ("entity.plural", "Plural label"),
            ("entity.singular", "Singular label"),
        ] {
            let answer = prompt.ask(message, "")?;
            // an unanswered label keeps its token for manual completion
            if !answer.trim().is_empty() {
                substitutions.insert(key, answer.trim());
            }
        }

        let source = request.layout.front_root(&request.template_root, kind);
        let front = &request.settings.front;
        let project = &request.project_root;

        let domains_filter = if substitutions.is_truthy("parameters.builtin")
            || substitutions.is_truthy("parameters.array")
        {
            let entity = self.generation.delimiter().token_pattern("entity");
            FilterSet::from_patterns([format!("({entity}Schema|settings).*")])?
        } else {
            FilterSet::new()
        };
        let lang_filter =
            FilterSet::from_patterns(request.settings.lang.iter().map(|l| format!("{}.*", regex::escape(l))))?;

        let i18n_target = front
            .domains_dir(project)
            .join(request.domain.domain_path())
            .join(request.domain.entity_name());

        Ok(vec![
            self.job("front domains", source.join(&request.layout.front.domains), front.domains_dir(project), substitutions, request)
                .with_filter(domains_filter),
            self.job("front views", source.join(&request.layout.front.views), front.views_dir(project), substitutions, request),
            self.job("i18n", request.layout.lang_root(&request.template_root), i18n_target, substitutions, request)
                .with_filter(lang_filter),
        ])
    }

    fn back_jobs(
        &self,
        request: &AddDomainRequest,
        kind: &str,
        substitutions: &mut SubstitutionMap,
    ) -> DeviResult<Vec<GenerationJob>> {
        let suggested = naming::pluralize(&naming::identifier(request.domain.entity()));
        let answer = self.generation.prompt().ask("Table or collection", &suggested)?;
        let collection = non_empty_or(answer, &suggested);

        substitutions.insert("collection", collection.as_str());
        substitutions.insert("entity.collection", collection.as_str());
        substitutions.insert(
            "migration.file",
            format!("{}_{}_create", request.timestamp, naming::kebab(&collection)),
        );
        substitutions.insert(
            "migration.class",
            format!("{}Create", naming::upper_camel(&collection)),
        );

        let source = request.layout.back_root(&request.template_root, kind);
        let back = &request.settings.back;
        let project = &request.project_root;

        Ok(vec![
            self.job("back domains", source.join(&request.layout.back.domains), back.domains_dir(project), substitutions, request),
            self.job("controllers", source.join(&request.layout.back.controllers), back.controllers_dir(project), substitutions, request),
            self.job("migrations", source.join(&request.layout.back.migrations), back.migrations_dir(project), substitutions, request),
        ])
    }

    fn job(
        &self,
        label: &str,
        source: PathBuf,
        target: PathBuf,
        substitutions: &SubstitutionMap,
        request: &AddDomainRequest,
    ) -> GenerationJob {
        GenerationJob::new(label, source, target, substitutions.clone())
            .with_override_all(request.override_all)
    }

    fn run(&self, job: &GenerationJob, dry_run: bool) -> DeviResult<GenerationReport> {
        if dry_run {
            self.generation.dry_run(job)
        } else {
            self.generation.generate(job)
        }
    }
}

fn non_empty_or(answer: String, fallback: &str) -> String {
    let trimmed = answer.trim();
    if trimmed.is_empty() {
        fallback.to_owned()
    } else {
        trimmed.to_owned()
    }
}
