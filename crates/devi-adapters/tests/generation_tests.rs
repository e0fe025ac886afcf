//! End-to-end generation against real directories.

use std::fs;
use std::path::Path;

use devi_adapters::{HandlebarsRenderer, LocalFilesystem, SimpleRenderer};
use devi_core::application::ports::Prompt;
use devi_core::error::DeviResult;
use devi_core::prelude::*;
use tempfile::TempDir;

/// Declines every overwrite.
struct Decline;

impl Prompt for Decline {
    fn ask(&self, _message: &str, _default: &str) -> DeviResult<String> {
        Ok("n".into())
    }
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn service(renderer: Box<dyn TemplateRenderer>) -> GenerationService {
    GenerationService::new(Box::new(LocalFilesystem::new()), renderer, Box::new(Decline))
}

#[test]
fn greeting_is_rendered_to_disk() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write(src.path(), "greeting.[[txt]].tmplt", "Hello {{name}}");

    let job = GenerationJob::new(
        "greeting",
        src.path(),
        out.path(),
        SubstitutionMap::named().with("name", "World"),
    );
    let report = service(Box::new(HandlebarsRenderer::new())).generate(&job).unwrap();

    assert_eq!(report.written(), 1);
    assert_eq!(
        fs::read_to_string(out.path().join("greeting.txt")).unwrap(),
        "Hello World"
    );
}

#[test]
fn existing_file_is_kept_when_declined() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write(src.path(), "greeting.[[txt]].tmplt", "Hello {{name}}");
    write(out.path(), "greeting.txt", "keep me");

    let job = GenerationJob::new(
        "greeting",
        src.path(),
        out.path(),
        SubstitutionMap::named().with("name", "World"),
    );
    let report = service(Box::new(SimpleRenderer::new())).generate(&job).unwrap();

    assert_eq!(report.skipped(), 1);
    assert_eq!(
        fs::read_to_string(out.path().join("greeting.txt")).unwrap(),
        "keep me"
    );
}

#[test]
fn nested_token_directories_are_created() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write(
        src.path(),
        "{{domain}}/{{entity}}/{{entity}}Controller.[php].tmplt",
        "[?php\nnamespace App\\{{namespace}};\n{{#if parameters.builtin}}// builtin{{/if}}",
    );

    let subs = DomainName::parse("admin.customer")
        .unwrap()
        .substitutions(serde_json::json!({ "builtin": true }));
    let job = GenerationJob::new("controllers", src.path(), out.path(), subs);

    service(Box::new(HandlebarsRenderer::new())).generate(&job).unwrap();

    let written =
        fs::read_to_string(out.path().join("Admin/Customer/CustomerController.php")).unwrap();
    assert_eq!(written, "[?php\nnamespace App\\Admin;\n// builtin");
}

#[test]
fn render_failure_can_be_collected() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write(src.path(), "a.[txt].tmplt", "{{#if x}}unclosed");
    write(src.path(), "b.[txt].tmplt", "fine");

    let job = GenerationJob::new("mixed", src.path(), out.path(), SubstitutionMap::named());
    let report = service(Box::new(HandlebarsRenderer::new()))
        .with_failure_policy(FailurePolicy::Continue)
        .generate(&job)
        .unwrap();

    assert_eq!(report.failures().count(), 1);
    assert_eq!(report.written(), 1);
    assert!(!out.path().join("a.txt").exists());
    assert!(out.path().join("b.txt").exists());
}

/// Answers every question with its default.
struct Defaults;

impl Prompt for Defaults {
    fn ask(&self, _message: &str, default: &str) -> DeviResult<String> {
        Ok(default.into())
    }
}

#[test]
fn add_domain_runs_backend_jobs_in_memory() {
    use devi_adapters::MemoryFilesystem;
    use devi_core::domain::BackSettings;

    let fs = MemoryFilesystem::new()
        .with_file("/tpl/back/laravel/Domains/{{domain}}/{{entity}}.[php].tmplt", "class {{entity}}")
        .with_file(
            "/tpl/back/laravel/migrations/{{migration.file}}.[php].tmplt",
            "class {{migration.class}} // {{collection}}",
        );
    fs.create_dir_all(Path::new("/tpl/back/laravel/Http/Controllers")).unwrap();
    fs.create_dir_all(Path::new("/project")).unwrap();

    let generation = GenerationService::new(
        Box::new(fs.clone()),
        Box::new(HandlebarsRenderer::new()),
        Box::new(Defaults),
    );
    let request = AddDomainRequest {
        domain: DomainName::parse("sales.order-item").unwrap(),
        parameters: serde_json::Map::new(),
        settings: ProjectSettings {
            back: BackSettings {
                kind: Some("laravel".into()),
                ..BackSettings::default()
            },
            ..ProjectSettings::default()
        },
        layout: TemplateLayout::default(),
        template_root: "/tpl".into(),
        project_root: "/project".into(),
        timestamp: "2024_01_02_030405".into(),
        override_all: false,
        dry_run: false,
    };

    let reports = AddDomainService::new(generation).add(&request).unwrap();

    let labels: Vec<_> = reports.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, ["back domains", "controllers", "migrations"]);
    assert_eq!(
        fs.read_file(Path::new("/project/back/app/Domains/Sales/OrderItem.php")).as_deref(),
        Some("class OrderItem")
    );
    assert_eq!(
        fs.read_file(Path::new(
            "/project/back/database/migrations/2024_01_02_030405_order-items_create.php"
        ))
        .as_deref(),
        Some("class OrderItemsCreate // order_items")
    );
}
