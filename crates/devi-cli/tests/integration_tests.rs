//! End-to-end tests for the `devi` binary.

use std::fs;
use std::path::Path;

use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

/// A `devi` command isolated from the user's configuration.
fn devi(temp: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo::cargo_bin_cmd!("devi");
    cmd.current_dir(temp.path())
        .env_remove("RUST_LOG")
        .env_remove("DEVI_CONFIG")
        .arg("--config")
        .arg(temp.path().join("config.toml"));
    cmd
}

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn greeting_template(temp: &TempDir) {
    write(&temp.path().join("tpl/greeting.[[txt]].tmplt"), "Hello {{name}}!");
}

/// A project and a `default` template set with every source directory.
fn scaffold_fixture(temp: &TempDir) {
    write(
        &temp.path().join("project/.devitools.json"),
        r#"{"lang": "en", "front": {"type": "quasar"}, "back": {"type": "laravel"}}"#,
    );

    let set = temp.path().join("templates/default");
    write(
        &set.join("front/quasar/source/domains/{{domain}}/{{entity}}/{{entity}}Schema.[ts].tmplt"),
        "export const {{entity}} = '{{entity.icon}}' // {{entity.plural}}",
    );
    write(
        &set.join("front/quasar/resources/views/{{domain.lower}}/{{entity.lower}}.[vue].tmplt"),
        "<template>{{entity}}</template>",
    );
    write(&set.join("lang/en.[ts].tmplt"), "export default { {{entity.lower}}: '{{entity}}' }");
    write(&set.join("lang/pt-br.[ts].tmplt"), "export default {}");
    write(
        &set.join("back/laravel/Domains/{{domain}}/{{entity}}.[php].tmplt"),
        "[?php]\nnamespace App\\Domains\\{{namespace}};\nclass {{entity}} {}",
    );
    fs::create_dir_all(set.join("back/laravel/Http/Controllers")).unwrap();
    write(
        &set.join("back/laravel/migrations/{{migration.file}}.[php].tmplt"),
        "class {{migration.class}} { table: '{{collection}}' }",
    );
}

// ── basics ────────────────────────────────────────────────────────────────────

#[test]
fn help_lists_subcommands() {
    let temp = TempDir::new().unwrap();
    devi(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("generate"));
}

#[test]
fn version_matches_cargo() {
    let temp = TempDir::new().unwrap();
    devi(&temp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_flag_exits_with_usage_error() {
    let temp = TempDir::new().unwrap();
    devi(&temp).args(["generate", "--bogus"]).assert().code(2);
}

// ── generate ──────────────────────────────────────────────────────────────────

#[test]
fn generate_renders_greeting() {
    let temp = TempDir::new().unwrap();
    greeting_template(&temp);

    devi(&temp)
        .args(["generate", "tpl", "out", "--set", "name=World", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("greeting.txt"));

    let content = fs::read_to_string(temp.path().join("out/greeting.txt")).unwrap();
    assert_eq!(content, "Hello World!");
}

#[test]
fn generate_treats_values_as_data() {
    let temp = TempDir::new().unwrap();
    write(
        &temp.path().join("tpl/label.[php].tmplt"),
        "[?php] use App\\{{missing}}; // {{label}} {{ other }}",
    );

    devi(&temp)
        .args(["generate", "tpl", "out", "--set", "label=Price {{#if x}}", "-y"])
        .assert()
        .success();

    let content = fs::read_to_string(temp.path().join("out/label.php")).unwrap();
    assert_eq!(content, "<?php use App\\{{missing}}; // Price {{#if x}} {{ other }}");
}

#[test]
fn generate_keeps_file_when_overwrite_declined() {
    let temp = TempDir::new().unwrap();
    greeting_template(&temp);
    write(&temp.path().join("out/greeting.txt"), "original");

    devi(&temp)
        .args(["generate", "tpl", "out", "--set", "name=World"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("(kept)"))
        .stderr(predicate::str::contains("already exists"));

    let content = fs::read_to_string(temp.path().join("out/greeting.txt")).unwrap();
    assert_eq!(content, "original");
}

#[test]
fn generate_override_skips_the_question() {
    let temp = TempDir::new().unwrap();
    greeting_template(&temp);
    write(&temp.path().join("out/greeting.txt"), "original");

    devi(&temp)
        .args(["generate", "tpl", "out", "--set", "name=World", "--override"])
        .write_stdin("")
        .assert()
        .success()
        .stderr(predicate::str::contains("already exists").not());

    let content = fs::read_to_string(temp.path().join("out/greeting.txt")).unwrap();
    assert_eq!(content, "Hello World!");
}

#[test]
fn generate_dry_run_writes_nothing() {
    let temp = TempDir::new().unwrap();
    greeting_template(&temp);

    devi(&temp)
        .args(["generate", "tpl", "out", "--set", "name=World", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("greeting.txt"));

    assert!(!temp.path().join("out").exists());
}

#[test]
fn generate_json_output_is_parseable() {
    let temp = TempDir::new().unwrap();
    greeting_template(&temp);

    let assert = devi(&temp)
        .args(["--output-format", "json", "generate", "tpl", "out", "-s", "name=World", "-y"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let report: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(report["files"][0]["target"], "greeting.txt");
    assert_eq!(report["files"][0]["outcome"], "written");
}

#[test]
fn generate_filter_keeps_matching_files_only() {
    let temp = TempDir::new().unwrap();
    write(&temp.path().join("tpl/EntitySchema.[ts].tmplt"), "schema");
    write(&temp.path().join("tpl/EntityTable.[vue].tmplt"), "table");

    devi(&temp)
        .args(["generate", "tpl", "out", "--filter", "Schema.*", "-y"])
        .assert()
        .success();

    assert!(temp.path().join("out/EntitySchema.ts").exists());
    assert!(!temp.path().join("out/EntityTable.vue").exists());
}

#[test]
fn generate_missing_source_is_not_found() {
    let temp = TempDir::new().unwrap();
    devi(&temp)
        .args(["generate", "absent", "out"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Template source not found"));
}

#[test]
fn generate_invalid_filter_is_user_error() {
    let temp = TempDir::new().unwrap();
    greeting_template(&temp);
    devi(&temp)
        .args(["generate", "tpl", "out", "--filter", "(unclosed"])
        .assert()
        .code(2);
}

// ── add ───────────────────────────────────────────────────────────────────────

#[test]
fn add_generates_front_and_back_with_defaults() {
    let temp = TempDir::new().unwrap();
    scaffold_fixture(&temp);

    devi(&temp)
        .args(["add", "admin.customer", "--project", "project", "--templates", "templates", "--yes"])
        .assert()
        .success();

    let project = temp.path().join("project");
    let schema =
        fs::read_to_string(project.join("front/src/domains/Admin/Customer/CustomerSchema.ts"))
            .unwrap();
    // unanswered labels keep their token
    assert_eq!(schema, "export const Customer = 'folder' // {{entity.plural}}");

    assert!(project.join("front/src/views/admin/customer.vue").exists());
    assert!(project.join("front/src/domains/Admin/Customer/en.ts").exists());
    assert!(!project.join("front/src/domains/Admin/Customer/pt-br.ts").exists());

    let domain = fs::read_to_string(project.join("back/app/Domains/Admin/Customer.php")).unwrap();
    assert_eq!(domain, "<?php\nnamespace App\\Domains\\Admin;\nclass Customer {}");

    let migrations: Vec<_> = fs::read_dir(project.join("back/database/migrations"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(migrations.len(), 1);
    assert!(migrations[0].ends_with("_customers_create.php"), "{migrations:?}");
}

#[test]
fn add_builtin_generates_schema_only() {
    let temp = TempDir::new().unwrap();
    scaffold_fixture(&temp);
    write(
        &temp
            .path()
            .join("templates/default/front/quasar/source/domains/{{domain}}/{{entity}}/{{entity}}Table.[vue].tmplt"),
        "table",
    );

    devi(&temp)
        .args([
            "add", "general.country", "--builtin", "--project", "project", "--templates", "templates", "-y",
        ])
        .assert()
        .success();

    let entity_dir = temp.path().join("project/front/src/domains/General/Country");
    assert!(entity_dir.join("CountrySchema.ts").exists());
    assert!(!entity_dir.join("CountryTable.vue").exists());
}

#[test]
fn add_invalid_domain_is_user_error() {
    let temp = TempDir::new().unwrap();
    devi(&temp)
        .args(["add", "customer", "--project", "."])
        .assert()
        .code(2);
}

#[test]
fn add_without_settings_is_not_found() {
    let temp = TempDir::new().unwrap();
    devi(&temp)
        .args(["add", "admin.customer", "--project", "."])
        .assert()
        .code(3)
        .stderr(predicate::str::contains(".devitools.json"));
}

#[test]
fn add_unknown_template_set_is_not_found() {
    let temp = TempDir::new().unwrap();
    scaffold_fixture(&temp);
    devi(&temp)
        .args([
            "add", "admin.customer", "--project", "project", "--templates", "templates", "-t", "nope", "-y",
        ])
        .assert()
        .code(3);
}

// ── list / config ─────────────────────────────────────────────────────────────

#[test]
fn list_json_names_template_sets() {
    let temp = TempDir::new().unwrap();
    scaffold_fixture(&temp);

    let assert = devi(&temp)
        .args(["list", "--templates", "templates", "--format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let sets: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(sets[0]["name"], "default");
    assert_eq!(sets[0]["front_kinds"][0], "quasar");
    assert_eq!(sets[0]["back_kinds"][0], "laravel");
}

#[test]
fn config_set_then_get() {
    let temp = TempDir::new().unwrap();

    devi(&temp)
        .args(["config", "set", "templates.default", "vue"])
        .assert()
        .success();

    devi(&temp)
        .args(["config", "get", "templates.default"])
        .assert()
        .success()
        .stdout(predicate::str::contains("vue"));
}

#[test]
fn init_writes_config_once() {
    let temp = TempDir::new().unwrap();

    devi(&temp).arg("init").assert().success();
    assert!(temp.path().join("config.toml").exists());

    devi(&temp)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"));
}
