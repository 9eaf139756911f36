//! Integration tests for the CLI argument surface.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::PredicateBooleanExt;
use tempfile::TempDir;

#[test]
fn test_help_lists_wizard_commands() {
    let mut cmd = cargo_bin_cmd!("cli");
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("status"))
        .stdout(predicates::str::contains("create"))
        .stdout(predicates::str::contains("club-info"))
        .stdout(predicates::str::contains("store-details"))
        .stdout(predicates::str::contains("validate"))
        .stdout(predicates::str::contains("goods"));
}

#[test]
fn test_create_help_shows_arguments() {
    let mut cmd = cargo_bin_cmd!("cli");
    cmd.arg("create").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Create a store with its name and members"))
        .stdout(predicates::str::contains("--type <TYPE>"))
        .stdout(predicates::str::contains("--member <EMAIL>"));
}

#[test]
fn test_create_requires_type_and_name() {
    let mut cmd = cargo_bin_cmd!("cli");
    cmd.arg("create").timeout(std::time::Duration::from_secs(5));

    cmd.assert()
        .failure()
        .stderr(predicates::str::contains(
            "the following required arguments were not provided",
        ))
        .stderr(predicates::str::contains("--type <TYPE>"));
}

#[test]
fn test_create_rejects_unknown_store_type() {
    let mut cmd = cargo_bin_cmd!("cli");
    cmd.args(["create", "--type", "company", "--name", "Drinks"])
        .timeout(std::time::Duration::from_secs(5));

    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("invalid value 'company'"));
}

#[test]
fn test_submit_rejects_product_without_price() {
    let mut cmd = cargo_bin_cmd!("cli");
    cmd.args(["submit", "--product", "Thai tea"])
        .timeout(std::time::Duration::from_secs(5));

    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("NAME=PRICE"));
}

#[test]
fn test_invalid_api_url_is_rejected() {
    let mut cmd = cargo_bin_cmd!("cli");
    cmd.args(["--api-url", "not a url", "status"])
        .timeout(std::time::Duration::from_secs(5));

    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("--api-url <API_URL>"));
}

#[test]
fn test_unsupported_config_file_fails_before_any_request() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("kasetfair.yaml");
    std::fs::write(&path, "api_base_url: http://localhost").unwrap();

    let mut cmd = cargo_bin_cmd!("cli");
    cmd.arg("--config")
        .arg(&path)
        .arg("validate")
        .timeout(std::time::Duration::from_secs(5));

    cmd.assert().failure().stderr(
        predicates::str::contains("failed to load configuration")
            .and(predicates::str::contains("Unsupported configuration format")),
    );
}

#[test]
fn test_completion_generates_script() {
    let mut cmd = cargo_bin_cmd!("cli");
    cmd.args(["completion", "--shell", "bash"]);

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("kasetfair"));
}

#[test]
fn test_config_writes_toml_file() {
    let dir = TempDir::new().unwrap();

    let mut cmd = cargo_bin_cmd!("cli");
    cmd.current_dir(dir.path()).arg("config");

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("kasetfair.toml"));
    let written = std::fs::read_to_string(dir.path().join("kasetfair.toml")).unwrap();
    assert!(written.contains("api_base_url"));
}

#[test]
fn test_config_rejects_unknown_format() {
    let dir = TempDir::new().unwrap();

    let mut cmd = cargo_bin_cmd!("cli");
    cmd.current_dir(dir.path()).args(["config", "--format", "yaml"]);

    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("Unsupported format"));
}

#[test]
fn test_status_reports_unreachable_api() {
    let dir = TempDir::new().unwrap();

    let mut cmd = cargo_bin_cmd!("cli");
    cmd.env("KASETFAIR_COOKIE_JAR", dir.path().join("jar"))
        .env("KASETFAIR_DRAFT_STORE", dir.path().join("drafts.json"))
        .args(["--api-url", "http://127.0.0.1:9/api", "status"])
        .timeout(std::time::Duration::from_secs(10));

    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("Unable to load store status").or(
            predicates::str::contains("error sending request"),
        ));
}

#[test]
fn test_help_lists_store_extras() {
    let mut cmd = cargo_bin_cmd!("cli");
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("questions"))
        .stdout(predicates::str::contains("invitations"))
        .stdout(predicates::str::contains("profile"));
}

#[test]
fn test_questions_answer_rejects_non_numeric_id() {
    let mut cmd = cargo_bin_cmd!("cli");
    cmd.args(["questions", "answer", "--text", "tables=two"])
        .timeout(std::time::Duration::from_secs(5));

    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("question id must be a number"));
}

#[test]
fn test_profile_register_requires_fields() {
    let mut cmd = cargo_bin_cmd!("cli");
    cmd.args(["profile", "register", "--first-name", "Somchai"])
        .timeout(std::time::Duration::from_secs(5));

    cmd.assert()
        .failure()
        .stderr(predicates::str::contains(
            "the following required arguments were not provided",
        ))
        .stderr(predicates::str::contains("--nisit-id <NISIT_ID>"));
}
