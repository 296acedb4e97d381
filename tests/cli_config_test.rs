//! Integration tests for stored configuration and theme commands via CLI.
//!
//! - `portal config get/set/show` round-trips through preference storage
//! - `portal theme get/toggle` persistence across invocations

mod common;

use common::{TestEnv, SAMPLE_CATALOG};
use predicates::prelude::*;

// === Config Tests ===

#[test]
fn test_config_get_empty() {
    let temp = TestEnv::new();
    let catalog = temp.write_catalog(SAMPLE_CATALOG);

    temp.portal()
        .args(["--catalog", &catalog, "config", "get", "Data Analyzer", "-H"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No stored configuration"));
}

#[test]
fn test_config_set_persists_across_invocations() {
    let temp = TestEnv::new();
    let catalog = temp.write_catalog(SAMPLE_CATALOG);

    temp.portal()
        .args([
            "--catalog", &catalog, "config", "set", "Data Analyzer", "apiKey", "sk-123",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"saved\": true"));

    // New process, same data dir: the value must come back.
    temp.portal()
        .args(["--catalog", &catalog, "config", "get", "Data Analyzer"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sk-123"));
}

#[test]
fn test_config_is_namespaced_per_agent() {
    let temp = TestEnv::new();
    let catalog = temp.write_catalog(SAMPLE_CATALOG);

    temp.portal()
        .args([
            "--catalog", &catalog, "config", "set", "Data Analyzer", "apiKey", "sk-123",
        ])
        .assert()
        .success();

    temp.portal()
        .args(["--catalog", &catalog, "config", "get", "Writer Bot", "-H"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No stored configuration"));
}

#[test]
fn test_config_show_form_priority() {
    let temp = TestEnv::new();
    let catalog = temp.write_catalog(SAMPLE_CATALOG);

    // Before anything is stored, the declared default is selected.
    temp.portal()
        .args(["--catalog", &catalog, "config", "show", "Data Analyzer", "-H"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"<option value="gpt-4" selected>"#))
        .stdout(predicate::str::contains(r#"type="password""#));

    temp.portal()
        .args([
            "--catalog", &catalog, "config", "set", "Data Analyzer", "model", "claude",
        ])
        .assert()
        .success();

    // Stored value overrides the default.
    temp.portal()
        .args(["--catalog", &catalog, "config", "show", "Data Analyzer", "-H"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"<option value="claude" selected>"#));
}

#[test]
fn test_config_unknown_agent_fails() {
    let temp = TestEnv::new();
    let catalog = temp.write_catalog(SAMPLE_CATALOG);

    temp.portal()
        .args(["--catalog", &catalog, "config", "get", "Ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

// === Theme Tests ===

#[test]
fn test_theme_defaults_to_light() {
    let temp = TestEnv::new();

    temp.portal()
        .args(["theme", "get"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"theme\": \"light\""))
        .stdout(predicate::str::contains("\"stored\": false"));
}

#[test]
fn test_theme_toggle_persists() {
    let temp = TestEnv::new();

    temp.portal()
        .args(["theme", "toggle"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"theme\": \"dark\""));

    // The choice survives into the next invocation.
    temp.portal()
        .args(["theme", "get"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"theme\": \"dark\""))
        .stdout(predicate::str::contains("\"stored\": true"));

    // Toggling twice lands back on light.
    temp.portal().args(["theme", "toggle"]).assert().success();
    temp.portal()
        .args(["theme", "get"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"theme\": \"light\""));
}

#[test]
fn test_theme_human_output() {
    let temp = TestEnv::new();

    temp.portal()
        .args(["theme", "get", "-H"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme: light (default)"));
}
