//! Integration tests for the markdown render command via CLI.

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_render_from_stdin() {
    let temp = TestEnv::new();

    temp.portal()
        .args(["render", "-H"])
        .write_stdin("## Setup\n\nRun **now** or *later*.")
        .assert()
        .success()
        .stdout(predicate::str::contains("<h2>Setup</h2>"))
        .stdout(predicate::str::contains("<strong>now</strong>"))
        .stdout(predicate::str::contains("<em>later</em>"));
}

#[test]
fn test_render_from_file_json_output() {
    let temp = TestEnv::new();
    std::fs::write(
        temp.path().join("doc.md"),
        "1. first\n2. second\n",
    )
    .unwrap();

    let output = temp
        .portal()
        .args(["render", "doc.md"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let html = json["html"].as_str().unwrap();
    assert_eq!(html.matches("<ol>").count(), 1);
    assert_eq!(html.matches("<li>").count(), 2);
}

#[test]
fn test_render_code_block_is_inert() {
    let temp = TestEnv::new();

    temp.portal()
        .args(["render", "-H"])
        .write_stdin("```\n**not bold** <script>\n```")
        .assert()
        .success()
        .stdout(predicate::str::contains("**not bold**"))
        .stdout(predicate::str::contains("&lt;script&gt;"))
        .stdout(predicate::str::contains("<strong>").not());
}

#[test]
fn test_render_links_and_breaks() {
    let temp = TestEnv::new();

    temp.portal()
        .args(["render", "-H"])
        .write_stdin("See [docs](https://example.com)\nsecond line")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"<a href="https://example.com" target="_blank">docs</a>"#,
        ))
        .stdout(predicate::str::contains("<br>"));
}

#[test]
fn test_render_missing_file_fails() {
    let temp = TestEnv::new();

    temp.portal()
        .args(["render", "nope.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}
