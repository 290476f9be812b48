//! CLI Integration Tests
//!
//! Exercises the binary surface without any network traffic: help text,
//! completions, config display, and the failure paths that reject before
//! a model call would happen.

use assert_cmd::Command;
use predicates::prelude::*;

fn lexaid() -> Command {
    let mut cmd = Command::cargo_bin("lexaid").unwrap();
    // A key must be present for backend construction; no request is made
    // in any of these tests.
    cmd.env("GEMINI_API_KEY", "test-key");
    cmd
}

#[test]
fn help_lists_flow_subcommands() {
    lexaid()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("draft"))
        .stdout(predicate::str::contains("junk-fees"))
        .stdout(predicate::str::contains("caselaw"))
        .stdout(predicate::str::contains("diligence"));
}

#[test]
fn version_flag_works() {
    lexaid()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn completions_generate_for_bash() {
    lexaid()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lexaid"));
}

#[test]
fn config_shows_defaults() {
    lexaid()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("default_jurisdiction"));
}

#[test]
fn config_path_prints_location() {
    lexaid()
        .args(["config", "--path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml").or(predicate::str::contains("no config")));
}

#[test]
fn analyze_missing_file_fails_cleanly() {
    lexaid()
        .args(["analyze", "/nonexistent/lease.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn draft_requires_details() {
    lexaid().args(["draft", "NDA"]).assert().failure().code(2);
}

#[test]
fn costs_rejects_unknown_experience_level() {
    lexaid()
        .args(["costs", "breach of contract", "--experience", "intern"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown experience level"));
}

#[test]
fn missing_api_key_is_reported() {
    let mut cmd = Command::cargo_bin("lexaid").unwrap();
    cmd.env_remove("GEMINI_API_KEY");
    cmd.env_remove("ANTHROPIC_API_KEY");
    // Keep a .env file in the working directory from interfering.
    cmd.current_dir(std::env::temp_dir());
    cmd.args(["caselaw", "adverse possession"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GEMINI_API_KEY"));
}
