use assert_cmd::cargo; // handy crate for testing CLIs
use predicates::prelude::*;
use std::path::Path;

const CREDENTIAL_VARS: &[&str] = &[
    "OPENAI_API_KEY",
    "OPENROUTER_API_KEY",
    "LLM_COMMIT_MODEL",
    "LLM_COMMIT_TEMPERATURE",
    "LLM_COMMIT_DYNAMIC_LENGTH",
];

/// A command with no credentials, run from an empty directory with an empty HOME
/// so a developer's .env or ~/.config file stays out of the picture.
fn isolated_cmd(dir: &Path) -> assert_cmd::Command {
    let mut cmd = cargo::cargo_bin_cmd!();
    cmd.current_dir(dir).env("HOME", dir);
    for var in CREDENTIAL_VARS {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn prints_help() {
    let mut cmd = cargo::cargo_bin_cmd!();

    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("--dynamic-length"));
}

#[test]
fn prints_version() {
    let mut cmd = cargo::cargo_bin_cmd!();

    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn missing_api_key_fails_before_touching_git() {
    let dir = tempfile::tempdir().unwrap();
    isolated_cmd(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Error: OPENAI_API_KEY environment variable is not set.",
        ));
}

#[test]
fn malformed_temperature_fails_fast() {
    let dir = tempfile::tempdir().unwrap();
    isolated_cmd(dir.path())
        .env("OPENAI_API_KEY", "sk-test")
        .env("LLM_COMMIT_TEMPERATURE", "lukewarm")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid temperature 'lukewarm'"));
}

#[test]
fn blank_temperature_fails_fast() {
    let dir = tempfile::tempdir().unwrap();
    isolated_cmd(dir.path())
        .env("OPENAI_API_KEY", "sk-test")
        .env("LLM_COMMIT_TEMPERATURE", "  ")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid temperature '  '"));
}

#[test]
fn malformed_config_file_fails_fast() {
    let dir = tempfile::tempdir().unwrap();
    let config_dir = dir.path().join(".config");
    std::fs::create_dir(&config_dir).unwrap();
    std::fs::write(config_dir.join("git-llm-commit.toml"), "temperature = \"hot\"").unwrap();

    isolated_cmd(dir.path())
        .env("OPENAI_API_KEY", "sk-test")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to parse config file"));
}

#[test]
fn unknown_flag_is_rejected() {
    let mut cmd = cargo::cargo_bin_cmd!();

    cmd.arg("--no-such-flag").assert().failure();
}
