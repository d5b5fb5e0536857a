//! Argument parsing, version output and error reporting of the binary.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// The binary with colors off and configuration isolated in `dir`.
fn wspoll(dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("wspoll"));
    cmd.env("NO_COLOR", "1")
        .env("WSPOLL_CONFIG", dir.path().join("config.yaml"))
        .env_remove("WSPOLL_BASE_URL")
        .env_remove("RUST_LOG");
    cmd
}

fn tmp() -> TempDir {
    TempDir::new().expect("temp dir")
}

// --- Help and version tests ---

#[test]
fn test_cli_no_args_shows_usage_and_exits_two() {
    let dir = tmp();
    wspoll(&dir)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage: wspoll"));
}

#[test]
fn test_cli_help_shows_about_text() {
    let dir = tmp();
    wspoll(&dir).arg("--help").assert().success().stdout(predicate::str::contains(
        "Bounded-retry poller for cloud IDE workspace lifecycles",
    ));
}

#[test]
fn test_cli_help_lists_commands() {
    let dir = tmp();
    let out = wspoll(&dir).arg("--help").assert().success().get_output().stdout.clone();
    let help = String::from_utf8(out).expect("utf-8 help");
    for cmd in [
        "wait-status",
        "wait-plugin",
        "list",
        "stop",
        "remove",
        "clean-up",
        "create",
        "config",
    ] {
        assert!(help.contains(cmd), "help is missing {cmd}:\n{help}");
    }
}

#[test]
fn test_cli_version_flag_shows_version() {
    let dir = tmp();
    wspoll(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("wspoll"));
}

#[test]
fn test_version_command_shows_version() {
    let dir = tmp();
    wspoll(&dir)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "wspoll {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn test_version_command_accepts_numeric_no_color_env() {
    let dir = tmp();
    wspoll(&dir)
        .arg("version")
        .env("NO_COLOR", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains("wspoll"));
}

#[test]
fn test_empty_no_color_env_keeps_default() {
    let dir = tmp();
    wspoll(&dir).arg("version").env("NO_COLOR", "").assert().success();
}

#[test]
fn test_version_command_json_outputs_valid_json() {
    let dir = tmp();
    let out = wspoll(&dir)
        .args(["version", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).expect("valid JSON");
    assert_eq!(v["version"], env!("CARGO_PKG_VERSION"));
}

// --- Argument validation ---

#[test]
fn test_wait_status_requires_all_positionals() {
    let dir = tmp();
    wspoll(&dir)
        .args(["wait-status", "admin", "ws1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("<STATUS>"));
}

#[test]
fn test_stop_without_id_is_usage_error() {
    let dir = tmp();
    wspoll(&dir).arg("stop").assert().code(2);
}

#[test]
fn test_unknown_command_is_usage_error() {
    let dir = tmp();
    wspoll(&dir).arg("frobnicate").assert().code(2);
}

#[test]
fn test_invalid_base_url_flag_rejected() {
    let dir = tmp();
    wspoll(&dir)
        .args(["list", "--base-url", "ftp://che.example.com"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("http://"));
}

// --- Errors detected before any request ---

#[test]
fn test_empty_namespace_is_invalid_key() {
    let dir = tmp();
    wspoll(&dir)
        .args(["wait-status", "", "ws1", "RUNNING"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid workspace key"));
}

#[test]
fn test_query_in_workspace_name_is_invalid_key() {
    let dir = tmp();
    let out = wspoll(&dir)
        .args(["wait-status", "ns", "ws?expand=true", "RUNNING", "--json"])
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).expect("valid JSON");
    assert_eq!(v["code"], "invalid_key");
    assert!(v["message"].as_str().expect("message").contains("ws?expand=true"));
}

#[test]
fn test_invalid_id_json_error_object() {
    let dir = tmp();
    let out = wspoll(&dir)
        .args(["remove", "a/b", "--json"])
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).expect("valid JSON");
    assert_eq!(v["error"], true);
    assert_eq!(v["code"], "invalid_key");
    assert!(v["message"].as_str().expect("message").contains("a/b"));
}

#[test]
fn test_zero_attempts_from_env_rejected() {
    let dir = tmp();
    wspoll(&dir)
        .arg("list")
        .env("WSPOLL_STATUS_ATTEMPTS", "0")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("status_attempts"));
}

// --- Transport failures ---

#[test]
fn test_unreachable_server_reports_transport_error() {
    let dir = tmp();
    wspoll(&dir)
        .args(["list", "--base-url", "http://127.0.0.1:9"])
        .env("WSPOLL_REQUEST_TIMEOUT_SECS", "5")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("URL used: http://127.0.0.1:9/api/workspace"));
}
