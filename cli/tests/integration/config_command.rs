//! Integration tests for `wspoll config`.
//!
//! All tests point `WSPOLL_CONFIG` at a temp path so they never read or
//! write `~/.wspoll/config.yaml`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn wspoll() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("wspoll"));
    cmd.env("NO_COLOR", "1");
    for key in [
        "WSPOLL_BASE_URL",
        "WSPOLL_MULTIUSER",
        "WSPOLL_PASSWORD",
        "WSPOLL_STATUS_ATTEMPTS",
        "WSPOLL_PLUGIN_ATTEMPTS",
    ] {
        cmd.env_remove(key);
    }
    cmd
}

/// Returns a `TempDir` and the path string for a config file inside it.
fn temp_config_path() -> (TempDir, String) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir
        .path()
        .join("config.yaml")
        .to_string_lossy()
        .into_owned();
    (dir, path)
}

fn show_json(path: &str, extra_env: &[(&str, &str)]) -> serde_json::Value {
    let mut cmd = wspoll();
    cmd.args(["config", "show", "--json"]).env("WSPOLL_CONFIG", path);
    for (k, v) in extra_env {
        cmd.env(k, v);
    }
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).expect("valid JSON")
}

#[test]
fn test_config_help_shows_subcommands() {
    wspoll()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("path"))
        .stdout(predicate::str::contains("set"));
}

#[test]
fn test_config_show_without_file_uses_defaults() {
    let (_dir, path) = temp_config_path();
    let v = show_json(&path, &[]);
    assert_eq!(v["path"], path.as_str());
    assert_eq!(v["config"]["base_url"], "http://localhost:8080");
    assert_eq!(v["config"]["multiuser"], false);
    assert_eq!(v["config"]["status_attempts"], 90);
    assert_eq!(v["config"]["status_polling_ms"], 10_000);
    assert_eq!(v["config"]["plugin_attempts"], 20);
    assert_eq!(v["config"]["plugin_polling_ms"], 20_000);
}

#[test]
fn test_config_show_masks_password() {
    let (_dir, path) = temp_config_path();
    let v = show_json(&path, &[("WSPOLL_PASSWORD", "hunter2")]);
    assert_eq!(v["config"]["password"], "********");
}

#[test]
fn test_config_env_overrides_file() {
    let (_dir, path) = temp_config_path();
    std::fs::write(&path, "base_url: https://file.example.com\nplugin_attempts: 3\n").unwrap();

    let v = show_json(&path, &[("WSPOLL_BASE_URL", "https://env.example.com")]);
    assert_eq!(v["config"]["base_url"], "https://env.example.com");
    assert_eq!(v["config"]["plugin_attempts"], 3);
}

#[test]
fn test_config_base_url_flag_overrides_env() {
    let (_dir, path) = temp_config_path();
    let out = wspoll()
        .args(["config", "show", "--json", "--base-url", "https://flag.example.com/"])
        .env("WSPOLL_CONFIG", &path)
        .env("WSPOLL_BASE_URL", "https://env.example.com")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["config"]["base_url"], "https://flag.example.com");
}

#[test]
fn test_config_path_prints_env_path() {
    let (_dir, path) = temp_config_path();
    wspoll()
        .args(["config", "path"])
        .env("WSPOLL_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains(path.as_str()));
}

#[test]
fn test_config_set_writes_file() {
    let (_dir, path) = temp_config_path();
    wspoll()
        .args(["config", "set", "status_attempts", "12"])
        .env("WSPOLL_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Set status_attempts = 12"));

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("status_attempts: 12"), "file: {content}");
    assert_eq!(show_json(&path, &[])["config"]["status_attempts"], 12);
}

#[test]
fn test_config_set_unknown_key_fails() {
    let (_dir, path) = temp_config_path();
    wspoll()
        .args(["config", "set", "colour", "blue"])
        .env("WSPOLL_CONFIG", &path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("colour"));
    assert!(!std::path::Path::new(&path).exists());
}

#[test]
fn test_config_set_zero_attempts_fails_with_config_code() {
    let (_dir, path) = temp_config_path();
    let out = wspoll()
        .args(["config", "set", "plugin_attempts", "0", "--json"])
        .env("WSPOLL_CONFIG", &path)
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["code"], "config");
}

#[test]
fn test_config_set_repairs_file_with_invalid_values() {
    let (_dir, path) = temp_config_path();
    std::fs::write(&path, "status_attempts: 0\n").unwrap();

    wspoll()
        .arg("list")
        .env("WSPOLL_CONFIG", &path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("status_attempts"));

    assert_eq!(show_json(&path, &[])["config"]["status_attempts"], 0);

    wspoll()
        .args(["config", "set", "status_attempts", "5"])
        .env("WSPOLL_CONFIG", &path)
        .assert()
        .success();
    assert_eq!(show_json(&path, &[])["config"]["status_attempts"], 5);
}

#[test]
fn test_config_set_password_is_not_echoed() {
    let (_dir, path) = temp_config_path();
    wspoll()
        .args(["config", "set", "password", "s3cret"])
        .env("WSPOLL_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("s3cret").not());
}
