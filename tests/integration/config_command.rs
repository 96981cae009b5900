//! `dazops config` end-to-end against a temp config file.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn dazops(config_path: &std::path::Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("dazops"));
    cmd.env("NO_COLOR", "1");
    cmd.env("DAZOPS_CONFIG", config_path);
    cmd
}

#[test]
fn test_config_path_honors_env_override() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let path = dir.path().join("config.yaml");
    dazops(&path)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.yaml"));
}

#[test]
fn test_config_show_without_file_prints_defaults() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let path = dir.path().join("config.yaml");
    dazops(&path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("provider: hostinger"))
        .stdout(predicate::str::contains("domain: api.dazno.de"));
}

#[test]
fn test_config_set_then_show_roundtrip() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let path = dir.path().join("config.yaml");

    dazops(&path)
        .args(["config", "set", "target.host", "203.0.113.10"])
        .assert()
        .success();

    dazops(&path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("host: 203.0.113.10"));
}

#[test]
fn test_config_set_rejects_unknown_key() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let path = dir.path().join("config.yaml");
    dazops(&path)
        .args(["config", "set", "nope.nope", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown setting"));
}

#[test]
fn test_config_set_rejects_invalid_provider() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let path = dir.path().join("config.yaml");
    dazops(&path)
        .args(["config", "set", "target.provider", "heroku"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value"));
}

#[test]
fn test_config_set_accepts_coolify_provider() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let path = dir.path().join("config.yaml");
    dazops(&path)
        .args(["config", "set", "target.provider", "coolify"])
        .assert()
        .success();
}

#[test]
fn test_config_show_json_is_valid_json() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let path = dir.path().join("config.yaml");
    let output = dazops(&path)
        .args(["config", "show", "--json"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(parsed["target"]["provider"], "hostinger");
}

#[cfg(unix)]
#[test]
fn test_config_file_written_with_mode_600() {
    use std::os::unix::fs::PermissionsExt;
    let dir = tempfile::TempDir::new().expect("tempdir");
    let path = dir.path().join("config.yaml");
    dazops(&path)
        .args(["config", "set", "target.host", "203.0.113.10"])
        .assert()
        .success();
    let mode = std::fs::metadata(&path)
        .expect("metadata")
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600, "config file must be 600");
}
