//! `dazops nginx install --dry-run` renders locally without SSH.

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
fn test_dry_run_prints_rendered_site_for_default_domain() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let path = dir.path().join("config.yaml");

    dazops(&path)
        .args(["nginx", "install", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("server_name api.dazno.de;"))
        .stdout(predicate::str::contains("proxy_pass http://127.0.0.1:8000;"))
        .stdout(predicate::str::contains(
            "/etc/letsencrypt/live/api.dazno.de/fullchain.pem",
        ));
}

#[test]
fn test_dry_run_respects_configured_domain_and_port() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "api:\n  domain: api.example.org\n  port: 9000\n")
        .expect("write config");

    dazops(&path)
        .args(["nginx", "install", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("server_name api.example.org;"))
        .stdout(predicate::str::contains("proxy_pass http://127.0.0.1:9000;"));
}

#[test]
fn test_dry_run_leaves_no_placeholders() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let path = dir.path().join("config.yaml");

    dazops(&path)
        .args(["nginx", "install", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("{{").not());
}
