//! Deploy service flow against mock ports.

#![allow(clippy::expect_used)]

use std::path::PathBuf;
use std::time::Duration;

use dazops_cli::application::services::deploy::{DeployOutcome, DeployPlan, deploy};
use dazops_cli::domain::RetryPolicy;

use crate::mocks::{
    FailingSession, HappySession, QuietReporter, SequenceProbe, StaticHasher,
};

const DIGEST: &str = "d0c0ffee00000000000000000000000000000000000000000000000000000000";

struct Artifacts {
    _dir: tempfile::TempDir,
    compose: PathBuf,
    env: PathBuf,
}

fn artifacts() -> Artifacts {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let compose = dir.path().join("docker-compose.yml");
    let env = dir.path().join(".env");
    std::fs::write(&compose, "services: {}\n").expect("write compose");
    std::fs::write(&env, "PORT=8000\n").expect("write env");
    Artifacts {
        _dir: dir,
        compose,
        env,
    }
}

fn plan<'a>(artifacts: &'a Artifacts, dry_run: bool) -> DeployPlan<'a> {
    DeployPlan {
        compose_file: &artifacts.compose,
        env_file: &artifacts.env,
        remote_dir: "/opt/mcp-api",
        health_url: "https://api.dazno.de/health".to_string(),
        retry: RetryPolicy::new(3, Duration::from_millis(1)),
        poll_budget: Duration::from_millis(100),
        poll_interval: Duration::from_millis(5),
        dry_run,
    }
}

#[tokio::test]
async fn test_happy_path_completes_and_stages_both_artifacts() {
    let artifacts = artifacts();
    let session = HappySession::new(DIGEST);
    let probe = SequenceProbe::always(200);

    let outcome = deploy(
        &session,
        &StaticHasher(DIGEST),
        &probe,
        &QuietReporter,
        &plan(&artifacts, false),
    )
    .await
    .expect("deploy");

    assert!(matches!(
        outcome,
        DeployOutcome::Completed { health_attempts: 1 }
    ));

    let log = session.log();
    assert!(
        log.iter().any(|l| l.contains("-> /opt/mcp-api/.env")),
        "env staged: {log:?}"
    );
    assert!(
        log.iter()
            .any(|l| l.contains("-> /opt/mcp-api/docker-compose.yml")),
        "compose staged: {log:?}"
    );
    let script = log
        .iter()
        .find(|l| l.starts_with("script:"))
        .expect("restart script ran");
    assert!(script.contains("docker compose pull"), "got: {script}");
    assert!(script.contains("docker compose up -d"), "got: {script}");
    assert!(script.contains("set -e"), "got: {script}");
}

#[tokio::test]
async fn test_dry_run_lists_steps_and_touches_nothing() {
    let artifacts = artifacts();
    // Any remote call would increment this session's counters.
    let session = FailingSession::new();
    let probe = SequenceProbe::always(200);

    let outcome = deploy(
        &session,
        &StaticHasher(DIGEST),
        &probe,
        &QuietReporter,
        &plan(&artifacts, true),
    )
    .await
    .expect("dry run");

    let DeployOutcome::DryRun { steps } = outcome else {
        panic!("expected dry run outcome");
    };
    assert_eq!(steps.len(), 6);
    assert!(steps.iter().any(|s| s.contains("restart compose stack")));
    assert_eq!(session.calls(), 0, "dry run must not touch the host");
}

#[tokio::test]
async fn test_missing_compose_file_fails_preflight() {
    let artifacts = artifacts();
    std::fs::remove_file(&artifacts.compose).expect("remove");
    let session = HappySession::new(DIGEST);
    let probe = SequenceProbe::always(200);

    let err = deploy(
        &session,
        &StaticHasher(DIGEST),
        &probe,
        &QuietReporter,
        &plan(&artifacts, false),
    )
    .await
    .expect_err("must fail")
    .to_string();

    assert!(err.contains("artifact not found"), "got: {err}");
    assert!(session.log().is_empty(), "preflight fails before any SSH");
}

#[tokio::test]
async fn test_unreachable_host_exhausts_retries() {
    let artifacts = artifacts();
    let session = FailingSession::new();
    let probe = SequenceProbe::always(200);

    let err = deploy(
        &session,
        &StaticHasher(DIGEST),
        &probe,
        &QuietReporter,
        &plan(&artifacts, false),
    )
    .await
    .expect_err("must fail");

    assert_eq!(session.calls(), 3, "preflight retried exactly 3 times");
    let msg = format!("{err:#}");
    assert!(msg.contains("failed after 3 attempts"), "got: {msg}");
}

#[tokio::test]
async fn test_digest_mismatch_aborts_deploy() {
    let artifacts = artifacts();
    let session = HappySession::new(DIGEST);
    let probe = SequenceProbe::always(200);
    let wrong = StaticHasher("beef000000000000000000000000000000000000000000000000000000000000");

    let err = deploy(&session, &wrong, &probe, &QuietReporter, &plan(&artifacts, false))
        .await
        .expect_err("must fail")
        .to_string();

    assert!(err.contains("Digest mismatch"), "got: {err}");
    // the compose restart never ran
    assert!(
        !session.log().iter().any(|l| l.starts_with("script:")),
        "restart must not run after a bad digest"
    );
}

#[tokio::test]
async fn test_unhealthy_endpoint_fails_after_budget() {
    let artifacts = artifacts();
    let session = HappySession::new(DIGEST);
    let probe = SequenceProbe::always(503);

    let err = deploy(
        &session,
        &StaticHasher(DIGEST),
        &probe,
        &QuietReporter,
        &plan(&artifacts, false),
    )
    .await
    .expect_err("must fail");

    let msg = format!("{err:#}");
    assert!(msg.contains("health check"), "got: {msg}");
}

#[tokio::test]
async fn test_health_recovers_within_budget() {
    let artifacts = artifacts();
    let session = HappySession::new(DIGEST);
    let probe = SequenceProbe::new(&[Some(502), Some(502), Some(200)]);

    let outcome = deploy(
        &session,
        &StaticHasher(DIGEST),
        &probe,
        &QuietReporter,
        &plan(&artifacts, false),
    )
    .await
    .expect("deploy");

    assert!(matches!(
        outcome,
        DeployOutcome::Completed { health_attempts: 3 }
    ));
}

#[tokio::test]
async fn test_remote_paths_are_rooted_in_remote_dir() {
    let artifacts = artifacts();
    let session = HappySession::new(DIGEST);
    let probe = SequenceProbe::always(200);

    deploy(
        &session,
        &StaticHasher(DIGEST),
        &probe,
        &QuietReporter,
        &plan(&artifacts, false),
    )
    .await
    .expect("deploy");

    let log = session.log();
    assert!(
        log.iter().any(|l| l == "exec: mkdir -p /opt/mcp-api"),
        "got: {log:?}"
    );
    assert!(
        log.iter()
            .any(|l| l == "exec: sha256sum /opt/mcp-api/.env"),
        "got: {log:?}"
    );
}
