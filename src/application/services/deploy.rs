//! Application service — production deploy use-case.
//!
//! Sequential flow with bounded retries around the SSH and copy steps:
//! preflight, stage artifacts, verify digests, restart the compose stack,
//! wait for the health endpoint. Imports only from `crate::domain` and
//! `crate::application::ports`.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::application::ports::{FileHasher, HttpProbe, ProgressReporter, RemoteSession};
use crate::application::services::readiness::wait_http_ready;
use crate::application::services::remote_ops::{ensure_success, with_retry};
use crate::domain::RetryPolicy;
use crate::domain::error::DeployError;

/// Everything the deploy flow needs to know, resolved by the caller.
pub struct DeployPlan<'a> {
    /// Local compose file staged to the remote host.
    pub compose_file: &'a Path,
    /// Local env file staged to the remote host as `.env`.
    pub env_file: &'a Path,
    /// Remote directory holding the stack.
    pub remote_dir: &'a str,
    /// Health endpoint polled after the restart.
    pub health_url: String,
    /// Retry schedule for SSH and copy operations.
    pub retry: RetryPolicy,
    /// Readiness budget after `compose up`.
    pub poll_budget: Duration,
    /// Readiness probe interval.
    pub poll_interval: Duration,
    /// Print the plan instead of executing it.
    pub dry_run: bool,
}

/// Outcome of the deploy use-case.
#[derive(Debug)]
pub enum DeployOutcome {
    /// Stack restarted and the health endpoint answered 200.
    Completed {
        /// Readiness attempts before the first healthy answer.
        health_attempts: u32,
    },
    /// Dry run — the steps that would have executed.
    DryRun { steps: Vec<String> },
}

/// Deploy the stack to the remote host.
///
/// # Errors
///
/// Returns an error if a local artifact is missing, a remote step exhausts
/// its retries, a staged file's digest does not match, or the health
/// endpoint never answers 200 within the budget.
pub async fn deploy(
    session: &impl RemoteSession,
    hasher: &impl FileHasher,
    probe: &impl HttpProbe,
    reporter: &impl ProgressReporter,
    plan: &DeployPlan<'_>,
) -> Result<DeployOutcome> {
    preflight(plan)?;

    let peer = session.describe();
    let remote_dir = plan.remote_dir;

    if plan.dry_run {
        let steps = vec![
            format!("verify SSH connectivity to {peer}"),
            format!("create {remote_dir} on {peer}"),
            format!("stage {} as {remote_dir}/.env", plan.env_file.display()),
            format!(
                "stage {} as {remote_dir}/docker-compose.yml",
                plan.compose_file.display()
            ),
            format!("restart compose stack in {remote_dir}"),
            format!("wait for 200 from {}", plan.health_url),
        ];
        return Ok(DeployOutcome::DryRun { steps });
    }

    reporter.step(&format!("checking SSH connectivity to {peer}..."));
    // Non-zero exits retry too — a dropped connection reports through the
    // exit status, not a spawn failure.
    with_retry(&plan.retry, "SSH preflight", || async {
        let out = session.exec("echo ok").await?;
        ensure_success(&out, "SSH preflight")?;
        Ok(out)
    })
    .await?;

    reporter.step(&format!("preparing {remote_dir}..."));
    let out = session
        .exec(&format!("mkdir -p {remote_dir}"))
        .await?;
    ensure_success(&out, "mkdir")?;

    stage_file(session, hasher, reporter, plan, plan.env_file, ".env").await?;
    stage_file(
        session,
        hasher,
        reporter,
        plan,
        plan.compose_file,
        "docker-compose.yml",
    )
    .await?;

    reporter.step("restarting compose stack...");
    let script = format!(
        "set -e\ncd {remote_dir}\ndocker compose pull --quiet\ndocker compose up -d --remove-orphans\n"
    );
    with_retry(&plan.retry, "compose restart", || async {
        let out = session.exec_script(&script).await?;
        ensure_success(&out, "compose restart")?;
        Ok(out)
    })
    .await?;

    reporter.step(&format!("waiting for {}...", plan.health_url));
    let health_attempts = wait_http_ready(
        probe,
        &plan.health_url,
        plan.poll_budget,
        plan.poll_interval,
    )
    .await
    .with_context(|| format!("health check against {}", plan.health_url))?;

    reporter.success("deploy complete");
    Ok(DeployOutcome::Completed { health_attempts })
}

fn preflight(plan: &DeployPlan<'_>) -> Result<()> {
    for artifact in [plan.compose_file, plan.env_file] {
        if !artifact.exists() {
            return Err(DeployError::MissingArtifact(artifact.display().to_string()).into());
        }
    }
    Ok(())
}

/// Copy one file under retry, then compare its SHA-256 against the remote
/// copy. A truncated or corrupted transfer fails the deploy rather than
/// starting a stack against a half-written file.
async fn stage_file(
    session: &impl RemoteSession,
    hasher: &impl FileHasher,
    reporter: &impl ProgressReporter,
    plan: &DeployPlan<'_>,
    local: &Path,
    remote_name: &str,
) -> Result<()> {
    let remote_path = format!("{}/{remote_name}", plan.remote_dir);
    reporter.step(&format!("staging {remote_name}..."));

    with_retry(&plan.retry, remote_name, || async {
        let out = session.copy_file(local, &remote_path).await?;
        ensure_success(&out, &format!("copy {remote_name}"))?;
        Ok(out)
    })
    .await?;

    let local_digest = hasher.sha256_file(local)?;
    let out = session
        .exec(&format!("sha256sum {remote_path}"))
        .await?;
    ensure_success(&out, "sha256sum")?;
    let stdout = String::from_utf8_lossy(&out.stdout);
    let remote_digest = stdout.split_whitespace().next().unwrap_or_default();

    if remote_digest != local_digest {
        return Err(DeployError::DigestMismatch {
            artifact: remote_name.to_string(),
            local: local_digest,
            remote: remote_digest.to_string(),
        }
        .into());
    }
    Ok(())
}
