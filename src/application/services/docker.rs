//! Application service — local Docker lifecycle use-cases.
//!
//! Build, tag/push, compose up/down, and prune. All process execution goes
//! through the [`CommandRunner`] port; `docker start` chains env generation
//! and the image build before bringing the stack up, the way the pieces
//! were always run together.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, HttpProbe, ProgressReporter};
use crate::application::services::readiness::wait_http_ready;
use crate::application::services::remote_ops::ensure_success;

/// Image tag for locally built API images.
pub const IMAGE_TAG: &str = "mcp-api:latest";

/// Build timeout — image builds dwarf the default command timeout.
const BUILD_TIMEOUT: Duration = Duration::from_secs(1800);

/// Compose pull/up timeout.
const COMPOSE_TIMEOUT: Duration = Duration::from_secs(600);

/// Build the API image from `context_dir`.
///
/// # Errors
///
/// Returns an error if the build fails.
pub async fn build_image(
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
    context_dir: &str,
) -> Result<()> {
    reporter.step(&format!("building {IMAGE_TAG} from {context_dir}..."));
    let out = runner
        .run_with_timeout(
            "docker",
            &["build", "-t", IMAGE_TAG, context_dir],
            BUILD_TIMEOUT,
        )
        .await?;
    ensure_success(&out, "docker build")?;
    reporter.success(&format!("built {IMAGE_TAG}"));
    Ok(())
}

/// Tag the local image for `registry` and push it.
///
/// # Errors
///
/// Returns an error if tagging or pushing fails.
pub async fn push_image(
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
    registry: &str,
) -> Result<()> {
    let remote_tag = format!("{registry}/{IMAGE_TAG}");
    reporter.step(&format!("pushing {remote_tag}..."));
    let out = runner
        .run("docker", &["tag", IMAGE_TAG, &remote_tag])
        .await?;
    ensure_success(&out, "docker tag")?;
    let out = runner
        .run_with_timeout("docker", &["push", &remote_tag], COMPOSE_TIMEOUT)
        .await?;
    ensure_success(&out, "docker push")?;
    reporter.success(&format!("pushed {remote_tag}"));
    Ok(())
}

/// Bring the compose stack up with the given env file.
///
/// # Errors
///
/// Returns an error if compose fails.
pub async fn compose_up(
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
    compose_file: &Path,
    env_file: &Path,
) -> Result<()> {
    reporter.step("starting compose stack...");
    let compose = compose_file.display().to_string();
    let env = env_file.display().to_string();
    let out = runner
        .run_with_timeout(
            "docker",
            &[
                "compose",
                "-f",
                &compose,
                "--env-file",
                &env,
                "up",
                "-d",
                "--remove-orphans",
            ],
            COMPOSE_TIMEOUT,
        )
        .await?;
    ensure_success(&out, "docker compose up")?;
    Ok(())
}

/// Take the compose stack down.
///
/// # Errors
///
/// Returns an error if compose fails.
pub async fn compose_down(
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
    compose_file: &Path,
) -> Result<()> {
    reporter.step("stopping compose stack...");
    let compose = compose_file.display().to_string();
    let out = runner
        .run_with_timeout("docker", &["compose", "-f", &compose, "down"], COMPOSE_TIMEOUT)
        .await?;
    ensure_success(&out, "docker compose down")?;
    reporter.success("stack stopped");
    Ok(())
}

/// Remove dangling images. Destructive — callers confirm first.
///
/// Returns docker's reclaim summary (last stdout line).
///
/// # Errors
///
/// Returns an error if the prune fails.
pub async fn prune_images(
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
) -> Result<String> {
    reporter.step("pruning dangling images...");
    let out = runner.run("docker", &["image", "prune", "-f"]).await?;
    ensure_success(&out, "docker image prune")?;
    let stdout = String::from_utf8_lossy(&out.stdout);
    Ok(stdout
        .lines()
        .last()
        .unwrap_or("Total reclaimed space: 0B")
        .to_string())
}

/// Wait for the locally started stack to answer on its health endpoint.
///
/// # Errors
///
/// Returns an error if the endpoint never answers 200 within the budget.
pub async fn wait_local_health(
    probe: &impl HttpProbe,
    reporter: &impl ProgressReporter,
    port: u16,
) -> Result<()> {
    let url = format!("http://localhost:{port}/health");
    reporter.step(&format!("waiting for {url}..."));
    wait_http_ready(
        probe,
        &url,
        Duration::from_secs(90),
        Duration::from_secs(3),
    )
    .await
    .with_context(|| format!("local stack never became healthy on port {port}"))?;
    reporter.success("stack healthy");
    Ok(())
}
