//! `dazops deploy` — production deploy over SSH.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use crate::app::AppContext;
use crate::application::services::deploy::{DeployOutcome, DeployPlan, deploy};
use crate::application::services::env_setup::{EnvVariant, build_env_file};
use crate::command_runner::{SSH_EXEC_TIMEOUT, TokioCommandRunner};
use crate::domain::RetryPolicy;
use crate::infra::env_store::EnvStore;
use crate::infra::fs::Sha256FileHasher;
use crate::infra::http::UreqHttpProbe;
use crate::infra::ssh::{SshSession, SshTarget};

/// Arguments for the deploy command.
#[derive(Args, Default)]
pub struct DeployArgs {
    /// Override the configured deploy host
    #[arg(long)]
    pub host: Option<String>,

    /// Override the configured SSH user
    #[arg(long)]
    pub user: Option<String>,

    /// Print the plan without executing it
    #[arg(long)]
    pub dry_run: bool,

    /// Compose file staged to the remote host
    #[arg(long, default_value = "docker-compose.yml")]
    pub compose_file: PathBuf,

    /// Pre-built env file to stage instead of generating one
    #[arg(long)]
    pub env_file: Option<PathBuf>,
}

/// Run `dazops deploy`.
///
/// # Errors
///
/// Returns an error if artifacts are missing, a remote step exhausts its
/// retries, or the health endpoint never comes up.
pub async fn run(app: &AppContext, args: &DeployArgs) -> Result<()> {
    let mut config = app.config.clone();
    if let Some(host) = &args.host {
        config.target.host = host.clone();
    }
    if let Some(user) = &args.user {
        config.target.user = user.clone();
    }
    config.validate_remote()?;

    // Stage the generated env file in a temp dir; --env-file bypasses
    // generation for hand-maintained files.
    let staging = tempfile::TempDir::new().context("creating staging directory")?;
    let env_file = match &args.env_file {
        Some(path) => path.clone(),
        None => {
            let env = build_env_file(&config, EnvVariant::Runtime)?;
            let path = staging.path().join(".env");
            EnvStore::with_path(path.clone()).write(&env)?;
            path
        }
    };

    let dry_run = args.dry_run || config.features.dry_run;
    let plan = DeployPlan {
        compose_file: &args.compose_file,
        env_file: &env_file,
        remote_dir: &config.target.remote_dir,
        health_url: format!("https://{}/health", config.api.domain),
        retry: RetryPolicy::default(),
        poll_budget: Duration::from_secs(180),
        poll_interval: Duration::from_secs(5),
        dry_run,
    };

    // Built against the flag-overridden config, not app.session()'s copy.
    let target = SshTarget::from_config(&config.target)?;
    let session = SshSession::new(target, TokioCommandRunner::new(SSH_EXEC_TIMEOUT));
    let reporter = app.terminal_reporter();

    let outcome = deploy(&session, &Sha256FileHasher, &UreqHttpProbe, &reporter, &plan).await?;

    match outcome {
        DeployOutcome::DryRun { steps } => {
            if app.is_json() {
                println!("{}", serde_json::json!({ "dry_run": true, "steps": steps }));
            } else {
                app.output.header("Deploy plan (dry run)");
                for step in steps {
                    app.output.kv("·", &step);
                }
            }
        }
        DeployOutcome::Completed { health_attempts } => {
            if app.is_json() {
                println!(
                    "{}",
                    serde_json::json!({
                        "deployed": true,
                        "health_attempts": health_attempts,
                    })
                );
            } else {
                app.output
                    .success(&format!("{} is live", config.api.domain));
                app.output.kv("Diagnose", "dazops diagnose");
                app.output.kv("Status", "dazops status");
            }
        }
    }
    Ok(())
}
