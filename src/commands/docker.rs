//! `dazops docker` — local Docker lifecycle.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::app::AppContext;
use crate::application::services::docker as service;
use crate::application::services::env_setup::{EnvVariant, build_env_file};
use crate::infra::env_store::EnvStore;
use crate::infra::http::UreqHttpProbe;

#[derive(Subcommand)]
pub enum DockerCommand {
    /// Build the API image
    Build(BuildArgs),
    /// Generate .env.docker, build, and bring the stack up
    Start(StartArgs),
    /// Take the stack down
    Stop(StopArgs),
    /// Tag and push the image to a registry
    Push(PushArgs),
    /// Remove dangling images (asks first)
    Prune,
}

#[derive(Args, Default)]
pub struct BuildArgs {
    /// Docker build context
    #[arg(long, default_value = ".")]
    pub context: String,
}

#[derive(Args, Default)]
pub struct StartArgs {
    /// Compose file
    #[arg(long, default_value = "docker-compose.yml")]
    pub compose_file: PathBuf,

    /// Docker build context
    #[arg(long, default_value = ".")]
    pub context: String,
}

#[derive(Args, Default)]
pub struct StopArgs {
    /// Compose file
    #[arg(long, default_value = "docker-compose.yml")]
    pub compose_file: PathBuf,
}

#[derive(Args)]
pub struct PushArgs {
    /// Registry host, e.g. registry.example.com
    pub registry: String,
}

/// Run `dazops docker`.
///
/// # Errors
///
/// Returns an error if the underlying docker invocation fails.
pub async fn run(app: &AppContext, cmd: DockerCommand) -> Result<()> {
    let reporter = app.terminal_reporter();
    match cmd {
        DockerCommand::Build(args) => {
            service::build_image(&app.runner, &reporter, &args.context).await
        }
        DockerCommand::Start(args) => start(app, &args).await,
        DockerCommand::Stop(args) => {
            service::compose_down(&app.runner, &reporter, &args.compose_file).await
        }
        DockerCommand::Push(args) => {
            service::push_image(&app.runner, &reporter, &args.registry).await
        }
        DockerCommand::Prune => prune(app).await,
    }
}

/// The start flow chains what used to be three separate invocations:
/// env generation, image build, compose up — then waits for health.
async fn start(app: &AppContext, args: &StartArgs) -> Result<()> {
    let reporter = app.terminal_reporter();

    let env = build_env_file(&app.config, EnvVariant::Docker)?;
    let env_path = PathBuf::from(".env.docker");
    EnvStore::with_path(env_path.clone()).write(&env)?;
    app.output.success("wrote .env.docker");

    // Compose picks the override up by name; an existing one is the
    // operator's and stays untouched.
    let override_path = args
        .compose_file
        .with_file_name("docker-compose.override.yml");
    if !override_path.exists() {
        std::fs::write(&override_path, crate::infra::assets::compose_override()?)?;
        app.output.success("wrote docker-compose.override.yml");
    }

    service::build_image(&app.runner, &reporter, &args.context).await?;
    service::compose_up(&app.runner, &reporter, &args.compose_file, &env_path).await?;
    service::wait_local_health(&UreqHttpProbe, &reporter, app.config.api.port).await?;

    app.output.kv("Diagnose", "dazops diagnose");
    app.output.kv("Stop", "dazops docker stop");
    Ok(())
}

async fn prune(app: &AppContext) -> Result<()> {
    if !app.confirm("Remove all dangling Docker images?", false)? {
        app.output.info("prune cancelled");
        return Ok(());
    }
    let reporter = app.terminal_reporter();
    let summary = service::prune_images(&app.runner, &reporter).await?;
    app.output.success(&summary);
    Ok(())
}
