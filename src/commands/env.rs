//! `dazops env` — env-file generation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::app::AppContext;
use crate::application::services::env_setup::{EnvVariant, build_env_file};
use crate::infra::env_store::EnvStore;

#[derive(Subcommand)]
pub enum EnvCommand {
    /// Write the env file for the configured target
    Generate(GenerateArgs),
}

/// Arguments for `env generate`.
#[derive(Args, Default)]
pub struct GenerateArgs {
    /// Generate the compose-internal variant (.env.docker)
    #[arg(long)]
    pub docker: bool,

    /// Output path (defaults to .env, or .env.docker with --docker)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Run `dazops env`.
///
/// # Errors
///
/// Returns an error if a connection string is missing/malformed or the
/// file cannot be written.
pub fn run(app: &AppContext, cmd: EnvCommand) -> Result<()> {
    match cmd {
        EnvCommand::Generate(args) => generate(app, &args),
    }
}

fn generate(app: &AppContext, args: &GenerateArgs) -> Result<()> {
    let variant = if args.docker {
        EnvVariant::Docker
    } else {
        EnvVariant::Runtime
    };
    let default_name = if args.docker { ".env.docker" } else { ".env" };
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(default_name));

    let env = build_env_file(&app.config, variant)?;
    let store = EnvStore::with_path(output.clone());
    store.write(&env).context("writing env file")?;

    if app.is_json() {
        println!(
            "{}",
            serde_json::json!({
                "written": output.display().to_string(),
                "keys": env.len(),
            })
        );
    } else {
        app.output.success(&format!(
            "wrote {} ({} keys)",
            output.display(),
            env.len()
        ));
    }
    Ok(())
}
