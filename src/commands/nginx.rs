//! `dazops nginx` — Nginx site install.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::app::AppContext;
use crate::application::services::nginx_install::{InstallOutcome, install_site};
use crate::domain::nginx::SiteSpec;
use crate::infra::assets::nginx_site_template;

#[derive(Subcommand)]
pub enum NginxCommand {
    /// Render, stage, validate, and reload the site config
    Install(InstallArgs),
}

#[derive(Args, Default)]
pub struct InstallArgs {
    /// Print the rendered config instead of installing it
    #[arg(long)]
    pub dry_run: bool,
}

/// Run `dazops nginx`.
///
/// # Errors
///
/// Returns an error if rendering, validation, or the reload fails.
pub async fn run(app: &AppContext, cmd: NginxCommand) -> Result<()> {
    match cmd {
        NginxCommand::Install(args) => install(app, &args).await,
    }
}

async fn install(app: &AppContext, args: &InstallArgs) -> Result<()> {
    let spec = SiteSpec::with_letsencrypt(&app.config.api.domain, app.config.api.port);
    let template = nginx_site_template()?;
    let dry_run = args.dry_run || app.config.features.dry_run;

    // A dry run never needs the SSH target; render locally and bail early.
    if dry_run {
        let outcome = install_site(&NullSession, &NullReporter, template, &spec, true).await?;
        if let InstallOutcome::DryRun { rendered } = outcome {
            print!("{rendered}");
        }
        return Ok(());
    }

    let session = app.session()?;
    let reporter = app.terminal_reporter();
    let outcome = install_site(&session, &reporter, template, &spec, false).await?;
    if let InstallOutcome::Installed { path } = outcome {
        if app.is_json() {
            println!("{}", serde_json::json!({ "installed": path }));
        } else {
            app.output.kv("Site file", &path);
        }
    }
    Ok(())
}

// Stand-ins for the dry-run path, which touches neither.
struct NullSession;

impl crate::application::ports::RemoteSession for NullSession {
    async fn exec(&self, _: &str) -> Result<std::process::Output> {
        anyhow::bail!("dry run")
    }
    async fn exec_script(&self, _: &str) -> Result<std::process::Output> {
        anyhow::bail!("dry run")
    }
    async fn exec_with_stdin(&self, _: &str, _: &[u8]) -> Result<std::process::Output> {
        anyhow::bail!("dry run")
    }
    async fn copy_file(&self, _: &std::path::Path, _: &str) -> Result<std::process::Output> {
        anyhow::bail!("dry run")
    }
    async fn copy_dir(&self, _: &std::path::Path, _: &str) -> Result<std::process::Output> {
        anyhow::bail!("dry run")
    }
    fn describe(&self) -> String {
        "dry-run".to_string()
    }
}

struct NullReporter;

impl crate::application::ports::ProgressReporter for NullReporter {
    fn step(&self, _: &str) {}
    fn success(&self, _: &str) {}
    fn warn(&self, _: &str) {}
}
