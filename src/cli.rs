//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags};
use crate::commands;

/// Deploy, configure, and diagnose the MCP API
#[derive(Parser)]
#[command(
    name = "dazops",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Skip confirmation prompts
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate env files from the configured connection strings
    #[command(subcommand)]
    Env(commands::env::EnvCommand),

    /// Build, start, stop, or prune the local Docker stack
    #[command(subcommand)]
    Docker(commands::docker::DockerCommand),

    /// Deploy the stack to the configured remote host
    Deploy(commands::deploy::DeployArgs),

    /// Install the Nginx site for the API domain
    #[command(subcommand)]
    Nginx(commands::nginx::NginxCommand),

    /// Install the log rotation policy
    #[command(subcommand)]
    Logrotate(commands::logrotate::LogrotateCommand),

    /// Install the daily report crontab entry
    #[command(subcommand)]
    Cron(commands::cron::CronCommand),

    /// Probe the deployed API endpoints and summarize
    Diagnose,

    /// Show remote stack service states
    Status,

    /// Run an API test suite
    Test(commands::testsuite::TestArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            json,
            quiet,
            no_color,
            yes,
            command,
        } = self;
        let flags = AppFlags {
            no_color,
            quiet,
            json,
            yes,
        };
        match command {
            Command::Version => {
                commands::version::run(json);
                Ok(())
            }
            Command::Config(cmd) => {
                let ctx = crate::output::OutputContext::new(no_color, quiet);
                commands::config::run(&ctx, cmd, json)
            }
            Command::Env(cmd) => {
                let app = AppContext::new(&flags)?;
                commands::env::run(&app, cmd)
            }
            Command::Docker(cmd) => {
                let app = AppContext::new(&flags)?;
                commands::docker::run(&app, cmd).await
            }
            Command::Deploy(args) => {
                let app = AppContext::new(&flags)?;
                commands::deploy::run(&app, &args).await
            }
            Command::Nginx(cmd) => {
                let app = AppContext::new(&flags)?;
                commands::nginx::run(&app, cmd).await
            }
            Command::Logrotate(cmd) => {
                let app = AppContext::new(&flags)?;
                commands::logrotate::run(&app, cmd).await
            }
            Command::Cron(cmd) => {
                let app = AppContext::new(&flags)?;
                commands::cron::run(&app, cmd).await
            }
            Command::Diagnose => {
                let app = AppContext::new(&flags)?;
                commands::diagnose::run(&app).await
            }
            Command::Status => {
                let app = AppContext::new(&flags)?;
                commands::status::run(&app).await
            }
            Command::Test(args) => {
                let app = AppContext::new(&flags)?;
                commands::testsuite::run(&app, &args).await
            }
        }
    }
}
