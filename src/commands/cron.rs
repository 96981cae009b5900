//! `dazops cron` — daily report crontab install.

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::services::cron_install::{CronOutcome, install_daily_report};

#[derive(Subcommand)]
pub enum CronCommand {
    /// Install the daily report entry (safe to re-run)
    Install,
}

/// Run `dazops cron`.
///
/// # Errors
///
/// Returns an error if the remote crontab cannot be read or written.
pub async fn run(app: &AppContext, cmd: CronCommand) -> Result<()> {
    match cmd {
        CronCommand::Install => {
            let session = app.session()?;
            let reporter = app.terminal_reporter();
            let outcome = install_daily_report(&session, &reporter).await?;
            if app.is_json() {
                let outcome_str = match outcome {
                    CronOutcome::Installed => "installed",
                    CronOutcome::Updated => "updated",
                    CronOutcome::AlreadyInstalled => "already-installed",
                };
                println!("{}", serde_json::json!({ "outcome": outcome_str }));
            }
            Ok(())
        }
    }
}
