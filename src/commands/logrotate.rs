//! `dazops logrotate` — log rotation policy install.

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::services::logrotate_install::install_logrotate;
use crate::infra::assets::logrotate_template;

#[derive(Subcommand)]
pub enum LogrotateCommand {
    /// Write and check the rotation policy on the remote host
    Install,
}

/// Run `dazops logrotate`.
///
/// # Errors
///
/// Returns an error if the write or the debug pass fails.
pub async fn run(app: &AppContext, cmd: LogrotateCommand) -> Result<()> {
    match cmd {
        LogrotateCommand::Install => {
            let session = app.session()?;
            let reporter = app.terminal_reporter();
            install_logrotate(&session, &reporter, logrotate_template()?).await
        }
    }
}
