//! Application service — logrotate config install use-case.

use anyhow::Result;

use crate::application::ports::{ProgressReporter, RemoteSession};
use crate::application::services::remote_ops::ensure_success;

/// Remote path the rotation policy is written to.
pub const LOGROTATE_PATH: &str = "/etc/logrotate.d/mcp-api";

/// Install the embedded rotation policy on the remote host and check it
/// with a `logrotate --debug` dry pass.
///
/// # Errors
///
/// Returns an error if the write or the debug pass fails.
pub async fn install_logrotate(
    session: &impl RemoteSession,
    reporter: &impl ProgressReporter,
    template: &str,
) -> Result<()> {
    reporter.step(&format!("writing {LOGROTATE_PATH}..."));
    let out = session
        .exec_with_stdin(
            &format!("tee {LOGROTATE_PATH} > /dev/null"),
            template.as_bytes(),
        )
        .await?;
    ensure_success(&out, "write logrotate config")?;

    reporter.step("checking rotation policy...");
    let out = session
        .exec(&format!("logrotate --debug {LOGROTATE_PATH}"))
        .await?;
    ensure_success(&out, "logrotate --debug")?;

    reporter.success("log rotation configured");
    Ok(())
}
