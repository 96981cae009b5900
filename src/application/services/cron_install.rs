//! Application service — daily-report cron install use-case.
//!
//! Reads the remote crontab, merges the report entry (deduplicating on the
//! script name), and writes the crontab back only when something changed.
//! Running the install twice leaves exactly one entry.

use anyhow::Result;

use crate::application::ports::{ProgressReporter, RemoteSession};
use crate::application::services::remote_ops::ensure_success;
use crate::domain::cron::{DAILY_REPORT_LINE, DAILY_REPORT_MARKER, MergeOutcome, merge_cron_line};

/// Outcome of the cron install use-case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CronOutcome {
    /// Entry appended to the crontab.
    Installed,
    /// A stale or duplicated entry was rewritten.
    Updated,
    /// The exact entry was already present; crontab untouched.
    AlreadyInstalled,
}

/// Install the daily-report crontab entry on the remote host.
///
/// # Errors
///
/// Returns an error if the crontab cannot be read (other than being
/// absent) or written.
pub async fn install_daily_report(
    session: &impl RemoteSession,
    reporter: &impl ProgressReporter,
) -> Result<CronOutcome> {
    reporter.step("reading remote crontab...");
    let existing = read_crontab(session).await?;

    let (merged, outcome) = merge_cron_line(&existing, DAILY_REPORT_LINE, DAILY_REPORT_MARKER);
    if outcome == MergeOutcome::Unchanged {
        reporter.success("daily report entry already installed");
        return Ok(CronOutcome::AlreadyInstalled);
    }

    reporter.step("writing crontab...");
    let out = session
        .exec_with_stdin("crontab -", merged.as_bytes())
        .await?;
    ensure_success(&out, "crontab write")?;

    reporter.success("daily report entry installed");
    Ok(match outcome {
        MergeOutcome::Added => CronOutcome::Installed,
        _ => CronOutcome::Updated,
    })
}

/// `crontab -l` exits non-zero with "no crontab for <user>" on a fresh
/// host — that is an empty crontab, not an error.
async fn read_crontab(session: &impl RemoteSession) -> Result<String> {
    let out = session.exec("crontab -l").await?;
    if out.status.success() {
        return Ok(String::from_utf8_lossy(&out.stdout).into_owned());
    }
    let stderr = String::from_utf8_lossy(&out.stderr);
    if stderr.contains("no crontab") {
        return Ok(String::new());
    }
    ensure_success(&out, "crontab -l")?;
    Ok(String::new())
}
