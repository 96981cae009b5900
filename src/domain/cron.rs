//! Crontab merging.
//!
//! The daily-report entry is installed by rewriting the whole crontab:
//! existing lines carrying the marker are dropped, the canonical line is
//! appended, and everything else is preserved verbatim. Running the merge
//! twice yields the same crontab.

/// Substring identifying the daily-report entry regardless of schedule.
pub const DAILY_REPORT_MARKER: &str = "daily_daznode_report.py";

/// Canonical crontab line for the daily report.
pub const DAILY_REPORT_LINE: &str = "0 7 * * * /usr/bin/python3 /opt/mcp-api/scripts/daily_daznode_report.py >> /var/log/daznode_report.log 2>&1";

/// What a merge did to the crontab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// No marker line existed; the entry was appended.
    Added,
    /// A marker line existed with different content and was replaced.
    Replaced,
    /// The exact entry was already present (and unique); nothing to write.
    Unchanged,
}

/// Merge `line` into `existing` crontab content, deduplicating on `marker`.
///
/// Returns the merged crontab (always newline-terminated unless empty) and
/// what happened. Lines not carrying the marker are preserved in order.
#[must_use]
pub fn merge_cron_line(existing: &str, line: &str, marker: &str) -> (String, MergeOutcome) {
    let kept: Vec<&str> = existing
        .lines()
        .filter(|l| !l.contains(marker))
        .collect();
    let matching: Vec<&str> = existing
        .lines()
        .filter(|l| l.contains(marker))
        .collect();

    let outcome = match matching.as_slice() {
        [] => MergeOutcome::Added,
        [only] if *only == line => MergeOutcome::Unchanged,
        _ => MergeOutcome::Replaced,
    };

    let mut merged = String::new();
    for l in kept {
        merged.push_str(l);
        merged.push('\n');
    }
    merged.push_str(line);
    merged.push('\n');
    (merged, outcome)
}

// ── Unit tests ───────────────────────────────────────────────────────────────
