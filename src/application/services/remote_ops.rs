//! Retry-wrapped remote operations and exit-status checking.
//!
//! The deploy flow treats every remote failure as retryable under a bounded
//! [`RetryPolicy`]; everything else aborts on the first unchecked failure.

use std::future::Future;
use std::process::Output;

use anyhow::{Context, Result};

use crate::domain::RetryPolicy;

/// Run `op` under the retry policy, pausing `policy.delay` between attempts.
///
/// Returns the first success, or the last error annotated with the attempt
/// count after the policy is exhausted. Every failure is retried — there is
/// no transient/fatal distinction.
///
/// # Errors
///
/// Returns the final attempt's error once all attempts are spent.
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, what: &str, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut last_err = None;
    for attempt in 1..=policy.attempts {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                last_err = Some(e);
                if attempt < policy.attempts {
                    tokio::time::sleep(policy.delay).await;
                }
            }
        }
    }
    let err = last_err.unwrap_or_else(|| anyhow::anyhow!("{what}: no attempts made"));
    Err(err).with_context(|| format!("{what} failed after {} attempts", policy.attempts))
}

/// Turn a non-zero exit status into an error carrying the trimmed stderr.
///
/// # Errors
///
/// Returns an error when `output.status` is unsuccessful.
pub fn ensure_success(output: &Output, what: &str) -> Result<()> {
    if output.status.success() {
        return Ok(());
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    match output.status.code() {
        Some(code) if stderr.is_empty() => anyhow::bail!("{what} failed (exit {code})"),
        Some(code) => anyhow::bail!("{what} failed (exit {code}): {stderr}"),
        None => anyhow::bail!("{what} terminated by signal"),
    }
}
