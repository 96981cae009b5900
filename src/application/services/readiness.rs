//! Generic poll-until-ready primitive.
//!
//! Replaces fixed "sleep 30 and hope" waits: the caller states a time
//! budget and a probe interval, and the loop returns as soon as the check
//! reports ready.

use std::future::Future;
use std::time::Duration;

use anyhow::Result;

use crate::application::ports::HttpProbe;

/// Poll `check` every `interval` until it returns `true` or `budget` is
/// spent. Returns the number of attempts made.
///
/// The first check runs immediately; the loop only sleeps when another
/// attempt still fits inside the budget.
///
/// # Errors
///
/// Returns an error naming the attempt count once the budget is exhausted.
pub async fn poll_until<F, Fut>(budget: Duration, interval: Duration, mut check: F) -> Result<u32>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let deadline = tokio::time::Instant::now() + budget;
    let mut attempts: u32 = 0;
    loop {
        attempts += 1;
        if check().await {
            return Ok(attempts);
        }
        if tokio::time::Instant::now() + interval >= deadline {
            anyhow::bail!(
                "not ready after {attempts} attempts ({}s budget)",
                budget.as_secs()
            );
        }
        tokio::time::sleep(interval).await;
    }
}

/// Wait for an HTTP endpoint to answer 200.
///
/// Each probe carries its own request timeout of `interval` (the
/// `--max-time` discipline), so a hung endpoint cannot eat the budget in
/// one bite.
///
/// # Errors
///
/// Returns an error if the endpoint does not answer 200 within `budget`.
pub async fn wait_http_ready(
    probe: &impl HttpProbe,
    url: &str,
    budget: Duration,
    interval: Duration,
) -> Result<u32> {
    let request_timeout = interval.max(Duration::from_secs(1));
    poll_until(budget, interval, || async {
        probe
            .get(url, request_timeout)
            .await
            .map(|r| r.status == 200)
            .unwrap_or(false)
    })
    .await
}
