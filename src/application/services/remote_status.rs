//! Application service — remote stack status use-case.
//!
//! One `docker compose ps --format json` over SSH, parsed line-wise (the
//! compose CLI emits one JSON object per line).

use anyhow::Result;

use crate::application::ports::RemoteSession;
use crate::application::services::remote_ops::ensure_success;

/// State of one compose service on the remote host.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ServiceStatus {
    pub name: String,
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health: Option<String>,
}

impl ServiceStatus {
    /// Running and, when a healthcheck exists, healthy.
    #[must_use]
    pub fn is_up(&self) -> bool {
        self.state == "running" && self.health.as_deref().is_none_or(|h| h == "healthy")
    }
}

/// Query the remote compose stack's service states.
///
/// # Errors
///
/// Returns an error if the remote command fails.
pub async fn compose_status(
    session: &impl RemoteSession,
    remote_dir: &str,
) -> Result<Vec<ServiceStatus>> {
    let out = session
        .exec(&format!(
            "cd {remote_dir} && docker compose ps --format json"
        ))
        .await?;
    ensure_success(&out, "docker compose ps")?;
    let stdout = String::from_utf8_lossy(&out.stdout);
    Ok(parse_compose_ps(&stdout))
}

/// Parse compose's line-delimited JSON. Unparseable lines are skipped —
/// a stack trace from a broken container must not hide the others.
#[must_use]
pub fn parse_compose_ps(stdout: &str) -> Vec<ServiceStatus> {
    stdout
        .lines()
        .filter_map(|line| serde_json::from_str::<serde_json::Value>(line).ok())
        .filter_map(|v| {
            let name = v.get("Service")?.as_str()?.to_string();
            let state = v.get("State")?.as_str()?.to_string();
            let health = v
                .get("Health")
                .and_then(|h| h.as_str())
                .filter(|h| !h.is_empty())
                .map(str::to_string);
            Some(ServiceStatus {
                name,
                state,
                health,
            })
        })
        .collect()
}

// ── Unit tests ────────────────────────────────────────────────────────────────
