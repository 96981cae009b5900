//! Diagnostic report model and the fixed probe plan.
//!
//! Probe execution lives in the application layer; everything here is data.

use serde::Serialize;

// ── Probe plan ───────────────────────────────────────────────────────────────

/// A single planned probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeSpec {
    /// Short display name, e.g. `health endpoint`.
    pub name: String,
    pub kind: ProbeKind,
}

/// What to probe and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeKind {
    /// HTTP GET expecting the given status.
    Http { url: String, expect: u16 },
    /// TCP connect.
    Tcp { host: String, port: u16 },
    /// DNS resolution.
    Dns { host: String },
    /// TLS certificate expiry via `openssl s_client`.
    TlsExpiry { host: String },
}

/// The fixed probe set for an API domain: health/docs/metrics endpoints,
/// SSH/HTTP/HTTPS ports, DNS, and certificate expiry.
#[must_use]
pub fn probe_plan(domain: &str) -> Vec<ProbeSpec> {
    let mut plan = vec![
        ProbeSpec {
            name: "dns resolution".to_string(),
            kind: ProbeKind::Dns {
                host: domain.to_string(),
            },
        },
        ProbeSpec {
            name: "health endpoint".to_string(),
            kind: ProbeKind::Http {
                url: format!("https://{domain}/health"),
                expect: 200,
            },
        },
        ProbeSpec {
            name: "docs endpoint".to_string(),
            kind: ProbeKind::Http {
                url: format!("https://{domain}/docs"),
                expect: 200,
            },
        },
        ProbeSpec {
            name: "metrics endpoint".to_string(),
            kind: ProbeKind::Http {
                url: format!("https://{domain}/metrics"),
                expect: 200,
            },
        },
    ];
    for (name, port) in [("ssh port", 22), ("http port", 80), ("https port", 443)] {
        plan.push(ProbeSpec {
            name: name.to_string(),
            kind: ProbeKind::Tcp {
                host: domain.to_string(),
                port,
            },
        });
    }
    plan.push(ProbeSpec {
        name: "tls certificate".to_string(),
        kind: ProbeKind::TlsExpiry {
            host: domain.to_string(),
        },
    });
    plan
}

// ── Outcomes ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    Pass,
    Fail,
}

/// Result of one executed probe.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeOutcome {
    pub name: String,
    pub target: String,
    pub status: ProbeStatus,
    /// Latency, status code, expiry, or failure reason.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ProbeOutcome {
    #[must_use]
    pub fn pass(name: &str, target: &str, detail: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            target: target.to_string(),
            status: ProbeStatus::Pass,
            detail,
        }
    }

    #[must_use]
    pub fn fail(name: &str, target: &str, detail: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            target: target.to_string(),
            status: ProbeStatus::Fail,
            detail: Some(detail.into()),
        }
    }
}

/// Aggregated outcomes plus summary counts.
#[derive(Debug, Serialize)]
pub struct DiagReport {
    pub outcomes: Vec<ProbeOutcome>,
}

impl DiagReport {
    #[must_use]
    pub fn new(outcomes: Vec<ProbeOutcome>) -> Self {
        Self { outcomes }
    }

    #[must_use]
    pub fn passed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == ProbeStatus::Pass)
            .count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.failed() == 0
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
