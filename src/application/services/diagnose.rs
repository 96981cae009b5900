//! Application service — endpoint diagnostics use-case.
//!
//! Runs the probe plan to completion: every probe yields exactly one
//! outcome, failures included. Nothing here aborts early — the point of a
//! diagnostic pass is the full picture, not the first error.

use std::time::Duration;

use crate::application::ports::{CommandRunner, HttpProbe, NetworkProbe, ProgressReporter};
use crate::domain::diag::{DiagReport, ProbeKind, ProbeOutcome, ProbeSpec};

/// Per-probe HTTP timeout (the `curl --max-time` discipline).
const HTTP_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Certificates expiring within this many days raise a failure.
const CERT_EXPIRY_FLOOR_DAYS: i64 = 0;

/// Execute every probe in `plan`, collecting one outcome per probe.
pub async fn run_probes(
    http: &impl HttpProbe,
    net: &impl NetworkProbe,
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
    plan: &[ProbeSpec],
) -> DiagReport {
    let mut outcomes = Vec::with_capacity(plan.len());
    for spec in plan {
        reporter.step(&format!("probing {}...", spec.name));
        outcomes.push(run_probe(http, net, runner, spec).await);
    }
    DiagReport::new(outcomes)
}

async fn run_probe(
    http: &impl HttpProbe,
    net: &impl NetworkProbe,
    runner: &impl CommandRunner,
    spec: &ProbeSpec,
) -> ProbeOutcome {
    match &spec.kind {
        ProbeKind::Http { url, expect } => match http.get(url, HTTP_PROBE_TIMEOUT).await {
            Ok(info) if info.status == *expect => ProbeOutcome::pass(
                &spec.name,
                url,
                Some(format!("{} in {}ms", info.status, info.latency.as_millis())),
            ),
            Ok(info) => ProbeOutcome::fail(
                &spec.name,
                url,
                format!("expected {expect}, got {}", info.status),
            ),
            Err(e) => ProbeOutcome::fail(&spec.name, url, format!("{e:#}")),
        },
        ProbeKind::Tcp { host, port } => {
            let target = format!("{host}:{port}");
            match net.check_tcp_connectivity(host, *port).await {
                Ok(true) => ProbeOutcome::pass(&spec.name, &target, None),
                Ok(false) => ProbeOutcome::fail(&spec.name, &target, "connection refused"),
                Err(e) => ProbeOutcome::fail(&spec.name, &target, format!("{e:#}")),
            }
        }
        ProbeKind::Dns { host } => match net.check_dns_resolution(host).await {
            Ok(true) => ProbeOutcome::pass(&spec.name, host, None),
            Ok(false) => ProbeOutcome::fail(&spec.name, host, "resolution failed"),
            Err(e) => ProbeOutcome::fail(&spec.name, host, format!("{e:#}")),
        },
        ProbeKind::TlsExpiry { host } => check_tls_expiry(runner, &spec.name, host).await,
    }
}

/// Fetch the served certificate with `openssl s_client`, extract
/// `notAfter` with `openssl x509`, and compare against now.
async fn check_tls_expiry(
    runner: &impl CommandRunner,
    name: &str,
    host: &str,
) -> ProbeOutcome {
    let endpoint = format!("{host}:443");
    let fetched = runner
        .run_with_stdin(
            "openssl",
            &["s_client", "-connect", &endpoint, "-servername", host],
            b"",
        )
        .await;
    let fetched = match fetched {
        Ok(out) if out.status.success() => out,
        Ok(_) => return ProbeOutcome::fail(name, &endpoint, "could not fetch certificate"),
        Err(e) => return ProbeOutcome::fail(name, &endpoint, format!("{e:#}")),
    };

    let extracted = runner
        .run_with_stdin("openssl", &["x509", "-noout", "-enddate"], &fetched.stdout)
        .await;
    let extracted = match extracted {
        Ok(out) if out.status.success() => out,
        Ok(_) => return ProbeOutcome::fail(name, &endpoint, "could not read certificate"),
        Err(e) => return ProbeOutcome::fail(name, &endpoint, format!("{e:#}")),
    };

    let stdout = String::from_utf8_lossy(&extracted.stdout);
    match parse_not_after_days(stdout.trim()) {
        Some(days) if days > CERT_EXPIRY_FLOOR_DAYS => {
            ProbeOutcome::pass(name, &endpoint, Some(format!("expires in {days} days")))
        }
        Some(days) => ProbeOutcome::fail(name, &endpoint, format!("expired {} days ago", -days)),
        None => ProbeOutcome::fail(name, &endpoint, "could not parse certificate expiry"),
    }
}

/// Parse `notAfter=Feb 15 12:00:00 2036 GMT` into days from now.
/// Returns `None` on any format surprise.
#[must_use]
pub fn parse_not_after_days(line: &str) -> Option<i64> {
    let date_str = line.strip_prefix("notAfter=")?.trim();
    let expiry = chrono::NaiveDateTime::parse_from_str(date_str, "%b %d %H:%M:%S %Y GMT")
        .or_else(|_| chrono::NaiveDateTime::parse_from_str(date_str, "%b  %d %H:%M:%S %Y GMT"))
        .ok()?;
    let now = chrono::Utc::now().naive_utc();
    Some((expiry - now).num_days())
}

// ── Unit tests ────────────────────────────────────────────────────────────────
