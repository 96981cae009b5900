//! Diagnostics service against mock probes.

#![allow(clippy::expect_used)]

use dazops_cli::application::services::diagnose::run_probes;
use dazops_cli::domain::diag::{ProbeStatus, probe_plan};

use crate::mocks::{BrokenRunner, CannedNetProbe, OpensslRunner, QuietReporter, SequenceProbe};

const FUTURE_NOT_AFTER: &str = "notAfter=Feb 15 12:00:00 2036 GMT\n";
const PAST_NOT_AFTER: &str = "notAfter=Jan  1 00:00:00 2020 GMT\n";

#[tokio::test]
async fn test_all_healthy_every_probe_passes() {
    let plan = probe_plan("api.dazno.de");
    let report = run_probes(
        &SequenceProbe::always(200),
        &CannedNetProbe { tcp: true, dns: true },
        &OpensslRunner {
            not_after: FUTURE_NOT_AFTER,
        },
        &QuietReporter,
        &plan,
    )
    .await;

    assert_eq!(report.outcomes.len(), plan.len());
    assert!(report.is_healthy(), "got: {:?}", report.outcomes);
    assert_eq!(report.passed(), plan.len());
}

#[tokio::test]
async fn test_every_probe_reports_even_when_all_fail() {
    let plan = probe_plan("api.dazno.de");
    let report = run_probes(
        &SequenceProbe::new(&[None]),
        &CannedNetProbe {
            tcp: false,
            dns: false,
        },
        &BrokenRunner,
        &QuietReporter,
        &plan,
    )
    .await;

    // one outcome per planned probe, no early abort
    assert_eq!(report.outcomes.len(), plan.len());
    assert_eq!(report.failed(), plan.len());
    assert!(!report.is_healthy());
}

#[tokio::test]
async fn test_unexpected_status_fails_with_detail() {
    let plan = probe_plan("api.dazno.de");
    let report = run_probes(
        &SequenceProbe::always(503),
        &CannedNetProbe { tcp: true, dns: true },
        &OpensslRunner {
            not_after: FUTURE_NOT_AFTER,
        },
        &QuietReporter,
        &plan,
    )
    .await;

    let health = report
        .outcomes
        .iter()
        .find(|o| o.name == "health endpoint")
        .expect("health outcome");
    assert_eq!(health.status, ProbeStatus::Fail);
    let detail = health.detail.as_deref().unwrap_or_default();
    assert!(detail.contains("expected 200"), "got: {detail}");
    assert!(detail.contains("503"), "got: {detail}");
}

#[tokio::test]
async fn test_expired_certificate_fails_tls_probe() {
    let plan = probe_plan("api.dazno.de");
    let report = run_probes(
        &SequenceProbe::always(200),
        &CannedNetProbe { tcp: true, dns: true },
        &OpensslRunner {
            not_after: PAST_NOT_AFTER,
        },
        &QuietReporter,
        &plan,
    )
    .await;

    let tls = report
        .outcomes
        .iter()
        .find(|o| o.name == "tls certificate")
        .expect("tls outcome");
    assert_eq!(tls.status, ProbeStatus::Fail);
    assert!(
        tls.detail.as_deref().unwrap_or_default().contains("expired"),
        "got: {:?}",
        tls.detail
    );
    // the expired cert is the only failure
    assert_eq!(report.failed(), 1);
}

#[tokio::test]
async fn test_valid_certificate_reports_days_remaining() {
    let plan = probe_plan("api.dazno.de");
    let report = run_probes(
        &SequenceProbe::always(200),
        &CannedNetProbe { tcp: true, dns: true },
        &OpensslRunner {
            not_after: FUTURE_NOT_AFTER,
        },
        &QuietReporter,
        &plan,
    )
    .await;

    let tls = report
        .outcomes
        .iter()
        .find(|o| o.name == "tls certificate")
        .expect("tls outcome");
    assert_eq!(tls.status, ProbeStatus::Pass);
    assert!(
        tls.detail
            .as_deref()
            .unwrap_or_default()
            .contains("expires in"),
        "got: {:?}",
        tls.detail
    );
}

#[tokio::test]
async fn test_passing_http_probe_records_latency_detail() {
    let plan = probe_plan("api.dazno.de");
    let report = run_probes(
        &SequenceProbe::always(200),
        &CannedNetProbe { tcp: true, dns: true },
        &OpensslRunner {
            not_after: FUTURE_NOT_AFTER,
        },
        &QuietReporter,
        &plan,
    )
    .await;

    let health = report
        .outcomes
        .iter()
        .find(|o| o.name == "health endpoint")
        .expect("health outcome");
    let detail = health.detail.as_deref().unwrap_or_default();
    assert!(detail.contains("200 in"), "got: {detail}");
    assert!(detail.contains("ms"), "got: {detail}");
}
