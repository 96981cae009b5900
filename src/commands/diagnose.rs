//! `dazops diagnose` — endpoint health diagnostics.
//!
//! Every probe runs to completion; individual failures become report rows,
//! not aborts. The exit code is always zero — the summary is the verdict.

use anyhow::{Context, Result};

use crate::app::AppContext;
use crate::application::ports::ProgressReporter;
use crate::application::services::diagnose::run_probes;
use crate::domain::diag::{DiagReport, ProbeStatus, probe_plan};
use crate::infra::http::UreqHttpProbe;
use crate::infra::network::TokioNetworkProbe;

/// Run `dazops diagnose`.
///
/// # Errors
///
/// Returns an error only if output serialization fails — probe failures
/// are part of the report.
pub async fn run(app: &AppContext) -> Result<()> {
    let plan = probe_plan(&app.config.api.domain);
    let pb = (app.output.show_progress() && !app.is_json())
        .then(|| crate::output::progress::spinner("probing endpoints..."));
    let report = run_probes(
        &UreqHttpProbe,
        &TokioNetworkProbe,
        &app.runner,
        &SilentReporter,
        &plan,
    )
    .await;
    if let Some(pb) = pb {
        if report.is_healthy() {
            crate::output::progress::finish_ok(&pb, "probes complete");
        } else {
            crate::output::progress::finish_error(&pb, "probes complete with failures");
        }
    }

    if app.is_json() {
        print_json(&report)?;
    } else {
        print_human(app, &report);
    }
    Ok(())
}

fn print_json(report: &DiagReport) -> Result<()> {
    let status = if report.is_healthy() {
        "healthy"
    } else {
        "unhealthy"
    };
    let out = serde_json::json!({
        "status": status,
        "passed": report.passed(),
        "failed": report.failed(),
        "probes": report.outcomes,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&out).context("JSON serialization")?
    );
    Ok(())
}

fn print_human(app: &AppContext, report: &DiagReport) {
    let ctx = &app.output;
    println!();
    ctx.header(&format!("{} Health Check", app.config.api.domain));
    println!();
    for outcome in &report.outcomes {
        let line = match &outcome.detail {
            Some(detail) => format!("{} ({detail})", outcome.name),
            None => outcome.name.clone(),
        };
        ctx.check(outcome.status == ProbeStatus::Pass, &line);
    }
    println!();
    if report.is_healthy() {
        ctx.success(&format!("all {} checks passed", report.passed()));
    } else {
        ctx.error(&format!(
            "{} of {} checks failed",
            report.failed(),
            report.outcomes.len()
        ));
    }
    println!();
}

/// Probe progress would interleave with the check lines; keep it quiet.
struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn step(&self, _: &str) {}
    fn success(&self, _: &str) {}
    fn warn(&self, _: &str) {}
}
