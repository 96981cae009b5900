//! Application service — Nginx site install use-case.
//!
//! Renders the site config, stages it over the remote session, validates
//! with `nginx -t`, and only then reloads. A failed validation leaves the
//! previous config in service (the new file is written to
//! `sites-available` first; the reload never runs).

use anyhow::{Context, Result};

use crate::application::ports::{ProgressReporter, RemoteSession};
use crate::application::services::remote_ops::ensure_success;
use crate::domain::nginx::{SiteSpec, render_site, sites_available_path, sites_enabled_path};

/// Outcome of the install use-case.
#[derive(Debug)]
pub enum InstallOutcome {
    /// Config written, validated, and Nginx reloaded.
    Installed { path: String },
    /// Dry run — the rendered config.
    DryRun { rendered: String },
}

/// Install the site config for `spec` on the remote host.
///
/// # Errors
///
/// Returns an error if rendering fails, a remote step fails, or `nginx -t`
/// rejects the new config.
pub async fn install_site(
    session: &impl RemoteSession,
    reporter: &impl ProgressReporter,
    template: &str,
    spec: &SiteSpec,
    dry_run: bool,
) -> Result<InstallOutcome> {
    let rendered = render_site(template, spec).context("rendering site config")?;

    if dry_run {
        return Ok(InstallOutcome::DryRun { rendered });
    }

    let available = sites_available_path(&spec.server_name);
    let enabled = sites_enabled_path(&spec.server_name);

    reporter.step(&format!("writing {available}..."));
    let out = session
        .exec_with_stdin(&format!("tee {available} > /dev/null"), rendered.as_bytes())
        .await?;
    ensure_success(&out, "write site config")?;

    let out = session
        .exec(&format!("ln -sf {available} {enabled}"))
        .await?;
    ensure_success(&out, "enable site")?;

    reporter.step("validating with nginx -t...");
    let out = session.exec("nginx -t").await?;
    ensure_success(&out, "nginx -t").context("new site config rejected; nginx NOT reloaded")?;

    reporter.step("reloading nginx...");
    let out = session.exec("systemctl reload nginx").await?;
    ensure_success(&out, "reload nginx")?;

    reporter.success(&format!("site {} installed", spec.server_name));
    Ok(InstallOutcome::Installed { path: available })
}
