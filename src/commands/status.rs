//! `dazops status` — remote stack service states.

use anyhow::{Context, Result};

use crate::app::AppContext;
use crate::application::services::remote_status::{ServiceStatus, compose_status};

/// Run `dazops status`.
///
/// # Errors
///
/// Returns an error if the remote query fails.
pub async fn run(app: &AppContext) -> Result<()> {
    let session = app.session()?;
    let services = compose_status(&session, &app.config.target.remote_dir).await?;

    if app.is_json() {
        let all_up = services.iter().all(ServiceStatus::is_up);
        let out = serde_json::json!({
            "host": app.config.target.host,
            "all_up": all_up && !services.is_empty(),
            "services": services,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&out).context("JSON serialization")?
        );
        return Ok(());
    }

    let ctx = &app.output;
    println!();
    ctx.header(&format!("Stack on {}", app.config.target.host));
    println!();
    if services.is_empty() {
        ctx.warn("no services reported. Is the stack deployed?");
        ctx.kv("Deploy", "dazops deploy");
        return Ok(());
    }
    for service in &services {
        let detail = match &service.health {
            Some(health) => format!("{} ({}, {health})", service.name, service.state),
            None => format!("{} ({})", service.name, service.state),
        };
        ctx.check(service.is_up(), &detail);
    }
    println!();
    Ok(())
}
