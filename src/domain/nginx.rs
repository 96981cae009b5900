//! Nginx site rendering.
//!
//! The site file is produced from an embedded template with `{{key}}`
//! placeholders. Rendering is pure; writing, `nginx -t`, and the reload
//! happen in the application layer over a remote session.

use anyhow::Result;

/// Parameters for a reverse-proxied API site.
#[derive(Debug, Clone)]
pub struct SiteSpec {
    /// Public domain, e.g. `api.dazno.de`.
    pub server_name: String,
    /// Local port the API container listens on.
    pub upstream_port: u16,
    /// Path to the TLS certificate chain.
    pub ssl_certificate: String,
    /// Path to the TLS private key.
    pub ssl_certificate_key: String,
}

impl SiteSpec {
    /// Spec with Let's Encrypt certificate paths derived from the domain.
    #[must_use]
    pub fn with_letsencrypt(server_name: &str, upstream_port: u16) -> Self {
        Self {
            server_name: server_name.to_string(),
            upstream_port,
            ssl_certificate: format!("/etc/letsencrypt/live/{server_name}/fullchain.pem"),
            ssl_certificate_key: format!("/etc/letsencrypt/live/{server_name}/privkey.pem"),
        }
    }
}

/// Path of the site file under `sites-available`.
#[must_use]
pub fn sites_available_path(server_name: &str) -> String {
    format!("/etc/nginx/sites-available/{server_name}")
}

/// Path of the symlink under `sites-enabled`.
#[must_use]
pub fn sites_enabled_path(server_name: &str) -> String {
    format!("/etc/nginx/sites-enabled/{server_name}")
}

/// Render the site template against `spec`.
///
/// # Errors
///
/// Returns an error if the template still contains an unresolved `{{...}}`
/// placeholder after substitution, or if the result has unbalanced braces.
pub fn render_site(template: &str, spec: &SiteSpec) -> Result<String> {
    let rendered = template
        .replace("{{server_name}}", &spec.server_name)
        .replace("{{upstream_port}}", &spec.upstream_port.to_string())
        .replace("{{ssl_certificate}}", &spec.ssl_certificate)
        .replace("{{ssl_certificate_key}}", &spec.ssl_certificate_key);

    if let Some(start) = rendered.find("{{") {
        let end = rendered[start..].find("}}").map_or(rendered.len(), |e| start + e + 2);
        anyhow::bail!(
            "unresolved template placeholder: {}",
            &rendered[start..end]
        );
    }
    anyhow::ensure!(
        braces_balanced(&rendered),
        "rendered config has unbalanced braces"
    );
    Ok(rendered)
}

/// Cheap structural check: `{`/`}` counts match and never go negative.
/// Not a substitute for `nginx -t`, which still runs before any reload.
#[must_use]
pub fn braces_balanced(config: &str) -> bool {
    let mut depth: i64 = 0;
    for c in config.chars() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

// ── Unit tests ───────────────────────────────────────────────────────────────
