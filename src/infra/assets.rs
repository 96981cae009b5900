//! Embedded configuration templates.
//!
//! The Nginx site, logrotate policy, and compose override ship inside the
//! binary so an install never depends on files lying around next to it.

use anyhow::Result;
use include_dir::{Dir, include_dir};

static TEMPLATES: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/assets");

fn template(name: &str) -> Result<&'static str> {
    TEMPLATES
        .get_file(name)
        .and_then(include_dir::File::contents_utf8)
        .ok_or_else(|| anyhow::anyhow!("embedded template missing: {name}"))
}

/// Nginx site template with `{{...}}` placeholders.
///
/// # Errors
///
/// Returns an error if the embedded file is missing (a packaging bug).
pub fn nginx_site_template() -> Result<&'static str> {
    template("nginx-site.conf")
}

/// Logrotate policy, emitted verbatim.
///
/// # Errors
///
/// Returns an error if the embedded file is missing (a packaging bug).
pub fn logrotate_template() -> Result<&'static str> {
    template("logrotate.conf")
}

/// Compose override written next to the local compose file on `docker start`.
///
/// # Errors
///
/// Returns an error if the embedded file is missing (a packaging bug).
pub fn compose_override() -> Result<&'static str> {
    template("docker-compose.override.yml")
}
