//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and `crate::command_runner`
//! — never from `crate::infra`, `crate::commands`, or `crate::output`.

use std::path::Path;
use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::domain::OpsConfig;

pub use crate::command_runner::CommandRunner;

// ── Remote Session Port ───────────────────────────────────────────────────────

/// A typed capability over one remote host: execute commands, stage script
/// blocks, and copy files — each returning the full structured [`Output`].
///
/// This replaces ad hoc `ssh host "$(cat <<EOF ...)"` string concatenation:
/// scripts travel over stdin, never through shell quoting.
#[allow(async_fn_in_trait)]
pub trait RemoteSession {
    /// Execute a single command line on the remote host.
    async fn exec(&self, command: &str) -> Result<Output>;

    /// Execute a multi-line script on the remote host (`bash -s` with the
    /// script piped over stdin).
    async fn exec_script(&self, script: &str) -> Result<Output>;

    /// Execute a command with `input` piped to its stdin (e.g. `crontab -`).
    async fn exec_with_stdin(&self, command: &str, input: &[u8]) -> Result<Output>;

    /// Copy a local file to a remote path.
    async fn copy_file(&self, local: &Path, remote: &str) -> Result<Output>;

    /// Recursively copy a local directory to a remote path.
    async fn copy_dir(&self, local: &Path, remote: &str) -> Result<Output>;

    /// Human-readable peer description (`user@host`) for messages.
    fn describe(&self) -> String;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Network Probe Ports ───────────────────────────────────────────────────────

/// Result of an HTTP GET probe.
#[derive(Debug, Clone, Copy)]
pub struct HttpResponseInfo {
    /// HTTP status code.
    pub status: u16,
    /// Wall-clock time to first complete response.
    pub latency: Duration,
}

/// Abstracts HTTP probing so services can be tested without real endpoints.
#[allow(async_fn_in_trait)]
pub trait HttpProbe {
    /// Issue a GET with a per-request timeout. A non-2xx response is an
    /// `Ok` carrying the status; only transport failures are `Err`.
    async fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponseInfo>;
}

/// Abstracts TCP/DNS connectivity checks so application services can be
/// tested without real network access.
#[allow(async_fn_in_trait)]
pub trait NetworkProbe {
    /// Check TCP connectivity to the given host and port.
    async fn check_tcp_connectivity(&self, host: &str, port: u16) -> Result<bool>;
    /// Check DNS resolution for the given hostname.
    async fn check_dns_resolution(&self, hostname: &str) -> Result<bool>;
}

// ── Filesystem Ports ──────────────────────────────────────────────────────────

/// Abstracts file hashing operations.
pub trait FileHasher {
    /// Compute the SHA-256 hash of a file (lowercase hex).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    fn sha256_file(&self, path: &Path) -> Result<String>;
}

// ── Config Store Port ─────────────────────────────────────────────────────────

/// Abstracts persistence of the tool's own configuration.
pub trait ConfigStore {
    /// Load the config, falling back to defaults when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    fn load(&self) -> Result<OpsConfig>;

    /// Persist the config.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn save(&self, config: &OpsConfig) -> Result<()>;

    /// Location of the config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    fn path(&self) -> Result<std::path::PathBuf>;
}
