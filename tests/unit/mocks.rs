//! Shared mock infrastructure for unit tests.
//!
//! Provides canned [`RemoteSession`], [`HttpProbe`], and [`CommandRunner`]
//! implementations plus output helpers so each test file doesn't re-define
//! the same boilerplate.

#![allow(clippy::expect_used)]
#![allow(dead_code)] // not every test file uses every mock

use std::collections::VecDeque;
use std::os::unix::process::ExitStatusExt;
use std::path::Path;
use std::process::{ExitStatus, Output};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use anyhow::Result;
use dazops_cli::application::ports::{
    CommandRunner, HttpProbe, HttpResponseInfo, ProgressReporter, RemoteSession,
};

// ── Output helpers ────────────────────────────────────────────────────────────

pub fn ok_output(stdout: &[u8]) -> Output {
    Output {
        status: ExitStatus::from_raw(0),
        stdout: stdout.to_vec(),
        stderr: Vec::new(),
    }
}

pub fn err_output(stderr: &[u8]) -> Output {
    Output {
        status: ExitStatus::from_raw(1 << 8),
        stdout: Vec::new(),
        stderr: stderr.to_vec(),
    }
}

fn unexpected<T>() -> Result<T> {
    anyhow::bail!("not expected in this test")
}

// ── Reporter that swallows everything ─────────────────────────────────────────

pub struct QuietReporter;

impl ProgressReporter for QuietReporter {
    fn step(&self, _: &str) {}
    fn success(&self, _: &str) {}
    fn warn(&self, _: &str) {}
}

// ── Mock: remote session where everything succeeds ────────────────────────────

/// Records every call; `sha256sum` answers with a fixed digest so deploy
/// digest verification passes against [`StaticHasher`].
pub struct HappySession {
    pub digest: String,
    pub log: Mutex<Vec<String>>,
}

impl HappySession {
    pub fn new(digest: &str) -> Self {
        Self {
            digest: digest.to_string(),
            log: Mutex::new(Vec::new()),
        }
    }

    pub fn log(&self) -> Vec<String> {
        self.log.lock().expect("lock").clone()
    }

    fn record(&self, entry: String) {
        self.log.lock().expect("lock").push(entry);
    }
}

impl RemoteSession for HappySession {
    async fn exec(&self, command: &str) -> Result<Output> {
        self.record(format!("exec: {command}"));
        if command.starts_with("sha256sum") {
            let path = command.trim_start_matches("sha256sum ").trim();
            return Ok(ok_output(format!("{}  {path}\n", self.digest).as_bytes()));
        }
        Ok(ok_output(b"ok"))
    }
    async fn exec_script(&self, script: &str) -> Result<Output> {
        self.record(format!("script: {script}"));
        Ok(ok_output(b""))
    }
    async fn exec_with_stdin(&self, command: &str, input: &[u8]) -> Result<Output> {
        self.record(format!(
            "stdin: {command} <<< {}",
            String::from_utf8_lossy(input)
        ));
        Ok(ok_output(b""))
    }
    async fn copy_file(&self, local: &Path, remote: &str) -> Result<Output> {
        self.record(format!("copy: {} -> {remote}", local.display()));
        Ok(ok_output(b""))
    }
    async fn copy_dir(&self, local: &Path, remote: &str) -> Result<Output> {
        self.record(format!("copy-r: {} -> {remote}", local.display()));
        Ok(ok_output(b""))
    }
    fn describe(&self) -> String {
        "root@test-host".to_string()
    }
}

// ── Mock: remote session where exec always exits non-zero ────────────────────

pub struct FailingSession {
    pub exec_calls: AtomicU32,
}

impl FailingSession {
    pub fn new() -> Self {
        Self {
            exec_calls: AtomicU32::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.exec_calls.load(Ordering::SeqCst)
    }
}

impl RemoteSession for FailingSession {
    async fn exec(&self, _: &str) -> Result<Output> {
        self.exec_calls.fetch_add(1, Ordering::SeqCst);
        Ok(err_output(b"ssh: connect to host: Connection refused"))
    }
    async fn exec_script(&self, _: &str) -> Result<Output> {
        Ok(err_output(b""))
    }
    async fn exec_with_stdin(&self, _: &str, _: &[u8]) -> Result<Output> {
        Ok(err_output(b""))
    }
    async fn copy_file(&self, _: &Path, _: &str) -> Result<Output> {
        Ok(err_output(b""))
    }
    async fn copy_dir(&self, _: &Path, _: &str) -> Result<Output> {
        Ok(err_output(b""))
    }
    fn describe(&self) -> String {
        "root@test-host".to_string()
    }
}

// ── Mock: remote session with scripted per-command responses ─────────────────

/// Answers `exec`/`exec_with_stdin` from a list of `(command-substring,
/// response)` rules, first match wins. Unmatched calls fail the test.
pub struct ScriptedSession {
    pub rules: Vec<(&'static str, Output)>,
    pub log: Mutex<Vec<String>>,
}

impl ScriptedSession {
    pub fn new(rules: Vec<(&'static str, Output)>) -> Self {
        Self {
            rules,
            log: Mutex::new(Vec::new()),
        }
    }

    pub fn log(&self) -> Vec<String> {
        self.log.lock().expect("lock").clone()
    }

    fn respond(&self, entry: String, command: &str) -> Result<Output> {
        self.log.lock().expect("lock").push(entry);
        for (needle, output) in &self.rules {
            if command.contains(needle) {
                return Ok(Output {
                    status: output.status,
                    stdout: output.stdout.clone(),
                    stderr: output.stderr.clone(),
                });
            }
        }
        unexpected()
    }
}

impl RemoteSession for ScriptedSession {
    async fn exec(&self, command: &str) -> Result<Output> {
        self.respond(format!("exec: {command}"), command)
    }
    async fn exec_script(&self, script: &str) -> Result<Output> {
        self.respond(format!("script: {script}"), script)
    }
    async fn exec_with_stdin(&self, command: &str, input: &[u8]) -> Result<Output> {
        self.respond(
            format!("stdin: {command} <<< {}", String::from_utf8_lossy(input)),
            command,
        )
    }
    async fn copy_file(&self, local: &Path, remote: &str) -> Result<Output> {
        let entry = format!("copy: {} -> {remote}", local.display());
        self.respond(entry, "copy")
    }
    async fn copy_dir(&self, local: &Path, remote: &str) -> Result<Output> {
        let entry = format!("copy-r: {} -> {remote}", local.display());
        self.respond(entry, "copy-r")
    }
    fn describe(&self) -> String {
        "root@test-host".to_string()
    }
}

// ── Mock: file hasher with a fixed digest ─────────────────────────────────────

pub struct StaticHasher(pub &'static str);

impl dazops_cli::application::ports::FileHasher for StaticHasher {
    fn sha256_file(&self, _: &Path) -> Result<String> {
        Ok(self.0.to_string())
    }
}

// ── Mock: HTTP probe answering a scripted status sequence ─────────────────────

/// Pops one status per `get`; the last status repeats once the queue
/// drains. `None` entries simulate transport failures.
pub struct SequenceProbe {
    statuses: Mutex<VecDeque<Option<u16>>>,
    last: Mutex<Option<u16>>,
}

impl SequenceProbe {
    pub fn new(statuses: &[Option<u16>]) -> Self {
        Self {
            statuses: Mutex::new(statuses.iter().copied().collect()),
            last: Mutex::new(statuses.last().copied().flatten()),
        }
    }

    pub fn always(status: u16) -> Self {
        Self::new(&[Some(status)])
    }
}

impl HttpProbe for SequenceProbe {
    async fn get(&self, url: &str, _: Duration) -> Result<HttpResponseInfo> {
        let next = self.statuses.lock().expect("lock").pop_front();
        let status = match next {
            Some(s) => s,
            None => *self.last.lock().expect("lock"),
        };
        match status {
            Some(status) => Ok(HttpResponseInfo {
                status,
                latency: Duration::from_millis(5),
            }),
            None => anyhow::bail!("GET {url}: connection refused"),
        }
    }
}

// ── Mock: network probe with fixed answers ────────────────────────────────────

pub struct CannedNetProbe {
    pub tcp: bool,
    pub dns: bool,
}

impl dazops_cli::application::ports::NetworkProbe for CannedNetProbe {
    async fn check_tcp_connectivity(&self, _: &str, _: u16) -> Result<bool> {
        Ok(self.tcp)
    }
    async fn check_dns_resolution(&self, _: &str) -> Result<bool> {
        Ok(self.dns)
    }
}

// ── Mock: command runner that answers openssl invocations ─────────────────────

/// Serves the two-step `openssl s_client` → `openssl x509` pipeline used by
/// the TLS expiry probe.
pub struct OpensslRunner {
    /// `notAfter=` line returned by the x509 step.
    pub not_after: &'static str,
}

impl CommandRunner for OpensslRunner {
    async fn run(&self, _: &str, _: &[&str]) -> Result<Output> {
        unexpected()
    }
    async fn run_with_timeout(&self, _: &str, _: &[&str], _: Duration) -> Result<Output> {
        unexpected()
    }
    async fn run_with_stdin(&self, program: &str, args: &[&str], _: &[u8]) -> Result<Output> {
        if program != "openssl" {
            return unexpected();
        }
        if args.first() == Some(&"s_client") {
            return Ok(ok_output(b"-----BEGIN CERTIFICATE-----\n..."));
        }
        if args.first() == Some(&"x509") {
            return Ok(ok_output(self.not_after.as_bytes()));
        }
        unexpected()
    }
    async fn run_status(&self, _: &str, _: &[&str]) -> Result<ExitStatus> {
        unexpected()
    }
}

/// Runner whose every invocation fails to spawn.
pub struct BrokenRunner;

impl CommandRunner for BrokenRunner {
    async fn run(&self, program: &str, _: &[&str]) -> Result<Output> {
        anyhow::bail!("failed to spawn {program}")
    }
    async fn run_with_timeout(&self, program: &str, _: &[&str], _: Duration) -> Result<Output> {
        anyhow::bail!("failed to spawn {program}")
    }
    async fn run_with_stdin(&self, program: &str, _: &[&str], _: &[u8]) -> Result<Output> {
        anyhow::bail!("failed to spawn {program}")
    }
    async fn run_status(&self, program: &str, _: &[&str]) -> Result<ExitStatus> {
        anyhow::bail!("failed to spawn {program}")
    }
}
