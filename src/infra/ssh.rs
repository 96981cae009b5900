//! SSH remote session — implements the `RemoteSession` port by shelling to
//! `ssh`/`scp` (wrapped in `sshpass` when password auth is configured).
//!
//! Scripts always travel over stdin to `bash -s`; nothing is spliced into a
//! quoted command line.

use std::path::Path;
use std::process::Output;

use anyhow::Result;

use crate::application::ports::RemoteSession;
use crate::command_runner::{COPY_TIMEOUT, CommandRunner, SSH_EXEC_TIMEOUT};
use crate::domain::config::TargetConfig;

/// How the session authenticates.
#[derive(Debug, Clone)]
pub enum SshAuth {
    /// Whatever the user's agent/default keys provide.
    Agent,
    /// An explicit private key file.
    KeyFile(String),
    /// Password via `sshpass -p`. Requires `sshpass` on PATH.
    Password(String),
}

/// Connection coordinates for one remote host.
#[derive(Debug, Clone)]
pub struct SshTarget {
    pub host: String,
    pub user: String,
    pub port: u16,
    pub auth: SshAuth,
}

impl SshTarget {
    /// Build a target from the deploy section of the config.
    ///
    /// # Errors
    ///
    /// Returns an error if no host is configured.
    pub fn from_config(target: &TargetConfig) -> Result<Self> {
        anyhow::ensure!(
            !target.host.is_empty(),
            "no deploy host configured (dazops config set target.host <host>)"
        );
        let auth = match (&target.key_file, &target.password) {
            (Some(key), _) => SshAuth::KeyFile(key.clone()),
            (None, Some(password)) => SshAuth::Password(password.clone()),
            (None, None) => SshAuth::Agent,
        };
        Ok(Self {
            host: target.host.clone(),
            user: target.user.clone(),
            port: target.ssh_port,
            auth,
        })
    }

    fn destination(&self) -> String {
        format!("{}@{}", self.user, self.host)
    }
}

/// Production `RemoteSession` over the OpenSSH client binaries.
pub struct SshSession<R: CommandRunner> {
    target: SshTarget,
    runner: R,
}

impl<R: CommandRunner> SshSession<R> {
    #[must_use]
    pub fn new(target: SshTarget, runner: R) -> Self {
        Self { target, runner }
    }

    /// `(program, leading_args)` — `sshpass -p <pw> ssh ...` for password
    /// auth, plain `ssh ...` otherwise.
    fn command_prefix(&self, base: &str) -> (String, Vec<String>) {
        match &self.target.auth {
            SshAuth::Password(password) => (
                "sshpass".to_string(),
                vec!["-p".to_string(), password.clone(), base.to_string()],
            ),
            _ => (base.to_string(), Vec::new()),
        }
    }

    fn common_options(&self) -> Vec<String> {
        let mut opts = vec![
            "-o".to_string(),
            "StrictHostKeyChecking=accept-new".to_string(),
            "-o".to_string(),
            "ConnectTimeout=10".to_string(),
        ];
        // BatchMode would make sshpass's password prompt interception fail
        if !matches!(self.target.auth, SshAuth::Password(_)) {
            opts.push("-o".to_string());
            opts.push("BatchMode=yes".to_string());
        }
        if let SshAuth::KeyFile(key) = &self.target.auth {
            opts.push("-i".to_string());
            opts.push(key.clone());
        }
        opts
    }

    fn ssh_argv(&self, remote_command: &str) -> (String, Vec<String>) {
        let (program, mut args) = self.command_prefix("ssh");
        args.extend(self.common_options());
        args.push("-p".to_string());
        args.push(self.target.port.to_string());
        args.push(self.target.destination());
        args.push(remote_command.to_string());
        (program, args)
    }

    fn scp_argv(&self, recursive: bool, local: &Path, remote: &str) -> (String, Vec<String>) {
        let (program, mut args) = self.command_prefix("scp");
        args.extend(self.common_options());
        if recursive {
            args.push("-r".to_string());
        }
        // scp spells the port flag with a capital P
        args.push("-P".to_string());
        args.push(self.target.port.to_string());
        args.push(local.display().to_string());
        args.push(format!("{}:{remote}", self.target.destination()));
        (program, args)
    }
}

impl<R: CommandRunner> RemoteSession for SshSession<R> {
    async fn exec(&self, command: &str) -> Result<Output> {
        let (program, args) = self.ssh_argv(command);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        self.runner
            .run_with_timeout(&program, &args, SSH_EXEC_TIMEOUT)
            .await
    }

    async fn exec_script(&self, script: &str) -> Result<Output> {
        let (program, args) = self.ssh_argv("bash -s");
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        self.runner
            .run_with_stdin(&program, &args, script.as_bytes())
            .await
    }

    async fn exec_with_stdin(&self, command: &str, input: &[u8]) -> Result<Output> {
        let (program, args) = self.ssh_argv(command);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        self.runner.run_with_stdin(&program, &args, input).await
    }

    async fn copy_file(&self, local: &Path, remote: &str) -> Result<Output> {
        let (program, args) = self.scp_argv(false, local, remote);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        self.runner
            .run_with_timeout(&program, &args, COPY_TIMEOUT)
            .await
    }

    async fn copy_dir(&self, local: &Path, remote: &str) -> Result<Output> {
        let (program, args) = self.scp_argv(true, local, remote);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        self.runner
            .run_with_timeout(&program, &args, COPY_TIMEOUT)
            .await
    }

    fn describe(&self) -> String {
        self.target.destination()
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────
