//! Application context — unified state passed to command handlers.
//!
//! Constructed once in `Cli::run()`: loads the config file, applies
//! environment overrides, and validates before any command logic runs.
//! Adding a new cross-cutting concern requires only one field change here.

use anyhow::{Context, Result};

use crate::application::ports::ConfigStore;
use crate::command_runner::{SSH_EXEC_TIMEOUT, TokioCommandRunner};
use crate::domain::OpsConfig;
use crate::infra::config::YamlConfigStore;
use crate::infra::ssh::{SshSession, SshTarget};
use crate::output::OutputContext;
use crate::output::reporter::TerminalReporter;

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
    /// Skip interactive prompts (also set by `CI` / `DAZOPS_YES` env vars).
    pub yes: bool,
}

/// Unified application context passed to command handlers.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Process runner for local tooling (docker, openssl).
    pub runner: TokioCommandRunner,
    /// Validated tool configuration with env overrides applied.
    pub config: OpsConfig,
    /// When `true`, skip interactive prompts and use defaults.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or fails
    /// validation.
    pub fn new(flags: &AppFlags) -> Result<Self> {
        let ci_env = std::env::var("CI").is_ok() || std::env::var("DAZOPS_YES").is_ok();
        let non_interactive = flags.yes || ci_env;

        let mode = if flags.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        let mut config = YamlConfigStore.load().context("loading config")?;
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(Self {
            output: OutputContext::new(flags.no_color, flags.quiet),
            mode,
            runner: TokioCommandRunner::default(),
            config,
            non_interactive,
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Build a progress reporter over this context's output.
    #[must_use]
    pub fn terminal_reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::new(&self.output)
    }

    /// Open a remote session against the configured deploy target.
    ///
    /// # Errors
    ///
    /// Returns an error if no deploy host is configured.
    pub fn session(&self) -> Result<SshSession<TokioCommandRunner>> {
        self.config.validate_remote()?;
        let target = SshTarget::from_config(&self.config.target)?;
        Ok(SshSession::new(
            target,
            TokioCommandRunner::new(SSH_EXEC_TIMEOUT),
        ))
    }

    /// Ask the user for confirmation.
    ///
    /// When `non_interactive` is `true` (CI, `--yes` flag, or `DAZOPS_YES`
    /// env), returns `default` immediately without prompting.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal prompt fails (e.g. no TTY available).
    pub fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.non_interactive {
            return Ok(default);
        }
        Ok(dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?)
    }
}
