//! `dazops test` — run an API test suite inside the compose stack.
//!
//! Output streams straight through; the suite's own reporter is the UI.

use anyhow::Result;
use clap::{Args, ValueEnum};

use crate::app::AppContext;
use crate::application::ports::CommandRunner;

/// Which suite to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Suite {
    Unit,
    Integration,
    Simulator,
}

impl Suite {
    #[must_use]
    pub fn test_path(self) -> &'static str {
        match self {
            Self::Unit => "tests/unit",
            Self::Integration => "tests/integration",
            Self::Simulator => "tests/simulator",
        }
    }
}

/// Arguments for the test command.
#[derive(Args)]
pub struct TestArgs {
    /// Suite to run
    #[arg(value_enum)]
    pub suite: Suite,

    /// Compose file
    #[arg(long, default_value = "docker-compose.yml")]
    pub compose_file: String,
}

/// Run `dazops test`.
///
/// # Errors
///
/// Returns an error if the suite fails or the container cannot start.
pub async fn run(app: &AppContext, args: &TestArgs) -> Result<()> {
    let path = args.suite.test_path();
    let status = app
        .runner
        .run_status(
            "docker",
            &[
                "compose",
                "-f",
                &args.compose_file,
                "run",
                "--rm",
                "api",
                "pytest",
                path,
                "-q",
            ],
        )
        .await?;
    if !status.success() {
        anyhow::bail!("{path} suite failed");
    }
    app.output.success(&format!("{path} suite passed"));
    Ok(())
}
