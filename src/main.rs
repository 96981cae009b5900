//! DazOps CLI - Deploy, configure, and diagnose the MCP API

use clap::Parser;

use dazops_cli::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json = cli.json;
    if let Err(e) = cli.run().await {
        if json {
            match dazops_cli::output::json::format_error(&format!("{e:#}"), "command_failed") {
                Ok(obj) => eprintln!("{obj}"),
                Err(_) => eprintln!("Error: {e:#}"),
            }
        } else {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(1);
    }
}
