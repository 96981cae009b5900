//! `dazops config` — inspect and update the tool's own configuration.

use anyhow::{Context, Result};
use clap::Subcommand;

use crate::application::ports::ConfigStore;
use crate::domain::config::set_config_value;
use crate::infra::config::YamlConfigStore;
use crate::output::OutputContext;

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Setting key, e.g. target.host
        key: String,
        /// New value
        value: String,
    },
    /// Print the config file location
    Path,
}

/// Run `dazops config`.
///
/// # Errors
///
/// Returns an error if the config cannot be read, validated, or written.
pub fn run(ctx: &OutputContext, cmd: ConfigCommand, json: bool) -> Result<()> {
    let store = YamlConfigStore;
    match cmd {
        ConfigCommand::Show => {
            let config = store.load()?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&config).context("JSON serialization")?
                );
            } else {
                print!(
                    "{}",
                    serde_yaml::to_string(&config).context("YAML serialization")?
                );
            }
            Ok(())
        }
        ConfigCommand::Set { key, value } => {
            let mut config = store.load()?;
            set_config_value(&mut config, &key, &value)?;
            store.save(&config)?;
            ctx.success(&format!("{key} = {value}"));
            Ok(())
        }
        ConfigCommand::Path => {
            println!("{}", store.path()?.display());
            Ok(())
        }
    }
}
