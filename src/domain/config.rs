//! Domain types and validators for DazOps configuration.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "target.provider",
    "target.host",
    "target.user",
    "target.ssh_port",
    "api.domain",
    "api.port",
    "features.environment",
    "features.dry_run",
    "features.disable_rag",
];

pub const VALID_PROVIDERS: &[&str] = &["hostinger", "coolify"];
pub const VALID_ENVIRONMENTS: &[&str] = &["production", "staging", "development"];

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.dazops/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OpsConfig {
    /// Deploy target (provider, host, credentials).
    #[serde(default)]
    pub target: TargetConfig,
    /// The deployed API surface (domain, service port).
    #[serde(default)]
    pub api: ApiConfig,
    /// Database connection strings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Secrets consumed by the deployed API.
    #[serde(default)]
    pub secrets: SecretsConfig,
    /// Feature toggles mirrored into generated env files.
    #[serde(default)]
    pub features: FeatureToggles,
}

/// Deploy target: the remote host this tool operates on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Hosting provider: `hostinger` (default) or `coolify`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// SSH host. Empty until configured.
    #[serde(default)]
    pub host: String,
    /// SSH user.
    #[serde(default = "default_user")]
    pub user: String,
    /// SSH port.
    #[serde(default = "default_ssh_port")]
    pub ssh_port: u16,
    /// Path to an SSH private key. `None` means the agent (or a password)
    /// is used.
    #[serde(default)]
    pub key_file: Option<String>,
    /// SSH password. Requires `sshpass` on the local machine.
    #[serde(default)]
    pub password: Option<String>,
    /// Directory on the remote host holding the compose stack.
    #[serde(default = "default_remote_dir")]
    pub remote_dir: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            host: String::new(),
            user: default_user(),
            ssh_port: default_ssh_port(),
            key_file: None,
            password: None,
            remote_dir: default_remote_dir(),
        }
    }
}

/// The deployed API surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Public domain name, e.g. `api.dazno.de`.
    #[serde(default = "default_domain")]
    pub domain: String,
    /// Port the API container listens on.
    #[serde(default = "default_api_port")]
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            domain: default_domain(),
            port: default_api_port(),
        }
    }
}

/// Database connection strings. Values may also arrive via the `MONGO_URL`
/// and `REDIS_URL` environment variables (see [`OpsConfig::apply_env`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// MongoDB connection URL with embedded credentials.
    #[serde(default)]
    pub mongo_url: String,
    /// Database name inside MongoDB.
    #[serde(default = "default_mongo_name")]
    pub mongo_name: String,
    /// Redis connection URL with embedded credentials.
    #[serde(default)]
    pub redis_url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            mongo_url: String::new(),
            mongo_name: default_mongo_name(),
            redis_url: String::new(),
        }
    }
}

/// Secrets forwarded into generated env files. Never hard-coded; read from
/// the config file (mode 600) or from the environment.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SecretsConfig {
    /// OpenAI API key consumed by the RAG pipeline.
    pub openai_api_key: String,
    /// Secret key for the API's token signing.
    pub secret_key: String,
}

/// Feature toggles mirrored into generated env files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureToggles {
    /// Deployment environment name: `production`, `staging`, `development`.
    #[serde(default = "default_environment")]
    pub environment: String,
    /// When `true`, mutating commands print their plan instead of executing.
    #[serde(default)]
    pub dry_run: bool,
    /// When `true`, the deployed API starts with its RAG pipeline disabled.
    #[serde(default)]
    pub disable_rag: bool,
}

impl Default for FeatureToggles {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            dry_run: false,
            disable_rag: false,
        }
    }
}

fn default_provider() -> String {
    "hostinger".to_string()
}

fn default_user() -> String {
    "root".to_string()
}

fn default_ssh_port() -> u16 {
    22
}

fn default_remote_dir() -> String {
    "/opt/mcp-api".to_string()
}

fn default_domain() -> String {
    "api.dazno.de".to_string()
}

fn default_api_port() -> u16 {
    8000
}

fn default_mongo_name() -> String {
    "mcp".to_string()
}

fn default_environment() -> String {
    "production".to_string()
}

// ── Environment overrides ────────────────────────────────────────────────────

impl OpsConfig {
    /// Apply environment-variable overrides through a caller-supplied lookup.
    ///
    /// Recognized variables: `MONGO_URL`, `REDIS_URL`, `ENVIRONMENT`,
    /// `DRY_RUN`, `DISABLE_RAG`. Boolean toggles accept `1`/`true`/`yes`
    /// (case-insensitive); anything else leaves the toggle off.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("MONGO_URL") {
            self.database.mongo_url = v;
        }
        if let Some(v) = lookup("REDIS_URL") {
            self.database.redis_url = v;
        }
        if let Some(v) = lookup("ENVIRONMENT") {
            self.features.environment = v;
        }
        if let Some(v) = lookup("DRY_RUN") {
            self.features.dry_run = parse_toggle(&v);
        }
        if let Some(v) = lookup("DISABLE_RAG") {
            self.features.disable_rag = parse_toggle(&v);
        }
    }

    /// Validate the parts of the config every command relies on.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider or environment name is not in the
    /// allowed list.
    pub fn validate(&self) -> Result<()> {
        validate_config_value("target.provider", &self.target.provider)?;
        validate_config_value("features.environment", &self.features.environment)?;
        anyhow::ensure!(self.api.port != 0, "api.port must not be 0");
        anyhow::ensure!(self.target.ssh_port != 0, "target.ssh_port must not be 0");
        Ok(())
    }

    /// Validate the parts of the config remote commands additionally rely on.
    ///
    /// # Errors
    ///
    /// Returns an error if no deploy host is configured.
    pub fn validate_remote(&self) -> Result<()> {
        self.validate()?;
        if self.target.host.is_empty() {
            return Err(ConfigError::MissingField("target.host").into());
        }
        Ok(())
    }
}

fn parse_toggle(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    let valid: Option<&[&str]> = match key {
        "target.provider" => Some(VALID_PROVIDERS),
        "features.environment" => Some(VALID_ENVIRONMENTS),
        "features.dry_run" | "features.disable_rag" => Some(&["true", "false"]),
        "target.ssh_port" | "api.port" => {
            if value.parse::<u16>().map(|p| p != 0).unwrap_or(false) {
                return Ok(());
            }
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
                valid: "1-65535".to_string(),
            }
            .into());
        }
        _ => None,
    };
    if let Some(valid) = valid {
        if !valid.contains(&value) {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
                valid: valid.join(", "),
            }
            .into());
        }
    }
    Ok(())
}

/// Apply a validated key/value pair to the config.
///
/// # Errors
///
/// Returns an error if the key is unknown or the value invalid.
pub fn set_config_value(config: &mut OpsConfig, key: &str, value: &str) -> Result<()> {
    validate_config_key(key)?;
    validate_config_value(key, value)?;
    match key {
        "target.provider" => config.target.provider = value.to_string(),
        "target.host" => config.target.host = value.to_string(),
        "target.user" => config.target.user = value.to_string(),
        "target.ssh_port" => config.target.ssh_port = value.parse()?,
        "api.domain" => config.api.domain = value.to_string(),
        "api.port" => config.api.port = value.parse()?,
        "features.environment" => config.features.environment = value.to_string(),
        "features.dry_run" => config.features.dry_run = value == "true",
        "features.disable_rag" => config.features.disable_rag = value == "true",
        _ => unreachable!("validate_config_key covers all keys"),
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
