//! Application service — env-file generation use-case.
//!
//! Builds the `.env` / `.env.docker` contents from the validated config.
//! Writing to disk is the caller's concern (see `infra::env_store`).

use anyhow::{Context, Result};

use crate::domain::OpsConfig;
use crate::domain::conn::{parse_mongo_url, parse_redis_url};
use crate::domain::env_file::EnvFile;
use crate::domain::error::ConfigError;

/// Which flavor of env file to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvVariant {
    /// `.env` — the API talks to the databases at their configured hosts.
    Runtime,
    /// `.env.docker` — databases are reached through compose service names
    /// (`mongodb`, `redis`) on their default ports.
    Docker,
}

/// Compose service name the Mongo container is reachable under.
const MONGO_SERVICE: &str = "mongodb";
/// Compose service name the Redis container is reachable under.
const REDIS_SERVICE: &str = "redis";

/// Build the env file for `variant` from the config.
///
/// Connection strings are pulled apart so the individual
/// `REDIS_HOST`/`REDIS_PORT`/credential keys come out exactly as the
/// deployed API expects them. The result is checked for completeness —
/// every required key must carry a non-empty value.
///
/// # Errors
///
/// Returns an error if a connection string is missing or malformed, or if
/// a required key would be empty.
pub fn build_env_file(config: &OpsConfig, variant: EnvVariant) -> Result<EnvFile> {
    if config.database.mongo_url.is_empty() {
        return Err(ConfigError::MissingField("database.mongo_url").into());
    }
    if config.database.redis_url.is_empty() {
        return Err(ConfigError::MissingField("database.redis_url").into());
    }
    let mongo = parse_mongo_url(&config.database.mongo_url).context("database.mongo_url")?;
    let redis = parse_redis_url(&config.database.redis_url).context("database.redis_url")?;

    let (mongo_url, redis_host, redis_port) = match variant {
        EnvVariant::Runtime => (
            config.database.mongo_url.clone(),
            redis.host.clone(),
            redis.port,
        ),
        EnvVariant::Docker => (
            mongo.url_with_host(MONGO_SERVICE, 27017),
            REDIS_SERVICE.to_string(),
            6379,
        ),
    };

    let mut env = EnvFile::new();
    env.set("ENVIRONMENT", config.features.environment.clone());
    env.set("PORT", config.api.port.to_string());
    env.set("MONGO_URL", mongo_url);
    env.set("MONGO_NAME", config.database.mongo_name.clone());
    env.set("REDIS_HOST", redis_host);
    env.set("REDIS_PORT", redis_port.to_string());
    env.set("REDIS_USERNAME", redis.username.clone());
    env.set(
        "REDIS_PASSWORD",
        redis.password.clone().unwrap_or_default(),
    );
    env.set(
        "AI_OPENAI_API_KEY",
        config.secrets.openai_api_key.clone(),
    );
    env.set("SECURITY_SECRET_KEY", config.secrets.secret_key.clone());
    env.set("DRY_RUN", bool_str(config.features.dry_run));
    env.set("DISABLE_RAG", bool_str(config.features.disable_rag));

    env.ensure_complete()?;
    Ok(env)
}

fn bool_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
