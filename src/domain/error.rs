//! Typed domain error enums.
//!
//! All error types implement `thiserror::Error` and convert to
//! `anyhow::Error` via the `?` operator.

use thiserror::Error;

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\nValid values: {valid}")]
    InvalidValue {
        key: String,
        value: String,
        valid: String,
    },

    #[error("Missing required setting: {0}\n\nSet it with: dazops config set {0} <value>")]
    MissingField(&'static str),
}

// ── Env-file errors ───────────────────────────────────────────────────────────

/// Errors related to generated environment files.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("Environment file is missing values for: {}", .0.join(", "))]
    MissingValues(Vec<String>),
}

// ── Connection-string errors ──────────────────────────────────────────────────

/// Errors related to database connection-string extraction.
#[derive(Debug, Error)]
pub enum ConnError {
    #[error("Not a MongoDB connection string: {0}")]
    BadMongoUrl(String),

    #[error("Not a Redis connection string: {0}")]
    BadRedisUrl(String),
}

// ── Deploy errors ─────────────────────────────────────────────────────────────

/// Errors raised by the deploy flow before or after remote execution.
#[derive(Debug, Error)]
pub enum DeployError {
    #[error("Deploy artifact not found: {0}")]
    MissingArtifact(String),

    #[error("Digest mismatch for {artifact}: local {local}, remote {remote}")]
    DigestMismatch {
        artifact: String,
        local: String,
        remote: String,
    },
}
