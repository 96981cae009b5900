//! Ordered env-file model.
//!
//! Rendering preserves insertion order so generated files diff cleanly
//! against what the previous tooling produced.

use crate::domain::error::EnvError;
use anyhow::Result;

/// Keys every generated runtime env file must carry with non-empty values.
pub const REQUIRED_KEYS: &[&str] = &[
    "ENVIRONMENT",
    "PORT",
    "MONGO_URL",
    "MONGO_NAME",
    "REDIS_HOST",
    "REDIS_PORT",
    "REDIS_USERNAME",
    "REDIS_PASSWORD",
    "AI_OPENAI_API_KEY",
    "SECURITY_SECRET_KEY",
    "DRY_RUN",
    "DISABLE_RAG",
];

/// An ordered set of `KEY=value` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvFile {
    entries: Vec<(String, String)>,
}

impl EnvFile {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, replacing an existing entry in place or
    /// appending a new one.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key.to_string(), value));
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render to `.env` format: one `KEY=value` per line, trailing newline.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (k, v) in &self.entries {
            out.push_str(k);
            out.push('=');
            out.push_str(v);
            out.push('\n');
        }
        out
    }

    /// Parse `.env` content. Blank lines and `#` comments are skipped;
    /// later duplicates win, matching how shells source such files.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let mut env = Self::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                env.set(key.trim(), value.trim());
            }
        }
        env
    }

    /// List required keys that are absent or empty.
    #[must_use]
    pub fn missing_required(&self) -> Vec<String> {
        REQUIRED_KEYS
            .iter()
            .filter(|key| self.get(key).is_none_or(str::is_empty))
            .map(ToString::to_string)
            .collect()
    }

    /// Fail if any required key is absent or empty.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::MissingValues`] naming every offending key.
    pub fn ensure_complete(&self) -> Result<()> {
        let missing = self.missing_required();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(EnvError::MissingValues(missing).into())
        }
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
