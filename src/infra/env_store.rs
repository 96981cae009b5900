//! Env-file persistence with atomic write.
//!
//! Generated env files carry credentials, so they are written 600 via a
//! temp file + rename — a crash mid-write never leaves a half file at the
//! final path.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::env_file::EnvFile;

/// Writes an [`EnvFile`] to a fixed path.
pub struct EnvStore {
    path: PathBuf,
}

impl EnvStore {
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Render and write the env file (temp file + rename, mode 600).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or permissions
    /// cannot be set.
    pub fn write(&self, env: &EnvFile) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }

        let temp_path = self.path.with_extension("tmp");
        std::fs::write(&temp_path, env.render())
            .with_context(|| format!("writing temp file {}", temp_path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&temp_path, std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("setting permissions on {}", temp_path.display()))?;
        }

        std::fs::rename(&temp_path, &self.path)
            .with_context(|| format!("finalizing {}", self.path.display()))?;
        Ok(())
    }

    /// Read the file back into an [`EnvFile`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn read(&self) -> Result<EnvFile> {
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        Ok(EnvFile::parse(&content))
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────
