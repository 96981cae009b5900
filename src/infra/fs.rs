//! Filesystem infrastructure — implements the `FileHasher` port.

use std::path::Path;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

use crate::application::ports::FileHasher;

/// SHA-256 file hashing over `std::fs`.
pub struct Sha256FileHasher;

impl FileHasher for Sha256FileHasher {
    fn sha256_file(&self, path: &Path) -> Result<String> {
        let bytes =
            std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        Ok(format!("{:x}", hasher.finalize()))
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────
