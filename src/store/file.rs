//! Directory-backed key-value store
//!
//! Each key is written to `<dir>/<key>.json`. Writes go through a temporary
//! file and a rename so a crash never leaves a half-written record behind.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::KeyValueStore;

/// Persistent store keeping one JSON file per key
pub struct JsonFileStore {
    base_dir: PathBuf,
}

impl JsonFileStore {
    /// Open (and create if needed) a store rooted at `base_dir`
    pub fn with_dir(base_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&base_dir).with_context(|| {
            format!("Failed to create storage directory {}", base_dir.display())
        })?;
        Ok(Self { base_dir })
    }

    /// Open the store at the configured data directory
    pub fn open(config: &crate::config::Config) -> Result<Self> {
        Self::with_dir(config.storage_dir()?)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", file_stem(key)))
    }
}

/// Map a key onto a safe file name. Bytes outside `[A-Za-z0-9_-]` are
/// written as `%XX`, so distinct keys never share a file.
fn file_stem(key: &str) -> String {
    let mut stem = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' {
            stem.push(char::from(byte));
        } else {
            stem.push_str(&format!("%{:02X}", byte));
        }
    }
    stem
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Some(contents))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        std::fs::rename(&tmp, &path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        debug!("Wrote {} ({} bytes)", path.display(), value.len());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {}", path.display())),
        }
    }
}
