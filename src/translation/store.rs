/*!
 * Persistence hooks for the translation cache.
 *
 * The pipeline itself only calls `load` at startup and `save` after
 * writes; what those do is up to the injected store. The default is a
 * no-op; [`JsonFileStore`] keeps a JSON snapshot on disk, which is enough
 * for a warm cache across restarts.
 */

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::cache::TranslationCache;

/// Persistence capability for the translation cache.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Fill the cache from durable storage. Called once at startup.
    async fn load(&self, cache: &TranslationCache) -> Result<()>;

    /// Write the cache out to durable storage. Called after writes.
    async fn save(&self, cache: &TranslationCache) -> Result<()>;
}

/// Store that persists nothing. The default.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopStore;

#[async_trait]
impl CacheStore for NoopStore {
    async fn load(&self, _cache: &TranslationCache) -> Result<()> {
        Ok(())
    }

    async fn save(&self, _cache: &TranslationCache) -> Result<()> {
        Ok(())
    }
}

/// On-disk snapshot layout: phrase -> language code -> translated text,
/// plus a timestamp for operators poking at the file.
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    saved_at: DateTime<Utc>,
    entries: HashMap<String, HashMap<String, String>>,
}

/// JSON file backed cache store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store writing to the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Conventional location under the user cache directory.
    pub fn default_path() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tradux")
            .join("translations.json")
    }

    /// The path this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

#[async_trait]
impl CacheStore for JsonFileStore {
    async fn load(&self, cache: &TranslationCache) -> Result<()> {
        if !self.path.exists() {
            debug!("No cache snapshot at {}", self.path.display());
            return Ok(());
        }

        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read cache snapshot {}", self.path.display()))?;
        let snapshot: Snapshot = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse cache snapshot {}", self.path.display()))?;

        debug!(
            "Loaded {} cached phrases from {} (saved {})",
            snapshot.entries.len(),
            self.path.display(),
            snapshot.saved_at
        );
        cache.restore(snapshot.entries);
        Ok(())
    }

    async fn save(&self, cache: &TranslationCache) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create cache directory {}", parent.display()))?;
        }

        let snapshot = Snapshot {
            saved_at: Utc::now(),
            entries: cache.snapshot(),
        };
        let raw = serde_json::to_string_pretty(&snapshot)
            .context("Failed to serialize cache snapshot")?;

        // Write-then-rename so a concurrent load never sees a torn file.
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, raw)
            .await
            .with_context(|| format!("Failed to write cache snapshot {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("Failed to move cache snapshot into {}", self.path.display()))?;

        debug!(
            "Saved {} cached phrases to {}",
            snapshot.entries.len(),
            self.path.display()
        );
        Ok(())
    }
}
