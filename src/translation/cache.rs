/*!
 * Translation caching functionality.
 *
 * A two-level memoization store mapping each source phrase to its
 * translations per destination language, so repeated phrases are never
 * retranslated within a session.
 */

use log::debug;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Phrase-level translation cache.
///
/// Keys are the exact phrase string and the destination language code; no
/// normalization is applied here, callers decide that policy. Clones share
/// the underlying storage, so one cache can serve concurrent pipeline
/// invocations; a `set` is visible to every subsequent `get`.
pub struct TranslationCache {
    /// phrase -> destination code -> translated text
    entries: Arc<RwLock<HashMap<String, HashMap<String, String>>>>,

    /// Cache hit counter
    hits: Arc<RwLock<usize>>,

    /// Cache miss counter
    misses: Arc<RwLock<usize>>,

    /// Writes since the last snapshot or restore
    dirty: Arc<AtomicBool>,
}

impl TranslationCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            hits: Arc::new(RwLock::new(0)),
            misses: Arc::new(RwLock::new(0)),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Look up a translation for a phrase and destination language code.
    pub fn get(&self, phrase: &str, lang: &str) -> Option<String> {
        let entries = self.entries.read();
        match entries.get(phrase).and_then(|per_lang| per_lang.get(lang)) {
            Some(translated) => {
                *self.hits.write() += 1;
                debug!(
                    "Cache hit for '{}' -> {}",
                    truncate_text(phrase, 30),
                    lang
                );
                Some(translated.clone())
            }
            None => {
                *self.misses.write() += 1;
                debug!(
                    "Cache miss for '{}' -> {}",
                    truncate_text(phrase, 30),
                    lang
                );
                None
            }
        }
    }

    /// Store a translation for a phrase and destination language code.
    pub fn set(&self, phrase: &str, lang: &str, translated: &str) {
        let mut entries = self.entries.write();
        entries
            .entry(phrase.to_string())
            .or_default()
            .insert(lang.to_string(), translated.to_string());
        self.dirty.store(true, Ordering::SeqCst);
        debug!(
            "Cached translation for '{}' -> {}",
            truncate_text(phrase, 30),
            lang
        );
    }

    /// Drop every entry and reset the statistics.
    pub fn clear(&self) {
        self.entries.write().clear();
        *self.hits.write() = 0;
        *self.misses.write() = 0;
        self.dirty.store(true, Ordering::SeqCst);
        debug!("Translation cache cleared");
    }

    /// Number of distinct phrases in the cache.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Get cache statistics as (hits, misses, hit rate).
    pub fn stats(&self) -> (usize, usize, f64) {
        let hits = *self.hits.read();
        let misses = *self.misses.read();
        let total = hits + misses;

        let hit_rate = if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        };

        (hits, misses, hit_rate)
    }

    /// Copy of the full phrase map, for the persistence hooks.
    pub fn snapshot(&self) -> HashMap<String, HashMap<String, String>> {
        self.entries.read().clone()
    }

    /// Replace the contents wholesale, typically from a loaded snapshot.
    pub fn restore(&self, entries: HashMap<String, HashMap<String, String>>) {
        *self.entries.write() = entries;
        self.dirty.store(false, Ordering::SeqCst);
    }

    /// Clear the dirty flag, returning whether writes had accumulated.
    pub fn take_dirty(&self) -> bool {
        self.dirty.swap(false, Ordering::SeqCst)
    }

    /// Re-flag pending writes, e.g. after a failed save.
    pub fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::SeqCst);
    }
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TranslationCache {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            hits: self.hits.clone(),
            misses: self.misses.clone(),
            dirty: self.dirty.clone(),
        }
    }
}

/// Truncate text to a maximum length with ellipsis
fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        format!("{}...", text.chars().take(max_length).collect::<String>())
    }
}
