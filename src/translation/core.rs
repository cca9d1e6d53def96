/*!
 * Core translation dispatch.
 *
 * This module contains the main TranslationService struct, which resolves
 * each phrase through the cache or the injected backend, applies the
 * configured failure policy, and runs the full tokenize-dispatch-reassemble
 * pipeline for whole messages.
 */

use log::warn;
use std::sync::Arc;

use crate::assemble::reassemble;
use crate::config::{ConfigStack, FailurePolicy, ScopedConfig, TranslationConfig};
use crate::errors::{BackendError, PipelineError};
use crate::language::Language;
use crate::providers::TranslationBackend;
use crate::tokenizer::{Token, tokenize};

use super::cache::TranslationCache;
use super::store::{CacheStore, NoopStore};

/// Main translation service.
///
/// Owns the backend and persistence capabilities, the shared phrase cache,
/// and the configuration stack. Tokenization and reassembly stay pure and
/// synchronous; only backend calls suspend.
pub struct TranslationService {
    /// Injected translation backend
    backend: Arc<dyn TranslationBackend>,

    /// Shared phrase cache
    cache: TranslationCache,

    /// Persistence hooks for the cache
    store: Arc<dyn CacheStore>,

    /// Configuration snapshots, base plus scoped overrides
    config: ConfigStack,
}

impl TranslationService {
    /// Create a service with the default configuration.
    pub fn new(backend: Arc<dyn TranslationBackend>) -> Self {
        Self::with_config(backend, TranslationConfig::default())
    }

    /// Create a service with an explicit configuration.
    pub fn with_config(backend: Arc<dyn TranslationBackend>, config: TranslationConfig) -> Self {
        Self {
            backend,
            cache: TranslationCache::new(),
            store: Arc::new(NoopStore),
            config: ConfigStack::new(config),
        }
    }

    /// Attach a persistence store for the cache.
    pub fn with_store(mut self, store: Arc<dyn CacheStore>) -> Self {
        self.store = store;
        self
    }

    /// Share an existing cache, e.g. between services for different
    /// backends.
    pub fn with_cache(mut self, cache: TranslationCache) -> Self {
        self.cache = cache;
        self
    }

    /// The shared phrase cache.
    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    /// Snapshot of the configuration currently in effect.
    pub fn config(&self) -> TranslationConfig {
        self.config.current()
    }

    /// Apply a temporary configuration override for a unit of work.
    ///
    /// The edited snapshot stays in effect until the returned guard drops.
    pub fn scoped(&self, edit: impl FnOnce(&mut TranslationConfig)) -> ScopedConfig<'_> {
        let mut snapshot = self.config.current();
        edit(&mut snapshot);
        self.config.push(snapshot);
        ScopedConfig::new(&self.config)
    }

    /// Fill the cache through the persistence hook. Called once at startup.
    pub async fn load_cache(&self) -> anyhow::Result<()> {
        self.store.load(&self.cache).await
    }

    /// Write the cache out through the persistence hook.
    pub async fn save_cache(&self) -> anyhow::Result<()> {
        self.store.save(&self.cache).await
    }

    /// Resolve one phrase: cache first, then the backend.
    ///
    /// On backend failure the configured policy decides between
    /// propagating the error and falling back to the original phrase.
    pub async fn translate_phrase(
        &self,
        phrase: &str,
        dest: &Language,
        src: &Language,
    ) -> Result<String, BackendError> {
        let cfg = self.config.current();

        if cfg.cache_enabled {
            if let Some(hit) = self.cache.get(phrase, dest.code()) {
                return Ok(hit);
            }
        }

        match self.backend.translate(phrase, dest, src).await {
            Ok(translated) => {
                if cfg.cache_enabled {
                    self.cache.set(phrase, dest.code(), &translated);
                }
                Ok(translated)
            }
            Err(err) => match cfg.failure_policy {
                FailurePolicy::Propagate => Err(err),
                FailurePolicy::Fallback => {
                    if !cfg.suppress_errors {
                        warn!(
                            "Backend failed for '{}' -> {}: {}; keeping original",
                            preview(phrase),
                            dest.code(),
                            err
                        );
                    }
                    if cfg.cache_enabled && cfg.cache_failures {
                        self.cache.set(phrase, dest.code(), phrase);
                    }
                    Ok(phrase.to_string())
                }
            },
        }
    }

    /// Translate a token sequence, keeping every span where it is.
    ///
    /// Tokens come back in the same order with `phrase` replaced, ready
    /// for reassembly.
    pub async fn translate_tokens(
        &self,
        tokens: &[Token],
        dest: &Language,
        src: &Language,
    ) -> Result<Vec<Token>, BackendError> {
        let mut out = Vec::with_capacity(tokens.len());
        for token in tokens {
            let phrase = self.translate_phrase(&token.phrase, dest, src).await?;
            out.push(Token::new(token.start, token.end, phrase));
        }
        Ok(out)
    }

    /// Translate a list of phrases, resolving what the cache already has
    /// and handing the misses to the backend's batch primitive in one go.
    pub async fn translate_batch(
        &self,
        phrases: &[String],
        dest: &Language,
        src: &Language,
    ) -> Result<Vec<String>, BackendError> {
        let cfg = self.config.current();

        let mut results: Vec<Option<String>> = vec![None; phrases.len()];
        let mut miss_indices = Vec::new();
        let mut miss_phrases = Vec::new();

        for (i, phrase) in phrases.iter().enumerate() {
            if cfg.cache_enabled {
                if let Some(hit) = self.cache.get(phrase, dest.code()) {
                    results[i] = Some(hit);
                    continue;
                }
            }
            miss_indices.push(i);
            miss_phrases.push(phrase.clone());
        }

        if !miss_phrases.is_empty() {
            let batch = self
                .backend
                .translate_batch(&miss_phrases, dest, src)
                .await
                .and_then(|translated| {
                    if translated.len() == miss_phrases.len() {
                        Ok(translated)
                    } else {
                        Err(BackendError::ParseError(format!(
                            "Batch returned {} results for {} phrases",
                            translated.len(),
                            miss_phrases.len()
                        )))
                    }
                });

            match batch {
                Ok(translated) => {
                    for (&i, text) in miss_indices.iter().zip(translated) {
                        if cfg.cache_enabled {
                            self.cache.set(&phrases[i], dest.code(), &text);
                        }
                        results[i] = Some(text);
                    }
                }
                Err(err) => match cfg.failure_policy {
                    FailurePolicy::Propagate => return Err(err),
                    FailurePolicy::Fallback => {
                        if !cfg.suppress_errors {
                            warn!(
                                "Batch backend call failed for {} phrases -> {}: {}; keeping originals",
                                miss_indices.len(),
                                dest.code(),
                                err
                            );
                        }
                        for &i in &miss_indices {
                            if cfg.cache_enabled && cfg.cache_failures {
                                self.cache.set(&phrases[i], dest.code(), &phrases[i]);
                            }
                            results[i] = Some(phrases[i].clone());
                        }
                    }
                },
            }
        }

        Ok(results
            .into_iter()
            .zip(phrases)
            .map(|(result, original)| result.unwrap_or_else(|| original.clone()))
            .collect())
    }

    /// Run a whole message through the pipeline: tokenize, dispatch each
    /// phrase, splice the translations back into the original layout.
    ///
    /// The source language comes from the configuration. Persists the
    /// cache afterwards when new entries were written.
    pub async fn translate_message(
        &self,
        content: &str,
        dest: &Language,
    ) -> Result<String, PipelineError> {
        let src = self.config.current().source_language.clone();
        let tokens = tokenize(content);
        let translated = self.translate_tokens(&tokens, dest, &src).await?;
        let output = reassemble(content, &translated)?;
        self.persist_if_dirty().await;
        Ok(output)
    }

    /// Save the cache when writes have accumulated; store failures are
    /// logged, never fatal (the worst case is a cold cache next run).
    async fn persist_if_dirty(&self) {
        if self.cache.take_dirty() {
            if let Err(err) = self.store.save(&self.cache).await {
                warn!("Failed to persist translation cache: {}", err);
                self.cache.mark_dirty();
            }
        }
    }
}

fn preview(text: &str) -> String {
    if text.chars().count() <= 30 {
        text.to_string()
    } else {
        format!("{}...", text.chars().take(30).collect::<String>())
    }
}
