/*!
 * Configuration threaded through the translation pipeline.
 *
 * A [`TranslationConfig`] is an explicit value handed to the service at
 * construction time. Temporary reconfiguration around a unit of work goes
 * through [`ConfigStack`]: a snapshot is pushed with the requested edits
 * and popped again when the returned guard drops.
 */

use crate::language::Language;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// What the dispatcher does when the backend fails on a phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Substitute the original phrase unchanged and keep going
    #[default]
    Fallback,
    /// Surface the failure to the caller
    Propagate,
}

/// Settings for one translation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    /// Language the outgoing text is written in
    pub source_language: Language,

    /// Behavior on backend failure
    pub failure_policy: FailurePolicy,

    /// Keep backend failures out of the log when falling back
    pub suppress_errors: bool,

    /// Whether phrase results are memoized at all
    pub cache_enabled: bool,

    /// Cache the fallback result of a failed call so the phrase is not
    /// retried on every message
    pub cache_failures: bool,

    /// Translate the plain content surface of a payload
    pub translate_content: bool,

    /// Translate embed titles, descriptions, fields, authors and footers
    pub translate_embeds: bool,

    /// Translate interactive component labels
    pub translate_components: bool,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            source_language: Language::english(),
            failure_policy: FailurePolicy::Fallback,
            suppress_errors: true,
            cache_enabled: true,
            cache_failures: true,
            translate_content: true,
            translate_embeds: false,
            translate_components: false,
        }
    }
}

/// Stack of configuration snapshots.
///
/// The base configuration is always present; scoped overrides sit on top
/// of it and disappear when their guard drops.
pub(crate) struct ConfigStack {
    base: TranslationConfig,
    overrides: Mutex<Vec<TranslationConfig>>,
}

impl ConfigStack {
    pub(crate) fn new(base: TranslationConfig) -> Self {
        Self {
            base,
            overrides: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of the configuration currently in effect.
    pub(crate) fn current(&self) -> TranslationConfig {
        self.overrides
            .lock()
            .last()
            .cloned()
            .unwrap_or_else(|| self.base.clone())
    }

    pub(crate) fn push(&self, config: TranslationConfig) {
        self.overrides.lock().push(config);
    }

    fn pop(&self) {
        self.overrides.lock().pop();
    }
}

/// Guard for a scoped configuration override; pops its snapshot on drop.
///
/// Obtained from `TranslationService::scoped`.
#[must_use = "the override ends as soon as the guard is dropped"]
pub struct ScopedConfig<'a> {
    stack: &'a ConfigStack,
}

impl<'a> ScopedConfig<'a> {
    pub(crate) fn new(stack: &'a ConfigStack) -> Self {
        Self { stack }
    }
}

impl Drop for ScopedConfig<'_> {
    fn drop(&mut self) {
        self.stack.pop();
    }
}
