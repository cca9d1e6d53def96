/*!
 * Mock backend implementations for testing.
 *
 * This module provides a deterministic, network-free backend simulating
 * different behaviors:
 * - `MockBackend::echo()` - returns the phrase unchanged
 * - `MockBackend::suffix()` - appends the destination code
 * - `MockBackend::failing()` - always fails with an error
 */

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::BackendError;
use crate::language::Language;
use crate::providers::TranslationBackend;

/// Behavior mode for the mock backend
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return the phrase unchanged
    Echo,
    /// Append the destination code, e.g. "hello" -> "hello [fr]"
    Suffix,
    /// Look up (phrase, destination code) in a fixed table; unmapped
    /// phrases come back unchanged
    Mappings(HashMap<(String, String), String>),
    /// Always fail with an error
    Failing,
    /// Fail every Nth request
    Intermittent {
        /// Period of the failure
        fail_every: usize,
    },
}

/// Mock backend for testing dispatch and caching behavior
#[derive(Debug)]
pub struct MockBackend {
    /// Behavior mode
    behavior: MockBehavior,
    /// Translate call counter, shared across clones
    calls: Arc<AtomicUsize>,
}

impl MockBackend {
    /// Create a new mock backend with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create an identity-translating mock backend
    pub fn echo() -> Self {
        Self::new(MockBehavior::Echo)
    }

    /// Create a mock backend that appends the destination code
    pub fn suffix() -> Self {
        Self::new(MockBehavior::Suffix)
    }

    /// Create a mock backend answering from a fixed table
    pub fn mappings(map: HashMap<(String, String), String>) -> Self {
        Self::new(MockBehavior::Mappings(map))
    }

    /// Create a failing mock backend that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create an intermittently failing mock backend
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Number of translate calls seen so far, shared across clones
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Clone for MockBackend {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior.clone(),
            calls: Arc::clone(&self.calls),
        }
    }
}

#[async_trait]
impl TranslationBackend for MockBackend {
    async fn translate(
        &self,
        text: &str,
        dest: &Language,
        _src: &Language,
    ) -> Result<String, BackendError> {
        let count = self.calls.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            MockBehavior::Echo => Ok(text.to_string()),

            MockBehavior::Suffix => Ok(format!("{} [{}]", text, dest.code())),

            MockBehavior::Mappings(map) => Ok(map
                .get(&(text.to_string(), dest.code().to_string()))
                .cloned()
                .unwrap_or_else(|| text.to_string())),

            MockBehavior::Failing => Err(BackendError::ApiError {
                status_code: 500,
                message: "Simulated backend failure".to_string(),
            }),

            MockBehavior::Intermittent { fail_every } => {
                if count % fail_every == fail_every - 1 {
                    Err(BackendError::ApiError {
                        status_code: 503,
                        message: format!("Simulated intermittent failure (request #{})", count + 1),
                    })
                } else {
                    Ok(text.to_string())
                }
            }
        }
    }
}

/// Convenience for building a mapping table from literals.
pub fn mapping_table<const N: usize>(
    entries: [(&str, &str, &str); N],
) -> HashMap<(String, String), String> {
    entries
        .into_iter()
        .map(|(phrase, lang, translated)| {
            ((phrase.to_string(), lang.to_string()), translated.to_string())
        })
        .collect()
}
