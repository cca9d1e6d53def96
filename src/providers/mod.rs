/*!
 * Backend implementations for translation engines.
 *
 * This module defines the capability the dispatcher consumes and the
 * clients that implement it:
 * - Google: the public Google translate web endpoint
 * - Mock: deterministic behaviors for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::BackendError;
use crate::language::Language;

/// Common trait for all translation backends
///
/// This trait defines the interface every backend must follow, allowing
/// them to be injected interchangeably into the translation service.
#[async_trait]
pub trait TranslationBackend: Send + Sync + Debug {
    /// Translate a single phrase from the source to the destination
    /// language.
    ///
    /// # Arguments
    /// * `text` - The phrase to translate
    /// * `dest` - Destination language
    /// * `src` - Source language
    ///
    /// # Returns
    /// * `Result<String, BackendError>` - The translated text or an error
    async fn translate(
        &self,
        text: &str,
        dest: &Language,
        src: &Language,
    ) -> Result<String, BackendError>;

    /// Translate a batch of phrases.
    ///
    /// The default maps `translate` over the slice in order and stops at
    /// the first failure; backends with a native batch primitive should
    /// override it.
    async fn translate_batch(
        &self,
        texts: &[String],
        dest: &Language,
        src: &Language,
    ) -> Result<Vec<String>, BackendError> {
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            out.push(self.translate(text, dest, src).await?);
        }
        Ok(out)
    }
}

pub mod google;
pub mod mock;
