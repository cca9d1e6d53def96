/*!
 * Translation dispatch, caching and persistence.
 *
 * This module contains the pieces between the tokenizer and the
 * reassembler. It is split into several submodules:
 *
 * - `core`: the translation service and phrase dispatch
 * - `cache`: phrase-level memoization
 * - `store`: persistence hooks for the cache
 * - `payload`: localization of structured outgoing payloads
 */

// Re-export main types for easier usage
pub use self::cache::TranslationCache;
pub use self::core::TranslationService;
pub use self::store::{CacheStore, JsonFileStore, NoopStore};

// Submodules
pub mod cache;
pub mod core;
pub mod payload;
pub mod store;
