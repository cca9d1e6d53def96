/*!
 * # tradux
 *
 * A Rust library for markup-aware translation of formatted chat messages.
 *
 * ## Features
 *
 * - Split formatted text into translatable phrases while preserving
 *   emphasis markers, code fences, bracketed references and escape spans
 * - Route each phrase through a pluggable translation backend exactly once
 *   per (phrase, destination language) pair
 * - Memoize translations with optional persistence across runs
 * - Reassemble translated phrases back into the original string layout
 * - Resolve destination languages over an author/channel/guild hierarchy
 * - Localize structured outgoing payloads (embeds, component labels)
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `markup`: the marker catalog driving the tokenizer
 * - `tokenizer`: single-pass phrase extraction
 * - `assemble`: shift-tracked reassembly of translated phrases
 * - `translation`: dispatch, caching and persistence:
 *   - `translation::core`: the translation service
 *   - `translation::cache`: phrase-level memoization
 *   - `translation::store`: cache persistence hooks
 *   - `translation::payload`: structured payload localization
 * - `providers`: backend implementations (Google web endpoint, mock)
 * - `resolve`: destination language resolution
 * - `language`: language values and the zero-width language handoff
 * - `config`: pipeline configuration with scoped overrides
 * - `errors`: custom error types for the library
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod assemble;
pub mod config;
pub mod errors;
pub mod language;
pub mod markup;
pub mod providers;
pub mod resolve;
pub mod tokenizer;
pub mod translation;

// Re-export main types for easier usage
pub use assemble::reassemble;
pub use config::{FailurePolicy, TranslationConfig};
pub use errors::{AssembleError, BackendError, PipelineError};
pub use language::{Language, encode_lang_suffix, split_lang_suffix};
pub use providers::TranslationBackend;
pub use resolve::{LanguageLookup, ResolveContext, resolve_destination};
pub use tokenizer::{Token, tokenize};
pub use translation::{CacheStore, JsonFileStore, NoopStore, TranslationCache, TranslationService};
