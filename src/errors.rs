/*!
 * Error types for the tradux library.
 *
 * This module contains custom error types for the different parts of the
 * pipeline, using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to a translation backend
#[derive(Error, Debug)]
pub enum BackendError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Contract violations when splicing tokens back into a source string.
///
/// These indicate programmer misuse (tokens not derived from the given
/// source, or applied out of order), not conditions callers are expected
/// to recover from.
#[derive(Error, Debug)]
pub enum AssembleError {
    /// Token span does not fit inside the source string
    #[error("token span {start}..{end} is out of bounds for a source of {len} bytes")]
    SpanOutOfBounds {
        /// Span start offset
        start: usize,
        /// Span end offset
        end: usize,
        /// Source length in bytes
        len: usize,
    },

    /// Tokens were not supplied in ascending source order
    #[error("token at index {index} is out of order or overlaps the previous token")]
    OutOfOrder {
        /// Index of the offending token
        index: usize,
    },

    /// Token span edge falls inside a multi-byte character
    #[error("token span edge at byte {pos} is not a character boundary")]
    NotCharBoundary {
        /// Offending byte offset
        pos: usize,
    },
}

/// Errors that can occur while running the whole message pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Error from the translation backend
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Error from reassembly
    #[error("Assembly error: {0}")]
    Assemble(#[from] AssembleError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for PipelineError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}
