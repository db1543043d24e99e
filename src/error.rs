//! Error types for key decoding
//!
//! This module defines all error types used throughout the crate.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use thiserror::Error;

/// Result type alias for key-decoding operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the key-compat decoder
///
/// All errors are returned synchronously; nothing is retried internally,
/// since re-parsing the same bytes cannot succeed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Base64 decoding failed or the payload did not parse as the
    /// modern key message
    #[error("malformed token: {0}")]
    MalformedToken(String),

    /// The assembled key chain failed structural validation
    #[error("invalid key")]
    InvalidKey,

    /// The token matched neither known key schema, or the modern schema
    /// was seen while the conversion gate is unset
    #[error("unsupported key format")]
    UnsupportedFormat,
}
