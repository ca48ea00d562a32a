//! Error Types
//!
//! Failures raised while decoding address text or loading options.
//! Lookups never fail: a search with no matches is an empty result.

use thiserror::Error;

/// Errors produced by address codecs and configuration loading.
#[derive(Debug, Error)]
pub enum SearchError {
    /// An index segment contained a token that is not a non-negative integer.
    #[error("invalid index {token:?} in {segment} segment")]
    InvalidIndex {
        /// Name of the segment holding the token.
        segment: &'static str,
        /// The offending token.
        token: String,
    },

    /// Address text could not be parsed as a URL.
    #[error("malformed address url: {0}")]
    Url(#[from] url::ParseError),

    /// Address URL points at a different origin than the codec serves.
    #[error("unexpected origin {found:?} (expected {expected:?})")]
    UnexpectedOrigin { expected: String, found: String },

    /// Address URL path does not match the codec's route prefix.
    #[error("unexpected path {found:?} (expected {expected:?})")]
    UnexpectedPath { expected: String, found: String },

    /// A delimiter must be a single ASCII character.
    #[error("invalid delimiter {0:?}: expected a single ASCII character")]
    InvalidDelimiter(char),

    /// Options could not be deserialized.
    #[error("invalid search options: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for address and configuration operations.
pub type Result<T> = std::result::Result<T, SearchError>;
