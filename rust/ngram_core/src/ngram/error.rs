//! Error types for the n-gram index.

use thiserror::Error;

/// Errors that can occur during n-gram index operations.
///
/// Duplicate adds, deletes of absent records and patterns without grams are
/// not errors: they are no-ops or empty results.
#[derive(Error, Debug)]
pub enum NgramError {
    /// Gram size must lie in `1..=MAX_GRAM_SIZE`.
    #[error("invalid gram size: {0} (must be 1..=64)")]
    InvalidGramSize(usize),

    /// Configuration could not be parsed.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The host could not produce the bytes of a value handle.
    #[error("value extraction failed: {0}")]
    Extraction(String),

    /// Every record sequence number has been handed out.
    #[error("record sequence numbers exhausted (exceeded u32::MAX inserts)")]
    SequenceExhausted,
}

pub type Result<T> = std::result::Result<T, NgramError>;

impl From<serde_json::Error> for NgramError {
    fn from(e: serde_json::Error) -> Self {
        NgramError::InvalidConfig(e.to_string())
    }
}
