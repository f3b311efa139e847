//! Error types for the fingerprinting engine.

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Engine error types.
///
/// Absence of a match is not an error; `recognize` reports it as `None`.
#[derive(Debug, Error)]
pub enum Error {
    /// Caller-supplied input was rejected before any side effect.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Catalog failure. Any write transaction was rolled back.
    #[error(transparent)]
    Store(#[from] refrain_db::StoreError),

    /// A WAV file could not be read or written.
    #[error("wav error: {0}")]
    Wav(#[from] hound::Error),
}
