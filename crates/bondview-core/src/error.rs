//! Error types for the bond data model.

use thiserror::Error;

/// Error raised while encoding or decoding bond snapshots.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Payload could not be decoded into the model
    #[error("parse error: {0}")]
    ParseError(String),

    /// Model could not be encoded
    #[error("serialization error: {0}")]
    SerializationError(String),
}

/// Result alias for model operations.
pub type ModelResult<T> = Result<T, ModelError>;
