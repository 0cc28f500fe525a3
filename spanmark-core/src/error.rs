//! Error types for the Spanmark library.

use thiserror::Error;

/// Main error type for Spanmark operations.
#[derive(Debug, Error)]
pub enum SpanmarkError {
    /// Span does not address the document text.
    #[error("invalid span [{start}, {end}) over text of length {len}")]
    InvalidSpan {
        start: usize,
        end: usize,
        len: usize,
    },

    /// Batch submission attempted with no documents selected.
    #[error("no documents selected for batch annotation")]
    EmptyBatch,

    /// A batch submission is already outstanding.
    #[error("a batch submission is already in progress")]
    SubmitInProgress,

    /// Network or service failure at the transport boundary.
    #[error("service request failed: {0}")]
    Transport(String),

    /// Distinguished unauthorized failure. Not retried and not shown as a
    /// generic message; the authentication collaborator handles it.
    #[error("authentication expired")]
    AuthExpired,

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Spanmark operations.
pub type Result<T> = std::result::Result<T, SpanmarkError>;
