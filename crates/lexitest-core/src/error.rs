//! Engine and collaborator error types.
//!
//! `CorpusError` represents failures of the corpus/session collaborators;
//! `EngineError` is the taxonomy surfaced to callers of the engine. Defined
//! here so callers can classify failures without string matching.

use thiserror::Error;

/// Errors raised by the corpus and session collaborators.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// The backing store could not be reached or failed mid-operation.
    #[error("corpus unavailable: {0}")]
    Unavailable(String),

    /// An I/O failure while reading or writing corpus data.
    #[error("corpus i/o error: {0}")]
    Io(String),
}

/// A convenience alias for collaborator results.
pub type CorpusResult<T> = Result<T, CorpusError>;

/// The primary error type for engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The request was malformed (bad ratio/count, missing fields).
    /// No mutation was performed.
    #[error("invalid request: {0}")]
    Validation(String),

    /// A session or entity is absent, or not owned by the caller.
    /// No mutation was performed.
    #[error("not found: {0}")]
    NotFound(String),

    /// A collaborator failed. Writes committed before the failure point
    /// are not rolled back.
    #[error(transparent)]
    Corpus(#[from] CorpusError),

    /// An unexpected failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl EngineError {
    /// Returns `true` when the failure was caused by the request itself
    /// rather than by the engine or its collaborators.
    pub fn is_client_error(&self) -> bool {
        matches!(self, EngineError::Validation(_) | EngineError::NotFound(_))
    }
}
