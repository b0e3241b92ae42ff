//! Session and repository error types.
//!
//! `RepositoryError` is defined in `lernwort-core` so the trainer can
//! classify fetch failures for retry decisions without string matching;
//! the `lernwort-repository` crate produces these values.

use thiserror::Error;

/// Errors raised by session state transitions. All of these are recoverable
/// and local; none are fatal to the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    /// A draw was attempted with no remaining documents.
    #[error("no documents remain in the deck")]
    EmptyDeck,

    /// A mistake session was requested but the wrong and almost-correct
    /// buckets are both empty.
    #[error("no mistakes to retry")]
    NoMistakes,

    /// An answer transition was invoked with no document awaiting one.
    #[error("no document is awaiting an answer")]
    NoActiveDocument,

    /// A mistake session was requested before the current pass finished.
    #[error("the session is still in progress")]
    SessionInProgress,
}

/// Errors that can occur when fetching from the word repository.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The requested training set does not exist.
    #[error("training set not found: {0}")]
    SetNotFound(u64),

    /// The requested document does not exist.
    #[error("document not found: {0}")]
    DocumentNotFound(u64),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),

    /// The repository returned data the core cannot use.
    #[error("invalid training data: {0}")]
    InvalidData(String),
}

impl RepositoryError {
    /// Returns `true` if retrying the same call may succeed. The core never
    /// retries itself; this is for callers that own a retry policy.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            RepositoryError::Timeout(_) | RepositoryError::NetworkError(_)
        )
    }
}
