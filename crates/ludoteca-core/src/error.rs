//! Error types shared across the ludoteca crates.
//!
//! `ApiError` lives in core so the session engine can classify backend
//! failures for retry decisions without string matching.

use thiserror::Error;

/// Errors produced by the game session state machine.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A session was started without a selected child.
    #[error("no child selected; pick a child before starting a game")]
    NoChildSelected,

    /// The game definition has no rounds to play.
    #[error("game '{0}' has no rounds")]
    EmptyGame(String),

    /// An answer was submitted after the session finished.
    #[error("the game is already finished")]
    Finished,

    /// Progress submission was requested before the session finished.
    #[error("the game is still in progress")]
    NotFinished,

    /// Progress submission was requested after a successful submit.
    #[error("progress was already submitted")]
    AlreadySubmitted,

    /// A submission attempt was made while another one is in flight.
    #[error("a submission is already in flight")]
    SubmissionInFlight,

    /// The backend rejected or failed the progress submission.
    #[error("submission failed: {0}")]
    Submission(#[from] ApiError),
}

/// Errors that can occur when talking to the remote backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The requested entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The backend returned a non-success response.
    #[error("backend error (HTTP {status}): {message}")]
    Backend { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A connectivity error occurred.
    #[error("network error: {0}")]
    Network(String),
}

impl ApiError {
    /// Returns `true` if retrying the same request could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Timeout(_) | ApiError::Network(_) => true,
            ApiError::Backend { status, .. } => *status >= 500 || *status == 429,
            ApiError::NotFound(_) => false,
        }
    }
}
