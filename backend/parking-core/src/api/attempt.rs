//! Per-attempt bookkeeping for the retry loop.

use crate::error::ApiError;

use common::HttpStatusCode;

/// What one `await_response` produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// 200 with a body (possibly blank).
    Body,
    /// Nothing arrived before the timeout.
    Timeout,
    /// Connection or I/O failure, or no request was in flight.
    Transport(String),
    /// A non-200 status.
    Http(HttpStatusCode),
    /// The key could not be put on the wire; nothing was sent.
    InvalidCredential,
}

impl AttemptOutcome {
    /// Outcome for an error that arrived in place of a response.
    pub(crate) fn from_error(error: &ApiError) -> Self {
        match error {
            ApiError::Timeout { .. } => AttemptOutcome::Timeout,
            ApiError::InvalidCredential { .. } => AttemptOutcome::InvalidCredential,
            ApiError::Transport { message, .. } => AttemptOutcome::Transport(message.clone()),
            other => AttemptOutcome::Transport(other.error_category().to_string()),
        }
    }
}

/// One attempt within a single `fetch_with_retry` call. 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchAttempt {
    pub index: u32,
    pub outcome: AttemptOutcome,
}

/// States of the retry loop.
#[derive(Debug)]
pub(crate) enum RetryState {
    Attempting(u32),
    Succeeded(String),
    Aborted(ApiError),
    Exhausted(u32),
}
