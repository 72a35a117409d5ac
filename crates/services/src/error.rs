//! Shared error types for the services crate.

use thiserror::Error;

/// Errors emitted by quiz sessions.
///
/// Every variant is recoverable: the session state is left exactly as it
/// was before the rejected call.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("navigation is blocked while a transition is in progress")]
    Transitioning,
    #[error("question {index} has no answer yet")]
    Unanswered { index: usize },
    #[error("already at the first question")]
    AtFirstQuestion,
    #[error("quiz already completed")]
    Completed,
    #[error("quiz is not completed yet")]
    NotCompleted,
}
