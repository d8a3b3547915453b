// Crate-wide error type

use thiserror::Error;

/// Errors surfaced by the chat core. The rendering layer maps these to
/// disabled buttons and inline helper text; there are no fatal states.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("message not found: {0}")]
    UnknownMessage(String),

    #[error("message input is empty")]
    EmptyInput,

    #[error("not authenticated")]
    NotAuthenticated,

    #[error("feedback is disabled for this dialog")]
    FeedbackDisabled,

    #[error("feedback is not available for message {0}")]
    FeedbackUnavailable(String),

    #[error("unknown feedback option: {0}")]
    UnknownOption(String),

    #[error("invalid transition: {0}")]
    InvalidTransition(&'static str),

    #[error("validation error: {0}")]
    Validation(String),
}
