use thiserror::Error;
use wiki_quiz_client::{QuizClientError, QuizOperation};

/// User input rejected before any request is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a Wikipedia URL")]
    EmptyUrl,
    #[error("Please enter a valid Wikipedia URL (e.g., https://en.wikipedia.org/wiki/Alan_Turing)")]
    InvalidUrl,
}

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Client(#[from] QuizClientError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    EmptyUrl,
    InvalidUrl,
    /// The backend could not be reached.
    Transport,
    /// The backend answered with a failure status.
    Server,
    /// The backend answered but the payload was unusable.
    MalformedResponse,
    /// The client is misconfigured.
    InvalidInput,
}

impl FailureKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EmptyUrl => "empty_url",
            Self::InvalidUrl => "invalid_url",
            Self::Transport => "transport",
            Self::Server => "server",
            Self::MalformedResponse => "malformed_response",
            Self::InvalidInput => "invalid_input",
        }
    }
}

/// Terminal failure of a workflow, with a reason fit for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub reason: String,
    /// HTTP status for `FailureKind::Server`.
    pub status: Option<u16>,
}

impl Failure {
    #[must_use]
    pub fn new(kind: FailureKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
            status: None,
        }
    }

    /// Convert any workflow error into the failure shown for `operation`.
    #[must_use]
    pub fn from_error(error: &WorkflowError, operation: QuizOperation) -> Self {
        match error {
            WorkflowError::Validation(ValidationError::EmptyUrl) => {
                Self::new(FailureKind::EmptyUrl, ValidationError::EmptyUrl.to_string())
            }
            WorkflowError::Validation(ValidationError::InvalidUrl) => {
                Self::new(FailureKind::InvalidUrl, ValidationError::InvalidUrl.to_string())
            }
            WorkflowError::Client(error) => Self::from_client_error(error, operation),
        }
    }

    fn from_client_error(error: &QuizClientError, operation: QuizOperation) -> Self {
        match error {
            QuizClientError::Transport(source) => Self::new(
                FailureKind::Transport,
                format!(
                    "Cannot connect to server. Make sure the backend is running ({source})"
                ),
            ),
            QuizClientError::Server(status, message) => {
                let reason = if message.trim().is_empty() {
                    operation.fallback_message().to_string()
                } else {
                    message.clone()
                };
                Self {
                    kind: FailureKind::Server,
                    reason,
                    status: Some(status.as_u16()),
                }
            }
            QuizClientError::MalformedPayload(_) => Self::new(
                FailureKind::MalformedResponse,
                "Received a malformed response from the server",
            ),
            QuizClientError::InvalidInput(message) => {
                Self::new(FailureKind::InvalidInput, message.clone())
            }
        }
    }
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.reason)
    }
}
