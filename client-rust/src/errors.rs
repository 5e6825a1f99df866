use thiserror::Error;

pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum QuizClientError {
    /// The client was configured with values that cannot be sent
    /// (e.g. an unparsable base URL or an invalid header name).
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The request could not reach the backend or the connection failed
    /// before a response was received.
    #[error("Transport error: {0}")]
    Transport(#[source] BoxedError),
    /// The backend was reached but returned a non-success status code.
    /// The message is the one provided by the backend, or a generic one
    /// for the operation when the backend did not provide any.
    #[error("{1} (Status {0})")]
    Server(reqwest::StatusCode, String),
    /// A response was received but its body cannot be used (e.g. the quiz
    /// has no title, or the body is not JSON).
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
}

impl QuizClientError {
    pub fn transport(error: impl Into<BoxedError>) -> Self {
        Self::Transport(error.into())
    }

    pub fn server(status: reqwest::StatusCode, message: impl Into<String>) -> Self {
        Self::Server(status, message.into())
    }

    #[must_use]
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::Server(status, _) => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for QuizClientError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::MalformedPayload(error.to_string())
        } else {
            Self::Transport(Box::new(error))
        }
    }
}

pub type QuizClientResult<T> = Result<T, QuizClientError>;
