use crate::{Failure, ValidationError, WorkflowError};
use wiki_quiz_client::{
    is_valid_article_url, Quiz, QuizBackend, QuizClientResult, QuizOperation,
};

/// Lifecycle of a single "generate quiz" submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GenerationState {
    #[default]
    Idle,
    Validating,
    Requesting,
    Success(Quiz),
    Failed(Failure),
}

impl GenerationState {
    /// Whether a loading indicator should be shown.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Validating | Self::Requesting)
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success(_) | Self::Failed(_))
    }

    #[must_use]
    pub fn quiz(&self) -> Option<&Quiz> {
        match self {
            Self::Success(quiz) => Some(quiz),
            _ => None,
        }
    }

    #[must_use]
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

/// The request to make for a submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub url: String,
}

impl GenerationRequest {
    pub async fn send(&self, backend: &dyn QuizBackend) -> QuizClientResult<Quiz> {
        backend.generate_quiz(&self.url).await
    }
}

/// Check a submitted URL and return it trimmed.
pub fn validate_url(input: &str) -> Result<String, ValidationError> {
    let url = input.trim();
    if url.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }
    if !is_valid_article_url(url) {
        return Err(ValidationError::InvalidUrl);
    }
    Ok(url.to_string())
}

/// State machine for quiz generation.
///
/// The machine itself does not guard against overlapping submissions;
/// [`crate::QuizController`] ignores submissions while a request is
/// outstanding.
#[derive(Debug, Default)]
pub struct GenerationWorkflow {
    state: GenerationState,
}

impl GenerationWorkflow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &GenerationState {
        &self.state
    }

    /// Start a submission, discarding any previous result.
    /// Returns the request to send, or `None` when validation failed and the
    /// workflow is already in `Failed`.
    pub fn submit(&mut self, url: &str) -> Option<GenerationRequest> {
        self.state = GenerationState::Validating;

        match validate_url(url) {
            Ok(url) => {
                tracing::debug!(%url, "quiz generation requested");
                self.state = GenerationState::Requesting;
                Some(GenerationRequest { url })
            }
            Err(error) => {
                self.fail(&WorkflowError::from(error));
                None
            }
        }
    }

    /// Apply the outcome of the request returned by [`Self::submit`].
    pub fn complete(&mut self, result: QuizClientResult<Quiz>) -> &GenerationState {
        match result {
            Ok(quiz) => {
                tracing::debug!(title = %quiz.title, questions = quiz.quiz.len(), "quiz generated");
                self.state = GenerationState::Success(quiz);
            }
            Err(error) => self.fail(&WorkflowError::from(error)),
        }
        &self.state
    }

    /// Submit, send and complete in one go.
    pub async fn run(&mut self, backend: &dyn QuizBackend, url: &str) -> &GenerationState {
        if let Some(request) = self.submit(url) {
            let result = request.send(backend).await;
            self.complete(result);
        }
        &self.state
    }

    fn fail(&mut self, error: &WorkflowError) {
        let failure = Failure::from_error(error, QuizOperation::GenerateQuiz);
        tracing::debug!(kind = failure.kind.as_str(), reason = %failure.reason, "quiz generation failed");
        self.state = GenerationState::Failed(failure);
    }
}
