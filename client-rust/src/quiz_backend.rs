use crate::{Quiz, QuizClientResult, QuizHistoryItem, QuizId};

/// The backend operations the quiz workflows depend on.
/// Implementations perform a single attempt per call: no retries and no
/// timeouts beyond the transport's own.
#[async_trait::async_trait]
pub trait QuizBackend: Send + Sync {
    /// Generate (or fetch the previously generated) quiz for an article URL.
    async fn generate_quiz(&self, url: &str) -> QuizClientResult<Quiz>;
    /// List previously generated quizzes in the order returned by the backend.
    async fn list_history(&self) -> QuizClientResult<Vec<QuizHistoryItem>>;
    /// Fetch one stored quiz.
    async fn get_quiz(&self, id: &QuizId) -> QuizClientResult<Quiz>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizOperation {
    GenerateQuiz,
    ListHistory,
    GetQuiz,
}

impl QuizOperation {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GenerateQuiz => "generate_quiz",
            Self::ListHistory => "list_history",
            Self::GetQuiz => "get_quiz",
        }
    }

    #[must_use]
    pub fn http_method(self) -> &'static str {
        match self {
            Self::GenerateQuiz => "POST",
            Self::ListHistory | Self::GetQuiz => "GET",
        }
    }

    /// Message used when the backend fails without saying why.
    #[must_use]
    pub fn fallback_message(self) -> &'static str {
        match self {
            Self::GenerateQuiz => "Failed to generate quiz",
            Self::ListHistory => "Failed to fetch history",
            Self::GetQuiz => "Failed to fetch quiz",
        }
    }
}
