use crate::Failure;
use wiki_quiz_client::{Quiz, QuizId};

/// View state of the quiz detail dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailViewer {
    open: bool,
    requested: Option<QuizId>,
    quiz: Option<Quiz>,
    failure: Option<Failure>,
}

impl DetailViewer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open for `id`, showing a loading placeholder until the quiz arrives.
    pub fn open(&mut self, id: QuizId) {
        self.open = true;
        self.requested = Some(id);
        self.quiz = None;
        self.failure = None;
    }

    /// Show `quiz` if the viewer is still open and waiting for `id`.
    /// Returns whether the quiz was shown.
    pub fn show(&mut self, id: &QuizId, quiz: Quiz) -> bool {
        if !self.is_waiting_for(id) {
            return false;
        }
        self.quiz = Some(quiz);
        true
    }

    /// Keep the viewer open and show `failure` instead of the quiz.
    pub fn fail(&mut self, id: &QuizId, failure: Failure) -> bool {
        if !self.is_waiting_for(id) {
            return false;
        }
        self.failure = Some(failure);
        true
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether the loading placeholder should be shown.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.open && self.quiz.is_none() && self.failure.is_none()
    }

    #[must_use]
    pub fn requested_id(&self) -> Option<&QuizId> {
        self.requested.as_ref()
    }

    #[must_use]
    pub fn quiz(&self) -> Option<&Quiz> {
        self.quiz.as_ref()
    }

    #[must_use]
    pub fn failure(&self) -> Option<&Failure> {
        self.failure.as_ref()
    }

    /// Dialog title: `Quiz: <title>` once loaded, `Quiz Details` before.
    #[must_use]
    pub fn title(&self) -> String {
        match &self.quiz {
            Some(quiz) => format!("Quiz: {}", quiz.title),
            None => "Quiz Details".to_string(),
        }
    }

    fn is_waiting_for(&self, id: &QuizId) -> bool {
        self.open && self.requested.as_ref() == Some(id)
    }
}
