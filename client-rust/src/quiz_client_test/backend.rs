use std::{collections::VecDeque, sync::Mutex};

use serde_json::Value;

use crate::{
    normalize, Quiz, QuizBackend, QuizClientError, QuizClientResult, QuizHistoryItem, QuizId,
};

/// Result for a mocked `generate_quiz` or `get_quiz` call.
/// Payloads go through [`normalize`] exactly like the HTTP client's, so a
/// malformed payload yields `QuizClientError::MalformedPayload`.
pub enum MockQuizResult {
    Payload(Value),
    Error(QuizClientError),
}

impl MockQuizResult {
    /// Construct a result that yields the provided raw payload.
    pub fn payload(payload: Value) -> Self {
        Self::Payload(payload)
    }

    /// Construct a result that yields the provided error.
    pub fn error(error: QuizClientError) -> Self {
        Self::Error(error)
    }
}

impl From<Value> for MockQuizResult {
    fn from(payload: Value) -> Self {
        Self::payload(payload)
    }
}

impl From<Quiz> for MockQuizResult {
    fn from(quiz: Quiz) -> Self {
        Self::payload(serde_json::to_value(quiz).unwrap_or_default())
    }
}

impl From<QuizClientError> for MockQuizResult {
    fn from(error: QuizClientError) -> Self {
        Self::error(error)
    }
}

/// Result for a mocked `list_history` call.
pub enum MockHistoryResult {
    Items(Vec<QuizHistoryItem>),
    Error(QuizClientError),
}

impl From<Vec<QuizHistoryItem>> for MockHistoryResult {
    fn from(items: Vec<QuizHistoryItem>) -> Self {
        Self::Items(items)
    }
}

impl From<QuizClientError> for MockHistoryResult {
    fn from(error: QuizClientError) -> Self {
        Self::Error(error)
    }
}

/// A backend call observed by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackedCall {
    GenerateQuiz(String),
    ListHistory,
    GetQuiz(QuizId),
}

#[derive(Default)]
struct MockQuizBackendState {
    mocked_generate_results: VecDeque<MockQuizResult>,
    mocked_history_results: VecDeque<MockHistoryResult>,
    mocked_quiz_results: VecDeque<MockQuizResult>,
    tracked_calls: Vec<TrackedCall>,
}

impl MockQuizBackendState {
    fn reset(&mut self) {
        self.tracked_calls.clear();
    }

    fn restore(&mut self) {
        self.mocked_generate_results.clear();
        self.mocked_history_results.clear();
        self.mocked_quiz_results.clear();
        self.reset();
    }
}

/// A mock backend for testing that tracks calls and yields predefined results.
#[derive(Default)]
pub struct MockQuizBackend {
    state: Mutex<MockQuizBackendState>,
}

impl MockQuizBackend {
    /// Construct a new mock backend with no enqueued results.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a mocked `generate_quiz` result.
    pub fn enqueue_generate<R>(&self, result: R) -> &Self
    where
        R: Into<MockQuizResult>,
    {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.mocked_generate_results.push_back(result.into());
        drop(state);
        self
    }

    /// Enqueue a mocked `list_history` result.
    pub fn enqueue_history<R>(&self, result: R) -> &Self
    where
        R: Into<MockHistoryResult>,
    {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.mocked_history_results.push_back(result.into());
        drop(state);
        self
    }

    /// Enqueue a mocked `get_quiz` result.
    pub fn enqueue_quiz<R>(&self, result: R) -> &Self
    where
        R: Into<MockQuizResult>,
    {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.mocked_quiz_results.push_back(result.into());
        drop(state);
        self
    }

    /// Retrieve the calls made so far, in order.
    pub fn tracked_calls(&self) -> Vec<TrackedCall> {
        let state = self.state.lock().expect("mock state poisoned");
        state.tracked_calls.clone()
    }

    /// Reset tracked calls without touching enqueued results.
    pub fn reset(&self) {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.reset();
    }

    /// Clear both tracked calls and enqueued results.
    pub fn restore(&self) {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.restore();
    }
}

#[async_trait::async_trait]
impl QuizBackend for MockQuizBackend {
    async fn generate_quiz(&self, url: &str) -> QuizClientResult<Quiz> {
        let mut state = self.state.lock().expect("mock state poisoned");
        state
            .tracked_calls
            .push(TrackedCall::GenerateQuiz(url.to_string()));

        let result = state.mocked_generate_results.pop_front().ok_or_else(|| {
            QuizClientError::transport("no mocked generate_quiz results available")
        })?;

        resolve_quiz(result)
    }

    async fn list_history(&self) -> QuizClientResult<Vec<QuizHistoryItem>> {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.tracked_calls.push(TrackedCall::ListHistory);

        let result = state.mocked_history_results.pop_front().ok_or_else(|| {
            QuizClientError::transport("no mocked list_history results available")
        })?;

        match result {
            MockHistoryResult::Items(items) => Ok(items),
            MockHistoryResult::Error(error) => Err(error),
        }
    }

    async fn get_quiz(&self, id: &QuizId) -> QuizClientResult<Quiz> {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.tracked_calls.push(TrackedCall::GetQuiz(id.clone()));

        let result = state
            .mocked_quiz_results
            .pop_front()
            .ok_or_else(|| QuizClientError::transport("no mocked get_quiz results available"))?;

        resolve_quiz(result)
    }
}

fn resolve_quiz(result: MockQuizResult) -> QuizClientResult<Quiz> {
    match result {
        MockQuizResult::Payload(payload) => normalize(&payload),
        MockQuizResult::Error(error) => Err(error),
    }
}
