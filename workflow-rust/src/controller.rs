use crate::{
    opentelemetry::{WorkflowSpan, WorkflowSpanMethod},
    DetailRequest, DetailState, GenerationRequest, GenerationState, GenerationWorkflow,
    HistoryListView, HistoryWorkflow, ListRequest, ListState,
};
use std::sync::Arc;
use tracing_futures::Instrument;
use wiki_quiz_client::{Quiz, QuizBackend, QuizClientResult, QuizHistoryItem, QuizId};

/// Owns the quiz workflows and the URL entry field, and is the only writer of
/// their state.
///
/// Every operation comes in two forms: a one-call `async` method, and a
/// `begin_*`/`complete_*` pair around the request so that a caller can keep
/// generation, history and detail requests outstanding at the same time.
pub struct QuizController {
    backend: Arc<dyn QuizBackend>,
    url_input: String,
    generation: GenerationWorkflow,
    history: HistoryWorkflow,
}

impl QuizController {
    #[must_use]
    pub fn new(backend: Arc<dyn QuizBackend>) -> Self {
        Self {
            backend,
            url_input: String::new(),
            generation: GenerationWorkflow::new(),
            history: HistoryWorkflow::new(),
        }
    }

    /// The backend requests returned by `begin_*` should be sent to.
    #[must_use]
    pub fn backend(&self) -> Arc<dyn QuizBackend> {
        self.backend.clone()
    }

    #[must_use]
    pub fn url_input(&self) -> &str {
        &self.url_input
    }

    pub fn set_url_input(&mut self, url: impl Into<String>) {
        self.url_input = url.into();
    }

    #[must_use]
    pub fn generation(&self) -> &GenerationState {
        self.generation.state()
    }

    #[must_use]
    pub fn history(&self) -> &HistoryWorkflow {
        &self.history
    }

    /// Whether a generation request is outstanding. The submit button is
    /// disabled while this is true.
    #[must_use]
    pub fn is_generating(&self) -> bool {
        matches!(self.generation.state(), GenerationState::Requesting)
    }

    #[must_use]
    pub fn history_view(&self) -> HistoryListView<'_> {
        self.history.list_view()
    }

    /// Whether a detail request is outstanding. The "Details" buttons are
    /// disabled while this is true.
    #[must_use]
    pub fn detail_loading(&self) -> bool {
        self.history.is_detail_loading()
    }

    /// Submit the current URL input.
    /// Returns `None` when the submission is ignored because a request is
    /// already outstanding, or when validation failed.
    pub fn begin_generation(&mut self) -> Option<GenerationRequest> {
        if self.is_generating() {
            tracing::debug!("ignoring quiz submission while a request is outstanding");
            return None;
        }
        self.generation.submit(&self.url_input)
    }

    /// Apply a generation result. The URL input is cleared on success.
    pub fn complete_generation(&mut self, result: QuizClientResult<Quiz>) -> &GenerationState {
        if let GenerationState::Success(_) = self.generation.complete(result) {
            self.url_input.clear();
        }
        self.generation.state()
    }

    /// Submit the current URL input and wait for the outcome.
    pub async fn generate(&mut self) -> &GenerationState {
        let Some(request) = self.begin_generation() else {
            return self.generation.state();
        };

        let span = WorkflowSpan::new(WorkflowSpanMethod::Generate);
        let backend = self.backend.clone();
        let result = request
            .send(backend.as_ref())
            .instrument(span.span())
            .await;

        let state = self.complete_generation(result);
        span.on_outcome(state.failure());
        state
    }

    /// Start loading the history list.
    /// Returns `None` when a list request is already outstanding.
    pub fn begin_history(&mut self) -> Option<ListRequest> {
        self.history.begin_list()
    }

    pub fn complete_history(
        &mut self,
        result: QuizClientResult<Vec<QuizHistoryItem>>,
    ) -> &ListState {
        self.history.complete_list(result)
    }

    /// Load the history list. Called when the history view becomes active.
    pub async fn load_history(&mut self) -> &ListState {
        let Some(request) = self.begin_history() else {
            return self.history.list();
        };

        let span = WorkflowSpan::new(WorkflowSpanMethod::LoadHistory);
        let backend = self.backend.clone();
        let result = request
            .send(backend.as_ref())
            .instrument(span.span())
            .await;

        let state = self.complete_history(result);
        span.on_outcome(match state {
            ListState::Failed(failure) => Some(failure),
            _ => None,
        });
        state
    }

    pub fn begin_detail(&mut self, id: QuizId) -> DetailRequest {
        self.history.begin_detail(id)
    }

    /// Apply a detail result. Returns whether it was applied; results of
    /// superseded requests are discarded.
    pub fn complete_detail(
        &mut self,
        request: &DetailRequest,
        result: QuizClientResult<Quiz>,
    ) -> bool {
        self.history.complete_detail(request, result)
    }

    /// Open the detail viewer for `id` and load the quiz.
    pub async fn view_details(&mut self, id: QuizId) -> &DetailState {
        let request = self.begin_detail(id);

        let span = WorkflowSpan::new(WorkflowSpanMethod::ViewDetails);
        let backend = self.backend.clone();
        let result = request
            .send(backend.as_ref())
            .instrument(span.span())
            .await;

        if self.complete_detail(&request, result) {
            span.on_outcome(match self.history.detail() {
                DetailState::Failed(failure) => Some(failure),
                _ => None,
            });
        }
        self.history.detail()
    }

    pub fn close_details(&mut self) {
        self.history.close_detail();
    }
}
