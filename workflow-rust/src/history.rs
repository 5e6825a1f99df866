use crate::{DetailViewer, Failure, WorkflowError};
use wiki_quiz_client::{
    Quiz, QuizBackend, QuizClientError, QuizClientResult, QuizHistoryItem, QuizId, QuizOperation,
};

/// Lifecycle of the history list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ListState {
    #[default]
    Loading,
    Loaded(Vec<QuizHistoryItem>),
    Failed(Failure),
}

/// Lifecycle of the most recently requested quiz detail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DetailState {
    #[default]
    Idle,
    LoadingDetail(QuizId),
    DetailLoaded(Quiz),
    Failed(Failure),
}

/// What the history table should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryListView<'a> {
    Loading,
    /// Loaded, but the backend has no quizzes yet.
    Empty,
    Items(&'a [QuizHistoryItem]),
    /// The list could not be loaded; see [`HistoryWorkflow::error`].
    Unavailable,
}

/// The request to make for a history list load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListRequest {
    _private: (),
}

impl ListRequest {
    pub async fn send(&self, backend: &dyn QuizBackend) -> QuizClientResult<Vec<QuizHistoryItem>> {
        backend.list_history().await
    }
}

/// The request to make for a quiz detail load.
/// Each request carries a token; only the completion of the latest issued
/// request is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRequest {
    pub id: QuizId,
    token: u64,
}

impl DetailRequest {
    #[must_use]
    pub fn token(&self) -> u64 {
        self.token
    }

    pub async fn send(&self, backend: &dyn QuizBackend) -> QuizClientResult<Quiz> {
        backend.get_quiz(&self.id).await
    }
}

/// State machine for the history view: the list of generated quizzes and,
/// independently, the detail of one of them.
///
/// Both flows report failures through a single error slot. A failure in one
/// flow leaves the other flow's data untouched.
#[derive(Debug, Default)]
pub struct HistoryWorkflow {
    list: ListState,
    detail: DetailState,
    error: Option<Failure>,
    viewer: DetailViewer,
    list_in_flight: bool,
    issued_detail_tokens: u64,
    latest_detail_token: Option<u64>,
}

impl HistoryWorkflow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn list(&self) -> &ListState {
        &self.list
    }

    #[must_use]
    pub fn detail(&self) -> &DetailState {
        &self.detail
    }

    /// The error currently shown in the history view, from either flow.
    #[must_use]
    pub fn error(&self) -> Option<&Failure> {
        self.error.as_ref()
    }

    #[must_use]
    pub fn viewer(&self) -> &DetailViewer {
        &self.viewer
    }

    #[must_use]
    pub fn list_view(&self) -> HistoryListView<'_> {
        match &self.list {
            ListState::Loading => HistoryListView::Loading,
            ListState::Loaded(items) if items.is_empty() => HistoryListView::Empty,
            ListState::Loaded(items) => HistoryListView::Items(items),
            ListState::Failed(_) => HistoryListView::Unavailable,
        }
    }

    /// Whether a detail request is outstanding.
    #[must_use]
    pub fn is_detail_loading(&self) -> bool {
        matches!(self.detail, DetailState::LoadingDetail(_))
    }

    /// Whether a list request is outstanding.
    #[must_use]
    pub fn is_list_loading(&self) -> bool {
        self.list_in_flight
    }

    /// Start loading the list.
    /// Returns `None` while a list request is already outstanding; at most one
    /// is in flight, so completions apply in issue order.
    pub fn begin_list(&mut self) -> Option<ListRequest> {
        if self.list_in_flight {
            tracing::debug!("ignoring history load while a request is outstanding");
            return None;
        }
        self.list_in_flight = true;
        self.list = ListState::Loading;
        self.error = None;
        Some(ListRequest { _private: () })
    }

    /// Apply the outcome of the request returned by [`Self::begin_list`].
    pub fn complete_list(&mut self, result: QuizClientResult<Vec<QuizHistoryItem>>) -> &ListState {
        self.list_in_flight = false;
        match result {
            Ok(items) => {
                tracing::debug!(count = items.len(), "quiz history loaded");
                self.list = ListState::Loaded(items);
            }
            Err(error) => {
                let failure = self.record_failure(error, QuizOperation::ListHistory);
                self.list = ListState::Failed(failure);
            }
        }
        &self.list
    }

    /// Start loading the detail of `id` and open the viewer for it.
    /// Any detail request issued before this one becomes stale.
    pub fn begin_detail(&mut self, id: QuizId) -> DetailRequest {
        self.issued_detail_tokens += 1;
        let token = self.issued_detail_tokens;
        self.latest_detail_token = Some(token);

        self.detail = DetailState::LoadingDetail(id.clone());
        self.error = None;
        self.viewer.open(id.clone());

        DetailRequest { id, token }
    }

    /// Apply the outcome of `request`.
    /// Returns `false` when the request was superseded by a later one or the
    /// viewer was closed in the meantime; the result is then discarded.
    pub fn complete_detail(
        &mut self,
        request: &DetailRequest,
        result: QuizClientResult<Quiz>,
    ) -> bool {
        if self.latest_detail_token != Some(request.token) {
            tracing::debug!(id = %request.id, token = request.token, "discarding stale quiz detail");
            return false;
        }
        self.latest_detail_token = None;

        match result {
            Ok(quiz) => {
                self.viewer.show(&request.id, quiz.clone());
                self.detail = DetailState::DetailLoaded(quiz);
            }
            Err(error) => {
                let failure = self.record_failure(error, QuizOperation::GetQuiz);
                self.viewer.fail(&request.id, failure.clone());
                self.detail = DetailState::Failed(failure);
            }
        }
        true
    }

    /// Close the viewer. Outstanding detail requests become stale.
    pub fn close_detail(&mut self) {
        self.viewer.close();
        self.latest_detail_token = None;
        self.detail = DetailState::Idle;
    }

    /// Begin, send and complete a list load in one go.
    pub async fn load_list(&mut self, backend: &dyn QuizBackend) -> &ListState {
        let Some(request) = self.begin_list() else {
            return &self.list;
        };
        let result = request.send(backend).await;
        self.complete_list(result)
    }

    /// Begin, send and complete a detail load in one go.
    pub async fn view_details(&mut self, backend: &dyn QuizBackend, id: QuizId) -> &DetailState {
        let request = self.begin_detail(id);
        let result = request.send(backend).await;
        self.complete_detail(&request, result);
        &self.detail
    }

    fn record_failure(&mut self, error: QuizClientError, operation: QuizOperation) -> Failure {
        let failure = Failure::from_error(&WorkflowError::from(error), operation);
        tracing::warn!(
            operation = operation.as_str(),
            kind = failure.kind.as_str(),
            reason = %failure.reason,
            "quiz history request failed"
        );
        self.error = Some(failure.clone());
        failure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_detail_request_wins_regardless_of_completion_order() {
        let mut history = HistoryWorkflow::new();
        let first = history.begin_detail(QuizId::Number(1));
        let second = history.begin_detail(QuizId::Number(2));
        assert!(second.token() > first.token());

        assert!(history.complete_detail(&second, Ok(Quiz::new("Enigma machine"))));
        assert!(!history.complete_detail(&first, Ok(Quiz::new("Alan Turing"))));

        assert_eq!(
            history.detail(),
            &DetailState::DetailLoaded(Quiz::new("Enigma machine"))
        );
        assert_eq!(
            history.viewer().quiz().map(|quiz| quiz.title.as_str()),
            Some("Enigma machine")
        );
    }

    #[test]
    fn stale_failure_does_not_touch_the_error_slot() {
        let mut history = HistoryWorkflow::new();
        let first = history.begin_detail(QuizId::Number(1));
        let _second = history.begin_detail(QuizId::Number(2));

        let applied = history.complete_detail(
            &first,
            Err(QuizClientError::transport("connection reset")),
        );

        assert!(!applied);
        assert_eq!(history.error(), None);
        assert_eq!(history.detail(), &DetailState::LoadingDetail(QuizId::Number(2)));
    }

    #[test]
    fn closing_the_viewer_discards_outstanding_detail() {
        let mut history = HistoryWorkflow::new();
        let request = history.begin_detail(QuizId::Number(1));
        history.close_detail();

        assert!(!history.complete_detail(&request, Ok(Quiz::new("Alan Turing"))));
        assert!(!history.viewer().is_open());
        assert_eq!(history.viewer().quiz(), None);
        assert_eq!(history.detail(), &DetailState::Idle);
    }

    #[test]
    fn second_list_load_is_ignored_while_one_is_outstanding() {
        let mut history = HistoryWorkflow::new();
        let first = history.begin_list();
        assert!(first.is_some());
        assert!(history.is_list_loading());
        assert_eq!(history.begin_list(), None);

        history.complete_list(Ok(Vec::new()));
        assert!(!history.is_list_loading());
        assert!(history.begin_list().is_some());
    }

    #[test]
    fn list_view_distinguishes_empty_from_failed() {
        let mut history = HistoryWorkflow::new();
        assert_eq!(history.list_view(), HistoryListView::Loading);

        history.begin_list();
        history.complete_list(Ok(Vec::new()));
        assert_eq!(history.list_view(), HistoryListView::Empty);
        assert_eq!(history.error(), None);

        history.begin_list();
        history.complete_list(Err(QuizClientError::transport("connection refused")));
        assert_eq!(history.list_view(), HistoryListView::Unavailable);
        assert!(history.error().is_some());
    }
}
