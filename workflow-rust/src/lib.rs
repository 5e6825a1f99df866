mod controller;
mod errors;
mod generation;
mod history;
mod opentelemetry;
mod view;
mod viewer;

pub use controller::QuizController;
pub use errors::{Failure, FailureKind, ValidationError, WorkflowError};
pub use generation::{validate_url, GenerationRequest, GenerationState, GenerationWorkflow};
pub use history::{
    DetailRequest, DetailState, HistoryListView, HistoryWorkflow, ListRequest, ListState,
};
pub use view::{
    option_label, DifficultyLevel, EntityGroupView, OptionView, QuestionView, QuizView,
};
pub use viewer::DetailViewer;
