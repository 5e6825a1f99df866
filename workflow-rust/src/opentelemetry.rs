use crate::Failure;
use opentelemetry::trace::Status;
use tracing::{info_span, Span};
use tracing_opentelemetry::OpenTelemetrySpanExt;

#[derive(Clone, Copy)]
pub enum WorkflowSpanMethod {
    Generate,
    LoadHistory,
    ViewDetails,
}

impl WorkflowSpanMethod {
    fn as_str(self) -> &'static str {
        match self {
            Self::Generate => "generate",
            Self::LoadHistory => "load_history",
            Self::ViewDetails => "view_details",
        }
    }
}

/// Span covering one workflow run, from submission to terminal state.
pub struct WorkflowSpan {
    span: Span,
}

impl WorkflowSpan {
    pub fn new(method: WorkflowSpanMethod) -> Self {
        let span = match method {
            WorkflowSpanMethod::Generate => info_span!("wiki_quiz.workflow.generate"),
            WorkflowSpanMethod::LoadHistory => info_span!("wiki_quiz.workflow.load_history"),
            WorkflowSpanMethod::ViewDetails => info_span!("wiki_quiz.workflow.view_details"),
        };
        span.set_attribute("wiki_quiz.workflow.method", method.as_str());

        Self { span }
    }

    pub fn span(&self) -> Span {
        self.span.clone()
    }

    pub fn on_outcome(&self, failure: Option<&Failure>) {
        match failure {
            Some(failure) => {
                self.span.set_attribute("wiki_quiz.workflow.outcome", "failed");
                self.span
                    .set_attribute("wiki_quiz.failure.kind", failure.kind.as_str());
                self.span
                    .set_attribute("exception.message", failure.reason.clone());
                self.span.set_status(Status::error(failure.reason.clone()));
            }
            None => {
                self.span.set_attribute("wiki_quiz.workflow.outcome", "success");
            }
        }
    }
}
