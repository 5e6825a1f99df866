use crate::{QuizClientError, QuizClientResult, QuizOperation};
use opentelemetry::trace::Status;
use std::{future::Future, time::Instant};
use tracing::{info_span, Span};
use tracing_futures::Instrument;
use tracing_opentelemetry::OpenTelemetrySpanExt;

pub struct RequestSpan {
    span: Span,
    start_time: Instant,
}

impl RequestSpan {
    pub fn new(operation: QuizOperation, base_url: &str) -> Self {
        let span = match operation {
            QuizOperation::GenerateQuiz => info_span!("wiki_quiz.generate_quiz"),
            QuizOperation::ListHistory => info_span!("wiki_quiz.list_history"),
            QuizOperation::GetQuiz => info_span!("wiki_quiz.get_quiz"),
        };
        span.set_attribute("http.request.method", operation.http_method());
        span.set_attribute("server.address", base_url.to_string());
        span.set_attribute("wiki_quiz.operation", operation.as_str());

        Self {
            span,
            start_time: Instant::now(),
        }
    }

    fn span(&self) -> Span {
        self.span.clone()
    }

    pub fn on_error(&mut self, error: &QuizClientError) {
        if let Some(status) = error.status() {
            self.span
                .set_attribute("http.response.status_code", i64::from(status.as_u16()));
        }
        self.span
            .set_attribute("exception.message", error.to_string());
        self.span.set_status(Status::error(error.to_string()));
    }

    pub fn on_end(&mut self) {
        self.span.set_attribute(
            "wiki_quiz.duration",
            self.start_time.elapsed().as_secs_f64(),
        );
    }
}

/// Run a backend request inside a span named after the operation.
pub async fn trace_request<T, Fut>(
    operation: QuizOperation,
    base_url: &str,
    future: Fut,
) -> QuizClientResult<T>
where
    Fut: Future<Output = QuizClientResult<T>>,
{
    let mut span = RequestSpan::new(operation, base_url);
    let result = future.instrument(span.span()).await;

    if let Err(error) = &result {
        tracing::debug!(operation = operation.as_str(), %error, "quiz backend request failed");
        span.on_error(error);
    }

    span.on_end();
    result
}
