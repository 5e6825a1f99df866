use crate::{
    client_utils, normalize, opentelemetry::trace_request, Quiz, QuizBackend, QuizClientError,
    QuizClientResult, QuizHistoryItem, QuizId, QuizOperation,
};
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Client, Url,
};
use serde::Serialize;
use std::collections::HashMap;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// HTTP implementation of [`QuizBackend`].
pub struct QuizClient {
    base_url: String,
    client: Client,
    headers: HashMap<String, String>,
}

#[derive(Clone, Default)]
pub struct QuizClientOptions {
    /// Origin of the backend. Defaults to `http://localhost:8000`.
    pub base_url: Option<String>,
    /// Extra headers sent with every request.
    pub headers: Option<HashMap<String, String>>,
    pub client: Option<Client>,
}

#[derive(Serialize)]
struct GenerateQuizRequest<'a> {
    url: &'a str,
}

impl QuizClient {
    #[must_use]
    pub fn new(options: QuizClientOptions) -> Self {
        let QuizClientOptions {
            base_url,
            headers,
            client,
        } = options;

        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let client = client.unwrap_or_else(Client::new);
        let headers = headers.unwrap_or_default();

        Self {
            base_url,
            client,
            headers,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request_headers(&self) -> QuizClientResult<HeaderMap> {
        let mut headers = HeaderMap::new();

        for (key, value) in &self.headers {
            let header_name = HeaderName::from_bytes(key.as_bytes()).map_err(|error| {
                QuizClientError::InvalidInput(format!("Invalid header name '{key}': {error}"))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|error| {
                QuizClientError::InvalidInput(format!(
                    "Invalid header value for '{key}': {error}"
                ))
            })?;
            headers.insert(header_name, header_value);
        }

        Ok(headers)
    }

    /// Build `{base_url}/{segments...}`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> QuizClientResult<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|error| {
            QuizClientError::InvalidInput(format!(
                "Invalid base URL '{}': {error}",
                self.base_url
            ))
        })?;

        url.path_segments_mut()
            .map_err(|()| {
                QuizClientError::InvalidInput(format!(
                    "Base URL '{}' cannot have path segments",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }
}

#[async_trait::async_trait]
impl QuizBackend for QuizClient {
    async fn generate_quiz(&self, url: &str) -> QuizClientResult<Quiz> {
        trace_request(QuizOperation::GenerateQuiz, &self.base_url, async {
            let endpoint = self.endpoint(&["generate_quiz"])?;
            let headers = self.request_headers()?;
            let payload = client_utils::send_json(
                &self.client,
                endpoint,
                &GenerateQuizRequest { url },
                headers,
                QuizOperation::GenerateQuiz,
            )
            .await?;

            normalize(&payload)
        })
        .await
    }

    async fn list_history(&self) -> QuizClientResult<Vec<QuizHistoryItem>> {
        trace_request(QuizOperation::ListHistory, &self.base_url, async {
            let endpoint = self.endpoint(&["history"])?;
            let headers = self.request_headers()?;
            let payload =
                client_utils::get_json(&self.client, endpoint, headers, QuizOperation::ListHistory)
                    .await?;

            serde_json::from_value(payload).map_err(|error| {
                QuizClientError::MalformedPayload(format!("Invalid history payload: {error}"))
            })
        })
        .await
    }

    async fn get_quiz(&self, id: &QuizId) -> QuizClientResult<Quiz> {
        trace_request(QuizOperation::GetQuiz, &self.base_url, async {
            let id = id.to_string();
            let endpoint = self.endpoint(&["quiz", id.as_str()])?;
            let headers = self.request_headers()?;
            let payload =
                client_utils::get_json(&self.client, endpoint, headers, QuizOperation::GetQuiz)
                    .await?;

            normalize(&payload)
        })
        .await
    }
}
