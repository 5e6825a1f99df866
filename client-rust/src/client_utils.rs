use crate::{QuizClientError, QuizClientResult, QuizOperation};
use reqwest::{header::HeaderMap, Client, Response, StatusCode, Url};
use serde::Serialize;
use serde_json::Value;

/// Create a JSON request, parse the JSON response.
/// Returns `QuizClientError::Server` on non-success status code.
pub async fn send_json<T: Serialize>(
    client: &Client,
    url: Url,
    data: &T,
    headers: HeaderMap,
    operation: QuizOperation,
) -> QuizClientResult<Value> {
    let response = client.post(url).headers(headers).json(data).send().await?;
    read_json(response, operation).await
}

/// Send a GET request, parse the JSON response.
/// Returns `QuizClientError::Server` on non-success status code.
pub async fn get_json(
    client: &Client,
    url: Url,
    headers: HeaderMap,
    operation: QuizOperation,
) -> QuizClientResult<Value> {
    let response = client.get(url).headers(headers).send().await?;
    read_json(response, operation).await
}

async fn read_json(response: Response, operation: QuizOperation) -> QuizClientResult<Value> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(QuizClientError::Server(
            status,
            error_message(status, &body, operation),
        ));
    }

    Ok(response.json::<Value>().await?)
}

/// Extract the error reason from a failure body.
/// `detail` is preferred over `message`. A JSON body with neither falls back
/// to the operation's generic message; a body that is not JSON at all is
/// reported as `Server error: <status>`.
pub(crate) fn error_message(status: StatusCode, body: &str, operation: QuizOperation) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return format!("Server error: {status}");
    };

    ["detail", "message"]
        .iter()
        .find_map(|key| {
            value
                .get(key)
                .and_then(Value::as_str)
                .filter(|message| !message.trim().is_empty())
                .map(ToString::to_string)
        })
        .unwrap_or_else(|| operation.fallback_message().to_string())
}
