use axum::{
    extract::Path,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use wiki_quiz_client::{
    QuizBackend, QuizClient, QuizClientError, QuizClientOptions, QuizHistoryItem, QuizId,
};

async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test backend");
    let addr = listener.local_addr().expect("test backend address");
    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("serve test backend");
    });
    format!("http://{addr}")
}

fn client(base_url: String) -> QuizClient {
    QuizClient::new(QuizClientOptions {
        base_url: Some(base_url),
        ..Default::default()
    })
}

fn turing_payload() -> Value {
    json!({
        "id": 1,
        "url": "https://en.wikipedia.org/wiki/Alan_Turing",
        "title": "Alan Turing",
        "summary": "English mathematician.",
        "key_entities": {"people": ["Alan Turing"], "organizations": [], "locations": []},
        "sections": ["Early life"],
        "quiz": [{
            "question": "Where did Turing work during the war?",
            "options": ["Bletchley Park", "Harvard", "Cambridge", "Princeton"],
            "answer": "Bletchley Park",
            "difficulty": "easy",
            "explanation": "Codebreaking."
        }],
        "related_topics": ["Enigma machine"],
        "date_generated": "2024-01-05T15:04:05.123456"
    })
}

async fn generate_handler(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    match body.get("url").and_then(Value::as_str) {
        Some("https://en.wikipedia.org/wiki/Alan_Turing") => (StatusCode::OK, Json(turing_payload())),
        Some(_) => (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "Scraping error: article not found"})),
        ),
        None => (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({"detail": [{"msg": "field required"}]}))),
    }
}

async fn quiz_handler(Path(id): Path<String>) -> (StatusCode, Json<Value>) {
    if id == "1" {
        (StatusCode::OK, Json(turing_payload()))
    } else {
        (StatusCode::NOT_FOUND, Json(json!({"detail": "Quiz not found"})))
    }
}

fn quiz_router() -> Router {
    Router::new()
        .route("/generate_quiz", post(generate_handler))
        .route(
            "/history",
            get(|| async {
                Json(json!([
                    {"id": 2, "url": "https://en.wikipedia.org/wiki/Enigma_machine", "title": "Enigma machine", "date_generated": "2024-02-01T10:00:00"},
                    {"id": 1, "url": "https://en.wikipedia.org/wiki/Alan_Turing", "title": "Alan Turing", "date_generated": "2024-01-05T15:04:05.123456"}
                ]))
            }),
        )
        .route("/quiz/{id}", get(quiz_handler))
}

#[tokio::test]
async fn generates_a_quiz() {
    let client = client(spawn_backend(quiz_router()).await);

    let quiz = client
        .generate_quiz("https://en.wikipedia.org/wiki/Alan_Turing")
        .await
        .expect("generate succeeds");

    assert_eq!(quiz.id, Some(QuizId::Number(1)));
    assert_eq!(quiz.title, "Alan Turing");
    assert_eq!(quiz.quiz.len(), 1);
    assert_eq!(quiz.quiz[0].correct_option_index(), Some(0));
}

#[tokio::test]
async fn surfaces_server_detail_on_generation_failure() {
    let client = client(spawn_backend(quiz_router()).await);

    let error = client
        .generate_quiz("https://en.wikipedia.org/wiki/Missing")
        .await
        .expect_err("generate fails");

    match error {
        QuizClientError::Server(status, message) => {
            assert_eq!(status, reqwest::StatusCode::BAD_REQUEST);
            assert_eq!(message, "Scraping error: article not found");
        }
        other => panic!("unexpected error variant: {other:?}"),
    }
}

#[tokio::test]
async fn lists_history_in_backend_order() {
    let client = client(spawn_backend(quiz_router()).await);

    let history = client.list_history().await.expect("history succeeds");

    assert_eq!(
        history,
        vec![
            QuizHistoryItem {
                id: QuizId::Number(2),
                title: "Enigma machine".to_string(),
                url: "https://en.wikipedia.org/wiki/Enigma_machine".to_string(),
                date_generated: "2024-02-01T10:00:00".to_string(),
            },
            QuizHistoryItem {
                id: QuizId::Number(1),
                title: "Alan Turing".to_string(),
                url: "https://en.wikipedia.org/wiki/Alan_Turing".to_string(),
                date_generated: "2024-01-05T15:04:05.123456".to_string(),
            },
        ]
    );
}

#[tokio::test]
async fn fetches_quiz_by_id_and_reports_unknown_ids() {
    let client = client(spawn_backend(quiz_router()).await);

    let quiz = client
        .get_quiz(&QuizId::Number(1))
        .await
        .expect("known id succeeds");
    assert_eq!(quiz.title, "Alan Turing");

    let error = client
        .get_quiz(&QuizId::Number(42))
        .await
        .expect_err("unknown id fails");
    assert_eq!(error.status(), Some(reqwest::StatusCode::NOT_FOUND));
    assert!(matches!(error, QuizClientError::Server(_, message) if message == "Quiz not found"));
}

#[tokio::test]
async fn uses_generic_message_when_server_gives_no_reason() {
    let router = Router::new().route(
        "/history",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({}))) }),
    );
    let client = client(spawn_backend(router).await);

    let error = client.list_history().await.expect_err("history fails");
    assert!(
        matches!(&error, QuizClientError::Server(status, message)
            if *status == reqwest::StatusCode::INTERNAL_SERVER_ERROR
                && message == "Failed to fetch history"),
        "unexpected error: {error:?}"
    );
}

#[tokio::test]
async fn reports_status_when_failure_body_is_not_json() {
    let router = Router::new().route(
        "/generate_quiz",
        post(|| async { (StatusCode::BAD_GATEWAY, "<html>upstream down</html>") }),
    );
    let client = client(spawn_backend(router).await);

    let error = client
        .generate_quiz("https://en.wikipedia.org/wiki/Alan_Turing")
        .await
        .expect_err("generate fails");
    assert!(
        matches!(&error, QuizClientError::Server(status, message)
            if *status == reqwest::StatusCode::BAD_GATEWAY
                && message == "Server error: 502 Bad Gateway"),
        "unexpected error: {error:?}"
    );
}

#[tokio::test]
async fn rejects_quiz_without_title() {
    let router = Router::new().route(
        "/generate_quiz",
        post(|| async { Json(json!({"summary": "no title"})) }),
    );
    let client = client(spawn_backend(router).await);

    let error = client
        .generate_quiz("https://en.wikipedia.org/wiki/Alan_Turing")
        .await
        .expect_err("payload is malformed");
    assert!(matches!(error, QuizClientError::MalformedPayload(_)));
}

#[tokio::test]
async fn rejects_non_json_success_body() {
    let router = Router::new().route("/history", get(|| async { "<html>ok</html>" }));
    let client = client(spawn_backend(router).await);

    let error = client.list_history().await.expect_err("body is not JSON");
    assert!(matches!(error, QuizClientError::MalformedPayload(_)));
}

#[tokio::test]
async fn rejects_history_rows_with_missing_fields() {
    let router = Router::new().route(
        "/history",
        get(|| async { Json(json!([{"id": 1, "title": "Alan Turing"}])) }),
    );
    let client = client(spawn_backend(router).await);

    let error = client.list_history().await.expect_err("rows are incomplete");
    assert!(matches!(error, QuizClientError::MalformedPayload(_)));
}

#[tokio::test]
async fn sends_configured_headers() {
    let router = Router::new().route(
        "/history",
        get(|headers: axum::http::HeaderMap| async move {
            let tenant = headers
                .get("x-quiz-tenant")
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default()
                .to_string();
            Json(json!([{
                "id": "tenant",
                "title": tenant,
                "url": "https://en.wikipedia.org/wiki/Alan_Turing",
                "date_generated": "2024-01-05T15:04:05"
            }]))
        }),
    );
    let base_url = spawn_backend(router).await;
    let client = QuizClient::new(QuizClientOptions {
        base_url: Some(base_url),
        headers: Some(HashMap::from([(
            "x-quiz-tenant".to_string(),
            "school-7".to_string(),
        )])),
        ..Default::default()
    });

    let history = client.list_history().await.expect("history succeeds");
    assert_eq!(history[0].id, QuizId::Text("tenant".to_string()));
    assert_eq!(history[0].title, "school-7");
}

#[tokio::test]
async fn reports_unreachable_backend_as_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);

    let client = client(format!("http://{addr}"));
    let error = client.list_history().await.expect_err("nothing listens");
    assert!(matches!(error, QuizClientError::Transport(_)));
}
