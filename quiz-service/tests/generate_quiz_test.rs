mod common;

use common::{
    TestApp, ARTICLE_TOPIC, CLOSED_API_URL, FAILING_TOPIC, GARBLED_TOPIC, MISSING_TOPIC,
    SPARSE_TOPIC,
};
use serde_json::{json, Value};

fn assert_well_formed(question: &Value) {
    let answers = question["answers"].as_array().expect("answers is an array");
    let index = question["correctAnswerIndex"]
        .as_u64()
        .expect("correctAnswerIndex is a number") as usize;

    assert!(question["question"].as_str().is_some_and(|q| !q.is_empty()));
    assert_eq!(answers.len(), 4);
    assert!(index < answers.len());

    let mut distinct: Vec<&str> = answers.iter().filter_map(Value::as_str).collect();
    distinct.sort_unstable();
    distinct.dedup();
    assert_eq!(distinct.len(), 4, "answers must be distinct: {:?}", answers);
}

#[tokio::test]
async fn get_returns_questions_for_known_topic() {
    let app = TestApp::spawn().await;

    let response = app.get_quiz(ARTICLE_TOPIC).await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["topic"], ARTICLE_TOPIC);

    let questions = body["questions"].as_array().expect("questions is an array");
    assert_eq!(questions.len(), 5);
    questions.iter().for_each(assert_well_formed);
}

#[tokio::test]
async fn post_accepts_json_body_and_count() {
    let app = TestApp::spawn().await;

    let response = app
        .post_quiz(json!({ "topic": ARTICLE_TOPIC, "count": 2 }))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["questions"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn count_above_available_returns_all_candidates() {
    let app = TestApp::spawn().await;

    let response = app
        .post_quiz(json!({ "topic": ARTICLE_TOPIC, "count": 20 }))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["questions"].as_array().map(Vec::len), Some(7));
}

#[tokio::test]
async fn trailing_slash_is_accepted() {
    let app = TestApp::spawn().await;

    let response = app
        .client()
        .get(format!("{}/generate-quiz/", app.address))
        .query(&[("topic", ARTICLE_TOPIC)])
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn missing_topic_returns_400() {
    let app = TestApp::spawn().await;

    let response = app
        .client()
        .get(format!("{}/generate-quiz", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Topic is required");
}

async fn assert_json_error(response: reqwest::Response, status: u16) -> Value {
    assert_eq!(response.status(), status);
    assert!(response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json")));
    response.json().await.expect("Failed to parse response")
}

#[tokio::test]
async fn post_without_body_returns_400() {
    let app = TestApp::spawn().await;

    let response = app
        .client()
        .post(format!("{}/generate-quiz", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    let body = assert_json_error(response, 400).await;
    assert_eq!(body["error"], "Topic is required");
}

#[tokio::test]
async fn post_without_json_content_type_is_parsed() {
    let app = TestApp::spawn().await;

    let response = app
        .client()
        .post(format!("{}/generate-quiz", app.address))
        .body(format!(r#"{{"topic":"{}","count":1}}"#, ARTICLE_TOPIC))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn post_with_wrongly_typed_topic_returns_json_422() {
    let app = TestApp::spawn().await;

    let response = app.post_quiz(json!({ "topic": 42 })).await;

    let body = assert_json_error(response, 422).await;
    assert!(body["details"].as_str().is_some());
}

#[tokio::test]
async fn post_with_malformed_json_returns_json_400() {
    let app = TestApp::spawn().await;

    let response = app
        .client()
        .post(format!("{}/generate-quiz", app.address))
        .header("content-type", "application/json")
        .body("{\"topic\":")
        .send()
        .await
        .expect("Failed to execute request");

    assert_json_error(response, 400).await;
}

#[tokio::test]
async fn non_numeric_count_in_query_returns_json_400() {
    let app = TestApp::spawn().await;

    let response = app
        .client()
        .get(format!("{}/generate-quiz", app.address))
        .query(&[("topic", ARTICLE_TOPIC), ("count", "abc")])
        .send()
        .await
        .expect("Failed to execute request");

    let body = assert_json_error(response, 400).await;
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
}

#[tokio::test]
async fn blank_topic_in_body_returns_400() {
    let app = TestApp::spawn().await;

    let response = app.post_quiz(json!({ "topic": "   " })).await;

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn out_of_range_count_returns_422() {
    let app = TestApp::spawn().await;

    let response = app
        .post_quiz(json!({ "topic": ARTICLE_TOPIC, "count": 0 }))
        .await;

    assert_eq!(response.status(), 422);
}

#[tokio::test]
async fn unknown_topic_returns_404() {
    let app = TestApp::spawn().await;

    let response = app.get_quiz(MISSING_TOPIC).await;

    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "No article found for the given topic");
}

#[tokio::test]
async fn upstream_failure_returns_500_with_details() {
    let app = TestApp::spawn().await;

    let response = app.get_quiz(FAILING_TOPIC).await;

    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["details"]
        .as_str()
        .is_some_and(|d| d.contains("500")));
}

#[tokio::test]
async fn unparsable_upstream_response_returns_500_with_details() {
    let app = TestApp::spawn().await;

    let response = app.get_quiz(GARBLED_TOPIC).await;

    let body = assert_json_error(response, 500).await;
    assert_eq!(body["error"], "Internal server error");
    assert!(body["details"]
        .as_str()
        .is_some_and(|d| d.contains("Invalid response")));
}

#[tokio::test]
async fn unreachable_upstream_returns_500_with_details() {
    let app = TestApp::spawn_with(|config| {
        config.wikipedia.api_url = CLOSED_API_URL.to_string();
        config.wikipedia.timeout_secs = 1;
    })
    .await;

    let response = app.get_quiz(ARTICLE_TOPIC).await;

    let body = assert_json_error(response, 500).await;
    assert_eq!(body["error"], "Internal server error");
    assert!(body["details"]
        .as_str()
        .is_some_and(|d| d.contains("Network error")));
}

#[tokio::test]
async fn article_without_usable_sentences_returns_empty_quiz() {
    let app = TestApp::spawn().await;

    let response = app.get_quiz(SPARSE_TOPIC).await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["questions"], json!([]));
}

#[tokio::test]
async fn rate_limit_returns_429_with_retry_after() {
    let app = TestApp::spawn_with(|config| {
        config.rate_limit.requests = 2;
        config.rate_limit.window_seconds = 60;
    })
    .await;

    for _ in 0..2 {
        assert_eq!(app.get_quiz(ARTICLE_TOPIC).await.status(), 200);
    }

    let response = app.get_quiz(ARTICLE_TOPIC).await;
    assert_eq!(response.status(), 429);
    assert!(response.headers().contains_key("retry-after"));
}

#[tokio::test]
async fn health_is_not_rate_limited() {
    let app = TestApp::spawn_with(|config| {
        config.rate_limit.requests = 1;
    })
    .await;

    for _ in 0..3 {
        let response = app
            .client()
            .get(format!("{}/health", app.address))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), 200);
    }
}
