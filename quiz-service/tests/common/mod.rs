//! Shared setup for quiz-service integration tests.
//!
//! Every test gets its own stub MediaWiki API and its own app instance, both
//! bound to ephemeral ports.

#![allow(dead_code)]

use axum::{
    extract::Query,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use quiz_service::config::{
    QuizConfig, QuizSettings, RateLimitConfig, SecurityConfig, WikipediaConfig,
};
use quiz_service::quiz::Language;
use quiz_service::startup::Application;
use serde_json::json;
use service_core::config::{Config, Environment};
use std::collections::HashMap;
use tokio::net::TcpListener;

pub const ARTICLE_TOPIC: &str = "Photosynthesis";
pub const MISSING_TOPIC: &str = "Qwxzvbnm";
pub const FAILING_TOPIC: &str = "Broken upstream";
pub const SPARSE_TOPIC: &str = "Sparse";
pub const GARBLED_TOPIC: &str = "Garbled";

/// Nothing listens here; connections are refused.
pub const CLOSED_API_URL: &str = "http://127.0.0.1:9/w/api.php";

pub const ARTICLE: &str = "Photosynthesis (from Greek φῶς) is a process used by plants to convert light energy. \
    Chlorophyll is the green pigment found in most plants and algae. \
    Oxygen is released as a by-product of the light reactions. \
    Carbon fixation is defined as the conversion of inorganic carbon to organic compounds. \
    Scientists have studied photosynthesis for more than two centuries. \
    Leaves are the main photosynthetic organs of most plants. \
    The Calvin cycle is a series of reactions in the stroma of chloroplasts.";

pub struct TestApp {
    pub address: String,
    pub wikipedia_url: String,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(|_| {}).await
    }

    /// Spawn with a tweaked configuration.
    pub async fn spawn_with<F>(customize: F) -> Self
    where
        F: FnOnce(&mut QuizConfig),
    {
        let wikipedia_url = spawn_stub_wikipedia().await;

        let mut config = create_test_config(&wikipedia_url);
        customize(&mut config);

        let app = Application::build(config)
            .await
            .expect("Failed to build application");
        let address = format!("http://127.0.0.1:{}", app.port());

        tokio::spawn(app.run_until_stopped(std::future::pending()));

        TestApp {
            address,
            wikipedia_url,
        }
    }

    pub fn client(&self) -> reqwest::Client {
        reqwest::Client::new()
    }

    pub async fn get_quiz(&self, topic: &str) -> reqwest::Response {
        self.client()
            .get(format!("{}/generate-quiz", self.address))
            .query(&[("topic", topic)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_quiz(&self, body: serde_json::Value) -> reqwest::Response {
        self.client()
            .post(format!("{}/generate-quiz", self.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}

pub fn create_test_config(wikipedia_url: &str) -> QuizConfig {
    QuizConfig {
        common: Config {
            port: 0,
            log_level: "debug".to_string(),
        },
        environment: Environment::Test,
        service_name: "quiz-service-test".to_string(),
        otlp_endpoint: None,
        wikipedia: WikipediaConfig {
            api_url: wikipedia_url.to_string(),
            timeout_secs: 5,
            user_agent: "quiz-service-test".to_string(),
        },
        quiz: QuizSettings {
            language: Language::English,
            max_questions: 5,
            answer_max_words: 12,
            subject_max_words: 5,
            min_sentence_words: 5,
        },
        rate_limit: RateLimitConfig {
            requests: 1000,
            window_seconds: 60,
        },
        security: SecurityConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
    }
}

/// Minimal MediaWiki action API answering the queries the client sends.
async fn spawn_stub_wikipedia() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub Wikipedia");
    let port = listener.local_addr().unwrap().port();

    let router = Router::new().route("/w/api.php", get(stub_api));
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://127.0.0.1:{}/w/api.php", port)
}

async fn stub_api(headers: HeaderMap, Query(params): Query<HashMap<String, String>>) -> Response {
    if headers.get(header::ACCEPT).and_then(|v| v.to_str().ok()) != Some("application/json") {
        return StatusCode::NOT_ACCEPTABLE.into_response();
    }

    if params.get("meta").map(String::as_str) == Some("siteinfo") {
        return Json(json!({ "batchcomplete": "", "query": { "general": { "sitename": "Stub" } } }))
            .into_response();
    }

    let title = params.get("titles").cloned().unwrap_or_default();
    match title.as_str() {
        ARTICLE_TOPIC => (
            StatusCode::OK,
            Json(json!({
                "batchcomplete": "",
                "query": { "pages": { "24544": {
                    "pageid": 24544, "ns": 0, "title": ARTICLE_TOPIC, "extract": ARTICLE
                } } }
            })),
        )
            .into_response(),
        SPARSE_TOPIC => (
            StatusCode::OK,
            Json(json!({
                "query": { "pages": { "7": {
                    "pageid": 7, "ns": 0, "title": SPARSE_TOPIC, "extract": "Too short. Tiny."
                } } }
            })),
        )
            .into_response(),
        FAILING_TOPIC => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "upstream exploded" })),
        )
            .into_response(),
        GARBLED_TOPIC => (StatusCode::OK, "<html>Wikimedia error</html>").into_response(),
        _ => (
            StatusCode::OK,
            Json(json!({
                "batchcomplete": "",
                "query": { "pages": { "-1": { "ns": 0, "title": title, "missing": "" } } }
            })),
        )
            .into_response(),
    }
}
