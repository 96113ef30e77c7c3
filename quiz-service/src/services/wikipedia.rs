//! Article lookup through the MediaWiki action API.

use crate::config::WikipediaConfig;
use async_trait::async_trait;
use metrics::histogram;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use service_core::error::AppError;
use service_core::observability::TracedClientExt;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Wikipedia API returned status {0}")]
    Upstream(StatusCode),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

impl From<SourceError> for AppError {
    fn from(err: SourceError) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

/// Plain-text introduction of an article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub extract: String,
}

/// Anything that can produce an article introduction for a topic.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// `Ok(None)` means the topic has no article (or an empty introduction).
    async fn fetch_intro(&self, topic: &str) -> Result<Option<Article>, SourceError>;

    async fn health_check(&self) -> Result<(), SourceError>;
}

pub struct WikipediaClient {
    client: Client,
    api_url: String,
}

impl WikipediaClient {
    pub fn new(config: &WikipediaConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| SourceError::NotConfigured(e.to_string()))?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    async fn query(&self, params: &[(&str, &str)]) -> Result<QueryResponse, SourceError> {
        let response = self
            .client
            .traced_get(&self.api_url)
            .header("accept", "application/json")
            .query(params)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let status = response.status();
        tracing::debug!(status = %status, "Wikipedia API responded");

        if !status.is_success() {
            return Err(SourceError::Upstream(status));
        }

        response
            .json::<QueryResponse>()
            .await
            .map_err(|e| SourceError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl ArticleSource for WikipediaClient {
    async fn fetch_intro(&self, topic: &str) -> Result<Option<Article>, SourceError> {
        let started = Instant::now();
        tracing::info!(topic = %topic, "Fetching article introduction");

        let result = self
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("prop", "extracts"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("redirects", "1"),
                ("titles", topic),
            ])
            .await
            .map(extract_article);

        let outcome = match &result {
            Ok(Some(_)) => "found",
            Ok(None) => "missing",
            Err(_) => "error",
        };
        histogram!("wikipedia_fetch_duration_seconds", "outcome" => outcome)
            .record(started.elapsed().as_secs_f64());

        match &result {
            Ok(Some(article)) => tracing::info!(
                topic = %topic,
                title = %article.title,
                length = article.extract.len(),
                "Retrieved article introduction"
            ),
            Ok(None) => tracing::warn!(topic = %topic, "No article content found"),
            Err(e) => tracing::error!(topic = %topic, error = %e, "Failed to fetch article"),
        }

        result
    }

    async fn health_check(&self) -> Result<(), SourceError> {
        self.query(&[("action", "query"), ("meta", "siteinfo"), ("format", "json")])
            .await
            .map(|_| ())
    }
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    query: Option<QueryBody>,
}

#[derive(Debug, Deserialize)]
struct QueryBody {
    #[serde(default)]
    pages: BTreeMap<String, WikiPage>,
}

#[derive(Debug, Deserialize)]
struct WikiPage {
    #[serde(default)]
    title: String,
    #[serde(default)]
    extract: Option<String>,
}

/// First page carrying a non-blank extract. Missing pages have none.
fn extract_article(response: QueryResponse) -> Option<Article> {
    response
        .query?
        .pages
        .into_values()
        .find_map(|page| match page.extract {
            Some(extract) if !extract.trim().is_empty() => Some(Article {
                title: page.title,
                extract,
            }),
            _ => None,
        })
}
