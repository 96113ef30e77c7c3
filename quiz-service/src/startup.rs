use crate::config::QuizConfig;
use crate::handlers;
use crate::quiz::QuizRules;
use crate::services::{ArticleSource, WikipediaClient};
use axum::{
    http::{header, HeaderValue, Method},
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware,
    rate_limit::{create_ip_rate_limiter, ip_rate_limit_middleware, IpRateLimiter},
    security_headers::security_headers_middleware,
    tracing::{request_id_middleware, REQUEST_ID_HEADER},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

#[derive(Clone)]
pub struct AppState {
    pub config: QuizConfig,
    pub rules: Arc<QuizRules>,
    pub source: Arc<dyn ArticleSource>,
}

impl AppState {
    pub fn new(config: QuizConfig, source: Arc<dyn ArticleSource>) -> Self {
        let rules = Arc::new(config.quiz.rules());
        Self {
            config,
            rules,
            source,
        }
    }
}

pub fn build_router(state: AppState, limiter: IpRateLimiter) -> Router {
    let quiz_routes = Router::new()
        .route(
            "/generate-quiz",
            get(handlers::generate_quiz_get).post(handlers::generate_quiz_post),
        )
        .route(
            "/generate-quiz/",
            get(handlers::generate_quiz_get).post(handlers::generate_quiz_post),
        )
        .layer(from_fn_with_state(limiter, ip_rate_limit_middleware));

    let cors = cors_layer(&state.config.security.allowed_origins);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .merge(quiz_routes)
        .with_state(state)
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(
            |request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            },
        ))
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::HeaderName::from_static(REQUEST_ID_HEADER),
        ]);

    if allowed_origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!("Invalid CORS origin '{}': {}. Skipping.", origin, e);
                None
            }
        })
        .collect();

    layer.allow_origin(origins)
}

pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    pub async fn build(config: QuizConfig) -> Result<Self, AppError> {
        let client = WikipediaClient::new(&config.wikipedia)?;
        tracing::info!(api_url = %client.api_url(), "Wikipedia client ready");

        Self::build_with_source(config, Arc::new(client)).await
    }

    /// Build around any article source, e.g. a stub in tests.
    pub async fn build_with_source(
        config: QuizConfig,
        source: Arc<dyn ArticleSource>,
    ) -> Result<Self, AppError> {
        let limiter =
            create_ip_rate_limiter(config.rate_limit.requests, config.rate_limit.window_seconds);

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind to {}: {}", addr, e);
            e
        })?;
        let port = listener.local_addr()?.port();

        let router = build_router(AppState::new(config, source), limiter);

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped<F>(self, shutdown: F) -> Result<(), std::io::Error>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        tracing::info!("quiz-service listening on port {}", self.port);

        axum::serve(
            self.listener,
            self.router
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown)
        .await
    }
}
