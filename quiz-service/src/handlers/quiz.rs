use crate::dtos::{GenerateQuizRequest, QuizResponse};
use crate::quiz::generate_quiz;
use crate::startup::AppState;
use crate::utils::{JsonBody, QueryParams};
use axum::{extract::State, Json};
use metrics::counter;
use service_core::error::AppError;
use validator::Validate;

/// `GET /generate-quiz?topic=...&count=...`
pub async fn generate_quiz_get(
    State(state): State<AppState>,
    QueryParams(request): QueryParams<GenerateQuizRequest>,
) -> Result<Json<QuizResponse>, AppError> {
    run(&state, request).await.map(Json)
}

/// `POST /generate-quiz` with `{"topic": "...", "count": 5}`. An empty body
/// is treated as a request without a topic.
pub async fn generate_quiz_post(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<GenerateQuizRequest>,
) -> Result<Json<QuizResponse>, AppError> {
    run(&state, request).await.map(Json)
}

async fn run(state: &AppState, request: GenerateQuizRequest) -> Result<QuizResponse, AppError> {
    let result = build_quiz(state, &request).await;

    let outcome = match &result {
        Ok(_) => "success",
        Err(AppError::BadRequest(_)) | Err(AppError::ValidationError(_)) => "invalid",
        Err(AppError::NotFound(_)) => "not_found",
        Err(_) => "error",
    };
    counter!("quiz_requests_total", "outcome" => outcome).increment(1);

    result
}

async fn build_quiz(
    state: &AppState,
    request: &GenerateQuizRequest,
) -> Result<QuizResponse, AppError> {
    request.validate()?;

    let topic = request
        .topic()
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("Topic is required")))?;
    let count = request.count_or(state.config.quiz.max_questions);

    let article = state.source.fetch_intro(topic).await?.ok_or_else(|| {
        AppError::NotFound(anyhow::anyhow!("No article found for the given topic"))
    })?;

    let questions = {
        let mut rng = rand::thread_rng();
        generate_quiz(&article.extract, &state.rules, count, &mut rng)
    };

    counter!("quiz_questions_generated_total").increment(questions.len() as u64);
    tracing::info!(
        topic = %topic,
        title = %article.title,
        requested = count,
        generated = questions.len(),
        "Generated quiz"
    );

    Ok(QuizResponse {
        topic: topic.to_string(),
        questions,
    })
}
