use crate::config::MAX_QUESTIONS_LIMIT;
use crate::quiz::QuizQuestion;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query string of `GET /generate-quiz` and body of `POST /generate-quiz`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct GenerateQuizRequest {
    #[serde(default)]
    pub topic: Option<String>,

    #[serde(default)]
    #[validate(range(min = 1, max = 20))]
    pub count: Option<usize>,
}

impl GenerateQuizRequest {
    /// Trimmed topic, or `None` when absent or blank.
    pub fn topic(&self) -> Option<&str> {
        self.topic
            .as_deref()
            .map(str::trim)
            .filter(|topic| !topic.is_empty())
    }

    pub fn count_or(&self, default: usize) -> usize {
        self.count.unwrap_or(default).min(MAX_QUESTIONS_LIMIT)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuizResponse {
    pub topic: String,
    pub questions: Vec<QuizQuestion>,
}
