pub mod quiz;

pub use quiz::{GenerateQuizRequest, QuizResponse};
pub use service_core::error::ErrorResponse;
