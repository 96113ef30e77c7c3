use crate::quiz::{
    Language, QuizRules, DEFAULT_ANSWER_MAX_WORDS, DEFAULT_MIN_SENTENCE_WORDS,
    DEFAULT_SUBJECT_MAX_WORDS,
};
use serde::Deserialize;
use service_core::config::{self as core_config, get_var, parse_var, Environment};
use service_core::error::AppError;
use std::env;

/// Upper bound for questions per quiz, for both config and request `count`.
pub const MAX_QUESTIONS_LIMIT: usize = 20;

const DEFAULT_MAX_QUESTIONS: usize = 5;

#[derive(Debug, Clone, Deserialize)]
pub struct QuizConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub environment: Environment,
    pub service_name: String,
    pub otlp_endpoint: Option<String>,
    pub wikipedia: WikipediaConfig,
    pub quiz: QuizSettings,
    pub rate_limit: RateLimitConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WikipediaConfig {
    /// MediaWiki action API endpoint, e.g. https://en.wikipedia.org/w/api.php
    pub api_url: String,
    pub timeout_secs: u64,
    /// Wikimedia asks API clients to identify themselves.
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuizSettings {
    pub language: Language,
    pub max_questions: usize,
    pub answer_max_words: usize,
    pub subject_max_words: usize,
    pub min_sentence_words: usize,
}

impl QuizSettings {
    pub fn rules(&self) -> QuizRules {
        QuizRules {
            lexicon: self.language.lexicon(),
            answer_max_words: self.answer_max_words,
            subject_max_words: self.subject_max_words,
            min_sentence_words: self.min_sentence_words,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    pub requests: u32,
    pub window_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    pub allowed_origins: Vec<String>,
}

impl QuizConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let environment = Environment::current()?;

        Self::from_lookup(common_config, environment, &|key: &str| env::var(key).ok())
    }

    /// Build the service config from an arbitrary variable source.
    pub fn from_lookup<F>(
        common: core_config::Config,
        environment: Environment,
        lookup: &F,
    ) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let is_prod = environment.is_prod();

        let language: Language = get_var(lookup, "QUIZ_LANGUAGE", Some("en"), is_prod)?
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        let default_api_url = format!("https://{}.wikipedia.org/w/api.php", language.code());
        let default_user_agent = format!("quiz-service/{}", env!("CARGO_PKG_VERSION"));

        let config = QuizConfig {
            common,
            environment,
            service_name: get_var(lookup, "SERVICE_NAME", Some("quiz-service"), is_prod)?,
            otlp_endpoint: lookup("OTLP_ENDPOINT").filter(|s| !s.trim().is_empty()),
            wikipedia: WikipediaConfig {
                api_url: get_var(lookup, "WIKIPEDIA_API_URL", Some(default_api_url.as_str()), is_prod)?,
                timeout_secs: parse_var(lookup, "WIKIPEDIA_TIMEOUT_SECS", "10", is_prod)?,
                user_agent: get_var(
                    lookup,
                    "WIKIPEDIA_USER_AGENT",
                    Some(default_user_agent.as_str()),
                    is_prod,
                )?,
            },
            quiz: QuizSettings {
                language,
                max_questions: parse_var(
                    lookup,
                    "QUIZ_MAX_QUESTIONS",
                    &DEFAULT_MAX_QUESTIONS.to_string(),
                    is_prod,
                )?,
                answer_max_words: parse_var(
                    lookup,
                    "QUIZ_ANSWER_MAX_WORDS",
                    &DEFAULT_ANSWER_MAX_WORDS.to_string(),
                    is_prod,
                )?,
                subject_max_words: parse_var(
                    lookup,
                    "QUIZ_SUBJECT_MAX_WORDS",
                    &DEFAULT_SUBJECT_MAX_WORDS.to_string(),
                    is_prod,
                )?,
                min_sentence_words: parse_var(
                    lookup,
                    "QUIZ_MIN_SENTENCE_WORDS",
                    &DEFAULT_MIN_SENTENCE_WORDS.to_string(),
                    is_prod,
                )?,
            },
            rate_limit: RateLimitConfig {
                requests: parse_var(lookup, "RATE_LIMIT_REQUESTS", "60", is_prod)?,
                window_seconds: parse_var(lookup, "RATE_LIMIT_WINDOW_SECS", "60", is_prod)?,
            },
            security: SecurityConfig {
                allowed_origins: get_var(
                    lookup,
                    "ALLOWED_ORIGINS",
                    Some("http://localhost:3000"),
                    is_prod,
                )?
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        if !(1..=MAX_QUESTIONS_LIMIT).contains(&self.quiz.max_questions) {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "QUIZ_MAX_QUESTIONS must be between 1 and {}",
                MAX_QUESTIONS_LIMIT
            )));
        }

        if self.quiz.answer_max_words == 0
            || self.quiz.subject_max_words == 0
            || self.quiz.min_sentence_words == 0
        {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "Quiz word limits must be positive"
            )));
        }

        if self.wikipedia.timeout_secs == 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "WIKIPEDIA_TIMEOUT_SECS must be positive"
            )));
        }

        if self.rate_limit.requests == 0 || self.rate_limit.window_seconds == 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "RATE_LIMIT_REQUESTS and RATE_LIMIT_WINDOW_SECS must be positive"
            )));
        }

        if self.environment.is_prod() && self.security.allowed_origins.iter().any(|o| o == "*") {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "Wildcard CORS origin not allowed in production"
            )));
        }

        Ok(())
    }
}
