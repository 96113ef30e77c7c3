//! Rule-based quiz generation from plain article text.
//!
//! Pipeline: [`text`] cleans and splits the article, [`question`] matches each
//! sentence against the [`lexicon`] cues, [`distractor`] derives wrong
//! answers and [`generator`] samples the final set.

pub mod distractor;
pub mod generator;
pub mod lexicon;
pub mod question;
pub mod text;

pub use generator::generate_quiz;
pub use lexicon::{Language, Lexicon};
pub use question::QuizQuestion;

pub const DEFAULT_ANSWER_MAX_WORDS: usize = 12;
pub const DEFAULT_SUBJECT_MAX_WORDS: usize = 5;
pub const DEFAULT_MIN_SENTENCE_WORDS: usize = 5;

/// Content rules plus the word limits that shape answers and prompts.
#[derive(Debug, Clone)]
pub struct QuizRules {
    pub lexicon: &'static Lexicon,
    /// Answers longer than this are cut and end in "...".
    pub answer_max_words: usize,
    /// Subjects quoted in a prompt are cut to this many words.
    pub subject_max_words: usize,
    /// Shorter sentences are not turned into questions.
    pub min_sentence_words: usize,
}

impl QuizRules {
    pub fn new(language: Language) -> Self {
        Self {
            lexicon: language.lexicon(),
            answer_max_words: DEFAULT_ANSWER_MAX_WORDS,
            subject_max_words: DEFAULT_SUBJECT_MAX_WORDS,
            min_sentence_words: DEFAULT_MIN_SENTENCE_WORDS,
        }
    }

    pub fn language(&self) -> Language {
        self.lexicon.language
    }
}

impl Default for QuizRules {
    fn default() -> Self {
        Self::new(Language::English)
    }
}
