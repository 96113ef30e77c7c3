use super::question::{from_sentence, QuizQuestion};
use super::text::split_into_sentences;
use super::QuizRules;
use rand::seq::SliceRandom;
use rand::Rng;

/// Build up to `count` questions from an article's plain text.
///
/// Every usable sentence yields a candidate; the result is a uniform random
/// sample of those candidates in random order. Text without usable sentences
/// gives an empty quiz.
pub fn generate_quiz<R>(article_text: &str, rules: &QuizRules, count: usize, rng: &mut R) -> Vec<QuizQuestion>
where
    R: Rng + ?Sized,
{
    let sentences = split_into_sentences(article_text, rules.lexicon);

    let mut questions: Vec<QuizQuestion> = sentences
        .iter()
        .filter_map(|sentence| from_sentence(sentence, rules, rng))
        .collect();

    tracing::debug!(
        sentences = sentences.len(),
        candidates = questions.len(),
        requested = count,
        "Derived question candidates"
    );

    questions.shuffle(rng);
    questions.truncate(count);
    questions
}
