//! Wrong answers derived from the correct one.

use super::lexicon::Lexicon;
use super::text::{find_word, shorten_text};

/// Number of wrong answers attached to every question.
pub const DISTRACTOR_COUNT: usize = 3;

/// Build exactly [`DISTRACTOR_COUNT`] distinct wrong answers for `correct_answer`.
///
/// The first is a negation of the answer (or a "not a correct definition of
/// {topic}" line), then theme-based contrasts, then "none of the above".
/// Candidates equal to the correct answer are discarded and the lexicon's
/// fillers top the list up.
pub fn false_answers(
    correct_answer: &str,
    topic: &str,
    lexicon: &Lexicon,
    answer_max_words: usize,
) -> Vec<String> {
    let correct = shorten_text(correct_answer, answer_max_words);
    let topic = topic.to_lowercase();

    let mut candidates = Vec::with_capacity(4 + lexicon.fillers.len());
    candidates.push(negate(&correct, lexicon).unwrap_or_else(|| lexicon.wrong_definition(&topic)));

    let theme = lexicon.themes.iter().find(|theme| {
        theme
            .keywords
            .iter()
            .any(|keyword| find_word(&correct, keyword).is_some())
    });
    match theme {
        Some(theme) => candidates.extend(theme.distractors.iter().map(|d| d.to_string())),
        None => candidates.push(lexicon.default_theme.to_string()),
    }

    candidates.push(lexicon.none_of_the_above.to_string());
    candidates.extend(lexicon.fillers.iter().map(|f| f.to_string()));

    let mut answers: Vec<String> = Vec::with_capacity(DISTRACTOR_COUNT);
    for candidate in candidates {
        if answers.len() == DISTRACTOR_COUNT {
            break;
        }
        if candidate != correct && !answers.contains(&candidate) {
            answers.push(candidate);
        }
    }

    answers
}

/// Negate the first verb the lexicon knows how to negate.
fn negate(answer: &str, lexicon: &Lexicon) -> Option<String> {
    lexicon.negations.iter().find_map(|rule| {
        let range = find_word(answer, rule.word)?;
        let replacement = match_leading_case(&answer[range.clone()], rule.negated);
        Some(format!(
            "{}{}{}",
            &answer[..range.start],
            replacement,
            &answer[range.end..]
        ))
    })
}

/// Capitalise `replacement` when `original` starts with an uppercase letter.
fn match_leading_case(original: &str, replacement: &str) -> String {
    let starts_upper = original.chars().next().is_some_and(char::is_uppercase);
    let mut chars = replacement.chars();
    match chars.next() {
        Some(first) if starts_upper => first.to_uppercase().chain(chars).collect(),
        _ => replacement.to_string(),
    }
}
