use super::distractor::false_answers;
use super::lexicon::QuestionKind;
use super::text::{clean_text, contains_word, shorten_text, word_count};
use super::QuizRules;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A multiple-choice question as served to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub answers: Vec<String>,
    pub correct_answer_index: usize,
}

impl QuizQuestion {
    pub fn correct_answer(&self) -> Option<&str> {
        self.answers.get(self.correct_answer_index).map(String::as_str)
    }
}

/// Turn one sentence into a question, or `None` when it is too short or
/// reads like an enumeration.
pub fn from_sentence<R>(sentence: &str, rules: &QuizRules, rng: &mut R) -> Option<QuizQuestion>
where
    R: Rng + ?Sized,
{
    let lexicon = rules.lexicon;
    let sentence = clean_text(sentence, lexicon);

    if word_count(&sentence) < rules.min_sentence_words
        || lexicon
            .skip_markers
            .iter()
            .any(|marker| contains_word(&sentence, marker))
    {
        return None;
    }

    let words: Vec<&str> = sentence.split_whitespace().collect();
    let first_word = *words.first()?;
    let (kind, topic) = match find_cue(&words, rules) {
        Some((kind, idx, len)) if idx > 0 && idx + len < words.len() => {
            let subject = shorten_text(&words[..idx].join(" "), rules.subject_max_words);
            (kind, subject)
        }
        // No cue, or one at the very start or end that leaves no subject.
        _ => (QuestionKind::Statement, first_word.to_string()),
    };

    let question = lexicon.prompt(kind, &topic);
    let correct = shorten_text(&sentence, rules.answer_max_words);

    let mut answers = Vec::with_capacity(4);
    answers.push(correct.clone());
    answers.extend(false_answers(&correct, &topic, lexicon, rules.answer_max_words));
    answers.shuffle(rng);

    let correct_answer_index = answers.iter().position(|a| *a == correct)?;

    Some(QuizQuestion {
        question,
        answers,
        correct_answer_index,
    })
}

/// First cue, in lexicon order, that occurs in `words`.
///
/// Returns the cue's kind, the index of its first occurrence and its length
/// in words. Only the first matching cue is considered.
fn find_cue(words: &[&str], rules: &QuizRules) -> Option<(QuestionKind, usize, usize)> {
    rules.lexicon.cues.iter().find_map(|cue| {
        let phrase: Vec<&str> = cue.phrase.split_whitespace().collect();
        words
            .windows(phrase.len())
            .position(|window| window == phrase.as_slice())
            .map(|idx| (cue.kind, idx, phrase.len()))
    })
}
