//! Text cleaning, shortening and sentence splitting.

use super::lexicon::Lexicon;
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

static PARENTHESISED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\([^)]*\)").expect("parenthesis pattern is valid"));

static GREEK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\p{Greek}+").expect("greek pattern is valid"));

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

static SPACE_BEFORE_PUNCT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+([,;:])").expect("punctuation pattern is valid"));

static SENTENCE_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("sentence pattern is valid"));

/// A word, possibly dotted inside ("e.g"), followed by a period and optionally
/// by the capital that opens the next sentence.
static DOTTED_WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\p{L}+(?:\.\p{L}+)*)\.(\s+\p{Lu})?").expect("abbreviation pattern is valid")
});

pub const ELLIPSIS: &str = "...";

/// Normalise article prose before it is split or quoted back as an answer.
///
/// Parenthesised asides and Greek-script etymology are removed, whitespace is
/// collapsed, and one leading attribution phrase ("according to ...") is
/// dropped.
pub fn clean_text(text: &str, lexicon: &Lexicon) -> String {
    let text = PARENTHESISED.replace_all(text, "");
    let text = GREEK.replace_all(&text, "");
    let text = WHITESPACE.replace_all(&text, " ");
    let text = SPACE_BEFORE_PUNCT.replace_all(&text, "$1");
    let text = text.trim();

    for phrase in lexicon.leading_phrases {
        if let Some(rest) = strip_prefix_ignore_case(text, phrase) {
            if rest.starts_with(char::is_whitespace) {
                return rest.trim_start().to_string();
            }
        }
    }

    text.to_string()
}

/// Keep at most `max_words` whitespace-separated words, marking a cut with "...".
pub fn shorten_text(text: &str, max_words: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() > max_words {
        format!("{}{}", words[..max_words].join(" "), ELLIPSIS)
    } else {
        text.to_string()
    }
}

pub fn split_into_sentences(text: &str, lexicon: &Lexicon) -> Vec<String> {
    let text = clean_text(text, lexicon);
    let text = collapse_skip_markers(&text, lexicon);

    SENTENCE_END
        .split(&text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Rewrite dotted skip markers ("e.g.", "etc.") without their periods so
/// they neither split a sentence nor escape the skip check. A marker that
/// ends a sentence keeps its final period.
fn collapse_skip_markers(text: &str, lexicon: &Lexicon) -> String {
    DOTTED_WORD
        .replace_all(text, |caps: &regex::Captures| {
            let bare = caps[1].replace('.', "");
            if !lexicon
                .skip_markers
                .iter()
                .any(|marker| marker.eq_ignore_ascii_case(&bare))
            {
                return caps[0].to_string();
            }

            match caps.get(2) {
                Some(next) => format!("{}.{}", bare, next.as_str()),
                None => bare,
            }
        })
        .into_owned()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Byte range of the first alphanumeric run equal to `word`, ignoring case.
pub(crate) fn find_word(text: &str, word: &str) -> Option<Range<usize>> {
    let needle = word.to_lowercase();
    word_spans(text).find(|range| text[range.clone()].to_lowercase() == needle)
}

pub(crate) fn contains_word(text: &str, word: &str) -> bool {
    find_word(text, word).is_some()
}

/// Maximal runs of alphanumeric characters, as byte ranges into `text`.
fn word_spans(text: &str) -> impl Iterator<Item = Range<usize>> + '_ {
    let mut chars = text.char_indices().peekable();

    std::iter::from_fn(move || {
        while let Some(&(_, c)) = chars.peek() {
            if c.is_alphanumeric() {
                break;
            }
            chars.next();
        }

        let (start, _) = *chars.peek()?;
        let mut end = start;
        while let Some(&(idx, c)) = chars.peek() {
            if !c.is_alphanumeric() {
                break;
            }
            end = idx + c.len_utf8();
            chars.next();
        }

        Some(start..end)
    })
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let mut text_chars = text.char_indices();
    for expected in prefix.chars() {
        let (_, actual) = text_chars.next()?;
        if !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
    }

    let consumed = text_chars.next().map(|(idx, _)| idx).unwrap_or(text.len());
    Some(&text[consumed..])
}
