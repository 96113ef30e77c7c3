//! Language-dependent content rules for quiz generation.
//!
//! Everything that mentions a concrete word lives here as data; the pipeline
//! in the sibling modules only walks these tables.

use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Polish,
}

impl Language {
    /// Wikipedia subdomain / ISO 639-1 code.
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Polish => "pl",
        }
    }

    pub fn lexicon(self) -> &'static Lexicon {
        match self {
            Language::English => &ENGLISH,
            Language::Polish => &POLISH,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "pl" | "polish" => Ok(Language::Polish),
            _ => Err(format!("Unsupported quiz language: {}", s)),
        }
    }
}

/// Shape of the question built from a sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    /// "What is true about {subject}?"
    AboutSubject,
    /// "What is {subject}?"
    Definition,
    /// Subject-less fallback.
    Statement,
}

/// A grammatical cue. `phrase` may span several whitespace-separated words.
#[derive(Debug)]
pub struct Cue {
    pub phrase: &'static str,
    pub kind: QuestionKind,
}

#[derive(Debug)]
pub struct Negation {
    pub word: &'static str,
    pub negated: &'static str,
}

#[derive(Debug)]
pub struct Theme {
    pub keywords: &'static [&'static str],
    pub distractors: &'static [&'static str],
}

#[derive(Debug)]
pub struct Lexicon {
    pub language: Language,
    /// Stripped once from the start of cleaned text.
    pub leading_phrases: &'static [&'static str],
    /// Abbreviations marking enumerations; such sentences make poor questions.
    pub skip_markers: &'static [&'static str],
    /// Checked in order; the first cue present in a sentence decides its shape.
    pub cues: &'static [Cue],
    pub about_subject_template: &'static str,
    pub definition_template: &'static str,
    pub statement_prompt: &'static str,
    pub negations: &'static [Negation],
    pub wrong_definition_template: &'static str,
    pub themes: &'static [Theme],
    pub default_theme: &'static str,
    pub none_of_the_above: &'static str,
    pub fillers: &'static [&'static str],
}

impl Lexicon {
    pub fn prompt(&self, kind: QuestionKind, subject: &str) -> String {
        match kind {
            QuestionKind::AboutSubject => self.about_subject_template.replace("{subject}", subject),
            QuestionKind::Definition => self.definition_template.replace("{subject}", subject),
            QuestionKind::Statement => self.statement_prompt.to_string(),
        }
    }

    pub fn wrong_definition(&self, topic: &str) -> String {
        self.wrong_definition_template.replace("{topic}", topic)
    }
}

pub static ENGLISH: Lexicon = Lexicon {
    language: Language::English,
    leading_phrases: &["according to", "by definition", "as defined by"],
    skip_markers: &["etc", "eg", "ie", "cf", "viz"],
    cues: &[
        Cue {
            phrase: "is defined as",
            kind: QuestionKind::Definition,
        },
        Cue {
            phrase: "is",
            kind: QuestionKind::AboutSubject,
        },
        Cue {
            phrase: "are",
            kind: QuestionKind::AboutSubject,
        },
    ],
    about_subject_template: "What is true about {subject}?",
    definition_template: "What is {subject}?",
    statement_prompt: "Which of these statements is true?",
    negations: &[
        Negation {
            word: "is",
            negated: "is not",
        },
        Negation {
            word: "are",
            negated: "are not",
        },
        Negation {
            word: "enables",
            negated: "does not enable",
        },
        Negation {
            word: "enable",
            negated: "do not enable",
        },
    ],
    wrong_definition_template: "This is not a correct definition of {topic}",
    themes: &[
        Theme {
            keywords: &["plant", "plants"],
            distractors: &["They are animals, not plants", "They are fungi, not plants"],
        },
        Theme {
            keywords: &["animal", "animals"],
            distractors: &["They are plants, not animals", "They are fungi, not animals"],
        },
        Theme {
            keywords: &["science"],
            distractors: &["It is a field of art, not science"],
        },
        Theme {
            keywords: &["research", "study"],
            distractors: &["It is only theoretical speculation"],
        },
        Theme {
            keywords: &["art"],
            distractors: &["It is a technique, not an art"],
        },
    ],
    default_theme: "It is a different field of knowledge",
    none_of_the_above: "None of the above",
    fillers: &[
        "It is a purely fictional concept",
        "It was abandoned long ago",
        "It only exists in mathematics",
    ],
};

pub static POLISH: Lexicon = Lexicon {
    language: Language::Polish,
    leading_phrases: &["według", "definicja według", "zgodnie z"],
    skip_markers: &["np", "itp", "tj"],
    cues: &[
        Cue {
            phrase: "jest",
            kind: QuestionKind::AboutSubject,
        },
        Cue {
            phrase: "to",
            kind: QuestionKind::Definition,
        },
    ],
    about_subject_template: "Co jest prawdą o {subject}?",
    definition_template: "Co to jest {subject}?",
    statement_prompt: "Które z tych stwierdzeń jest prawdziwe?",
    negations: &[
        Negation {
            word: "jest",
            negated: "nie jest",
        },
        Negation {
            word: "są",
            negated: "nie są",
        },
        Negation {
            word: "umożliwiają",
            negated: "nie umożliwiają",
        },
    ],
    wrong_definition_template: "To niepoprawna definicja {topic}",
    themes: &[
        Theme {
            keywords: &["roślina", "rośliny"],
            distractors: &["To zwierzęta, nie rośliny", "To grzyby, nie rośliny"],
        },
        Theme {
            keywords: &["zwierzęta"],
            distractors: &["To rośliny, nie zwierzęta", "To grzyby, nie zwierzęta"],
        },
        Theme {
            keywords: &["nauka"],
            distractors: &["To dziedzina sztuki, nie nauki"],
        },
        Theme {
            keywords: &["badanie"],
            distractors: &["To tylko teoretyczne rozważania"],
        },
        Theme {
            keywords: &["sztuka"],
            distractors: &["To technika, nie sztuka"],
        },
    ],
    default_theme: "To inna dziedzina wiedzy",
    none_of_the_above: "Żadne z powyższych",
    fillers: &[
        "To pojęcie czysto fikcyjne",
        "To dawno porzucona koncepcja",
        "To istnieje wyłącznie w matematyce",
    ],
};
