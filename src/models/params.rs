// src/models/params.rs

use std::fmt;

use serde::{Deserialize, Serialize};

/// Overall difficulty requested for a paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Wire value, also used verbatim in the prompt.
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        }
    }

    /// Label shown in the form's select box.
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-supplied configuration describing the desired exam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationParams {
    /// Required (non-blank) before a generation can start.
    pub subject: String,
    pub grade: String,
    pub topics: String,
    pub difficulty: Difficulty,
    /// The form bounds this to 1..=50, nothing else enforces it.
    pub question_count: u32,
    pub include_answer_key: bool,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            subject: String::new(),
            grade: String::new(),
            topics: String::new(),
            difficulty: Difficulty::Medium,
            question_count: 10,
            include_answer_key: true,
        }
    }
}

impl GenerationParams {
    /// Merges a partial update. Fields absent from `update` are kept.
    pub fn merge(&mut self, update: ParamsUpdate) {
        if let Some(subject) = update.subject {
            self.subject = subject;
        }
        if let Some(grade) = update.grade {
            self.grade = grade;
        }
        if let Some(topics) = update.topics {
            self.topics = topics;
        }
        if let Some(difficulty) = update.difficulty {
            self.difficulty = difficulty;
        }
        if let Some(question_count) = update.question_count {
            self.question_count = question_count;
        }
        if let Some(include_answer_key) = update.include_answer_key {
            self.include_answer_key = include_answer_key;
        }
    }

    pub fn has_subject(&self) -> bool {
        !self.subject.trim().is_empty()
    }
}

/// Partial update of [`GenerationParams`]; `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamsUpdate {
    pub subject: Option<String>,
    pub grade: Option<String>,
    pub topics: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub question_count: Option<u32>,
    pub include_answer_key: Option<bool>,
}

impl ParamsUpdate {
    pub fn is_empty(&self) -> bool {
        self == &ParamsUpdate::default()
    }
}

/// Raw field values posted by the parameter form.
///
/// Each input posts only its own field, so everything is optional. The
/// question count arrives as free text and goes through
/// [`parse_question_count`].
#[derive(Debug, Default, Deserialize)]
pub struct ParamsForm {
    pub subject: Option<String>,
    pub grade: Option<String>,
    pub topics: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub question_count: Option<String>,
    pub include_answer_key: Option<bool>,
}

impl From<ParamsForm> for ParamsUpdate {
    fn from(form: ParamsForm) -> Self {
        Self {
            subject: form.subject,
            grade: form.grade,
            topics: form.topics,
            difficulty: form.difficulty,
            question_count: form.question_count.as_deref().map(parse_question_count),
            include_answer_key: form.include_answer_key,
        }
    }
}

/// Parses the question count typed by the user.
///
/// Reads an optional sign followed by the leading run of digits, so
/// `"12abc"` yields 12. Anything that does not start with a number, as
/// well as negative or overflowing values, maps to 0 instead of being
/// rejected.
pub fn parse_question_count(input: &str) -> u32 {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: &str = match rest.find(|c: char| !c.is_ascii_digit()) {
        Some(end) => &rest[..end],
        None => rest,
    };

    if negative || digits.is_empty() {
        return 0;
    }

    digits.parse().unwrap_or(0)
}
