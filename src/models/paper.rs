// src/models/paper.rs

use std::{borrow::Cow, fmt};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

/// Kind of question, which decides the affordance rendered under it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    Mcq,
    TrueFalse,
    ShortAnswer,
    LongAnswer,
    FillInBlanks,
}

impl QuestionType {
    pub const ALL: [QuestionType; 5] = [
        QuestionType::Mcq,
        QuestionType::TrueFalse,
        QuestionType::ShortAnswer,
        QuestionType::LongAnswer,
        QuestionType::FillInBlanks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Mcq => "MCQ",
            QuestionType::TrueFalse => "TRUE_FALSE",
            QuestionType::ShortAnswer => "SHORT_ANSWER",
            QuestionType::LongAnswer => "LONG_ANSWER",
            QuestionType::FillInBlanks => "FILL_IN_BLANKS",
        }
    }
}

/// A single generated question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Opaque id chosen by the model, unique within a paper.
    pub id: String,

    pub text: String,

    /// Mapped from the JSON field `type` since `type` is a reserved keyword in Rust.
    #[serde(rename = "type")]
    pub question_type: QuestionType,

    /// Answer choices in display order. Only meaningful for MCQ.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,

    pub answer: String,

    pub marks: f64,
}

impl Question {
    /// Options to render, `None` for every non-MCQ question.
    pub fn mcq_options(&self) -> Option<&[String]> {
        match self.question_type {
            QuestionType::Mcq => self.options.as_deref(),
            _ => None,
        }
    }
}

/// The generated exam document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPaper {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    pub subject: String,
    pub grade: String,

    /// Free text such as "60 minutes".
    pub duration: String,

    #[validate(range(min = 0.0, message = "totalMarks must not be negative"))]
    pub total_marks: f64,

    pub instructions: Vec<String>,

    #[validate(
        length(min = 1, message = "paper must contain questions"),
        custom(function = validate_questions)
    )]
    pub questions: Vec<Question>,
}

/// Checks the per-question invariants the request schema can only hint at.
fn validate_questions(questions: &[Question]) -> Result<(), ValidationError> {
    for q in questions {
        if q.id.trim().is_empty() {
            return Err(ValidationError::new("question_id_empty")
                .with_message(Cow::Borrowed("question id must not be empty")));
        }
        if q.text.trim().is_empty() {
            return Err(ValidationError::new("question_text_empty")
                .with_message(Cow::Owned(format!("question {} has no text", q.id))));
        }
        if !q.marks.is_finite() || q.marks < 0.0 {
            return Err(ValidationError::new("invalid_marks")
                .with_message(Cow::Owned(format!("question {} has invalid marks", q.id))));
        }
        if q.question_type == QuestionType::Mcq
            && q.options.as_ref().is_none_or(|opts| opts.is_empty())
        {
            return Err(ValidationError::new("mcq_without_options")
                .with_message(Cow::Owned(format!("MCQ question {} has no options", q.id))));
        }
    }
    Ok(())
}

/// Why a model reply could not be turned into a [`QuestionPaper`].
#[derive(Debug)]
pub enum PaperError {
    /// The text is not JSON at all.
    Syntax(serde_json::Error),
    /// Valid JSON, but fields are missing or have the wrong type/enum value.
    Shape(serde_json::Error),
    /// Well-formed paper that breaks a content invariant.
    Invalid(ValidationErrors),
}

impl fmt::Display for PaperError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaperError::Syntax(e) => write!(f, "reply is not valid JSON: {}", e),
            PaperError::Shape(e) => write!(f, "reply does not match the paper schema: {}", e),
            PaperError::Invalid(e) => write!(f, "paper failed validation: {}", e),
        }
    }
}

impl std::error::Error for PaperError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PaperError::Syntax(e) | PaperError::Shape(e) => Some(e),
            PaperError::Invalid(e) => Some(e),
        }
    }
}

impl QuestionPaper {
    /// Schema-validating deserializer for the model's text reply.
    pub fn from_json(text: &str) -> Result<Self, PaperError> {
        let value: serde_json::Value = serde_json::from_str(text).map_err(PaperError::Syntax)?;
        let paper: QuestionPaper = serde_json::from_value(value).map_err(PaperError::Shape)?;
        paper.validate().map_err(PaperError::Invalid)?;
        Ok(paper)
    }

    /// Returns a new paper with `edits` applied; `self` is left untouched.
    pub fn with_edits(&self, edits: &PaperEdits) -> Result<QuestionPaper, EditError> {
        let mut paper = self.clone();

        if let Some(title) = &edits.title {
            paper.title = title.clone();
        }
        if let Some(duration) = &edits.duration {
            paper.duration = duration.clone();
        }
        if let Some(instructions) = &edits.instructions {
            paper.instructions = instructions.clone();
        }

        for edit in &edits.questions {
            let question = paper
                .questions
                .iter_mut()
                .find(|q| q.id == edit.id)
                .ok_or_else(|| EditError::UnknownQuestion(edit.id.clone()))?;

            if let Some(text) = &edit.text {
                question.text = text.clone();
            }
            if let Some(options) = &edit.options {
                question.options = Some(options.clone());
            }
            if let Some(answer) = &edit.answer {
                question.answer = answer.clone();
            }
            if let Some(marks) = edit.marks {
                question.marks = marks;
            }
        }

        paper.validate().map_err(EditError::Invalid)?;
        Ok(paper)
    }
}

/// Replacement values for a committed edit. `None` keeps the current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperEdits {
    pub title: Option<String>,
    pub duration: Option<String>,
    pub instructions: Option<Vec<String>>,
    #[serde(default)]
    pub questions: Vec<QuestionEdit>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionEdit {
    pub id: String,
    pub text: Option<String>,
    pub options: Option<Vec<String>>,
    pub answer: Option<String>,
    pub marks: Option<f64>,
}

#[derive(Debug)]
pub enum EditError {
    UnknownQuestion(String),
    Invalid(ValidationErrors),
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditError::UnknownQuestion(id) => write!(f, "no question with id '{}'", id),
            EditError::Invalid(e) => write!(f, "edited paper failed validation: {}", e),
        }
    }
}

impl std::error::Error for EditError {}

/// Immutable copy of the current paper held by the controller.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperSnapshot {
    pub paper: QuestionPaper,
    /// 1 for a fresh generation, bumped by every committed edit.
    pub revision: u32,
    pub generated_at: DateTime<Utc>,
}

impl PaperSnapshot {
    pub fn new(paper: QuestionPaper) -> Self {
        Self {
            paper,
            revision: 1,
            generated_at: Utc::now(),
        }
    }

    pub fn next_revision(&self, paper: QuestionPaper) -> Self {
        Self {
            paper,
            revision: self.revision + 1,
            generated_at: self.generated_at,
        }
    }
}
