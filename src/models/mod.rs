// src/models/mod.rs

pub mod paper;
pub mod params;

pub use paper::{
    EditError, PaperEdits, PaperError, PaperSnapshot, Question, QuestionEdit, QuestionPaper,
    QuestionType,
};
pub use params::{Difficulty, GenerationParams, ParamsForm, ParamsUpdate};
