// src/services/generator.rs

use std::fmt;

use async_trait::async_trait;

use crate::models::{GenerationParams, PaperError, QuestionPaper};

/// Anything that can turn parameters into a question paper.
///
/// The controller only talks to this trait, so the Gemini client can be
/// swapped for a stub in tests.
#[async_trait]
pub trait PaperGenerator: Send + Sync {
    async fn generate(&self, params: &GenerationParams) -> Result<QuestionPaper, GenerationError>;
}

/// Failure of a single generation attempt.
#[derive(Debug)]
pub enum GenerationError {
    /// The request never produced an HTTP response.
    Transport(reqwest::Error),
    /// The service answered with a non-success status.
    Service { status: u16, body: String },
    /// The reply carried no text payload.
    EmptyResponse,
    /// The text payload is not a valid paper.
    InvalidPaper(PaperError),
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::Transport(e) => write!(f, "request to generation service failed: {}", e),
            GenerationError::Service { status, body } => {
                write!(f, "generation service returned {}: {}", status, body)
            }
            GenerationError::EmptyResponse => write!(f, "no response from AI"),
            GenerationError::InvalidPaper(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for GenerationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerationError::Transport(e) => Some(e),
            GenerationError::InvalidPaper(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        GenerationError::Transport(err)
    }
}

impl From<PaperError> for GenerationError {
    fn from(err: PaperError) -> Self {
        GenerationError::InvalidPaper(err)
    }
}
