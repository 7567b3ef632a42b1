// src/services/gemini.rs

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{
    config::Config,
    models::{GenerationParams, QuestionPaper, QuestionType},
    services::generator::{GenerationError, PaperGenerator},
};

/// Client for the Gemini `generateContent` REST endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    api_key: String,
    api_base: String,
    model: String,
}

impl GeminiClient {
    pub fn new(config: &Config, http: Client) -> Self {
        Self {
            http,
            api_key: config.gemini_api_key.clone(),
            api_base: config.gemini_api_base.as_str().trim_end_matches('/').to_string(),
            model: config.gemini_model.clone(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }

    /// Sends one request and returns the text payload of the reply.
    async fn request_text(&self, prompt: String) -> Result<String, GenerationError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: response_schema(),
            },
        };

        tracing::debug!(model = %self.model, "sending generateContent request");

        let res = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(GenerationError::Service { status, body });
        }

        let reply: GenerateContentResponse = res.json().await?;
        reply.text().ok_or(GenerationError::EmptyResponse)
    }
}

#[async_trait]
impl PaperGenerator for GeminiClient {
    async fn generate(&self, params: &GenerationParams) -> Result<QuestionPaper, GenerationError> {
        let text = self.request_text(build_prompt(params)).await?;
        tracing::debug!(len = text.len(), "received paper payload");
        Ok(QuestionPaper::from_json(&text)?)
    }
}

/// Builds the natural-language instruction sent to the model.
pub fn build_prompt(params: &GenerationParams) -> String {
    format!(
        "Generate a comprehensive and high-quality question paper for the following:
Subject: {subject}
Grade/Level: {grade}
Topics to cover: {topics}
Overall Difficulty: {difficulty}
Target Question Count: {count}

Requirements:
- Create a mix of question types (MCQs, True/False, Short Answer, etc.) unless restricted.
- Ensure questions are accurate and appropriate for the grade level.
- Provide a professional title and clear instructions.
- Assign realistic marks to each question.
",
        subject = params.subject,
        grade = params.grade,
        topics = params.topics,
        difficulty = params.difficulty,
        count = params.question_count,
    )
}

/// Output schema declared to the service, in Gemini's OpenAPI subset.
pub fn response_schema() -> Value {
    let type_names: Vec<&str> = QuestionType::ALL.iter().map(|t| t.as_str()).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "subject": { "type": "STRING" },
            "grade": { "type": "STRING" },
            "duration": { "type": "STRING", "description": "Suggested time like '60 minutes'" },
            "totalMarks": { "type": "NUMBER" },
            "instructions": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            },
            "questions": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": { "type": "STRING" },
                        "text": { "type": "STRING" },
                        "type": {
                            "type": "STRING",
                            "description": format!("One of: {}", type_names.join(", "))
                        },
                        "options": {
                            "type": "ARRAY",
                            "items": { "type": "STRING" },
                            "description": "Only for MCQ types"
                        },
                        "answer": { "type": "STRING" },
                        "marks": { "type": "NUMBER" }
                    },
                    "required": ["id", "text", "type", "answer", "marks"]
                }
            }
        },
        "required": ["title", "subject", "grade", "duration", "totalMarks", "instructions", "questions"]
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate, `None` when empty.
    pub(crate) fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();

        if text.is_empty() { None } else { Some(text) }
    }
}
