// tests/common/mod.rs

#![allow(dead_code)]

use std::{
    collections::VecDeque,
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
};
use examcraft::{
    config::{Config, DEFAULT_GEMINI_MODEL},
    routes,
    services::GeminiClient,
    state::{AppState, SharedGenerator},
};
use serde_json::{Value, json};
use url::Url;

/// A paper in the shape the model is asked to return.
pub fn sample_paper_json() -> Value {
    json!({
        "title": "Physics Unit Test",
        "subject": "Physics",
        "grade": "10th Grade",
        "duration": "45 minutes",
        "totalMarks": 6,
        "instructions": ["Attempt all questions.", "Calculators are not allowed."],
        "questions": [
            {
                "id": "q1",
                "text": "Which quantity is measured in newtons?",
                "type": "MCQ",
                "options": ["Energy", "Force", "Power", "Pressure"],
                "answer": "Force",
                "marks": 2
            },
            {
                "id": "q2",
                "text": "Mass and weight are the same thing.",
                "type": "TRUE_FALSE",
                "answer": "False",
                "marks": 1
            },
            {
                "id": "q3",
                "text": "Explain inertia with an example.",
                "type": "LONG_ANSWER",
                "answer": "Inertia is the tendency of a body to resist changes in motion.",
                "marks": 3
            }
        ]
    })
}

/// What the stub Gemini endpoint answers with.
#[derive(Clone)]
pub enum StubReply {
    /// 200 with the given text as the first candidate's only part.
    Text(String),
    /// 200 with no candidates at all.
    NoText,
    /// Non-success status with a plain body.
    Status(u16),
    /// Waits before answering with the inner reply.
    Delayed(Duration, Box<StubReply>),
}

impl StubReply {
    pub fn paper(paper: &Value) -> Self {
        StubReply::Text(paper.to_string())
    }
}

/// One request received by the stub.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub path: String,
    pub api_key: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct StubState {
    replies: Arc<Mutex<VecDeque<StubReply>>>,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

async fn generate_content(
    State(stub): State<StubState>,
    Path(rest): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    stub.captured.lock().unwrap().push(CapturedRequest {
        path: rest,
        api_key: headers
            .get("x-goog-api-key")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });

    let reply = {
        let mut replies = stub.replies.lock().unwrap();
        // the last reply repeats once the queue runs dry
        if replies.len() > 1 {
            replies.pop_front()
        } else {
            replies.front().cloned()
        }
    };

    let mut reply = reply.unwrap_or(StubReply::NoText);
    while let StubReply::Delayed(delay, inner) = reply {
        tokio::time::sleep(delay).await;
        reply = *inner;
    }

    match reply {
        StubReply::Text(text) => Json(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": text }] },
                "finishReason": "STOP"
            }]
        }))
        .into_response(),
        StubReply::NoText => Json(json!({ "candidates": [] })).into_response(),
        StubReply::Status(code) => (
            StatusCode::from_u16(code).unwrap(),
            "upstream failure",
        )
            .into_response(),
        StubReply::Delayed(..) => unreachable!("delays are unwrapped above"),
    }
}

pub struct StubGemini {
    pub base: Url,
    pub captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl StubGemini {
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.captured.lock().unwrap().clone()
    }
}

/// Spawns a fake `generateContent` endpoint on a random port.
pub async fn spawn_gemini(replies: Vec<StubReply>) -> StubGemini {
    let stub = StubState {
        replies: Arc::new(Mutex::new(replies.into())),
        captured: Arc::new(Mutex::new(Vec::new())),
    };
    let captured = stub.captured.clone();

    let app = Router::new()
        .route("/v1beta/models/{*rest}", post(generate_content))
        .with_state(stub);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubGemini {
        base: Url::parse(&format!("http://127.0.0.1:{}/v1beta", port)).unwrap(),
        captured,
    }
}

pub fn test_config(gemini_api_base: Url) -> Config {
    Config {
        gemini_api_key: "test-key".to_string(),
        gemini_api_base,
        gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
        bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        static_dir: "static".to_string(),
        log_dir: "logs".to_string(),
        rust_log: "error".to_string(),
    }
}

/// Builds the router wired to the real Gemini client pointed at `gemini`.
pub fn app_for(gemini: &StubGemini) -> Router {
    let config = test_config(gemini.base.clone());
    let generator: SharedGenerator =
        Arc::new(GeminiClient::new(&config, reqwest::Client::new()));
    routes::create_router(AppState::new(config, generator))
}

/// Spawns the app on a random port and returns its base URL.
pub async fn spawn_app(gemini: &StubGemini) -> String {
    let app = app_for(gemini);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}
