// src/services/mod.rs

pub mod controller;
pub mod gemini;
pub mod generator;

pub use controller::{ControllerError, PaperController, GENERATION_FAILED_MESSAGE};
pub use gemini::GeminiClient;
pub use generator::{GenerationError, PaperGenerator};
