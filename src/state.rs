// src/state.rs

use std::sync::Arc;

use axum::extract::FromRef;
use tokio::sync::Mutex;

use crate::config::Config;
use crate::models::GenerationParams;
use crate::services::{controller::PaperController, generator::PaperGenerator};

pub type SharedController = Arc<Mutex<PaperController>>;
pub type SharedGenerator = Arc<dyn PaperGenerator>;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub controller: SharedController,
    pub generator: SharedGenerator,
}

impl AppState {
    /// Fresh workspace with default parameters.
    pub fn new(config: Config, generator: SharedGenerator) -> Self {
        Self {
            config,
            controller: Arc::new(Mutex::new(PaperController::new(GenerationParams::default()))),
            generator,
        }
    }
}

impl FromRef<AppState> for SharedController {
    fn from_ref(state: &AppState) -> Self {
        state.controller.clone()
    }
}

impl FromRef<AppState> for SharedGenerator {
    fn from_ref(state: &AppState) -> Self {
        state.generator.clone()
    }
}
