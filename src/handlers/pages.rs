// src/handlers/pages.rs

use axum::extract::{Form, Query, State};
use maud::Markup;
use serde::Deserialize;

use crate::{
    error::AppError,
    models::{ParamsForm, ParamsUpdate},
    services::controller::generate as run_generation,
    state::{SharedController, SharedGenerator},
    views::{preview, workspace},
};

/// Renders the full workspace page.
pub async fn home(State(controller): State<SharedController>) -> Markup {
    let controller = controller.lock().await;
    workspace::home(&controller)
}

/// Merges the single field posted by the form and re-renders the form,
/// plus whatever parts of the workspace depend on that field.
pub async fn update_params(
    State(controller): State<SharedController>,
    Form(fields): Form<ParamsForm>,
) -> Markup {
    let update: ParamsUpdate = fields.into();
    let mut controller = controller.lock().await;
    if update.is_empty() {
        tracing::debug!("params post carried no known field");
    } else {
        controller.update_params(update.clone());
    }
    workspace::params_refresh(&controller, &update)
}

/// Runs one generation and returns the refreshed workspace.
///
/// Failures end up in the workspace's error banner, so this never
/// responds with an error status.
pub async fn generate(
    State(controller): State<SharedController>,
    State(generator): State<SharedGenerator>,
) -> Markup {
    if let Err(e) = run_generation(controller.clone(), generator).await {
        tracing::warn!("generation not started: {}", e);
    }

    let controller = controller.lock().await;
    workspace::workspace(&controller)
}

#[derive(Debug, Deserialize)]
pub struct PreviewParams {
    #[serde(default)]
    pub editing: bool,
}

/// Re-renders the preview, optionally in edit mode.
pub async fn paper(
    State(controller): State<SharedController>,
    Query(params): Query<PreviewParams>,
) -> Result<Markup, AppError> {
    let controller = controller.lock().await;
    let snapshot = controller
        .paper()
        .ok_or(AppError::NotFound("No paper has been generated yet".to_string()))?;

    Ok(preview::paper_preview(
        &snapshot.paper,
        controller.params().include_answer_key,
        params.editing,
    ))
}
