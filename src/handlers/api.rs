// src/handlers/api.rs

use axum::{Json, extract::State};

use crate::{
    error::AppError,
    models::{GenerationParams, PaperEdits, PaperSnapshot, ParamsUpdate},
    services::controller::{ControllerState, GenerationOutcome, generate as run_generation},
    state::{SharedController, SharedGenerator},
};

/// Returns params, current paper, loading flag and error message.
pub async fn get_state(State(controller): State<SharedController>) -> Json<ControllerState> {
    Json(controller.lock().await.state())
}

/// Merges a partial update into the params. No validation.
pub async fn update_params(
    State(controller): State<SharedController>,
    Json(update): Json<ParamsUpdate>,
) -> Json<GenerationParams> {
    let mut controller = controller.lock().await;
    Json(controller.update_params(update).clone())
}

/// Generates a new paper.
///
/// * 400 when the subject is blank, 409 while another generation is pending.
/// * 502 with the fixed user-facing message when the attempt fails.
pub async fn generate(
    State(controller): State<SharedController>,
    State(generator): State<SharedGenerator>,
) -> Result<Json<ControllerState>, AppError> {
    let outcome = run_generation(controller.clone(), generator).await?;

    if outcome == GenerationOutcome::Failed {
        return Err(AppError::GenerationFailed);
    }

    Ok(Json(controller.lock().await.state()))
}

/// Commits edits as a new revision of the current paper.
pub async fn commit_edits(
    State(controller): State<SharedController>,
    Json(edits): Json<PaperEdits>,
) -> Result<Json<PaperSnapshot>, AppError> {
    let mut controller = controller.lock().await;
    let snapshot = controller.commit_edits(&edits)?;
    tracing::info!(revision = snapshot.revision, "paper edits committed");
    Ok(Json(snapshot.clone()))
}
