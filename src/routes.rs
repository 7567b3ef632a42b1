// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{get, patch, post},
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::{
    handlers::{api, pages},
    state::AppState,
};

/// Assembles the main application router.
///
/// * HTML pages and htmx fragments at the root.
/// * JSON API under `/api`.
/// * Stylesheet under `/static`.
/// * Applies global middleware (Trace, CORS).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        HeaderValue::from_static("http://localhost:3000"),
        HeaderValue::from_static("http://127.0.0.1:3000"),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let page_routes = Router::new()
        .route("/", get(pages::home))
        .route("/params", post(pages::update_params))
        .route("/generate", post(pages::generate))
        .route("/paper", get(pages::paper));

    let api_routes = Router::new()
        .route("/state", get(api::get_state))
        .route("/params", patch(api::update_params))
        .route("/generate", post(api::generate))
        .route("/paper/edits", post(api::commit_edits));

    Router::new()
        .merge(page_routes)
        .nest("/api", api_routes)
        .nest_service("/static", ServeDir::new(&state.config.static_dir))
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
