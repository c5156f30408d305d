//! # General Route Handlers

use super::{AppError, AppState};
use axum::{extract::State, Json};

/// The handler for the root (`/`) endpoint.
pub async fn root() -> &'static str {
    "autoseo server is running."
}

/// The handler for the health check (`/health`) endpoint.
pub async fn health_check() -> &'static str {
    "OK"
}

/// Lists the post types that have published content.
pub async fn list_post_types_handler(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<String>>, AppError> {
    let post_types = app_state.automation.list_post_types().await?;
    Ok(Json(post_types))
}
