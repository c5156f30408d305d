//! # Media Handlers

use super::{AppError, AppState};
use autoseo::{BulkOutcome, MediaRow, ProcessOutcome};
use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;

#[derive(Deserialize, Debug)]
pub struct ProcessMediaRequest {
    pub attachment_id: i64,
}

/// Lists image attachments with their current alt text.
pub async fn list_media_handler(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<MediaRow>>, AppError> {
    Ok(Json(app_state.automation.list_media().await?))
}

/// Generates alt text for one image. Failures are reported in the body.
pub async fn process_media_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<ProcessMediaRequest>,
) -> Json<ProcessOutcome> {
    info!(attachment_id = payload.attachment_id, "Processing image");
    let settings = app_state.settings_snapshot().await;
    Json(
        app_state
            .automation
            .process_media(&settings, payload.attachment_id)
            .await,
    )
}

pub async fn bulk_media_handler(
    State(app_state): State<AppState>,
) -> Result<Json<BulkOutcome>, AppError> {
    info!("Starting bulk media run");
    let settings = app_state.settings_snapshot().await;
    Ok(Json(
        app_state.automation.bulk_process_media(&settings).await?,
    ))
}
