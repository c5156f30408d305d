//! # Post Handlers
//!
//! Listing, single processing and bulk processing of posts of one type.

use super::{AppError, AppState};
use autoseo::{BulkOutcome, PostListing, ProcessOutcome};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use tracing::info;

fn default_post_type() -> String {
    "post".to_string()
}

#[derive(Deserialize, Debug)]
pub struct ListPostsParams {
    #[serde(default = "default_post_type")]
    pub post_type: String,
}

#[derive(Deserialize, Debug)]
pub struct ProcessPostRequest {
    pub post_id: i64,
    #[serde(default)]
    pub keyword: String,
}

#[derive(Deserialize, Debug)]
pub struct BulkPostsRequest {
    #[serde(default = "default_post_type")]
    pub post_type: String,
}

/// Lists published posts of one type with their current SEO fields.
pub async fn list_posts_handler(
    State(app_state): State<AppState>,
    Query(params): Query<ListPostsParams>,
) -> Result<Json<PostListing>, AppError> {
    let settings = app_state.settings_snapshot().await;
    let listing = app_state
        .automation
        .list_posts(&settings, &params.post_type)
        .await?;
    Ok(Json(listing))
}

/// Runs the pipeline for one post. Failures are reported in the body.
pub async fn process_post_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<ProcessPostRequest>,
) -> Json<ProcessOutcome> {
    info!(post_id = payload.post_id, keyword = %payload.keyword, "Processing post");
    let settings = app_state.settings_snapshot().await;
    let outcome = app_state
        .automation
        .process_post(&settings, payload.post_id, payload.keyword.trim())
        .await;
    Json(outcome)
}

/// Processes the newest published posts of one type.
pub async fn bulk_posts_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<BulkPostsRequest>,
) -> Result<Json<BulkOutcome>, AppError> {
    info!(post_type = %payload.post_type, "Starting bulk post run");
    let settings = app_state.settings_snapshot().await;
    let outcome = app_state
        .automation
        .bulk_process_posts(&settings, &payload.post_type)
        .await?;
    Ok(Json(outcome))
}
