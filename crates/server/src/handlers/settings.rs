//! # Settings Handlers
//!
//! Settings live in memory for the lifetime of the process. The API key is
//! never echoed back.

use super::{AppError, AppState};
use autoseo::{SeoSchema, Settings};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Settings as shown to clients, with the API key redacted.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct SettingsView {
    pub company_name: String,
    pub keywords: Vec<String>,
    pub api_key_set: bool,
    pub model: String,
    pub content_prompt: String,
    pub media_prompt: String,
    pub seo_plugin: SeoSchema,
}

impl From<&Settings> for SettingsView {
    fn from(settings: &Settings) -> Self {
        Self {
            company_name: settings.company_name.clone(),
            keywords: settings.keywords.clone(),
            api_key_set: settings.api_key().is_some(),
            model: settings.model.clone(),
            content_prompt: settings.content_prompt.clone(),
            media_prompt: settings.media_prompt.clone(),
            seo_plugin: settings.seo_plugin,
        }
    }
}

/// Body of `PUT /settings`. A missing `seo_plugin` keeps the current schema.
#[derive(Deserialize, Debug)]
pub struct SettingsUpdate {
    #[serde(default)]
    pub seo_plugin: Option<SeoSchema>,
    #[serde(flatten)]
    pub settings: Settings,
}

pub async fn get_settings_handler(State(app_state): State<AppState>) -> Json<SettingsView> {
    let settings = app_state.settings.read().await;
    Json(SettingsView::from(&*settings))
}

/// Replaces the current settings.
///
/// Omitting `api_key` or `seo_plugin` keeps the current value, so a client
/// can send back what it read from `GET /settings`.
pub async fn put_settings_handler(
    State(app_state): State<AppState>,
    Json(update): Json<SettingsUpdate>,
) -> Result<Json<SettingsView>, AppError> {
    let SettingsUpdate {
        seo_plugin,
        settings: mut payload,
    } = update;
    if payload.model.trim().is_empty() {
        return Err(AppError::BadRequest("model must not be empty".to_string()));
    }

    let mut settings = app_state.settings.write().await;
    if payload.api_key.is_none() {
        payload.api_key = settings.api_key.take();
    }
    payload.seo_plugin = seo_plugin.unwrap_or(settings.seo_plugin);
    *settings = payload;
    info!(settings = ?*settings, "Settings updated");
    Ok(Json(SettingsView::from(&*settings)))
}
