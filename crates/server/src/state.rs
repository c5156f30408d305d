//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the logic
//! for building it at startup.

use crate::config::AppConfig;
use autoseo::{OpenRouterProvider, SeoAutomation, Settings, SqliteContentStore};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The content store. Clones share the same database.
    pub store: SqliteContentStore,
    pub automation: Arc<SeoAutomation>,
    /// Current settings. Each run works on a snapshot taken when it starts.
    pub settings: Arc<RwLock<Settings>>,
}

impl AppState {
    /// A copy of the current settings for one run.
    pub async fn settings_snapshot(&self) -> Settings {
        self.settings.read().await.clone()
    }
}

/// Builds the shared application state from the configuration.
///
/// Opens (and if needed creates) the content database and points the AI
/// client at the configured endpoint.
pub async fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let store = SqliteContentStore::new(&config.db_url).await?;
    info!(db_path = %config.db_url, "Initialized content store (SQLite).");
    // Ensure the database schema is up-to-date on startup.
    store.initialize_schema().await?;

    let ai_provider = OpenRouterProvider::new(config.ai_api_url.clone())?;
    info!(api_url = %config.ai_api_url, "Initialized AI provider.");

    let automation = SeoAutomation::builder()
        .store(Box::new(store.clone()))
        .ai_provider(Box::new(ai_provider))
        .build()?;

    info!(
        schema = %config.settings.seo_plugin,
        "Writing SEO metadata with the {} schema.",
        config.settings.seo_plugin
    );

    Ok(AppState {
        settings: Arc::new(RwLock::new(config.settings)),
        store,
        automation: Arc::new(automation),
    })
}
