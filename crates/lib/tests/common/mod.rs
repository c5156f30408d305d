#![allow(dead_code)]
//! # Common Test Utilities

use autoseo::{SeoSchema, Settings};
use dotenvy::dotenv;
use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the tracing subscriber and loads .env for tests.
pub fn setup_tracing() {
    INIT.call_once(|| {
        dotenv().ok();
        tracing_subscriber::fmt::init();
    });
}

/// Settings with an API key and two keywords, on the Yoast schema.
pub fn test_settings() -> Settings {
    Settings {
        company_name: "Acme Outdoors".to_string(),
        keywords: vec!["hiking boots".to_string(), "trail gear".to_string()],
        api_key: Some("sk-test-key".to_string()),
        model: "test/model".to_string(),
        seo_plugin: SeoSchema::Yoast,
        ..Default::default()
    }
}
