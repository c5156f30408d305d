//! # Application Configuration
//!
//! This module defines the configuration structure for the `autoseo-server` and
//! provides the logic for loading it from a `config.yml` file and environment
//! variables.

use autoseo::{
    constants::DEFAULT_DB_FILE,
    prompts::{DEFAULT_CONTENT_PROMPT, DEFAULT_MEDIA_PROMPT},
    types::DEFAULT_MODEL,
    SeoSchema, Settings, DEFAULT_CHAT_COMPLETIONS_URL,
};
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fs;
use tracing::info;

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates a required configuration file was not found.
    NotFound(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    /// The path to the SQLite content database. Loaded from `DB_URL` env var.
    #[serde(default = "default_db_url")]
    pub db_url: String,
    /// The chat-completions endpoint.
    #[serde(default = "default_ai_api_url")]
    pub ai_api_url: String,
    /// Plugin files active on the host site, used to detect the SEO schema.
    #[serde(default)]
    pub active_plugins: Vec<String>,
    /// Explicit schema choice (`yoast` or `rankmath`). Overrides detection.
    #[serde(default)]
    pub seo_plugin: Option<String>,
    /// Initial pipeline settings. They can be replaced at runtime.
    #[serde(default)]
    pub settings: Settings,
}

fn default_port() -> u16 {
    9090
}

fn default_db_url() -> String {
    DEFAULT_DB_FILE.to_string()
}

fn default_ai_api_url() -> String {
    DEFAULT_CHAT_COMPLETIONS_URL.to_string()
}

impl AppConfig {
    /// The schema named by `seo_plugin`, or the one implied by `active_plugins`.
    pub fn resolve_schema(&self) -> Result<SeoSchema, ConfigError> {
        match self.seo_plugin.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.parse().map_err(ConfigError::General),
            _ => Ok(SeoSchema::detect(&self.active_plugins)),
        }
    }
}

// Helper to read a file, substitute env vars, and return its content.
// Returns Ok(None) if the file does not exist, or an error if it fails to read.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !std::path::Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")
        .map_err(|e| ConfigError::General(e.to_string()))?;
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_default()
    });

    Ok(Some(expanded_content.to_string()))
}

/// Loads the application configuration from a file and environment variables.
///
/// - Top-level keys like `port` and `db_url` are overridden by `PORT` and `DB_URL`.
/// - Nested keys are overridden by `AUTOSEO_...` variables (e.g.
///   `AUTOSEO_SETTINGS__API_KEY`).
///
/// Without an explicit path, `config.yml` next to the crate manifest is used
/// if it exists; an explicit path must exist.
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let base_path = env!("CARGO_MANIFEST_DIR");
    let mut builder = ConfigBuilder::builder()
        // Layer 1: Programmatic defaults from the library.
        .set_default("ai_api_url", DEFAULT_CHAT_COMPLETIONS_URL)?
        .set_default("settings.model", DEFAULT_MODEL)?
        .set_default("settings.content_prompt", DEFAULT_CONTENT_PROMPT)?
        .set_default("settings.media_prompt", DEFAULT_MEDIA_PROMPT)?;

    // Layer 2: Main config file.
    match config_path_override {
        Some(path) => {
            let content = read_and_substitute(path)?.ok_or_else(|| {
                ConfigError::NotFound(format!("Config file not found at '{path}'."))
            })?;
            info!("Loading configuration from '{path}'.");
            builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
        }
        None => {
            let user_config_path = format!("{base_path}/config.yml");
            if let Some(content) = read_and_substitute(&user_config_path)? {
                info!("Loading user-defined configuration from '{user_config_path}'.");
                builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
            } else {
                info!("'{user_config_path}' not found. Using defaults and environment only.");
            }
        }
    }

    let settings = builder
        // Layer 3: Load environment variables for top-level keys like PORT.
        .add_source(Environment::default())
        // Layer 4: Load prefixed environment variables for deeper overrides.
        .add_source(
            Environment::with_prefix("AUTOSEO")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let mut config: AppConfig = settings.try_deserialize()?;
    config.settings.seo_plugin = config.resolve_schema()?;

    Ok(config)
}
