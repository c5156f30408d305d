pub mod openrouter;

use crate::{
    errors::GenerationError,
    extract::extract_json,
    prompts::{build_content_prompt, build_media_prompt},
    types::{AltTextSuggestion, SeoSuggestion, Settings},
};
use async_trait::async_trait;
use dyn_clone::DynClone;
pub use openrouter::{OpenRouterProvider, DEFAULT_CHAT_COMPLETIONS_URL};
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use tracing::{debug, error, warn};

/// A single chat-completion request.
///
/// When `image_url` is set the prompt is sent as a multimodal message with
/// both a text part and an image reference.
#[derive(Debug, Clone, Copy)]
pub struct ChatRequest<'a> {
    pub api_key: &'a str,
    pub model: &'a str,
    pub prompt: &'a str,
    pub image_url: Option<&'a str>,
}

/// A trait for interacting with a chat-completion API.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Sends the request and returns the model's raw message content.
    async fn generate(&self, request: &ChatRequest<'_>) -> Result<String, GenerationError>;
}

dyn_clone::clone_trait_object!(AiProvider);

/// Sends `request` and recovers a `T` from the model's answer.
///
/// Transport and parse failures are logged here, with the raw response for
/// the latter, before being returned.
pub async fn request_json<T: DeserializeOwned>(
    provider: &dyn AiProvider,
    request: &ChatRequest<'_>,
) -> Result<T, GenerationError> {
    debug!(model = %request.model, prompt = %request.prompt, "--> Sending prompt to AI provider");

    let raw_response = provider.generate(request).await.map_err(|e| {
        error!("AI request failed: {e}");
        e
    })?;

    debug!("<-- AI response: {}", raw_response);

    extract_json(&raw_response).map_err(|e| {
        warn!("Could not parse AI response: {raw_response}");
        e
    })
}

/// Asks the model for a meta title and description for `content`.
pub async fn generate_seo_suggestion(
    provider: &dyn AiProvider,
    settings: &Settings,
    api_key: &str,
    keyword: &str,
    content: &str,
) -> Result<SeoSuggestion, GenerationError> {
    let prompt = build_content_prompt(settings, keyword, content);
    let request = ChatRequest {
        api_key,
        model: &settings.model,
        prompt: &prompt,
        image_url: None,
    };
    request_json(provider, &request).await
}

/// Asks the model for alt text describing the image at `image_url`.
pub async fn generate_alt_text(
    provider: &dyn AiProvider,
    settings: &Settings,
    api_key: &str,
    image_url: &str,
) -> Result<AltTextSuggestion, GenerationError> {
    let prompt = build_media_prompt(settings, image_url);
    let request = ChatRequest {
        api_key,
        model: &settings.model,
        prompt: &prompt,
        image_url: Some(image_url),
    };
    request_json(provider, &request).await
}
