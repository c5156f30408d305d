use crate::{
    errors::GenerationError,
    providers::ai::{AiProvider, ChatRequest},
};
use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The hosted OpenAI-compatible endpoint used by default.
pub const DEFAULT_CHAT_COMPLETIONS_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Model inference is slow, so this is well above the page fetch timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

// --- OpenAI-compatible request and response structures ---

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: MessageContent<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum MessageContent<'a> {
    Text(&'a str),
    Parts(Vec<ContentPart<'a>>),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl<'a> },
}

#[derive(Serialize)]
struct ImageUrl<'a> {
    url: &'a str,
}

#[derive(Deserialize, Debug)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Debug)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Deserialize, Debug)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl<'a> ChatCompletionRequest<'a> {
    fn from_chat_request(request: &ChatRequest<'a>) -> Self {
        let content = match request.image_url {
            Some(url) => MessageContent::Parts(vec![
                ContentPart::Text {
                    text: request.prompt,
                },
                ContentPart::ImageUrl {
                    image_url: ImageUrl { url },
                },
            ]),
            None => MessageContent::Text(request.prompt),
        };
        Self {
            model: request.model,
            messages: vec![ChatMessage {
                role: "user",
                content,
            }],
        }
    }
}

// --- Provider implementation ---

/// A provider for OpenRouter or any other OpenAI-compatible chat endpoint.
#[derive(Clone, Debug)]
pub struct OpenRouterProvider {
    client: ReqwestClient,
    api_url: String,
}

impl OpenRouterProvider {
    /// Creates a new `OpenRouterProvider` posting to `api_url`.
    pub fn new(api_url: String) -> Result<Self, GenerationError> {
        let client = ReqwestClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(GenerationError::ReqwestClientBuild)?;
        Ok(Self { client, api_url })
    }
}

#[async_trait]
impl AiProvider for OpenRouterProvider {
    async fn generate(&self, request: &ChatRequest<'_>) -> Result<String, GenerationError> {
        let request_body = ChatCompletionRequest::from_chat_request(request);

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(request.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(GenerationError::AiRequest)?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::AiApi {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(GenerationError::AiResponseBody)?;
        let completion: ChatCompletionResponse = match serde_json::from_str(&body) {
            Ok(completion) => completion,
            Err(source) => return Err(GenerationError::AiDeserialization { source, body }),
        };

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(GenerationError::MissingContent { body })
    }
}
