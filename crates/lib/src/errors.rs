use autoseo_html::HtmlError;
use thiserror::Error;

/// Failures inside the AI client.
///
/// Transport and parse failures stay distinct here so the logs can tell them
/// apart, even though callers only see a generic generation failure.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Request to AI provider failed: {0}")]
    AiRequest(reqwest::Error),
    #[error("AI provider returned status {status}: {body}")]
    AiApi { status: u16, body: String },
    #[error("Failed to read AI provider response: {0}")]
    AiResponseBody(reqwest::Error),
    #[error("Failed to deserialize AI provider response ({source}): {body}")]
    AiDeserialization {
        #[source]
        source: serde_json::Error,
        body: String,
    },
    #[error("AI provider response had no message content: {body}")]
    MissingContent { body: String },
    #[error("Could not parse the expected JSON payload from the model output")]
    Parse { raw: String },
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl GenerationError {
    /// True when the provider answered but the answer was unusable.
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, GenerationError::Parse { .. })
    }
}

/// Errors raised by a pipeline run or the content store.
#[derive(Error, Debug)]
pub enum SeoError {
    #[error("Post {0} not found")]
    PostNotFound(i64),
    #[error("Image {0} not found")]
    ImageNotFound(i64),
    #[error("Could not fetch content: {0}")]
    Fetch(#[from] HtmlError),
    #[error("AI generation failed: {0}")]
    Generation(#[from] GenerationError),
    #[error("Configuration missing: {0}")]
    ConfigurationMissing(&'static str),
    #[error("Storage operation failed: {0}")]
    Storage(#[from] turso::Error),
    #[error("Failed to write '{meta_key}' for item {item_id}: {source}")]
    MetaWrite {
        item_id: i64,
        meta_key: String,
        #[source]
        source: turso::Error,
    },
}

impl SeoError {
    /// The short reason reported back to whoever triggered the run.
    pub fn user_message(&self) -> String {
        match self {
            SeoError::PostNotFound(_) => "Post not found".to_string(),
            SeoError::ImageNotFound(_) => "Image not found".to_string(),
            SeoError::Fetch(_) => "Could not fetch content".to_string(),
            SeoError::Generation(_) => "AI generation failed".to_string(),
            SeoError::ConfigurationMissing(what) => format!("{what} is not configured"),
            SeoError::Storage(_) => "Could not access the content store".to_string(),
            SeoError::MetaWrite { .. } => "Could not save metadata".to_string(),
        }
    }
}
