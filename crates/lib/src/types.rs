use crate::{
    prompts::{DEFAULT_CONTENT_PROMPT, DEFAULT_MEDIA_PROMPT},
    schema::SeoSchema,
};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// The model used when none is configured.
pub const DEFAULT_MODEL: &str = "x-ai/grok-4-fast:free";

// --- Settings ---

/// Everything a pipeline run reads from configuration.
///
/// A `Settings` value is passed explicitly into every operation; nothing in
/// the library reads ambient global state.
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub company_name: String,
    /// Ordered keyword list. Accepts either a list or a comma-separated string.
    #[serde(default, deserialize_with = "deserialize_keywords")]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_content_prompt")]
    pub content_prompt: String,
    #[serde(default = "default_media_prompt")]
    pub media_prompt: String,
    #[serde(default)]
    pub seo_plugin: SeoSchema,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_content_prompt() -> String {
    DEFAULT_CONTENT_PROMPT.to_string()
}

fn default_media_prompt() -> String {
    DEFAULT_MEDIA_PROMPT.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            company_name: String::new(),
            keywords: Vec::new(),
            api_key: None,
            model: default_model(),
            content_prompt: default_content_prompt(),
            media_prompt: default_media_prompt(),
            seo_plugin: SeoSchema::default(),
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("company_name", &self.company_name)
            .field("keywords", &self.keywords)
            .field("api_key_set", &self.api_key().is_some())
            .field("model", &self.model)
            .field("seo_plugin", &self.seo_plugin)
            .finish_non_exhaustive()
    }
}

impl Settings {
    /// Splits a comma-delimited keyword string, trimming entries and dropping empty ones.
    pub fn parse_keywords(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(String::from)
            .collect()
    }

    /// The configured API key, if one is present and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    /// The keyword used for bulk runs: the first configured one, or empty.
    pub fn primary_keyword(&self) -> &str {
        self.keywords.first().map(String::as_str).unwrap_or("")
    }

    /// All keywords joined the way they are entered in the settings form.
    pub fn keywords_joined(&self) -> String {
        self.keywords.join(", ")
    }
}

fn deserialize_keywords<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawKeywords {
        Text(String),
        List(Vec<String>),
    }

    Ok(match Option::<RawKeywords>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(RawKeywords::Text(raw)) => Settings::parse_keywords(&raw),
        Some(RawKeywords::List(list)) => list
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .map(String::from)
            .collect(),
    })
}

// --- Content ---

/// An item that already exists in the host content store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: i64,
    pub post_type: String,
    pub status: String,
    pub title: String,
    /// Public URL of the rendered page.
    pub permalink: String,
    pub mime_type: Option<String>,
    /// Direct file URL, only set for attachments.
    pub attachment_url: Option<String>,
}

// --- AI Suggestions ---

/// Title and description proposed for a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoSuggestion {
    pub meta_title: String,
    pub meta_description: String,
}

/// Alt text proposed for an image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AltTextSuggestion {
    pub alt_text: String,
}

// --- Operation Results ---

/// Result of processing a single item, as reported to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ProcessOutcome {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            ..Default::default()
        }
    }
}

impl From<SeoSuggestion> for ProcessOutcome {
    fn from(suggestion: SeoSuggestion) -> Self {
        Self {
            success: true,
            ai_title: Some(suggestion.meta_title),
            ai_description: Some(suggestion.meta_description),
            ..Default::default()
        }
    }
}

impl From<AltTextSuggestion> for ProcessOutcome {
    fn from(suggestion: AltTextSuggestion) -> Self {
        Self {
            success: true,
            alt_text: Some(suggestion.alt_text),
            ..Default::default()
        }
    }
}

/// Result of a bulk run.
///
/// Bulk runs only ever touch the first `batch_limit` items; `has_more` tells
/// the caller that items beyond the cap were not attempted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkOutcome {
    pub success: bool,
    pub message: String,
    /// Items attempted, whether or not they succeeded.
    pub processed: usize,
    pub succeeded: usize,
    pub batch_limit: u32,
    pub has_more: bool,
}

/// A post row for the candidate listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRow {
    pub id: i64,
    pub title: String,
    pub permalink: String,
    pub current_meta_title: Option<String>,
    pub current_meta_description: Option<String>,
}

/// Candidate posts of one type, plus the keywords a caller can choose from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostListing {
    pub post_type: String,
    pub keywords: Vec<String>,
    pub posts: Vec<PostRow>,
}

/// An image row for the media listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRow {
    pub id: i64,
    pub url: String,
    pub filename: String,
    pub current_alt_text: Option<String>,
}
