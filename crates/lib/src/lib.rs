//! # AI SEO Automation
//!
//! This crate generates SEO metadata for content that already lives in a CMS
//! store. For a post it fetches the rendered page, reduces it to plain text,
//! asks a chat-completion model for a meta title and description, and writes
//! them into the fields of the active SEO schema (Yoast or RankMath). Image
//! attachments get alt text the same way, from a multimodal request.
//!
//! The entry point is [`SeoAutomation`]; every operation takes the current
//! [`Settings`] explicitly.

pub mod constants;
pub mod errors;
pub mod extract;
pub mod metadata;
pub mod pipeline;
pub mod prompts;
pub mod providers;
pub mod schema;
pub mod types;

pub use errors::{GenerationError, SeoError};
pub use pipeline::{SeoAutomation, SeoAutomationBuilder};
pub use providers::{
    ai::{AiProvider, ChatRequest, OpenRouterProvider, DEFAULT_CHAT_COMPLETIONS_URL},
    db::{
        sqlite::SqliteContentStore,
        storage::{ContentStore, ItemQuery},
    },
};
pub use schema::{MetaField, SeoSchema};
pub use types::{
    AltTextSuggestion, BulkOutcome, ContentItem, MediaRow, PostListing, PostRow, ProcessOutcome,
    SeoSuggestion, Settings,
};
