use crate::{errors::SeoError, types::ContentItem};
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// Post status of published, publicly visible items.
pub const STATUS_PUBLISH: &str = "publish";
/// Attachments carry their parent's status instead of their own.
pub const STATUS_INHERIT: &str = "inherit";
pub const ATTACHMENT_POST_TYPE: &str = "attachment";

/// A filter over stored items, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemQuery {
    pub post_type: String,
    pub status: String,
    /// Only items whose MIME type starts with this prefix, e.g. `image/`.
    pub mime_prefix: Option<String>,
    pub limit: u32,
}

impl ItemQuery {
    /// Published items of one post type.
    pub fn published(post_type: &str, limit: u32) -> Self {
        Self {
            post_type: post_type.to_string(),
            status: STATUS_PUBLISH.to_string(),
            mime_prefix: None,
            limit,
        }
    }

    /// Image attachments.
    pub fn images(limit: u32) -> Self {
        Self {
            post_type: ATTACHMENT_POST_TYPE.to_string(),
            status: STATUS_INHERIT.to_string(),
            mime_prefix: Some("image/".to_string()),
            limit,
        }
    }
}

/// A trait for the host store that owns posts, attachments and their metadata.
#[async_trait]
pub trait ContentStore: Send + Sync + DynClone + Debug {
    /// Returns the name of the storage provider.
    fn name(&self) -> &str;

    async fn get_item(&self, id: i64) -> Result<Option<ContentItem>, SeoError>;

    /// Returns up to `query.limit` matching items, newest first.
    async fn list_items(&self, query: &ItemQuery) -> Result<Vec<ContentItem>, SeoError>;

    /// Counts every matching item, ignoring `query.limit`.
    async fn count_items(&self, query: &ItemQuery) -> Result<u64, SeoError>;

    /// Distinct post types that have at least one published item.
    async fn list_post_types(&self) -> Result<Vec<String>, SeoError>;

    async fn get_meta(&self, item_id: i64, meta_key: &str) -> Result<Option<String>, SeoError>;

    /// Sets a metadata value, replacing any previous value for the key.
    async fn set_meta(&self, item_id: i64, meta_key: &str, value: &str) -> Result<(), SeoError>;
}

dyn_clone::clone_trait_object!(ContentStore);
