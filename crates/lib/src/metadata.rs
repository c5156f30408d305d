//! Reads and writes generated fields through the active SEO schema.

use crate::{
    errors::SeoError,
    providers::db::storage::ContentStore,
    schema::{MetaField, SeoSchema, ALT_TEXT_META_KEY},
    types::{AltTextSuggestion, SeoSuggestion},
};

/// Current title and description of an item under `schema`.
pub async fn read_seo_meta(
    store: &dyn ContentStore,
    schema: SeoSchema,
    item_id: i64,
) -> Result<(Option<String>, Option<String>), SeoError> {
    let title = store
        .get_meta(item_id, schema.meta_key(MetaField::Title))
        .await?;
    let description = store
        .get_meta(item_id, schema.meta_key(MetaField::Description))
        .await?;
    Ok((title, description))
}

/// Overwrites the title and description fields `schema` maps to.
pub async fn write_seo_meta(
    store: &dyn ContentStore,
    schema: SeoSchema,
    item_id: i64,
    suggestion: &SeoSuggestion,
) -> Result<(), SeoError> {
    store
        .set_meta(
            item_id,
            schema.meta_key(MetaField::Title),
            &suggestion.meta_title,
        )
        .await?;
    store
        .set_meta(
            item_id,
            schema.meta_key(MetaField::Description),
            &suggestion.meta_description,
        )
        .await
}

pub async fn read_alt_text(
    store: &dyn ContentStore,
    item_id: i64,
) -> Result<Option<String>, SeoError> {
    store.get_meta(item_id, ALT_TEXT_META_KEY).await
}

pub async fn write_alt_text(
    store: &dyn ContentStore,
    item_id: i64,
    suggestion: &AltTextSuggestion,
) -> Result<(), SeoError> {
    store
        .set_meta(item_id, ALT_TEXT_META_KEY, &suggestion.alt_text)
        .await
}
