//! # SEO Automation Pipeline
//!
//! Runs fetch → normalize → prompt → generate → extract → write for single
//! items and small sequential batches. Every per-item failure is folded into a
//! [`ProcessOutcome`] at this boundary; listings are read-only and propagate
//! store errors instead.

use crate::{
    constants::{BULK_BATCH_SIZE, LIST_PAGE_SIZE},
    errors::SeoError,
    metadata::{read_alt_text, read_seo_meta, write_alt_text, write_seo_meta},
    providers::{
        ai::{generate_alt_text, generate_seo_suggestion, AiProvider},
        db::storage::{ContentStore, ItemQuery, ATTACHMENT_POST_TYPE},
    },
    types::{
        AltTextSuggestion, BulkOutcome, ContentItem, MediaRow, PostListing, PostRow,
        ProcessOutcome, SeoSuggestion, Settings,
    },
};
use autoseo_html::{page_to_text, FetchOptions, PageFetcher};
use tracing::{info, warn};

/// Wires a content store, an AI provider and a page fetcher together.
#[derive(Debug, Clone)]
pub struct SeoAutomation {
    store: Box<dyn ContentStore>,
    ai_provider: Box<dyn AiProvider>,
    fetcher: PageFetcher,
}

/// Builder for [`SeoAutomation`].
#[derive(Default)]
pub struct SeoAutomationBuilder {
    store: Option<Box<dyn ContentStore>>,
    ai_provider: Option<Box<dyn AiProvider>>,
    fetch_options: FetchOptions,
}

impl SeoAutomationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(mut self, store: Box<dyn ContentStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn ai_provider(mut self, ai_provider: Box<dyn AiProvider>) -> Self {
        self.ai_provider = Some(ai_provider);
        self
    }

    /// Overrides the page fetch timeouts, redirect limit and user agent.
    pub fn fetch_options(mut self, fetch_options: FetchOptions) -> Self {
        self.fetch_options = fetch_options;
        self
    }

    /// Builds the pipeline. Both a store and an AI provider are required.
    pub fn build(self) -> Result<SeoAutomation, SeoError> {
        let store = self
            .store
            .ok_or(SeoError::ConfigurationMissing("Content store"))?;
        let ai_provider = self
            .ai_provider
            .ok_or(SeoError::ConfigurationMissing("AI provider"))?;
        let fetcher = PageFetcher::new(&self.fetch_options)?;
        Ok(SeoAutomation {
            store,
            ai_provider,
            fetcher,
        })
    }
}

/// The last path segment of a URL, without any query string.
fn file_name_from_url(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or(path)
        .to_string()
}

impl SeoAutomation {
    pub fn builder() -> SeoAutomationBuilder {
        SeoAutomationBuilder::new()
    }

    pub fn store(&self) -> &dyn ContentStore {
        self.store.as_ref()
    }

    // --- Posts ---

    /// Generates and stores a meta title and description for one post.
    pub async fn process_post(
        &self,
        settings: &Settings,
        post_id: i64,
        keyword: &str,
    ) -> ProcessOutcome {
        match self.run_post(settings, post_id, keyword).await {
            Ok(suggestion) => {
                info!(post_id, "Updated SEO metadata: '{}'", suggestion.meta_title);
                suggestion.into()
            }
            Err(e) => {
                warn!(post_id, "Post processing failed: {e}");
                ProcessOutcome::failure(e.user_message())
            }
        }
    }

    async fn run_post(
        &self,
        settings: &Settings,
        post_id: i64,
        keyword: &str,
    ) -> Result<SeoSuggestion, SeoError> {
        let post = self
            .store
            .get_item(post_id)
            .await?
            .ok_or(SeoError::PostNotFound(post_id))?;
        let api_key = settings
            .api_key()
            .ok_or(SeoError::ConfigurationMissing("API key"))?;

        let html = self.fetcher.fetch(&post.permalink).await?;
        let content = page_to_text(&html)?;

        let suggestion = generate_seo_suggestion(
            self.ai_provider.as_ref(),
            settings,
            api_key,
            keyword,
            &content,
        )
        .await?;

        write_seo_meta(
            self.store.as_ref(),
            settings.seo_plugin,
            post_id,
            &suggestion,
        )
        .await?;
        Ok(suggestion)
    }

    /// Published posts of `post_type` with their current SEO fields.
    pub async fn list_posts(
        &self,
        settings: &Settings,
        post_type: &str,
    ) -> Result<PostListing, SeoError> {
        let items = self
            .store
            .list_items(&ItemQuery::published(post_type, LIST_PAGE_SIZE))
            .await?;

        let mut posts = Vec::with_capacity(items.len());
        for item in items {
            let (current_meta_title, current_meta_description) =
                read_seo_meta(self.store.as_ref(), settings.seo_plugin, item.id).await?;
            posts.push(PostRow {
                id: item.id,
                title: item.title,
                permalink: item.permalink,
                current_meta_title,
                current_meta_description,
            });
        }

        Ok(PostListing {
            post_type: post_type.to_string(),
            keywords: settings.keywords.clone(),
            posts,
        })
    }

    /// Processes the newest published posts of `post_type`, one at a time,
    /// with the first configured keyword.
    pub async fn bulk_process_posts(
        &self,
        settings: &Settings,
        post_type: &str,
    ) -> Result<BulkOutcome, SeoError> {
        let query = ItemQuery::published(post_type, BULK_BATCH_SIZE);
        let keyword = settings.primary_keyword();
        let (items, total) = self.batch(&query).await?;

        let mut succeeded = 0;
        for item in &items {
            if self.process_post(settings, item.id, keyword).await.success {
                succeeded += 1;
            }
        }

        info!(
            post_type,
            processed = items.len(),
            succeeded,
            "Bulk post run finished"
        );
        Ok(BulkOutcome {
            success: true,
            message: format!("Processed {} posts", items.len()),
            processed: items.len(),
            succeeded,
            batch_limit: BULK_BATCH_SIZE,
            has_more: total > items.len() as u64,
        })
    }

    /// Post types that have published content.
    pub async fn list_post_types(&self) -> Result<Vec<String>, SeoError> {
        self.store.list_post_types().await
    }

    // --- Media ---

    /// Generates and stores alt text for one image attachment.
    pub async fn process_media(&self, settings: &Settings, attachment_id: i64) -> ProcessOutcome {
        match self.run_media(settings, attachment_id).await {
            Ok(suggestion) => {
                info!(attachment_id, "Updated alt text: '{}'", suggestion.alt_text);
                suggestion.into()
            }
            Err(e) => {
                warn!(attachment_id, "Media processing failed: {e}");
                ProcessOutcome::failure(e.user_message())
            }
        }
    }

    async fn run_media(
        &self,
        settings: &Settings,
        attachment_id: i64,
    ) -> Result<AltTextSuggestion, SeoError> {
        let image_url = self
            .store
            .get_item(attachment_id)
            .await?
            .filter(|item| item.post_type == ATTACHMENT_POST_TYPE)
            .and_then(|item| item.attachment_url)
            .ok_or(SeoError::ImageNotFound(attachment_id))?;
        let api_key = settings
            .api_key()
            .ok_or(SeoError::ConfigurationMissing("API key"))?;

        let suggestion =
            generate_alt_text(self.ai_provider.as_ref(), settings, api_key, &image_url).await?;

        write_alt_text(self.store.as_ref(), attachment_id, &suggestion).await?;
        Ok(suggestion)
    }

    /// Image attachments with their current alt text.
    pub async fn list_media(&self) -> Result<Vec<MediaRow>, SeoError> {
        let items = self
            .store
            .list_items(&ItemQuery::images(LIST_PAGE_SIZE))
            .await?;

        let mut rows = Vec::with_capacity(items.len());
        for item in items {
            let current_alt_text = read_alt_text(self.store.as_ref(), item.id).await?;
            let url = item.attachment_url.unwrap_or_default();
            rows.push(MediaRow {
                id: item.id,
                filename: file_name_from_url(&url),
                url,
                current_alt_text,
            });
        }
        Ok(rows)
    }

    /// Processes the newest image attachments, one at a time.
    pub async fn bulk_process_media(&self, settings: &Settings) -> Result<BulkOutcome, SeoError> {
        let (items, total) = self.batch(&ItemQuery::images(BULK_BATCH_SIZE)).await?;

        let mut succeeded = 0;
        for item in &items {
            if self.process_media(settings, item.id).await.success {
                succeeded += 1;
            }
        }

        info!(
            processed = items.len(),
            succeeded, "Bulk media run finished"
        );
        Ok(BulkOutcome {
            success: true,
            message: format!("Processed {} images", items.len()),
            processed: items.len(),
            succeeded,
            batch_limit: BULK_BATCH_SIZE,
            has_more: total > items.len() as u64,
        })
    }

    /// The capped batch for a bulk run, plus the uncapped match count.
    async fn batch(&self, query: &ItemQuery) -> Result<(Vec<ContentItem>, u64), SeoError> {
        let items = self.store.list_items(query).await?;
        let total = self.store.count_items(query).await?;
        Ok((items, total))
    }
}
