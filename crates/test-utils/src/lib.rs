use anyhow::Result;
use autoseo::{
    providers::ai::{AiProvider, ChatRequest},
    ContentItem, GenerationError, SqliteContentStore,
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};

// --- Test Setup ---

/// A helper struct to manage an isolated content store for each test.
pub struct TestSetup {
    pub store: SqliteContentStore,
}

impl TestSetup {
    /// Creates a new, isolated in-memory store and initializes the schema.
    pub async fn new() -> Result<Self> {
        let store = SqliteContentStore::new(":memory:").await?;
        store.initialize_schema().await?;
        Ok(Self { store })
    }

    /// Inserts a published item of `post_type` whose page lives at `permalink`.
    /// Higher ids get later dates, so they list first.
    pub async fn seed_post(
        &self,
        id: i64,
        post_type: &str,
        title: &str,
        permalink: &str,
    ) -> Result<ContentItem> {
        self.seed_item(ContentItem {
            id,
            post_type: post_type.to_string(),
            status: "publish".to_string(),
            title: title.to_string(),
            permalink: permalink.to_string(),
            mime_type: None,
            attachment_url: None,
        })
        .await
    }

    /// Inserts an attachment stored at `url` with the given MIME type.
    pub async fn seed_attachment(&self, id: i64, url: &str, mime_type: &str) -> Result<ContentItem> {
        self.seed_item(ContentItem {
            id,
            post_type: "attachment".to_string(),
            status: "inherit".to_string(),
            title: format!("attachment-{id}"),
            permalink: format!("{url}?attachment_id={id}"),
            mime_type: Some(mime_type.to_string()),
            attachment_url: Some(url.to_string()),
        })
        .await
    }

    /// Inserts an arbitrary item, dated by its id.
    pub async fn seed_item(&self, item: ContentItem) -> Result<ContentItem> {
        let post_date = format!("2024-01-01T00:00:00.{:06}", item.id);
        self.store.insert_item(&item, &post_date).await?;
        Ok(item)
    }
}

// --- Mock AI Provider ---

/// One recorded call to the mock.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedCall {
    pub api_key: String,
    pub model: String,
    pub prompt: String,
    pub image_url: Option<String>,
}

/// A scripted `AiProvider`.
///
/// Responses are consumed in order. Once the script runs out, the fallback
/// response (if any) is returned for every further call.
#[derive(Clone, Debug, Default)]
pub struct MockAiProvider {
    script: Arc<Mutex<VecDeque<Result<String, u16>>>>,
    fallback: Arc<Mutex<Option<String>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockAiProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock that answers every call with `response`.
    pub fn always(response: &str) -> Self {
        let mock = Self::new();
        *mock.fallback.lock().unwrap() = Some(response.to_string());
        mock
    }

    /// Queues a successful raw response.
    pub fn push_response(&self, response: &str) {
        self.script
            .lock()
            .unwrap()
            .push_back(Ok(response.to_string()));
    }

    /// Queues an API failure with the given HTTP status.
    pub fn push_failure(&self, status: u16) {
        self.script.lock().unwrap().push_back(Err(status));
    }

    /// Retrieves the recorded calls for assertion.
    pub fn get_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(&self, request: &ChatRequest<'_>) -> Result<String, GenerationError> {
        self.calls.lock().unwrap().push(RecordedCall {
            api_key: request.api_key.to_string(),
            model: request.model.to_string(),
            prompt: request.prompt.to_string(),
            image_url: request.image_url.map(str::to_string),
        });

        let scripted = self.script.lock().unwrap().pop_front();
        match scripted {
            Some(Ok(response)) => Ok(response),
            Some(Err(status)) => Err(GenerationError::AiApi {
                status,
                body: "MockAiProvider: scripted failure".to_string(),
            }),
            None => match self.fallback.lock().unwrap().clone() {
                Some(response) => Ok(response),
                None => Err(GenerationError::MissingContent {
                    body: String::new(),
                }),
            },
        }
    }
}
