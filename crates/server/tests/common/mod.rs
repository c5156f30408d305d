//! # Common Test Utilities
//!
//! `TestApp` spawns the real router on a random port, backed by a temporary
//! SQLite file and a `wiremock` server that plays both the public site and
//! the chat-completions endpoint.

// Not every test file uses every helper.
#![allow(unused)]

use anyhow::Result;
use autoseo::ContentItem;
use autoseo_server::{
    config,
    router,
    state::{build_app_state, AppState},
};
use axum::serve;
use reqwest::Client;
use serde_json::json;
use std::{fs::File, io::Write, net::SocketAddr};
use tempfile::{tempdir, TempDir};
use tokio::{net::TcpListener, task::JoinHandle};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

pub const CHAT_PATH: &str = "/api/v1/chat/completions";

pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    pub app_state: AppState,
    _dir: TempDir,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestApp {
    /// Spawns the application server with the given `settings:` YAML block.
    pub async fn spawn_with_settings(settings_yaml: &str) -> Result<Self> {
        Self::spawn_with_config("", settings_yaml).await
    }

    /// Like [`TestApp::spawn_with_settings`], with extra top-level YAML keys.
    pub async fn spawn_with_config(top_level_yaml: &str, settings_yaml: &str) -> Result<Self> {
        dotenvy::dotenv().ok();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let mock_server = MockServer::start().await;
        let dir = tempdir()?;
        let db_path = dir.path().join("content.db");
        let config_path = dir.path().join("config.yml");
        let config_content = format!(
            r#"
port: 0
db_url: "{}"
ai_api_url: "{}{CHAT_PATH}"
{top_level_yaml}
settings:
{settings_yaml}
"#,
            db_path.display(),
            mock_server.uri(),
        );
        File::create(&config_path)?.write_all(config_content.as_bytes())?;

        let config_path = config_path.to_string_lossy().to_string();
        let config = config::get_config(Some(&config_path))?;
        let app_state = build_app_state(config).await?;

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let router_state = app_state.clone();
        let server_handle = tokio::spawn(async move {
            let app = router::create_router(router_state);
            let server = serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            app_state,
            _dir: dir,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    /// Spawns the server with a company, two keywords and an API key.
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with_settings(
            r#"  company_name: "Acme Outdoors"
  keywords: "hiking boots, trail gear"
  api_key: "sk-test-key"
  model: "test/model""#,
        )
        .await
    }

    /// Serves `html` at `page_path` on the mock server and returns its URL.
    pub async fn serve_page(&self, page_path: &str, html: &str) -> String {
        Mock::given(method("GET"))
            .and(path(page_path))
            .respond_with(ResponseTemplate::new(200).set_body_string(html))
            .mount(&self.mock_server)
            .await;
        format!("{}{page_path}", self.mock_server.uri())
    }

    /// Makes the chat endpoint answer every request with `content`.
    pub async fn mock_completion(&self, content: &str) {
        Mock::given(method("POST"))
            .and(path(CHAT_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": content}}]
            })))
            .mount(&self.mock_server)
            .await;
    }

    pub async fn seed_post(&self, id: i64, title: &str, permalink: &str) -> Result<()> {
        let item = ContentItem {
            id,
            post_type: "post".to_string(),
            status: "publish".to_string(),
            title: title.to_string(),
            permalink: permalink.to_string(),
            mime_type: None,
            attachment_url: None,
        };
        self.app_state
            .store
            .insert_item(&item, &format!("2024-01-01T00:00:00.{id:06}"))
            .await?;
        Ok(())
    }

    pub async fn seed_image(&self, id: i64, url: &str) -> Result<()> {
        let item = ContentItem {
            id,
            post_type: "attachment".to_string(),
            status: "inherit".to_string(),
            title: format!("image-{id}"),
            permalink: url.to_string(),
            mime_type: Some("image/jpeg".to_string()),
            attachment_url: Some(url.to_string()),
        };
        self.app_state
            .store
            .insert_item(&item, &format!("2024-01-01T00:00:00.{id:06}"))
            .await?;
        Ok(())
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
