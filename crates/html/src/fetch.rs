use crate::HtmlError;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use tracing::{debug, info};

/// The user agent sent with every page request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; HTML-to-Markdown Bot/1.0)";

/// Transport settings for page fetches.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub max_redirects: usize,
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            timeout: Duration::from_secs(30),
            max_redirects: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// A reusable HTTP client for retrieving rendered pages.
///
/// Certificates are always verified; redirects are followed up to
/// `FetchOptions::max_redirects`.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(options: &FetchOptions) -> Result<Self, HtmlError> {
        let client = Client::builder()
            .connect_timeout(options.connect_timeout)
            .timeout(options.timeout)
            .redirect(Policy::limited(options.max_redirects))
            .user_agent(options.user_agent.clone())
            .build()
            .map_err(HtmlError::ClientBuild)?;
        Ok(Self { client })
    }

    /// Fetches the raw HTML at `url`.
    ///
    /// Any non-2xx status or an empty body is an error.
    pub async fn fetch(&self, url: &str) -> Result<String, HtmlError> {
        info!("Fetching page: {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| HtmlError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(HtmlError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|source| HtmlError::Request {
            url: url.to_string(),
            source,
        })?;
        if body.trim().is_empty() {
            return Err(HtmlError::EmptyBody(url.to_string()));
        }

        debug!(url = %url, bytes = body.len(), "Fetched page body");
        Ok(body)
    }
}

/// One-shot fetch with default options.
pub async fn fetch_html(url: &str) -> Result<String, HtmlError> {
    PageFetcher::new(&FetchOptions::default())?.fetch(url).await
}
