//! # autoseo-html: Page Fetching and Text Normalization
//!
//! This crate retrieves rendered pages over HTTP and reduces them to flat,
//! readable text suitable for an LLM prompt. Conversion goes through an
//! intermediate Markdown representation so that headings and tables keep
//! their shape until the final flattening step.

mod fetch;
mod normalize;

pub use fetch::{fetch_html, FetchOptions, PageFetcher, DEFAULT_USER_AGENT};
pub use normalize::{
    clean_html, fallback_plain_text, html_to_clean_markdown, markdown_to_plain_text,
    page_to_text, DEFAULT_REMOVED_TAGS,
};

use thiserror::Error;

/// Errors raised while fetching or converting a page.
#[derive(Error, Debug)]
pub enum HtmlError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(reqwest::Error),
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Request to {url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("Response from {0} had an empty body")]
    EmptyBody(String),
    #[error("HTML to Markdown conversion failed: {0}")]
    Conversion(#[from] std::io::Error),
    #[error("Conversion produced no readable text")]
    EmptyContent,
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}
