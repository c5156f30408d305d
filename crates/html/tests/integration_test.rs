//! # HTML Crate Integration Tests
//!
//! This file contains integration tests for the `autoseo-html` crate, verifying
//! HTML cleaning, Markdown conversion, the fallback path, and URL fetching.

use autoseo_html::{
    clean_html, fallback_plain_text, html_to_clean_markdown, page_to_text, FetchOptions,
    HtmlError, PageFetcher,
};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .compact()
        .try_init();
}

#[test]
fn test_clean_html() {
    let html_content = r#"
    <html>
        <head>
            <title>Test</title>
            <style>body { color: red; }</style>
            <script>alert("hello");</script>
            <link rel="stylesheet" href="style.css">
        </head>
        <body>
            <nav><a href="/">Home</a></nav>
            <h1>Hello</h1>
            <p>This is a test.</p>
            <img src="hero.png">
            <meta name="author" content="Test">
        </body>
    </html>
    "#;

    // Test with default tags
    let cleaned_default = clean_html(html_content, None);
    assert!(!cleaned_default.contains("<style>"));
    assert!(!cleaned_default.contains("<script>"));
    assert!(!cleaned_default.contains("<link"));
    assert!(!cleaned_default.contains("<meta"));
    assert!(!cleaned_default.contains("<nav>"));
    assert!(!cleaned_default.contains("<img"));
    assert!(cleaned_default.contains("<h1>Hello</h1>"));

    // Test with custom tags
    let cleaned_custom = clean_html(html_content, Some(&["p", "h1"]));
    assert!(cleaned_custom.contains("<style>"));
    assert!(!cleaned_custom.contains("<h1>Hello</h1>"));
    assert!(!cleaned_custom.contains("<p>This is a test.</p>"));

    // Test with no tags
    let cleaned_none = clean_html(html_content, Some(&[]));
    assert_eq!(cleaned_none, html_content);
}

#[test]
fn test_markdown_keeps_headings() {
    let html = "<html><body><h2>Pricing</h2><p>Plans start <em>low</em>.</p><script>x()</script></body></html>";
    let markdown = html_to_clean_markdown(html).unwrap();
    assert!(markdown.contains("## Pricing"), "got: {markdown}");
    assert!(markdown.contains("Plans start"));
    assert!(!markdown.contains("x()"));
}

#[test]
fn test_markdown_keeps_tables() {
    let html = "<html><body><table><tr><th>Size</th><th>Price</th></tr><tr><td>Large</td><td>$10</td></tr></table></body></html>";
    let markdown = html_to_clean_markdown(html).unwrap();
    assert!(markdown.contains("| Size"), "got: {markdown}");
    assert!(markdown.contains("| Large"), "got: {markdown}");

    let text = page_to_text(html).unwrap();
    assert!(text.contains("Size"), "got: {text}");
    assert!(text.contains("Price"), "got: {text}");
    assert!(text.contains("$10"), "got: {text}");

    // A table that already has a header keeps exactly one.
    let with_head = "<table><thead><tr><th>Size</th></tr></thead><tbody><tr><th>Row</th></tr><tr><td>Large</td></tr></tbody></table>";
    let cleaned = clean_html(with_head, None);
    assert_eq!(cleaned.matches("<thead>").count(), 1);
}

#[test]
fn test_page_to_text_collapses_whitespace() {
    let html = "<html><body><h1>Garden   Tools</h1>\n\n<p>Rakes,\n\tshovels   and hoes.</p></body></html>";
    let text = page_to_text(html).unwrap();
    assert!(!text.contains("  "));
    assert!(!text.contains('\n'));
    assert!(text.contains("Rakes, shovels and hoes."), "got: {text}");
}

#[test]
fn test_page_to_text_uses_fallback_when_primary_yields_nothing() {
    // Everything readable sits inside a <form>, which the primary path removes.
    let html = "<html><body><form>Contact   us\n today</form></body></html>";
    assert!(html_to_clean_markdown(html).is_err());

    let text = page_to_text(html).unwrap();
    assert_eq!(text, "Contact us today");
}

#[test]
fn test_fallback_handles_malformed_html() {
    let html = "<div><p>Unclosed <b>bold <i>text\n\n<script>var x = '</div>';</script>   and more</td></tr></span>";
    let text = fallback_plain_text(html).unwrap();
    assert!(!text.is_empty());
    assert!(!text.contains("  "));
    assert!(!text.contains("var x"));
    assert_eq!(text, "Unclosed bold text and more");
}

#[test]
fn test_page_to_text_empty_document_is_error() {
    let result = page_to_text("<html><head><script>x()</script></head><body></body></html>");
    assert!(matches!(result, Err(HtmlError::EmptyContent)));
}

#[tokio::test]
async fn test_fetch_success_sends_user_agent() {
    setup_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page"))
        .and(header(
            "user-agent",
            "Mozilla/5.0 (compatible; HTML-to-Markdown Bot/1.0)",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>Hi</p>"))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = PageFetcher::new(&FetchOptions::default()).unwrap();
    let body = fetcher.fetch(&format!("{}/page", server.uri())).await.unwrap();
    assert_eq!(body, "<p>Hi</p>");
}

#[tokio::test]
async fn test_fetch_follows_redirects() {
    setup_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", format!("{}/new", server.uri())),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>Moved here</p>"))
        .mount(&server)
        .await;

    let fetcher = PageFetcher::new(&FetchOptions::default()).unwrap();
    let body = fetcher.fetch(&format!("{}/old", server.uri())).await.unwrap();
    assert_eq!(body, "<p>Moved here</p>");
}

#[tokio::test]
async fn test_fetch_error_status() {
    setup_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let fetcher = PageFetcher::new(&FetchOptions::default()).unwrap();
    let result = fetcher.fetch(&format!("{}/missing", server.uri())).await;
    match result {
        Err(HtmlError::Status { status, .. }) => assert_eq!(status, 404),
        other => panic!("Expected Status error, but got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_empty_body() {
    setup_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/blank"))
        .respond_with(ResponseTemplate::new(200).set_body_string("   \n"))
        .mount(&server)
        .await;

    let fetcher = PageFetcher::new(&FetchOptions::default()).unwrap();
    let result = fetcher.fetch(&format!("{}/blank", server.uri())).await;
    assert!(matches!(result, Err(HtmlError::EmptyBody(_))));
}

#[tokio::test]
async fn test_fetch_times_out() {
    setup_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<p>late</p>")
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let options = FetchOptions {
        timeout: Duration::from_millis(100),
        ..FetchOptions::default()
    };
    let fetcher = PageFetcher::new(&options).unwrap();
    let result = fetcher.fetch(&format!("{}/slow", server.uri())).await;
    assert!(matches!(result, Err(HtmlError::Request { .. })));
}
