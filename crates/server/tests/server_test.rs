//! # Server Endpoint Tests
//!
//! Drives the HTTP surface end to end: the page fetch and the AI call both go
//! to a `wiremock` server.

mod common;

use anyhow::Result;
use autoseo::ContentStore;
use common::TestApp;
use serde_json::{json, Value};

const PAGE_HTML: &str =
    "<html><body><main><h1>Trail Boots</h1><p>Grippy soles for wet rock.</p></main></body></html>";
const SEO_ANSWER: &str =
    r#"{"meta_title": "Trail Boots | Acme", "meta_description": "Grippy soles for wet rock."}"#;

#[tokio::test]
async fn test_root_and_health_check_endpoints() -> Result<()> {
    let app = TestApp::spawn().await?;

    let root_response = app.client.get(format!("{}/", app.address)).send().await?;
    assert!(root_response.status().is_success());
    assert_eq!("autoseo server is running.", root_response.text().await?);

    let health_response = app
        .client
        .get(format!("{}/health", app.address))
        .send()
        .await?;
    assert!(health_response.status().is_success());
    assert_eq!("OK", health_response.text().await?);

    Ok(())
}

#[tokio::test]
async fn test_process_post_end_to_end() -> Result<()> {
    let app = TestApp::spawn().await?;
    let url = app.serve_page("/trail-boots", PAGE_HTML).await;
    app.seed_post(1, "Trail Boots", &url).await?;
    app.mock_completion(SEO_ANSWER).await;

    let response = app
        .client
        .post(format!("{}/posts/process", app.address))
        .json(&json!({"post_id": 1, "keyword": "trail gear"}))
        .send()
        .await?;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await?;
    assert_eq!(
        body,
        json!({
            "success": true,
            "ai_title": "Trail Boots | Acme",
            "ai_description": "Grippy soles for wet rock."
        })
    );
    assert_eq!(
        app.app_state
            .store
            .get_meta(1, "_yoast_wpseo_metadesc")
            .await?
            .as_deref(),
        Some("Grippy soles for wet rock.")
    );
    Ok(())
}

#[tokio::test]
async fn test_process_unknown_post_reports_failure() -> Result<()> {
    let app = TestApp::spawn().await?;

    let body: Value = app
        .client
        .post(format!("{}/posts/process", app.address))
        .json(&json!({"post_id": 99, "keyword": ""}))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(body, json!({"success": false, "message": "Post not found"}));
    Ok(())
}

#[tokio::test]
async fn test_list_posts_and_post_types() -> Result<()> {
    let app = TestApp::spawn().await?;
    app.seed_post(1, "First", "https://example.com/first").await?;
    app.seed_post(2, "Second", "https://example.com/second").await?;
    app.app_state
        .store
        .set_meta(1, "_yoast_wpseo_title", "Existing title")
        .await?;

    let listing: Value = app
        .client
        .get(format!("{}/posts?post_type=post", app.address))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(listing["post_type"], "post");
    assert_eq!(listing["keywords"], json!(["hiking boots", "trail gear"]));
    assert_eq!(listing["posts"][0]["id"], 2);
    assert_eq!(listing["posts"][1]["current_meta_title"], "Existing title");

    let post_types: Value = app
        .client
        .get(format!("{}/post-types", app.address))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(post_types, json!(["post"]));
    Ok(())
}

#[tokio::test]
async fn test_bulk_posts_reports_count() -> Result<()> {
    let app = TestApp::spawn().await?;
    let url = app.serve_page("/page", PAGE_HTML).await;
    for id in 1..=3 {
        app.seed_post(id, &format!("Post {id}"), &url).await?;
    }
    app.mock_completion(SEO_ANSWER).await;

    let body: Value = app
        .client
        .post(format!("{}/posts/bulk", app.address))
        .json(&json!({"post_type": "post"}))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Processed 3 posts");
    assert_eq!(body["processed"], 3);
    assert_eq!(body["succeeded"], 3);
    assert_eq!(body["batch_limit"], 10);
    assert_eq!(body["has_more"], false);
    Ok(())
}

#[tokio::test]
async fn test_media_endpoints() -> Result<()> {
    let app = TestApp::spawn().await?;
    app.seed_image(5, "https://cdn.example.com/uploads/lake.jpg")
        .await?;
    app.mock_completion("```json\n{\"alt_text\": \"Mountain lake at dawn\"}\n```")
        .await;

    let body: Value = app
        .client
        .post(format!("{}/media/process", app.address))
        .json(&json!({"attachment_id": 5}))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(
        body,
        json!({"success": true, "alt_text": "Mountain lake at dawn"})
    );

    let media: Value = app
        .client
        .get(format!("{}/media", app.address))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(media[0]["filename"], "lake.jpg");
    assert_eq!(media[0]["current_alt_text"], "Mountain lake at dawn");

    let bulk: Value = app
        .client
        .post(format!("{}/media/bulk", app.address))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(bulk["message"], "Processed 1 images");
    Ok(())
}

#[tokio::test]
async fn test_settings_are_redacted_and_replaceable() -> Result<()> {
    let app = TestApp::spawn().await?;

    let current: Value = app
        .client
        .get(format!("{}/settings", app.address))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(current["api_key_set"], true);
    assert!(current.get("api_key").is_none());
    assert_eq!(current["seo_plugin"], "yoast");

    let updated: Value = app
        .client
        .put(format!("{}/settings", app.address))
        .json(&json!({
            "company_name": "Acme Climbing",
            "keywords": "ropes, harnesses",
            "model": "test/other-model",
            "seo_plugin": "rankmath"
        }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(updated["company_name"], "Acme Climbing");
    assert_eq!(updated["keywords"], json!(["ropes", "harnesses"]));
    assert_eq!(updated["seo_plugin"], "rankmath");
    // The key was not part of the update, so it is kept.
    assert_eq!(updated["api_key_set"], true);

    let snapshot = app.app_state.settings_snapshot().await;
    assert_eq!(snapshot.api_key(), Some("sk-test-key"));
    Ok(())
}

#[tokio::test]
async fn test_settings_update_keeps_detected_schema() -> Result<()> {
    let app = TestApp::spawn_with_config(
        "active_plugins:\n  - \"seo-by-rank-math/rank-math.php\"",
        r#"  company_name: "Acme Outdoors"
  api_key: "sk-test-key""#,
    )
    .await?;

    let current: Value = app
        .client
        .get(format!("{}/settings", app.address))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(current["seo_plugin"], "rankmath");

    let updated: Value = app
        .client
        .put(format!("{}/settings", app.address))
        .json(&json!({
            "company_name": "Acme Climbing",
            "keywords": ["ropes"],
            "model": "test/model"
        }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(updated["company_name"], "Acme Climbing");
    assert_eq!(updated["seo_plugin"], "rankmath");

    let snapshot = app.app_state.settings_snapshot().await;
    assert_eq!(snapshot.seo_plugin, autoseo::SeoSchema::RankMath);
    Ok(())
}

#[tokio::test]
async fn test_missing_api_key_is_reported_without_calls() -> Result<()> {
    let app = TestApp::spawn_with_settings(r#"  company_name: "Acme""#).await?;
    let url = app.serve_page("/page", PAGE_HTML).await;
    app.seed_post(1, "Post", &url).await?;

    let body: Value = app
        .client
        .post(format!("{}/posts/process", app.address))
        .json(&json!({"post_id": 1, "keyword": "boots"}))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(
        body,
        json!({"success": false, "message": "API key is not configured"})
    );
    let requests = app.mock_server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_malformed_json_is_rejected() -> Result<()> {
    let app = TestApp::spawn().await?;
    let response = app
        .client
        .post(format!("{}/posts/process", app.address))
        .header("Content-Type", "application/json")
        .body(r#"{"post_id": 1"#)
        .send()
        .await?;
    assert_eq!(400, response.status().as_u16());
    Ok(())
}

#[tokio::test]
async fn test_settings_with_empty_model_are_rejected() -> Result<()> {
    let app = TestApp::spawn().await?;
    let response = app
        .client
        .put(format!("{}/settings", app.address))
        .json(&json!({ "company_name": "Acme", "model": "  " }))
        .send()
        .await?;
    assert_eq!(400, response.status().as_u16());
    let body: Value = response.json().await?;
    assert_eq!(body["error"], "model must not be empty");

    let snapshot = app.app_state.settings_snapshot().await;
    assert_eq!(snapshot.model, "test/model");
    Ok(())
}
