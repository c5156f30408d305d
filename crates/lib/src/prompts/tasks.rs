//! # Default Task Prompts
//!
//! The default prompt templates for the two generation tasks. Both can be
//! replaced through configuration or the settings endpoint.

// --- Content SEO ---

/// Placeholders: `{company_name}`, `{keywords}`, `{content}`
pub const DEFAULT_CONTENT_PROMPT: &str = r#"Generate SEO meta title and description for the following content. Company: {company_name}. Target keywords: {keywords}. Content: {content}. Return JSON format: {"meta_title": "title here", "meta_description": "description here"}"#;

// --- Media Alt Text ---

/// Placeholders: `{company_name}`, `{keywords}`, `{image_url}`
pub const DEFAULT_MEDIA_PROMPT: &str = r#"Generate a descriptive, SEO-friendly alt text for this image. Company: {company_name}. Image URL: {image_url}. Return JSON format: {"alt_text": "descriptive alt text here"}"#;
