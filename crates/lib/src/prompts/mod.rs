//! # Prompt Building
//!
//! Prompts are built by plain placeholder substitution into a configurable
//! template. Values are inserted verbatim, without escaping.

pub mod tasks;

pub use tasks::{DEFAULT_CONTENT_PROMPT, DEFAULT_MEDIA_PROMPT};

use crate::types::Settings;

pub const COMPANY_NAME_PLACEHOLDER: &str = "{company_name}";
pub const KEYWORDS_PLACEHOLDER: &str = "{keywords}";
pub const CONTENT_PLACEHOLDER: &str = "{content}";
pub const IMAGE_URL_PLACEHOLDER: &str = "{image_url}";

/// Maximum number of characters of page text sent to the model.
pub const CONTENT_EXCERPT_CHARS: usize = 2000;

/// Replaces every occurrence of each placeholder token with its value.
///
/// Substitutions are applied in order, so a value inserted early can be
/// touched by a later token. Callers put free text (page content) last.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    values
        .iter()
        .fold(template.to_string(), |prompt, (placeholder, value)| {
            prompt.replace(placeholder, value)
        })
}

/// Returns at most `max_chars` characters from the start of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Builds the title/description prompt for one page.
pub fn build_content_prompt(settings: &Settings, keyword: &str, content: &str) -> String {
    fill_template(
        &settings.content_prompt,
        &[
            (COMPANY_NAME_PLACEHOLDER, settings.company_name.as_str()),
            (KEYWORDS_PLACEHOLDER, keyword),
            (
                CONTENT_PLACEHOLDER,
                truncate_chars(content, CONTENT_EXCERPT_CHARS),
            ),
        ],
    )
}

/// Builds the alt-text prompt for one image.
pub fn build_media_prompt(settings: &Settings, image_url: &str) -> String {
    let keywords = settings.keywords_joined();
    fill_template(
        &settings.media_prompt,
        &[
            (COMPANY_NAME_PLACEHOLDER, settings.company_name.as_str()),
            (KEYWORDS_PLACEHOLDER, keywords.as_str()),
            (IMAGE_URL_PLACEHOLDER, image_url),
        ],
    )
}
