//! # JSON Recovery from Model Output
//!
//! Models wrap their JSON in prose, code fences, or both. After fences are
//! stripped, an ordered list of [`ExtractionStrategy`]s is tried; the first
//! candidate that deserializes into the expected shape wins.

use crate::errors::GenerationError;
use regex::Regex;
use serde::de::DeserializeOwned;
use tracing::debug;

/// One way of locating a JSON candidate inside free text.
pub trait ExtractionStrategy: Sync {
    fn name(&self) -> &'static str;

    /// Returns the substring to parse, or `None` if this strategy finds nothing.
    fn candidate<'a>(&self, text: &'a str) -> Result<Option<&'a str>, regex::Error>;
}

/// Finds the first `{ ... }` block, allowing one level of nested objects.
pub struct BracketMatch;

impl ExtractionStrategy for BracketMatch {
    fn name(&self) -> &'static str {
        "bracket_match"
    }

    fn candidate<'a>(&self, text: &'a str) -> Result<Option<&'a str>, regex::Error> {
        let re = Regex::new(r"(?s)\{[^{}]*(?:\{[^{}]*\}[^{}]*)*\}")?;
        Ok(re.find(text).map(|m| m.as_str()))
    }
}

/// Treats the whole (trimmed) text as the candidate.
pub struct WholeText;

impl ExtractionStrategy for WholeText {
    fn name(&self) -> &'static str {
        "whole_text"
    }

    fn candidate<'a>(&self, text: &'a str) -> Result<Option<&'a str>, regex::Error> {
        let trimmed = text.trim();
        Ok((!trimmed.is_empty()).then_some(trimmed))
    }
}

/// Strategies in the order they are attempted.
pub const STRATEGIES: &[&dyn ExtractionStrategy] = &[&BracketMatch, &WholeText];

/// Removes Markdown code-fence markers and trims the result.
pub fn strip_code_fences(text: &str) -> Result<String, regex::Error> {
    let fences = Regex::new(r"(?i)```(?:json)?\s*|\s*```")?;
    Ok(fences.replace_all(text, "").trim().to_string())
}

/// Recovers a `T` from free-form model output.
///
/// Returns [`GenerationError::Parse`] carrying the raw text when no strategy
/// yields an object with the fields `T` requires.
pub fn extract_json<T: DeserializeOwned>(raw: &str) -> Result<T, GenerationError> {
    let text = strip_code_fences(raw)?;

    for strategy in STRATEGIES {
        let Some(candidate) = strategy.candidate(&text)? else {
            continue;
        };
        match serde_json::from_str::<T>(candidate) {
            Ok(value) => {
                debug!("Parsed model output with strategy '{}'", strategy.name());
                return Ok(value);
            }
            Err(e) => debug!("Strategy '{}' rejected candidate: {e}", strategy.name()),
        }
    }

    Err(GenerationError::Parse {
        raw: raw.to_string(),
    })
}
