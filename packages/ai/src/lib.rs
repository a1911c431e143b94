#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! LLM provider abstraction and prompt construction for investment guides.
//!
//! Supports Google Gemini (with native structured output) and Anthropic
//! Claude via a common trait. The single entry point is [`generate_guide`]:
//! build the prompt and output schema from the request parameters, make one
//! generation call, and decode the result into the typed report. A payload
//! that fails to decode never escapes as a partial object — it surfaces as
//! [`AiError::MalformedPayload`].

pub mod prompt;
pub mod providers;

use bizscope_models::{AnalysisParams, AnalysisResponse};
use thiserror::Error;

use crate::providers::LlmProvider;

/// Errors that can occur during AI operations.
#[derive(Debug, Error)]
pub enum AiError {
    /// HTTP request to the LLM provider failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Provider-specific error.
    #[error("Provider error: {message}")]
    Provider {
        /// Description of what went wrong.
        message: String,
    },

    /// The provider returned text that does not decode into the declared
    /// report shape.
    #[error("Malformed structured payload: {message}")]
    MalformedPayload {
        /// Description of the decode failure.
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config {
        /// Description.
        message: String,
    },
}

/// Generates a structured investment guide for the given parameters.
///
/// Makes exactly one generation call. The raw text is stripped of Markdown
/// code fences (some models wrap JSON despite instructions) and decoded
/// against the declared report shape.
///
/// # Errors
///
/// Returns [`AiError`] if the provider call fails or the payload does not
/// decode into [`AnalysisResponse`].
pub async fn generate_guide(
    provider: &dyn LlmProvider,
    params: &AnalysisParams,
) -> Result<AnalysisResponse, AiError> {
    let prompt = prompt::build_prompt(params);
    let schema = prompt::output_schema();
    let raw = provider.generate(&prompt, &schema).await?;
    parse_structured(&raw)
}

/// Decodes generated text into the typed report.
///
/// # Errors
///
/// Returns [`AiError::MalformedPayload`] if the text is not valid JSON or
/// does not match the report shape.
pub fn parse_structured(raw: &str) -> Result<AnalysisResponse, AiError> {
    serde_json::from_str(strip_code_fences(raw)).map_err(|e| AiError::MalformedPayload {
        message: e.to_string(),
    })
}

/// Removes a surrounding Markdown code fence, if present.
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // The opening fence may carry an info string ("json").
    let body = rest.split_once('\n').map_or(rest, |(_, b)| b);
    let body = body.trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}
