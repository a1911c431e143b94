//! LLM provider abstraction and implementations.
//!
//! Supports Google Gemini and Anthropic Claude via a common trait.

pub mod anthropic;
pub mod gemini;

use crate::AiError;

/// Trait for LLM providers.
#[async_trait::async_trait]
pub trait LlmProvider: Send + Sync {
    /// Sends one generation request and returns the raw generated text.
    ///
    /// `schema` declares the expected JSON shape of the output. Providers
    /// with native structured output attach it to the request; others
    /// embed it as an instruction.
    ///
    /// # Errors
    ///
    /// Returns [`AiError`] if the request fails.
    async fn generate(&self, prompt: &str, schema: &serde_json::Value)
    -> Result<String, AiError>;
}

/// Creates an LLM provider based on environment variables.
///
/// If `AI_PROVIDER` is explicitly set, uses that provider. Otherwise
/// auto-detects from available credentials:
///
/// 1. `GEMINI_API_KEY` set -> Google Gemini
/// 2. `ANTHROPIC_API_KEY` set -> Anthropic Claude
///
/// # Errors
///
/// Returns [`AiError::Config`] if no credentials are found or the
/// explicitly requested provider is not configured.
pub fn create_provider_from_env() -> Result<Box<dyn LlmProvider>, AiError> {
    let provider = std::env::var("AI_PROVIDER").unwrap_or_else(|_| detect_provider());

    match provider.to_lowercase().as_str() {
        "gemini" | "google" => {
            let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| AiError::Config {
                message: "GEMINI_API_KEY environment variable is not set".to_string(),
            })?;
            let model =
                std::env::var("AI_MODEL").unwrap_or_else(|_| "gemini-2.5-flash".to_string());
            Ok(Box::new(gemini::GeminiProvider::new(api_key, model)))
        }
        "anthropic" | "claude" => {
            let api_key = std::env::var("ANTHROPIC_API_KEY").map_err(|_| AiError::Config {
                message: "ANTHROPIC_API_KEY environment variable is not set".to_string(),
            })?;
            let model = std::env::var("AI_MODEL")
                .unwrap_or_else(|_| "claude-sonnet-4-20250514".to_string());
            Ok(Box::new(anthropic::AnthropicProvider::new(api_key, model)))
        }
        other => Err(AiError::Config {
            message: format!("Unknown AI provider: {other}. Use 'gemini' or 'anthropic'."),
        }),
    }
}

/// Auto-detects which provider to use based on available credentials.
fn detect_provider() -> String {
    if std::env::var("GEMINI_API_KEY").is_ok() {
        log::info!("Auto-detected AI provider: Gemini (GEMINI_API_KEY found)");
        return "gemini".to_string();
    }

    if std::env::var("ANTHROPIC_API_KEY").is_ok() {
        log::info!("Auto-detected AI provider: Anthropic (ANTHROPIC_API_KEY found)");
        return "anthropic".to_string();
    }

    log::warn!(
        "No AI credentials detected. Set GEMINI_API_KEY or ANTHROPIC_API_KEY, \
         or set AI_PROVIDER explicitly."
    );

    // Fall back to gemini — will produce a clear error about the missing key
    "gemini".to_string()
}
