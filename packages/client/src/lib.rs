#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! HTTP client adapter for the analysis gateway.
//!
//! Wraps the POST to the analysis endpoint and normalizes every failure
//! mode — network error, non-2xx status, unexpected body shape — into a
//! single [`ClientError`] carrying a user-displayable message. One request,
//! one outcome: no automatic retries.

use bizscope_models::{AnalysisParams, AnalysisResponse};
use serde::Deserialize;
use thiserror::Error;

/// Fallback message when the server answers non-2xx without a usable body.
const SERVER_ERROR_MESSAGE: &str = "AI 분석 중 서버 오류가 발생했습니다.";

/// Fallback message for failures before or outside the HTTP exchange.
const UNKNOWN_ERROR_MESSAGE: &str =
    "AI 분석 중 알 수 없는 오류가 발생했습니다. 잠시 후 다시 시도해주세요.";

/// A normalized fetch failure with a user-displayable message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ClientError {
    /// Message suitable for direct display to the user.
    pub message: String,
}

/// Seam for issuing analysis requests, so callers can be tested with a
/// counting fake.
#[async_trait::async_trait]
pub trait GuideFetcher: Send + Sync {
    /// Fetches a structured investment guide for the given parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] for any failure mode.
    async fn fetch_guide(&self, params: &AnalysisParams)
    -> Result<AnalysisResponse, ClientError>;
}

/// Success envelope of the analysis endpoint.
#[derive(Deserialize)]
struct ResultEnvelope {
    result: AnalysisResponse,
}

/// The real HTTP client for the analysis gateway.
pub struct HttpGuideClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpGuideClient {
    /// Creates a client for a gateway at `base_url` (no trailing slash).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl GuideFetcher for HttpGuideClient {
    async fn fetch_guide(
        &self,
        params: &AnalysisParams,
    ) -> Result<AnalysisResponse, ClientError> {
        let url = format!("{}/api/analyze", self.base_url);

        let resp = self
            .client
            .post(&url)
            .json(params)
            .send()
            .await
            .map_err(|e| {
                log::error!("Analysis request failed to send: {e}");
                ClientError {
                    message: UNKNOWN_ERROR_MESSAGE.to_string(),
                }
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            log::error!("Failed to read analysis response body: {e}");
            ClientError {
                message: UNKNOWN_ERROR_MESSAGE.to_string(),
            }
        })?;

        if !status.is_success() {
            return Err(ClientError {
                message: error_message_from_body(&body),
            });
        }

        let envelope: ResultEnvelope = serde_json::from_str(&body).map_err(|e| {
            log::error!("Unexpected analysis response shape: {e}");
            ClientError {
                message: UNKNOWN_ERROR_MESSAGE.to_string(),
            }
        })?;

        Ok(envelope.result)
    }
}

/// Extracts a human-readable message from a non-2xx response body.
///
/// Prefers the JSON `{"error": ...}` envelope; falls back to the raw body
/// text when it is not JSON, and to a generic message when it is empty.
fn error_message_from_body(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorEnvelope {
        error: String,
    }

    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        return envelope.error;
    }

    if body.trim().is_empty() {
        SERVER_ERROR_MESSAGE.to_string()
    } else {
        body.to_string()
    }
}
