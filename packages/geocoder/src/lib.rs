#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Naver Cloud geocoding adapter.
//!
//! Resolves a free-text region (e.g., "서울 마포구") to WGS84 coordinates
//! via the Naver Cloud geocode REST API. Geocoding is best-effort and
//! decoupled from the analysis call: callers treat every error here as
//! non-blocking for the report.

pub mod naver;

use thiserror::Error;

/// Errors from geocoding operations.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// The adapter has no credentials yet. Callers fail immediately
    /// rather than queuing the request.
    #[error("Geocoding service is not ready")]
    NotReady,

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-OK status.
    #[error("Geocoding failed for address: {address}")]
    Failed {
        /// The address that could not be geocoded.
        address: String,
    },

    /// The provider matched nothing.
    #[error("No results found for address: {address}")]
    NoResults {
        /// The address that matched nothing.
        address: String,
    },

    /// Response parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },
}
