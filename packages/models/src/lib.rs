#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Request and response contract types for the bizscope analysis API.
//!
//! These types are serialized to JSON for the REST API. The response shape
//! is also the declared output schema for the LLM call, so a successful
//! decode into [`AnalysisResponse`] doubles as shape validation of the
//! upstream payload.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Parameters for a single analysis request.
///
/// Created once from validated form input on submit and immutable for the
/// lifetime of that request. `lat`/`lng` are optional refinements of
/// `region`; when present they take precedence for spatial grounding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisParams {
    /// Business type (e.g., "카페").
    pub industry: String,
    /// Free-text desired location (e.g., "서울 마포구").
    pub region: String,
    /// Initial capital as entered by the user (e.g., "5천만원").
    pub capital: String,
    /// Latitude of a user-selected point, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    /// Longitude of a user-selected point, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

/// Raw body of an analysis request, before validation.
///
/// Every field is optional at the wire level so that a missing field
/// produces the API's own 400 response instead of a deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    /// Business type.
    pub industry: Option<String>,
    /// Free-text desired location.
    pub region: Option<String>,
    /// Initial capital.
    pub capital: Option<String>,
    /// Latitude of a user-selected point.
    pub lat: Option<f64>,
    /// Longitude of a user-selected point.
    pub lng: Option<f64>,
}

impl AnalyzeRequest {
    /// Checks that `industry`, `region` and `capital` are present and
    /// non-empty, yielding the validated [`AnalysisParams`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingParameters`] if any required
    /// field is absent or empty.
    pub fn validate(self) -> Result<AnalysisParams, ValidationError> {
        match (self.industry, self.region, self.capital) {
            (Some(industry), Some(region), Some(capital))
                if !industry.is_empty() && !region.is_empty() && !capital.is_empty() =>
            {
                Ok(AnalysisParams {
                    industry,
                    region,
                    capital,
                    lat: self.lat,
                    lng: self.lng,
                })
            }
            _ => Err(ValidationError::MissingParameters),
        }
    }
}

/// Errors from validating an incoming analysis request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more of `industry`, `region`, `capital` is absent or empty.
    #[error("Missing required parameters")]
    MissingParameters,
}

/// The structured analysis report returned by the API.
///
/// Each section is independently renderable: the string sections are
/// Markdown, and the chart arrays under [`CommercialDistrictAnalysis`]
/// drive the three charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    /// Core summary and recommended candidate locations (Markdown).
    pub core_summary_and_recommendations: String,
    /// Commercial district analysis with chart data.
    pub commercial_district_analysis: CommercialDistrictAnalysis,
    /// Estimated startup costs and capital allocation (Markdown).
    pub cost_analysis: String,
    /// Step-by-step preparation roadmap (Markdown).
    pub roadmap: String,
    /// Key strategies for a successful launch (Markdown).
    pub success_strategies: String,
    /// Potential risks and management plan (Markdown).
    pub risk_analysis: String,
    /// Tax services and government support information (Markdown).
    pub tax_and_info: String,
    /// Final investment guide summary (Markdown).
    pub final_summary: String,
}

/// The commercial district section: narrative text plus chart datasets.
///
/// The arrays default to empty when absent so that renderers treat
/// empty and missing identically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommercialDistrictAnalysis {
    /// Narrative district analysis (Markdown).
    pub text: String,
    /// Age-bracket shares of the primary customer base.
    #[serde(default)]
    pub customer_demographics: Vec<DemographicPoint>,
    /// Foot traffic by time of day, order-significant.
    #[serde(default)]
    pub foot_traffic: Vec<TrafficPoint>,
    /// Competitiveness scores for 2-3 key competitors.
    #[serde(default)]
    pub competitor_density: Vec<CompetitorPoint>,
}

/// One age bracket's share of the customer base.
///
/// Values should sum to roughly 100 across the set, but out-of-range data
/// is rendered as-is rather than renormalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemographicPoint {
    /// Age bracket label (e.g., "20대").
    pub name: String,
    /// Share of the customer base.
    pub value: f64,
}

/// Foot traffic level for one time-of-day slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficPoint {
    /// Time slot label (e.g., "오전").
    pub time: String,
    /// Traffic level, expected in [1, 100].
    pub value: f64,
}

/// Competitiveness score for one competitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorPoint {
    /// Competitor name.
    pub name: String,
    /// Competitiveness score, expected in [1, 100].
    pub score: f64,
}

/// A WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(industry: &str, region: &str, capital: &str) -> AnalyzeRequest {
        AnalyzeRequest {
            industry: Some(industry.to_string()),
            region: Some(region.to_string()),
            capital: Some(capital.to_string()),
            lat: None,
            lng: None,
        }
    }

    #[test]
    fn validate_accepts_complete_request() {
        let params = request("카페", "서울 마포구", "5천만원").validate().unwrap();
        assert_eq!(params.industry, "카페");
        assert_eq!(params.region, "서울 마포구");
        assert_eq!(params.capital, "5천만원");
    }

    #[test]
    fn validate_rejects_empty_field() {
        let err = request("카페", "", "5천만원").validate().unwrap_err();
        assert_eq!(err, ValidationError::MissingParameters);
    }

    #[test]
    fn validate_rejects_absent_field() {
        let req = AnalyzeRequest {
            industry: Some("카페".to_string()),
            ..AnalyzeRequest::default()
        };
        assert_eq!(
            req.validate().unwrap_err(),
            ValidationError::MissingParameters
        );
    }

    #[test]
    fn params_omit_absent_coordinates_on_the_wire() {
        let params = request("카페", "서울 마포구", "5천만원").validate().unwrap();
        let wire = serde_json::to_value(&params).unwrap();
        assert!(wire.get("lat").is_none());
        assert!(wire.get("lng").is_none());
    }

    #[test]
    fn response_decodes_with_absent_chart_arrays() {
        let payload = serde_json::json!({
            "coreSummaryAndRecommendations": "요약",
            "commercialDistrictAnalysis": { "text": "상권 분석" },
            "costAnalysis": "비용",
            "roadmap": "로드맵",
            "successStrategies": "전략",
            "riskAnalysis": "리스크",
            "taxAndInfo": "세무",
            "finalSummary": "최종 요약"
        });
        let response: AnalysisResponse = serde_json::from_value(payload).unwrap();
        assert!(response.commercial_district_analysis.customer_demographics.is_empty());
        assert!(response.commercial_district_analysis.foot_traffic.is_empty());
        assert!(response.commercial_district_analysis.competitor_density.is_empty());
    }

    #[test]
    fn response_rejects_missing_section() {
        let payload = serde_json::json!({
            "coreSummaryAndRecommendations": "요약",
            "commercialDistrictAnalysis": { "text": "상권 분석" }
        });
        assert!(serde_json::from_value::<AnalysisResponse>(payload).is_err());
    }

    #[test]
    fn traffic_order_is_preserved() {
        let payload = serde_json::json!([
            { "time": "오전", "value": 40.0 },
            { "time": "점심", "value": 85.0 },
            { "time": "저녁", "value": 70.0 }
        ]);
        let points: Vec<TrafficPoint> = serde_json::from_value(payload).unwrap();
        let times: Vec<&str> = points.iter().map(|p| p.time.as_str()).collect();
        assert_eq!(times, ["오전", "점심", "저녁"]);
    }
}
