//! The UI state container and its reducer.
//!
//! States move `idle -> loading -> {success, error}`, with a `dirty`
//! transition back to `idle` whenever the region text changes (editing the
//! region invalidates the report, map center and marker derived from it).
//! The last successful report is retained across a failed retry so the UI
//! can keep rendering it beside a non-blocking notice.

use bizscope_models::{AnalysisParams, AnalysisResponse, GeoPoint};

/// Inline validation message shown when a required field is empty.
pub const VALIDATION_ERROR_MESSAGE: &str = "모든 필드를 입력해주세요.";

/// Where the current (or most recent) request stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing in flight and nothing requested since the last invalidation.
    #[default]
    Idle,
    /// An analysis request is in flight.
    Loading,
    /// The most recent request resolved.
    Success,
    /// The most recent request failed.
    Error,
}

/// The three free-text form fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormFields {
    /// Business type.
    pub industry: String,
    /// Free-text desired location.
    pub region: String,
    /// Initial capital.
    pub capital: String,
}

/// The single state record owning all shared UI state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GuideState {
    /// Current form input.
    pub form: FormFields,
    /// Request phase.
    pub phase: Phase,
    /// Last successful report, retained until a region edit or the next
    /// success.
    pub report: Option<AnalysisResponse>,
    /// Form-level validation message.
    pub form_error: Option<String>,
    /// Report-level failure message.
    pub report_error: Option<String>,
    /// Center the map pans to. Independent of `selected_location`.
    pub map_center: Option<GeoPoint>,
    /// Marker position; refines the next analysis request.
    pub selected_location: Option<GeoPoint>,
    /// Request-generation token. Async completions carrying an older
    /// generation are discarded.
    pub generation: u64,
}

impl GuideState {
    /// Snapshots the form (and any selected coordinate) into the immutable
    /// parameters for one request.
    #[must_use]
    pub fn submitted_params(&self) -> AnalysisParams {
        AnalysisParams {
            industry: self.form.industry.clone(),
            region: self.form.region.clone(),
            capital: self.form.capital.clone(),
            lat: self.selected_location.map(|p| p.lat),
            lng: self.selected_location.map(|p| p.lng),
        }
    }
}

/// Everything that can happen to the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The industry field changed.
    IndustryEdited(String),
    /// The region field changed. Invalidates all derived state.
    RegionEdited(String),
    /// The capital field changed.
    CapitalEdited(String),
    /// The form was submitted.
    Submitted,
    /// The analysis call resolved.
    AnalysisResolved {
        /// Token captured when the request was issued.
        generation: u64,
        /// The structured report.
        response: AnalysisResponse,
    },
    /// The analysis call failed.
    AnalysisFailed {
        /// Token captured when the request was issued.
        generation: u64,
        /// User-displayable message.
        message: String,
    },
    /// Geocoding resolved the region.
    GeocodeResolved {
        /// Token captured when the request was issued.
        generation: u64,
        /// The resolved coordinate.
        center: GeoPoint,
    },
    /// Geocoding failed; only map state is affected.
    GeocodeFailed {
        /// Token captured when the request was issued.
        generation: u64,
    },
    /// The user clicked the map surface.
    MapClicked(GeoPoint),
}

/// Applies one event to the state.
#[must_use]
pub fn reduce(mut state: GuideState, event: Event) -> GuideState {
    match event {
        Event::IndustryEdited(value) => {
            state.form.industry = value;
        }
        Event::CapitalEdited(value) => {
            state.form.capital = value;
        }
        Event::RegionEdited(value) => {
            // Dirty invalidation: the report, center and marker no longer
            // describe the current input. Bumping the generation also
            // invalidates any completion still in flight.
            state.form.region = value;
            state.phase = Phase::Idle;
            state.report = None;
            state.report_error = None;
            state.map_center = None;
            state.selected_location = None;
            state.generation += 1;
        }
        Event::Submitted => {
            if state.form.industry.is_empty()
                || state.form.region.is_empty()
                || state.form.capital.is_empty()
            {
                state.form_error = Some(VALIDATION_ERROR_MESSAGE.to_string());
            } else {
                state.form_error = None;
                state.report_error = None;
                state.phase = Phase::Loading;
                state.generation += 1;
            }
        }
        Event::AnalysisResolved {
            generation,
            response,
        } => {
            if generation == state.generation && state.phase == Phase::Loading {
                state.phase = Phase::Success;
                state.report = Some(response);
                state.report_error = None;
            }
        }
        Event::AnalysisFailed {
            generation,
            message,
        } => {
            if generation == state.generation && state.phase == Phase::Loading {
                state.phase = Phase::Error;
                state.report_error = Some(message);
            }
        }
        Event::GeocodeResolved { generation, center } => {
            if generation == state.generation {
                state.map_center = Some(center);
            }
        }
        Event::GeocodeFailed { generation } => {
            if generation == state.generation {
                state.map_center = None;
                state.selected_location = None;
            }
        }
        Event::MapClicked(point) => {
            // Selecting a point does not move the center.
            state.selected_location = Some(point);
        }
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizscope_models::CommercialDistrictAnalysis;

    fn report() -> AnalysisResponse {
        AnalysisResponse {
            core_summary_and_recommendations: "요약".to_string(),
            commercial_district_analysis: CommercialDistrictAnalysis {
                text: "상권 분석".to_string(),
                customer_demographics: Vec::new(),
                foot_traffic: Vec::new(),
                competitor_density: Vec::new(),
            },
            cost_analysis: "비용".to_string(),
            roadmap: "로드맵".to_string(),
            success_strategies: "전략".to_string(),
            risk_analysis: "리스크".to_string(),
            tax_and_info: "세무".to_string(),
            final_summary: "최종 요약".to_string(),
        }
    }

    fn filled() -> GuideState {
        let state = GuideState::default();
        let state = reduce(state, Event::IndustryEdited("카페".to_string()));
        let state = reduce(state, Event::RegionEdited("서울 마포구".to_string()));
        reduce(state, Event::CapitalEdited("5천만원".to_string()))
    }

    /// Submits the filled form and resolves the analysis with `report()`.
    fn resolved() -> GuideState {
        let state = reduce(filled(), Event::Submitted);
        let generation = state.generation;
        reduce(
            state,
            Event::AnalysisResolved {
                generation,
                response: report(),
            },
        )
    }

    #[test]
    fn submit_with_empty_field_sets_validation_error_and_stays_idle() {
        let state = reduce(GuideState::default(), Event::Submitted);
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.form_error.as_deref(), Some(VALIDATION_ERROR_MESSAGE));
        assert_eq!(state.generation, 0);
    }

    #[test]
    fn submit_with_all_fields_enters_loading_and_bumps_generation() {
        let before = filled();
        let state = reduce(before.clone(), Event::Submitted);
        assert_eq!(state.phase, Phase::Loading);
        assert_eq!(state.generation, before.generation + 1);
        assert!(state.form_error.is_none());
        assert!(state.report_error.is_none());
    }

    #[test]
    fn resolution_stores_the_report() {
        let state = resolved();
        assert_eq!(state.phase, Phase::Success);
        assert!(state.report.is_some());
    }

    #[test]
    fn stale_resolution_is_discarded() {
        let state = reduce(filled(), Event::Submitted);
        let stale_generation = state.generation;
        let state = reduce(state, Event::RegionEdited("부산 해운대구".to_string()));
        let state = reduce(
            state,
            Event::AnalysisResolved {
                generation: stale_generation,
                response: report(),
            },
        );
        assert_eq!(state.phase, Phase::Idle);
        assert!(state.report.is_none());
    }

    #[test]
    fn failed_retry_keeps_the_prior_report() {
        let state = reduce(resolved(), Event::Submitted);
        let generation = state.generation;
        let state = reduce(
            state,
            Event::AnalysisFailed {
                generation,
                message: "서버 오류".to_string(),
            },
        );
        assert_eq!(state.phase, Phase::Error);
        assert!(state.report.is_some());
        assert_eq!(state.report_error.as_deref(), Some("서버 오류"));
    }

    #[test]
    fn region_edit_invalidates_report_and_map_state() {
        let state = resolved();
        let generation = state.generation;
        let state = reduce(
            state,
            Event::GeocodeResolved {
                generation,
                center: GeoPoint {
                    lat: 37.5563,
                    lng: 126.9236,
                },
            },
        );
        let state = reduce(state, Event::MapClicked(GeoPoint { lat: 37.55, lng: 126.92 }));

        let state = reduce(state, Event::RegionEdited("서울 마포".to_string()));
        assert_eq!(state.phase, Phase::Idle);
        assert!(state.report.is_none());
        assert!(state.map_center.is_none());
        assert!(state.selected_location.is_none());
        assert_eq!(state.generation, generation + 1);
    }

    #[test]
    fn industry_edit_does_not_invalidate() {
        let state = reduce(resolved(), Event::IndustryEdited("베이커리".to_string()));
        assert!(state.report.is_some());
    }

    #[test]
    fn map_click_updates_selection_without_moving_center() {
        let center = GeoPoint {
            lat: 37.5563,
            lng: 126.9236,
        };
        let state = reduce(filled(), Event::Submitted);
        let generation = state.generation;
        let state = reduce(state, Event::GeocodeResolved { generation, center });
        let clicked = GeoPoint { lat: 37.56, lng: 126.93 };
        let state = reduce(state, Event::MapClicked(clicked));
        assert_eq!(state.map_center, Some(center));
        assert_eq!(state.selected_location, Some(clicked));
    }

    #[test]
    fn geocode_failure_clears_only_map_state() {
        let state = resolved();
        let generation = state.generation;
        let state = reduce(state, Event::GeocodeFailed { generation });
        assert!(state.report.is_some());
        assert!(state.map_center.is_none());
        assert!(state.selected_location.is_none());
    }

    #[test]
    fn selected_location_refines_submitted_params() {
        let state = reduce(filled(), Event::MapClicked(GeoPoint { lat: 37.56, lng: 126.93 }));
        let params = state.submitted_params();
        assert_eq!(params.lat, Some(37.56));
        assert_eq!(params.lng, Some(126.93));
    }
}
