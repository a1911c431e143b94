//! The controller owning the state container and driving side effects.
//!
//! Exactly one analysis request is issued per valid submit; geocoding runs
//! as a best-effort side effect after the first resolution for the current
//! region and its failure is logged, never surfaced as a blocking error.

use std::sync::Arc;

use bizscope_client::GuideFetcher;

use crate::map::{MapPanel, MapProvider};
use crate::present::{present, ReportView};
use crate::state::{reduce, Event, GuideState, Phase};

/// Owns the UI state, the fetch adapter and the map capability.
pub struct GuideController {
    state: GuideState,
    fetcher: Arc<dyn GuideFetcher>,
    maps: Arc<dyn MapProvider>,
    panel: MapPanel,
}

impl GuideController {
    /// Creates a controller with injected adapters.
    #[must_use]
    pub fn new(fetcher: Arc<dyn GuideFetcher>, maps: Arc<dyn MapProvider>) -> Self {
        Self {
            state: GuideState::default(),
            fetcher,
            maps,
            panel: MapPanel::new(),
        }
    }

    /// The current state record.
    #[must_use]
    pub const fn state(&self) -> &GuideState {
        &self.state
    }

    /// The current report view.
    #[must_use]
    pub fn view(&self) -> ReportView {
        present(&self.state)
    }

    /// Whether the map panel currently has a surface.
    #[must_use]
    pub const fn map_mounted(&self) -> bool {
        self.panel.is_mounted()
    }

    /// Applies one event and reconciles the map panel.
    pub fn apply(&mut self, event: Event) {
        self.state = reduce(std::mem::take(&mut self.state), event);
        self.panel.sync(
            self.maps.as_ref(),
            self.state.map_center,
            self.state.selected_location,
        );
    }

    /// Handles a submit.
    ///
    /// An empty field produces an inline validation error and issues no
    /// network call. Otherwise one analysis request runs to completion;
    /// on the first success for the current region (no existing map
    /// center) geocoding is attempted, with failures affecting only the
    /// map panel.
    pub async fn submit(&mut self) {
        self.apply(Event::Submitted);
        if self.state.phase != Phase::Loading {
            return;
        }

        let generation = self.state.generation;
        let params = self.state.submitted_params();

        match self.fetcher.fetch_guide(&params).await {
            Ok(response) => {
                self.apply(Event::AnalysisResolved {
                    generation,
                    response,
                });
                if self.state.phase == Phase::Success && self.state.map_center.is_none() {
                    self.geocode_region(generation, &params.region).await;
                }
            }
            Err(e) => self.apply(Event::AnalysisFailed {
                generation,
                message: e.message,
            }),
        }
    }

    async fn geocode_region(&mut self, generation: u64, region: &str) {
        match self.maps.geocode(region).await {
            Ok(center) => self.apply(Event::GeocodeResolved { generation, center }),
            Err(e) => {
                log::warn!("Map geocoding failed: {e}");
                self.apply(Event::GeocodeFailed { generation });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use bizscope_client::ClientError;
    use bizscope_geocoder::GeocodeError;
    use bizscope_models::{
        AnalysisParams, AnalysisResponse, CommercialDistrictAnalysis, GeoPoint, TrafficPoint,
    };

    use crate::map::MapSurface;
    use crate::present::SectionBlock;

    fn report() -> AnalysisResponse {
        AnalysisResponse {
            core_summary_and_recommendations: "요약".to_string(),
            commercial_district_analysis: CommercialDistrictAnalysis {
                text: "상권 분석".to_string(),
                customer_demographics: Vec::new(),
                foot_traffic: vec![TrafficPoint {
                    time: "오전".to_string(),
                    value: 40.0,
                }],
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

    struct FakeFetcher {
        calls: AtomicUsize,
        response: Mutex<Result<AnalysisResponse, ClientError>>,
        last_params: Mutex<Option<AnalysisParams>>,
    }

    impl FakeFetcher {
        fn returning(response: Result<AnalysisResponse, ClientError>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                response: Mutex::new(response),
                last_params: Mutex::new(None),
            })
        }

        fn set_response(&self, response: Result<AnalysisResponse, ClientError>) {
            *self.response.lock().unwrap() = response;
        }
    }

    #[async_trait::async_trait]
    impl GuideFetcher for FakeFetcher {
        async fn fetch_guide(
            &self,
            params: &AnalysisParams,
        ) -> Result<AnalysisResponse, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_params.lock().unwrap() = Some(params.clone());
            self.response.lock().unwrap().clone()
        }
    }

    struct NullSurface;

    impl MapSurface for NullSurface {
        fn pan_to(&mut self, _center: GeoPoint) {}
        fn set_marker(&mut self, _position: Option<GeoPoint>) {}
    }

    struct FakeMaps {
        center: Option<GeoPoint>,
        geocode_calls: AtomicUsize,
    }

    impl FakeMaps {
        fn resolving(center: GeoPoint) -> Arc<Self> {
            Arc::new(Self {
                center: Some(center),
                geocode_calls: AtomicUsize::new(0),
            })
        }

        fn not_ready() -> Arc<Self> {
            Arc::new(Self {
                center: None,
                geocode_calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait::async_trait]
    impl MapProvider for FakeMaps {
        async fn geocode(&self, _address: &str) -> Result<GeoPoint, GeocodeError> {
            self.geocode_calls.fetch_add(1, Ordering::SeqCst);
            self.center.ok_or(GeocodeError::NotReady)
        }

        fn create_map(&self, _center: GeoPoint) -> Box<dyn MapSurface> {
            Box::new(NullSurface)
        }
    }

    const MAPO: GeoPoint = GeoPoint {
        lat: 37.5563,
        lng: 126.9236,
    };

    fn fill_form(controller: &mut GuideController) {
        controller.apply(Event::IndustryEdited("카페".to_string()));
        controller.apply(Event::RegionEdited("서울 마포구".to_string()));
        controller.apply(Event::CapitalEdited("5천만원".to_string()));
    }

    #[tokio::test]
    async fn empty_field_issues_zero_network_calls() {
        let fetcher = FakeFetcher::returning(Ok(report()));
        let maps = FakeMaps::resolving(MAPO);
        let mut controller = GuideController::new(fetcher.clone(), maps);

        controller.submit().await;

        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
        assert!(controller.state().form_error.is_some());
    }

    #[tokio::test]
    async fn valid_submit_issues_exactly_one_call_with_the_form_body() {
        let fetcher = FakeFetcher::returning(Ok(report()));
        let maps = FakeMaps::resolving(MAPO);
        let mut controller = GuideController::new(fetcher.clone(), maps);
        fill_form(&mut controller);

        controller.submit().await;

        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
        let params = fetcher.last_params.lock().unwrap().clone().unwrap();
        assert_eq!(params.industry, "카페");
        assert_eq!(params.region, "서울 마포구");
        assert_eq!(params.capital, "5천만원");
        assert_eq!(params.lat, None);

        let ReportView::Report { blocks, notice } = controller.view() else {
            panic!("expected a report view");
        };
        assert!(notice.is_none());
        assert!(blocks.iter().any(|b| matches!(
            b,
            SectionBlock::BarChart { data, .. } if data[0].time == "오전"
        )));
    }

    #[tokio::test]
    async fn geocode_resolution_mounts_the_map() {
        let fetcher = FakeFetcher::returning(Ok(report()));
        let maps = FakeMaps::resolving(MAPO);
        let mut controller = GuideController::new(fetcher, maps.clone());
        fill_form(&mut controller);

        controller.submit().await;

        assert_eq!(maps.geocode_calls.load(Ordering::SeqCst), 1);
        assert_eq!(controller.state().map_center, Some(MAPO));
        assert!(controller.map_mounted());
    }

    #[tokio::test]
    async fn geocode_failure_does_not_block_the_report() {
        let fetcher = FakeFetcher::returning(Ok(report()));
        let maps = FakeMaps::not_ready();
        let mut controller = GuideController::new(fetcher, maps);
        fill_form(&mut controller);

        controller.submit().await;

        assert!(matches!(controller.view(), ReportView::Report { .. }));
        assert!(!controller.map_mounted());
    }

    #[tokio::test]
    async fn resubmit_with_existing_center_skips_geocoding() {
        let fetcher = FakeFetcher::returning(Ok(report()));
        let maps = FakeMaps::resolving(MAPO);
        let mut controller = GuideController::new(fetcher, maps.clone());
        fill_form(&mut controller);

        controller.submit().await;
        controller.submit().await;

        assert_eq!(maps.geocode_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_retry_keeps_the_report_with_a_notice() {
        let fetcher = FakeFetcher::returning(Ok(report()));
        let maps = FakeMaps::resolving(MAPO);
        let mut controller = GuideController::new(fetcher.clone(), maps);
        fill_form(&mut controller);

        controller.submit().await;
        fetcher.set_response(Err(ClientError {
            message: "서버 오류".to_string(),
        }));
        controller.submit().await;

        let ReportView::Report { notice, .. } = controller.view() else {
            panic!("prior report should remain visible");
        };
        assert_eq!(notice.as_deref(), Some("서버 오류"));
    }

    #[tokio::test]
    async fn region_edit_after_success_clears_report_and_map() {
        let fetcher = FakeFetcher::returning(Ok(report()));
        let maps = FakeMaps::resolving(MAPO);
        let mut controller = GuideController::new(fetcher, maps);
        fill_form(&mut controller);

        controller.submit().await;
        controller.apply(Event::RegionEdited("부산 해운대구".to_string()));

        assert_eq!(controller.view(), ReportView::Idle);
        assert!(controller.state().map_center.is_none());
        assert!(controller.state().selected_location.is_none());
        assert!(!controller.map_mounted());
    }
}
