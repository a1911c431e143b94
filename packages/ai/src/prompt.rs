//! Prompt and output schema construction for the investment guide.
//!
//! The prompt embeds the user's three inputs verbatim — this is prompt
//! construction, not injection-safe templating. The transport layer is the
//! only encoding applied.

use bizscope_models::AnalysisParams;

/// Builds the consultant instruction block for one analysis request.
///
/// When `lat`/`lng` are present an explicit coordinate clause is inserted
/// that takes precedence over the free-text region for spatial grounding.
#[must_use]
pub fn build_prompt(params: &AnalysisParams) -> String {
    let industry = &params.industry;
    let region = &params.region;
    let capital = &params.capital;
    let spatial_grounding = coordinate_clause(params);

    format!(
        r#"You are a world-class commercial district and startup investment consultant, specializing in guiding individuals towards successful and stable post-retirement businesses.
Based on the following information, provide a detailed and professional investment guide for a prospective entrepreneur in Korean. Your analysis must be incredibly specific, actionable, and data-driven (use realistic, simulated data for examples).

**Input Information:**
*   **업종 (Industry):** {industry}
*   **창업 희망 지역 (Desired Location):** {region}
*   **초기 자본금 (Initial Capital):** {capital}
{spatial_grounding}
**Respond with a single JSON object. Each field carries the following content:**

*   `coreSummaryAndRecommendations` — 핵심 요약 및 추천 후보지 (markdown). 현재 조건(업종, 지역, 자본금)을 바탕으로 한 창업의 전반적인 매력도와 성공 가능성을 요약하고, '{region}' 내에서 가상의 상권 분석 데이터를 (예: 1일 유동인구, 아파트 밀집도, 주변 시설) 바탕으로 가장 유망한 세부 위치를 1~2곳 추천하고 그 이유를 구체적으로 설명해주세요.
*   `commercialDistrictAnalysis.text` — 상권 종합 분석 (markdown). 지역의 분위기, 주요 시설, 유동인구의 규모와 특징(연령대, 성별, 시간대별)을 분석하고, 주요 고객층의 인구통계학적 특성과 소비 성향, 그리고 '{region}' 내 유사업종의 밀집도와 분포 현황을 분석하여 시장 포화도를 평가하세요.
*   `commercialDistrictAnalysis.customerDemographics` — 주요 고객층 연령대 분포. Age-bracket shares that should sum to roughly 100.
*   `commercialDistrictAnalysis.footTraffic` — 시간대별 유동인구 패턴. Values between 1 and 100, listed in time-of-day order.
*   `commercialDistrictAnalysis.competitorDensity` — 주요 경쟁업체 2~3곳과 각각의 경쟁력 점수 (1-100).
*   `costAnalysis` — 예상 창업 비용 및 자본금 상세 분석 (markdown). 보증금/월세, 인테리어(평당 단가 기준), 초도물품/장비, 마케팅, 각종 인허가 비용을 현실적인 추정치로 상세히 분류하고, 주어진 초기 자본금('{capital}')을 각 항목에 어떻게 배분해야 하는지 계획을 제시하세요. 특히 총 자본금의 20-30%를 예상치 못한 비용을 위한 예비비로 책정하는 것을 강조해주세요. 비용 총계를 계산하고 주어진 자본금으로 창업이 가능한지 평가하세요.
*   `roadmap` — 창업 준비과정 로드맵 (markdown, 단계별 체크리스트). D-90 사업 계획 및 등록, D-60 입지 선정 및 계약, D-45 설계 및 인테리어, D-20 인허가 및 인력 채용, D-10 장비/물품 구매 및 마케팅 시작, D-3 최종 점검, D-Day 그랜드 오픈.
*   `successStrategies` — 성공적인 창업을 위한 핵심 전략 (markdown). 메뉴/서비스 차별화 전략, 타겟 고객 맞춤 마케팅 전략 (예: 지역 커뮤니티 활용, SNS 타겟 광고), 고객 경험 및 운영 전략.
*   `riskAnalysis` — 잠재적 리스크 및 관리 방안 (markdown). 상권 특성 기반 리스크, 운영 및 재무 리스크, 외부 환경 리스크 각각에 대해 (분석)과 (대응 방안)을 제시하세요.
*   `taxAndInfo` — 세무 및 추가 정보 (markdown). 개인사업자/소상공인이 저렴하게 이용할 수 있는 세무 서비스 플랫폼(예: 삼쩜삼, 자비스, 이지샵 자동장부 등)을 2~3개 추천하고 각각의 장단점을 간략히 설명해주세요 (특정 세무사 대신 플랫폼/서비스 위주로). 창업자가 활용할 수 있는 정부의 소상공인 지원 정책이나 저금리 대출 상품도 간략히 언급하세요.
*   `finalSummary` — 최종 투자 가이드 요약 (markdown). 투자 매력도를 '상'(High), '중'(Medium), '하'(Low)로 평가하고, 종합적인 성공 가능성을 질적으로 평가한 뒤, 안정적이고 장기적인 수익성을 위한 전문가 종합 의견으로 마무리하세요.

Provide a comprehensive, data-driven (even if simulated for illustrative purposes), and actionable guide.
"#
    )
}

/// Renders the coordinate-grounding clause, or nothing when no coordinate
/// was selected.
fn coordinate_clause(params: &AnalysisParams) -> String {
    match (params.lat, params.lng) {
        (Some(lat), Some(lng)) => format!(
            "*   **분석 기준 좌표 (Exact Coordinate):** 위도 {lat}, 경도 {lng}\n\n\
             Analyze the commercial district around this exact coordinate. \
             When a coordinate is given it takes precedence over the free-text \
             location above for all spatial grounding.\n"
        ),
        _ => String::new(),
    }
}

/// The fixed output schema for the structured report.
///
/// Uses the Gemini response-schema dialect; the Anthropic provider embeds
/// it as an instruction instead. Field descriptions double as generation
/// hints.
#[must_use]
pub fn output_schema() -> serde_json::Value {
    let markdown_section = |description: &str| {
        serde_json::json!({ "type": "STRING", "description": description })
    };

    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "coreSummaryAndRecommendations":
                markdown_section("핵심 요약 및 추천 후보지 (markdown)"),
            "commercialDistrictAnalysis": {
                "type": "OBJECT",
                "properties": {
                    "text": markdown_section("상권 종합 분석 (markdown)"),
                    "customerDemographics": {
                        "type": "ARRAY",
                        "description": "Age-bracket shares of the customer base, summing to roughly 100",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "name": { "type": "STRING", "description": "Age bracket, e.g. 20대" },
                                "value": { "type": "NUMBER" }
                            },
                            "required": ["name", "value"]
                        }
                    },
                    "footTraffic": {
                        "type": "ARRAY",
                        "description": "Foot traffic by time of day, values 1-100, in time-of-day order",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "time": { "type": "STRING", "description": "Time slot, e.g. 오전" },
                                "value": { "type": "NUMBER" }
                            },
                            "required": ["time", "value"]
                        }
                    },
                    "competitorDensity": {
                        "type": "ARRAY",
                        "description": "2-3 key competitors with competitiveness scores 1-100",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "name": { "type": "STRING" },
                                "score": { "type": "NUMBER" }
                            },
                            "required": ["name", "score"]
                        }
                    }
                },
                "required": ["text", "customerDemographics", "footTraffic", "competitorDensity"]
            },
            "costAnalysis": markdown_section("예상 창업 비용 및 자본금 상세 분석 (markdown)"),
            "roadmap": markdown_section("창업 준비과정 로드맵 (markdown)"),
            "successStrategies": markdown_section("성공적인 창업을 위한 핵심 전략 (markdown)"),
            "riskAnalysis": markdown_section("잠재적 리스크 및 관리 방안 (markdown)"),
            "taxAndInfo": markdown_section("세무 및 추가 정보 (markdown)"),
            "finalSummary": markdown_section("최종 투자 가이드 요약 (markdown)")
        },
        "required": [
            "coreSummaryAndRecommendations",
            "commercialDistrictAnalysis",
            "costAnalysis",
            "roadmap",
            "successStrategies",
            "riskAnalysis",
            "taxAndInfo",
            "finalSummary"
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> AnalysisParams {
        AnalysisParams {
            industry: "카페".to_string(),
            region: "서울 마포구".to_string(),
            capital: "5천만원".to_string(),
            lat: None,
            lng: None,
        }
    }

    #[test]
    fn embeds_fields_verbatim() {
        let prompt = build_prompt(&params());
        assert!(prompt.contains("카페"));
        assert!(prompt.contains("서울 마포구"));
        assert!(prompt.contains("5천만원"));
    }

    #[test]
    fn coordinate_clause_present_only_with_coordinates() {
        let without = build_prompt(&params());
        assert!(!without.contains("Exact Coordinate"));

        let with = build_prompt(&AnalysisParams {
            lat: Some(37.5563),
            lng: Some(126.9236),
            ..params()
        });
        assert!(with.contains("Exact Coordinate"));
        assert!(with.contains("37.5563"));
        assert!(with.contains("takes precedence over the free-text"));
    }

    #[test]
    fn schema_requires_all_eight_sections() {
        let schema = output_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(serde_json::Value::as_str)
            .collect();
        assert_eq!(required.len(), 8);
        assert!(required.contains(&"coreSummaryAndRecommendations"));
        assert!(required.contains(&"finalSummary"));

        let district = &schema["properties"]["commercialDistrictAnalysis"]["properties"];
        assert!(district["customerDemographics"].is_object());
        assert!(district["footTraffic"].is_object());
        assert!(district["competitorDensity"].is_object());
    }
}
