//! Maps the state record onto renderable report views.
//!
//! The presenter is a pure function over [`GuideState`]: a full-screen
//! spinner while loading, an error panel only when there is no retained
//! report, and otherwise the section blocks in fixed order. Charts whose
//! backing arrays are empty are skipped entirely — no placeholder charts.

use bizscope_models::{
    AnalysisResponse, CompetitorPoint, DemographicPoint, TrafficPoint,
};

use crate::state::{GuideState, Phase};

/// Shown when a request failed without a specific message.
const FALLBACK_ERROR_MESSAGE: &str =
    "분석 중 알 수 없는 오류가 발생했습니다. 잠시 후 다시 시도해주세요.";

/// What the report region should render.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportView {
    /// Nothing to show yet — render the empty-state placeholder.
    Idle,
    /// Full-screen loading spinner.
    Loading,
    /// Full-screen error panel. Only produced when no prior report exists.
    ErrorPanel {
        /// User-displayable failure message.
        message: String,
    },
    /// The report sections, in render order.
    Report {
        /// Renderable blocks.
        blocks: Vec<SectionBlock>,
        /// Non-blocking failure notice beside a retained report.
        notice: Option<String>,
    },
}

/// One independently renderable block of the report.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionBlock {
    /// A Markdown section.
    Markdown {
        /// Section heading.
        title: &'static str,
        /// Markdown body.
        body: String,
    },
    /// Customer demographics pie chart.
    PieChart {
        /// Chart heading.
        title: &'static str,
        /// Age-bracket shares.
        data: Vec<DemographicPoint>,
    },
    /// Foot traffic bar chart, order-significant.
    BarChart {
        /// Chart heading.
        title: &'static str,
        /// Traffic by time slot.
        data: Vec<TrafficPoint>,
    },
    /// Competitor score horizontal bar chart.
    HorizontalBarChart {
        /// Chart heading.
        title: &'static str,
        /// Competitor scores.
        data: Vec<CompetitorPoint>,
    },
}

/// Derives the report view from the current state.
#[must_use]
pub fn present(state: &GuideState) -> ReportView {
    if state.phase == Phase::Loading {
        return ReportView::Loading;
    }

    match (&state.report, state.phase) {
        (Some(report), _) => ReportView::Report {
            blocks: section_blocks(report),
            notice: state.report_error.clone(),
        },
        (None, Phase::Error) => ReportView::ErrorPanel {
            message: state
                .report_error
                .clone()
                .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string()),
        },
        (None, _) => ReportView::Idle,
    }
}

/// Flattens the report into blocks in the fixed render order.
fn section_blocks(report: &AnalysisResponse) -> Vec<SectionBlock> {
    let district = &report.commercial_district_analysis;
    let mut blocks = vec![
        SectionBlock::Markdown {
            title: "핵심 요약 및 추천 후보지",
            body: report.core_summary_and_recommendations.clone(),
        },
        SectionBlock::Markdown {
            title: "상권 종합 분석",
            body: district.text.clone(),
        },
    ];

    if !district.customer_demographics.is_empty() {
        blocks.push(SectionBlock::PieChart {
            title: "주요 고객층 연령대 분포",
            data: district.customer_demographics.clone(),
        });
    }
    if !district.foot_traffic.is_empty() {
        blocks.push(SectionBlock::BarChart {
            title: "시간대별 유동인구 패턴",
            data: district.foot_traffic.clone(),
        });
    }
    if !district.competitor_density.is_empty() {
        blocks.push(SectionBlock::HorizontalBarChart {
            title: "주요 경쟁업체 경쟁력 분석",
            data: district.competitor_density.clone(),
        });
    }

    blocks.extend([
        SectionBlock::Markdown {
            title: "예상 창업 비용 및 자본금 상세 분석",
            body: report.cost_analysis.clone(),
        },
        SectionBlock::Markdown {
            title: "창업 준비과정 로드맵",
            body: report.roadmap.clone(),
        },
        SectionBlock::Markdown {
            title: "성공적인 창업을 위한 핵심 전략",
            body: report.success_strategies.clone(),
        },
        SectionBlock::Markdown {
            title: "잠재적 리스크 및 관리 방안",
            body: report.risk_analysis.clone(),
        },
        SectionBlock::Markdown {
            title: "세무 및 추가 정보",
            body: report.tax_and_info.clone(),
        },
        SectionBlock::Markdown {
            title: "최종 투자 가이드 요약",
            body: report.final_summary.clone(),
        },
    ]);

    blocks
}
