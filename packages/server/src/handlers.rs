//! HTTP handler functions for the analysis gateway.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, web};
use bizscope_models::AnalyzeRequest;

use crate::AppState;

/// Opaque message for any upstream failure. The cause is logged
/// server-side only.
const ANALYSIS_ERROR_MESSAGE: &str = "AI 분석 중 서버에서 오류가 발생했습니다.";

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "healthy": true,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// `POST /api/analyze`
///
/// Validates the request, builds the prompt and schema, makes one
/// generation call, and returns the decoded report. Upstream failures —
/// including malformed structured output — are returned as an opaque 500;
/// no partial object is ever propagated.
pub async fn analyze(state: web::Data<AppState>, body: web::Json<AnalyzeRequest>) -> HttpResponse {
    let params = match body.into_inner().validate() {
        Ok(params) => params,
        Err(e) => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": e.to_string(),
            }));
        }
    };

    match bizscope_ai::generate_guide(state.provider.as_ref(), &params).await {
        Ok(result) => HttpResponse::Ok().json(serde_json::json!({ "result": result })),
        Err(e) => {
            log::error!("Analysis failed for region '{}': {e}", params.region);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": ANALYSIS_ERROR_MESSAGE,
            }))
        }
    }
}

/// Fallback for unsupported verbs on `/api/analyze`.
pub async fn analyze_method_not_allowed(req: HttpRequest) -> HttpResponse {
    HttpResponse::MethodNotAllowed()
        .insert_header((header::ALLOW, "POST"))
        .body(format!("Method {} Not Allowed", req.method()))
}

/// `GET /api/config`
///
/// Relays the maps-provider client id to the frontend at runtime so the
/// secret configuration never ships with the static bundle.
pub async fn map_config(state: web::Data<AppState>) -> HttpResponse {
    state.naver_client_id.as_ref().map_or_else(
        || {
            log::error!("NAVER_CLIENT_ID is not set in the server environment");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Map configuration is missing on the server.",
            }))
        },
        |id| HttpResponse::Ok().json(serde_json::json!({ "naverClientId": id })),
    )
}

/// Fallback for unsupported verbs on `/api/config`.
pub async fn config_method_not_allowed(req: HttpRequest) -> HttpResponse {
    HttpResponse::MethodNotAllowed()
        .insert_header((header::ALLOW, "GET"))
        .body(format!("Method {} Not Allowed", req.method()))
}
