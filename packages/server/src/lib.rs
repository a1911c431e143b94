#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web analysis gateway for the bizscope application.
//!
//! Serves the analysis endpoint (prompt construction + LLM call + shape
//! validation), the map configuration relay, and the frontend static
//! files. The LLM credential is validated at startup; the map client id
//! is only required by the config endpoint at request time.

mod handlers;

use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use bizscope_ai::providers::LlmProvider;

/// Shared application state.
pub struct AppState {
    /// The configured LLM provider.
    pub provider: Arc<dyn LlmProvider>,
    /// Maps-provider client id relayed to the frontend, when configured.
    pub naver_client_id: Option<String>,
}

/// Registers the `/api` routes.
///
/// Unsupported verbs on a registered resource answer 405 with an `Allow`
/// header instead of falling through to a 404.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(web::resource("/health").route(web::get().to(handlers::health)))
            .service(
                web::resource("/analyze")
                    .route(web::post().to(handlers::analyze))
                    .route(web::route().to(handlers::analyze_method_not_allowed)),
            )
            .service(
                web::resource("/config")
                    .route(web::get().to(handlers::map_config))
                    .route(web::route().to(handlers::config_method_not_allowed)),
            ),
    );
}

/// Starts the analysis gateway.
///
/// This is a regular async function — the caller provides the runtime
/// (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
///
/// # Panics
///
/// Panics at startup if no LLM credential is configured — the gateway
/// cannot serve a single analysis without one, so it fails fast instead of
/// failing per-request.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    log::info!("Configuring AI provider...");
    let provider = bizscope_ai::providers::create_provider_from_env()
        .expect("AI provider credentials are not configured");

    let naver_client_id = std::env::var("NAVER_CLIENT_ID").ok();
    if naver_client_id.is_none() {
        log::warn!("NAVER_CLIENT_ID is not set; the map config endpoint will return an error");
    }

    let state = web::Data::new(AppState {
        provider: Arc::from(provider),
        naver_client_id,
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure_api)
            // Serve frontend static files (production)
            .service(Files::new("/", "app/dist").index_file("index.html"))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
