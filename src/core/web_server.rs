//! Public HTTP server for the scrape API.
//!
//! Runs on PORT (default 3000). All responses, success and error alike,
//! carry a permissive CORS header so browser clients on any origin can
//! call the API directly.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde_json::json;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::time::Instant;
use tower_http::cors::{Any, CorsLayer};

use crate::core::config::AppConfig;
use crate::scrape;

/// Shared state for the web server.
///
/// Config and the HTTP client are built once at startup and read-only from
/// then on, so the handlers stay stateless under parallel invocation.
#[derive(Clone)]
pub struct WebState {
    pub config: Arc<AppConfig>,
    pub client: reqwest::Client,
    start_time: Instant,
}

impl WebState {
    pub fn new(config: Arc<AppConfig>) -> reqwest::Result<Self> {
        Ok(Self {
            config,
            client: scrape::build_client()?,
            start_time: Instant::now(),
        })
    }
}

/// Build the router. Separate from [`start_web_server`] so tests can drive
/// it without binding a socket.
pub fn build_router(state: WebState) -> Router {
    let cors = CorsLayer::new().allow_origin(Any);

    Router::new()
        .route("/api/videos", get(videos_handler))
        .route("/health", get(health_handler))
        .route("/", get(root_handler))
        .layer(cors)
        .with_state(state)
}

/// Start the public web server.
pub async fn start_web_server(config: Arc<AppConfig>) -> Result<(), Box<dyn std::error::Error>> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = build_router(WebState::new(config)?);

    log::info!("Starting web server on http://{}", addr);
    log::info!("  /api/videos?user=<name> - Profile scrape (JSON)");
    log::info!("  /health                 - Health check");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// GET /api/videos?user=<name> — scrape a profile and return its videos.
/// The `u` query key is accepted as an alias.
async fn videos_handler(
    State(state): State<WebState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let user = params
        .get("user")
        .or_else(|| params.get("u"))
        .map(String::as_str)
        .unwrap_or("");

    match scrape::scrape_profile(&state.client, &state.config, user).await {
        Ok(page) => {
            log::info!("Scraped @{}: {} item(s)", page.user, page.count);
            (StatusCode::OK, Json(page)).into_response()
        }
        Err(err) => {
            log::warn!("Scrape failed for {:?}: {}", user, err);
            let status =
                StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(err.body())).into_response()
        }
    }
}

/// GET /health — simple health check with uptime.
async fn health_handler(State(state): State<WebState>) -> impl IntoResponse {
    let uptime_secs = state.start_time.elapsed().as_secs();

    let health_status = json!({
        "status": "healthy",
        "uptime_seconds": uptime_secs,
        "service": "tokpeek",
        "version": env!("CARGO_PKG_VERSION"),
    });

    (StatusCode::OK, Json(health_status))
}

/// Handler for root endpoint
///
/// Provides basic information about available endpoints
async fn root_handler() -> impl IntoResponse {
    let info = r#"{
  "service": "tokpeek",
  "endpoints": {
    "/api/videos?user=<name>": "Scrape a profile's videos (JSON)",
    "/health": "Health check (JSON)",
    "/": "This information page"
  }
}"#;

    (StatusCode::OK, [("Content-Type", "application/json")], info)
}
