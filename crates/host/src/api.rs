//! HTTP routes for the preview host
//!
//! Mirrors what the controller firmware serves to the web UI.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use battbrrr_effects::footer::VERSION_PATH;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::embedded;

// Shared state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self { config: Arc::new(config) }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(serve_index))
        .route(VERSION_PATH, get(info_json))
        .route("/config.js", get(config_js))
        .route("/*path", get(serve_static))
        .with_state(state)
        .layer(cors)
}

/// Controller info document, never cached
async fn info_json(State(state): State<AppState>) -> impl IntoResponse {
    let device = &state.config.device;
    let body = serde_json::json!({
        "deviceName": device.name,
        "mode": device.mode,
        "ip": state.config.server.bind,
        "rssi": 0,
        "version": device.version,
    });
    ([(header::CACHE_CONTROL, "no-store")], Json(body))
}

/// `window.BATTBRRR_CONFIG` with the configured backdrop overrides
async fn config_js(State(state): State<AppState>) -> impl IntoResponse {
    let payload = serde_json::json!({ "effects": state.config.effects });
    let js = format!("window.BATTBRRR_CONFIG = {payload};");
    (
        [
            (header::CONTENT_TYPE, "application/javascript"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        js,
    )
}

async fn serve_index() -> Response {
    asset_response("index.html")
}

async fn serve_static(Path(path): Path<String>) -> Response {
    asset_response(&path)
}

fn asset_response(path: &str) -> Response {
    match embedded::get_asset(path) {
        Some((data, mime)) => {
            // wasm-bindgen glue must load as a module script
            let content_type = if std::path::Path::new(path)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("js"))
            {
                "application/javascript"
            } else {
                mime
            };
            ([(header::CONTENT_TYPE, content_type)], data).into_response()
        }
        None => {
            tracing::debug!(path, "asset not found");
            (StatusCode::NOT_FOUND, format!("{path} not found")).into_response()
        }
    }
}
