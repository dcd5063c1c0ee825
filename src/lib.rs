// Public API for integration tests and potential library usage

pub mod config;
pub mod error;
pub mod protocol;
pub mod state;
pub mod types;
pub mod veto;
pub mod ws;

use axum::{routing::get, Router};
use std::path::Path;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use state::AppState;

async fn healthz() -> &'static str {
    "ok"
}

/// Build the HTTP router: WebSocket endpoint, health check and the
/// front-end served from `static_dir`
pub fn app(state: Arc<AppState>, static_dir: &Path) -> Router {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .route("/healthz", get(healthz))
        .fallback_service(ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
