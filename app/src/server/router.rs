use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::app::SharedState;
use super::{api, assets};

/// Create the axum router with all routes.
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        // --- Core ---
        .route("/status", get(status_handler))
        // --- Screen ---
        .route("/api/screen", post(api::screen::mount_screen))
        .route("/api/screen/{id}", get(api::screen::get_screen))
        .route("/api/screen/{id}/input", post(api::screen::update_input))
        .route("/api/screen/{id}/generate", post(api::screen::generate))
        .route("/api/screen/{id}/alert/dismiss", post(api::screen::dismiss_alert))
        .route("/api/screen/{id}/qr.png", get(api::screen::get_qr_png))
        // --- Screen UI at / ---
        .route("/", get(assets::index))
        .fallback(assets::fallback)
        // --- Middleware ---
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn status_handler() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
