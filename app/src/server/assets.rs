//! Static file serving for the screen UI (web/).

use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use rust_embed::Embed;
use serde_json::json;

#[derive(Embed)]
#[folder = "web/"]
struct ScreenAssets;

/// Serve the screen for bare `/` requests.
pub async fn index() -> Response {
    serve_embedded::<ScreenAssets>("index.html")
}

/// Fallback handler: API paths get a JSON 404, everything else an asset.
pub async fn fallback(uri: Uri) -> Response {
    let request_path = uri.path();
    if is_api_path(request_path) {
        return (
            StatusCode::NOT_FOUND,
            axum::Json(json!({
                "error": "Not Found",
                "path": request_path,
            })),
        )
            .into_response();
    }

    serve_embedded::<ScreenAssets>(request_path.trim_start_matches('/'))
}

fn is_api_path(path: &str) -> bool {
    path == "/api" || path.starts_with("/api/")
}

fn serve_embedded<E: Embed>(path: &str) -> Response {
    match E::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.as_ref())],
                content.data.to_vec(),
            )
                .into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
