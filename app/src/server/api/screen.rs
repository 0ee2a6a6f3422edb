//! Screen API: mount a screen, then one endpoint per user action, each
//! returning the new view.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::app::{ScreenError, SharedState};
use crate::screen::{ScreenEvent, ScreenView};

use super::err_json;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<Value>)>;

#[derive(Debug, Deserialize)]
pub struct InputBody {
    pub text: String,
}

fn screen_err(e: &ScreenError) -> (StatusCode, Json<Value>) {
    match e {
        ScreenError::NotFound(_) | ScreenError::NoImage => err_json(404, &e.to_string()),
        ScreenError::Render(_) => err_json(500, &e.to_string()),
    }
}

/// POST /api/screen
pub async fn mount_screen(State(state): State<SharedState>) -> Json<Value> {
    let (id, view) = state.mount().await;
    Json(json!({ "id": id, "view": view }))
}

/// GET /api/screen/:id
pub async fn get_screen(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<ScreenView> {
    state.view(&id).await.map(Json).map_err(|e| screen_err(&e))
}

/// POST /api/screen/:id/input
pub async fn update_input(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(body): Json<InputBody>,
) -> ApiResult<ScreenView> {
    state
        .dispatch(&id, [ScreenEvent::InputChanged(body.text)])
        .await
        .map(Json)
        .map_err(|e| screen_err(&e))
}

/// POST /api/screen/:id/generate
///
/// Carries the text the user sees so a late keystroke request cannot
/// change what gets validated.
pub async fn generate(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(body): Json<InputBody>,
) -> ApiResult<ScreenView> {
    state
        .dispatch(
            &id,
            [
                ScreenEvent::InputChanged(body.text),
                ScreenEvent::GeneratePressed,
            ],
        )
        .await
        .map(Json)
        .map_err(|e| screen_err(&e))
}

/// POST /api/screen/:id/alert/dismiss
pub async fn dismiss_alert(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<ScreenView> {
    state
        .dispatch(&id, [ScreenEvent::AlertDismissed])
        .await
        .map(Json)
        .map_err(|e| screen_err(&e))
}

/// GET /api/screen/:id/qr.png
pub async fn get_qr_png(State(state): State<SharedState>, Path(id): Path<String>) -> Response {
    match state.image_png(&id).await {
        Ok(png) => (
            [
                (header::CONTENT_TYPE, "image/png"),
                (header::CACHE_CONTROL, "no-store"),
            ],
            png,
        )
            .into_response(),
        Err(e) => screen_err(&e).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn test_state() -> SharedState {
        SharedState::new(AppConfig::default())
    }

    async fn mount(state: &SharedState) -> String {
        let Json(body) = mount_screen(State(state.clone())).await;
        assert_eq!(body["view"]["generate_enabled"], false);
        body["id"].as_str().expect("screen id").to_string()
    }

    fn text(t: &str) -> Json<InputBody> {
        Json(InputBody { text: t.into() })
    }

    async fn type_text(state: &SharedState, id: &str, t: &str) -> ScreenView {
        let Json(view) = update_input(State(state.clone()), Path(id.to_string()), text(t))
            .await
            .unwrap();
        view
    }

    async fn press_generate(state: &SharedState, id: &str, t: &str) -> ScreenView {
        let Json(view) = generate(State(state.clone()), Path(id.to_string()), text(t))
            .await
            .unwrap();
        view
    }

    #[tokio::test]
    async fn test_initial_screen() {
        let state = test_state();
        let id = mount(&state).await;
        let Json(view) = get_screen(State(state), Path(id)).await.unwrap();
        assert_eq!(view.input, "");
        assert!(!view.generate_enabled);
        assert!(view.alert.is_none());
        assert!(view.image.is_none());
    }

    #[tokio::test]
    async fn test_generate_valid_link_then_fetch_png() {
        let state = test_state();
        let id = mount(&state).await;
        let view = type_text(&state, &id, "https://example.com").await;
        assert!(view.generate_enabled);

        let view = press_generate(&state, &id, "https://example.com").await;
        let image = view.image.expect("image after generate");
        assert_eq!((image.width, image.height), (200, 200));

        let resp = get_qr_png(State(state), Path(id)).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "image/png");
    }

    #[tokio::test]
    async fn test_generate_uses_text_from_request() {
        let state = test_state();
        let id = mount(&state).await;
        // A stale keystroke lands after the newer one
        type_text(&state, &id, "https://example.com").await;
        type_text(&state, &id, "https://example.co").await;

        let view = press_generate(&state, &id, "https://example.com").await;
        assert_eq!(view.input, "https://example.com");
        let expected = crate::screen::ScreenController::from_config(&AppConfig::default())
            .encode("https://example.com")
            .expect("encodes");
        assert_eq!(state.image_png(&id).await.unwrap(), expected.to_png().unwrap());
    }

    #[tokio::test]
    async fn test_invalid_link_alert_and_dismiss() {
        let state = test_state();
        let id = mount(&state).await;

        let view = press_generate(&state, &id, "not a url").await;
        let alert = view.alert.expect("alert after invalid generate");
        assert_eq!(alert.message, "Please enter a valid link");
        assert!(view.image.is_none());

        let Json(view) = dismiss_alert(State(state.clone()), Path(id)).await.unwrap();
        assert!(view.alert.is_none());
        assert_eq!(view.input, "not a url");
    }

    #[tokio::test]
    async fn test_two_pages_do_not_share_a_screen() {
        let state = test_state();
        let a = mount(&state).await;
        press_generate(&state, &a, "https://example.com").await;

        let b = mount(&state).await;
        type_text(&state, &b, "not a url").await;

        let Json(a_view) = get_screen(State(state.clone()), Path(a)).await.unwrap();
        assert_eq!(a_view.input, "https://example.com");
        assert!(a_view.alert.is_none());
        assert!(a_view.image.is_some());
    }

    #[tokio::test]
    async fn test_png_missing_before_generate() {
        let state = test_state();
        let id = mount(&state).await;
        let resp = get_qr_png(State(state), Path(id)).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_screen_is_404() {
        let err = get_screen(State(test_state()), Path("nope".into()))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::NOT_FOUND);
        assert_eq!(err.1.0["error"], "Unknown screen: nope");
    }
}
