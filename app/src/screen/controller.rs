//! Input validation and event handling for the generator screen.

use std::sync::Arc;

use link_oracle::{LinkOracle, SchemeRegistry, is_valid_link};
use qr_engine::{QrImage, QrRenderer, QrcodeEncoder};
use tracing::{debug, warn};

use super::{ScreenEvent, ScreenState};
use crate::config::AppConfig;

/// Applies [`ScreenEvent`]s to a [`ScreenState`].
///
/// The link oracle and the renderer are injected so tests can swap in fakes.
#[derive(Clone)]
pub struct ScreenController {
    oracle: Arc<dyn LinkOracle>,
    renderer: QrRenderer,
}

impl std::fmt::Debug for ScreenController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScreenController")
            .field("renderer", &self.renderer)
            .finish_non_exhaustive()
    }
}

impl ScreenController {
    pub fn new(oracle: Arc<dyn LinkOracle>, renderer: QrRenderer) -> Self {
        Self { oracle, renderer }
    }

    /// Build the controller described by `config`.
    pub fn from_config(config: &AppConfig) -> Self {
        let oracle: Arc<SchemeRegistry> = Arc::new(config.openable_schemes.clone());
        let renderer = QrRenderer::new(Arc::new(QrcodeEncoder::new(config.error_correction)))
            .with_size(config.image_size)
            .with_quiet_zone(config.quiet_zone);
        Self::new(oracle, renderer)
    }

    /// Whether `text` is a link the host can open.
    pub fn validate(&self, text: &str) -> bool {
        is_valid_link(text, self.oracle.as_ref())
    }

    /// Render `text`; encoder failures are logged and yield `None`.
    pub fn encode(&self, text: &str) -> Option<QrImage> {
        match self.renderer.render(text) {
            Ok(img) => Some(img),
            Err(e) => {
                warn!(len = text.len(), "QR generation failed: {e}");
                None
            }
        }
    }

    /// Compute the state that follows `event`.
    pub fn handle(&self, mut state: ScreenState, event: ScreenEvent) -> ScreenState {
        match event {
            ScreenEvent::InputChanged(text) => {
                state.input = text;
            }
            ScreenEvent::GeneratePressed => {
                if !state.generate_enabled() {
                    debug!("Generate pressed with empty input, ignoring");
                    return state;
                }
                if self.validate(&state.input) {
                    match self.encode(&state.input) {
                        Some(img) => {
                            state.image = Some(img);
                            state.encode_failed = false;
                            state.revision += 1;
                            debug!(revision = state.revision, "QR image updated");
                        }
                        // Previous image stays on screen
                        None => state.encode_failed = true,
                    }
                } else {
                    debug!("Invalid link, showing alert");
                    state.show_alert = true;
                }
            }
            ScreenEvent::AlertDismissed => {
                state.show_alert = false;
            }
        }
        state
    }
}
