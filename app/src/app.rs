use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::AppConfig;
use crate::screen::{ScreenController, ScreenEvent, ScreenState, ScreenView};

#[derive(Debug, thiserror::Error)]
pub enum ScreenError {
    #[error("Unknown screen: {0}")]
    NotFound(String),

    #[error("No QR code generated")]
    NoImage,

    #[error("Render error: {0}")]
    Render(#[from] qr_engine::QrError),
}

/// Application shared state accessible from axum handlers.
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<SharedStateInner>,
}

struct SharedStateInner {
    /// Server port
    port: u16,
    /// Most screens kept alive at once
    max_screens: usize,
    /// Event handler shared by every screen
    controller: ScreenController,
    /// One screen per mounted page
    screens: Mutex<Screens>,
}

#[derive(Default)]
struct Screens {
    slots: HashMap<String, ScreenSlot>,
    tick: u64,
}

struct ScreenSlot {
    state: ScreenState,
    last_used: u64,
}

impl Screens {
    fn touch(&mut self, id: &str) -> Result<&mut ScreenState, ScreenError> {
        self.tick += 1;
        let tick = self.tick;
        let slot = self
            .slots
            .get_mut(id)
            .ok_or_else(|| ScreenError::NotFound(id.to_string()))?;
        slot.last_used = tick;
        Ok(&mut slot.state)
    }

    /// Drop least recently used screens until one more fits.
    fn make_room(&mut self, max: usize) {
        while self.slots.len() >= max.max(1) {
            let Some(oldest) = self
                .slots
                .iter()
                .min_by_key(|(_, slot)| slot.last_used)
                .map(|(id, _)| id.clone())
            else {
                break;
            };
            self.slots.remove(&oldest);
            tracing::debug!(id = %oldest, "Evicted idle screen");
        }
    }
}

impl SharedState {
    pub fn new(config: AppConfig) -> Self {
        let controller = ScreenController::from_config(&config);
        Self::with_controller(config, controller)
    }

    /// Create shared state around an explicit controller.
    pub fn with_controller(config: AppConfig, controller: ScreenController) -> Self {
        Self {
            inner: Arc::new(SharedStateInner {
                port: config.server_port,
                max_screens: config.max_screens,
                controller,
                screens: Mutex::new(Screens::default()),
            }),
        }
    }

    pub fn server_port(&self) -> u16 {
        self.inner.port
    }

    /// Mount a fresh screen and return its id and initial view.
    pub async fn mount(&self) -> (String, ScreenView) {
        let id = uuid::Uuid::new_v4().to_string();
        let state = ScreenState::default();
        let view = ScreenView::from(&state);

        let mut screens = self.inner.screens.lock().await;
        screens.make_room(self.inner.max_screens);
        screens.tick += 1;
        let last_used = screens.tick;
        screens
            .slots
            .insert(id.clone(), ScreenSlot { state, last_used });
        tracing::debug!(id = %id, count = screens.slots.len(), "Screen mounted");
        (id, view)
    }

    /// Apply `events` in order to screen `id` and return the resulting view.
    pub async fn dispatch<I>(&self, id: &str, events: I) -> Result<ScreenView, ScreenError>
    where
        I: IntoIterator<Item = ScreenEvent>,
    {
        let mut screens = self.inner.screens.lock().await;
        let screen = screens.touch(id)?;
        for event in events {
            let current = std::mem::take(&mut *screen);
            *screen = self.inner.controller.handle(current, event);
        }
        Ok(ScreenView::from(&*screen))
    }

    pub async fn view(&self, id: &str) -> Result<ScreenView, ScreenError> {
        let mut screens = self.inner.screens.lock().await;
        Ok(ScreenView::from(&*screens.touch(id)?))
    }

    /// PNG bytes of the image screen `id` displays.
    pub async fn image_png(&self, id: &str) -> Result<Vec<u8>, ScreenError> {
        let mut screens = self.inner.screens.lock().await;
        let img = screens.touch(id)?.image().ok_or(ScreenError::NoImage)?;
        Ok(img.to_png()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_capacity(max_screens: usize) -> SharedState {
        SharedState::new(AppConfig {
            max_screens,
            ..Default::default()
        })
    }

    fn type_and_generate(text: &str) -> [ScreenEvent; 2] {
        [
            ScreenEvent::InputChanged(text.into()),
            ScreenEvent::GeneratePressed,
        ]
    }

    #[tokio::test]
    async fn test_screens_are_independent() {
        let state = state_with_capacity(8);
        let (a, _) = state.mount().await;
        let a_view = state
            .dispatch(&a, type_and_generate("https://example.com"))
            .await
            .unwrap();
        assert!(a_view.image.is_some());

        let (b, b_view) = state.mount().await;
        assert_ne!(a, b);
        assert!(b_view.image.is_none());
        let b_view = state.dispatch(&b, type_and_generate("not a url")).await.unwrap();
        assert!(b_view.alert.is_some());

        let a_after = state
            .dispatch(&a, [ScreenEvent::GeneratePressed])
            .await
            .unwrap();
        assert_eq!(a_after.input, "https://example.com");
        assert!(a_after.alert.is_none());
        assert_eq!(a_after.image.map(|i| i.revision), Some(2));
    }

    #[tokio::test]
    async fn test_unknown_screen_is_not_found() {
        let state = state_with_capacity(8);
        assert!(matches!(
            state.view("missing").await,
            Err(ScreenError::NotFound(id)) if id == "missing"
        ));
    }

    #[tokio::test]
    async fn test_least_recently_used_screen_evicted() {
        let state = state_with_capacity(2);
        let (first, _) = state.mount().await;
        let (second, _) = state.mount().await;
        // Keep `first` fresh so `second` is the eviction candidate
        state.view(&first).await.unwrap();

        let (third, _) = state.mount().await;
        assert!(state.view(&first).await.is_ok());
        assert!(state.view(&third).await.is_ok());
        assert!(matches!(
            state.view(&second).await,
            Err(ScreenError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_png_requires_image() {
        let state = state_with_capacity(8);
        let (id, _) = state.mount().await;
        assert!(matches!(
            state.image_png(&id).await,
            Err(ScreenError::NoImage)
        ));
        state
            .dispatch(&id, type_and_generate("https://example.com"))
            .await
            .unwrap();
        let png = state.image_png(&id).await.unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }
}
