//! Serializable snapshot of what the screen should display.

use serde::Serialize;

use super::{
    ALERT_DISMISS, ALERT_MESSAGE, ALERT_TITLE, GENERATE_LABEL, IMAGE_PLACEHOLDER,
    INPUT_PLACEHOLDER, ScreenState, TITLE,
};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ScreenView {
    pub title: &'static str,
    pub input: String,
    pub input_placeholder: &'static str,
    pub generate_label: &'static str,
    pub generate_enabled: bool,
    pub alert: Option<AlertView>,
    pub image: Option<ImageView>,
    pub image_placeholder: Option<&'static str>,
    pub encode_failed: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AlertView {
    pub title: &'static str,
    pub message: &'static str,
    pub dismiss: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ImageView {
    pub width: u32,
    pub height: u32,
    pub modules: usize,
    pub revision: u64,
}

impl From<&ScreenState> for ScreenView {
    fn from(state: &ScreenState) -> Self {
        let image = state.image().map(|img| ImageView {
            width: img.width(),
            height: img.height(),
            modules: img.modules().width(),
            revision: state.revision(),
        });
        Self {
            title: TITLE,
            input: state.input().to_string(),
            input_placeholder: INPUT_PLACEHOLDER,
            generate_label: GENERATE_LABEL,
            generate_enabled: state.generate_enabled(),
            alert: state.show_alert().then_some(AlertView {
                title: ALERT_TITLE,
                message: ALERT_MESSAGE,
                dismiss: ALERT_DISMISS,
            }),
            image_placeholder: image.is_none().then_some(IMAGE_PLACEHOLDER),
            image,
            encode_failed: state.encode_failed(),
        }
    }
}
