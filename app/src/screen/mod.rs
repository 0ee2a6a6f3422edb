//! The generator screen: local state, the events that change it, and the
//! view snapshot rendered from it.

pub mod controller;
pub mod view;


pub use controller::ScreenController;
pub use view::ScreenView;

use qr_engine::QrImage;

pub const TITLE: &str = "QR Code Generator";
pub const INPUT_PLACEHOLDER: &str = "Enter Your Link";
pub const GENERATE_LABEL: &str = "Generate QR Code";
pub const ALERT_TITLE: &str = "Invalid Link";
pub const ALERT_MESSAGE: &str = "Please enter a valid link";
pub const ALERT_DISMISS: &str = "OK";
pub const IMAGE_PLACEHOLDER: &str = "Enter a link and press the button";

/// Screen-local state. `Default` is the state at mount.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenState {
    input: String,
    show_alert: bool,
    image: Option<QrImage>,
    encode_failed: bool,
    revision: u64,
}

impl ScreenState {
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Whether the invalid-link alert is up.
    pub fn show_alert(&self) -> bool {
        self.show_alert
    }

    /// Last successfully generated image. Stays after the input changes.
    pub fn image(&self) -> Option<&QrImage> {
        self.image.as_ref()
    }

    /// The last generate on a valid link produced no image.
    pub fn encode_failed(&self) -> bool {
        self.encode_failed
    }

    /// Bumped every time a new image is stored.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The generate action is enabled iff there is input.
    pub fn generate_enabled(&self) -> bool {
        !self.input.is_empty()
    }
}

/// User actions the screen reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenEvent {
    InputChanged(String),
    GeneratePressed,
    AlertDismissed,
}
