//! QR encoding capability and the module grid it produces.

use qrcode::{Color, EcLevel, QrCode};

use crate::QrError;

/// Error-correction level handed to the encoder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorCorrection {
    Low,
    #[default]
    Medium,
    Quartile,
    High,
}

impl ErrorCorrection {
    /// Parse the single-letter form (`L`, `M`, `Q`, `H`), case-insensitive.
    pub fn from_letter(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" => Some(Self::Low),
            "M" => Some(Self::Medium),
            "Q" => Some(Self::Quartile),
            "H" => Some(Self::High),
            _ => None,
        }
    }

    pub fn letter(self) -> &'static str {
        match self {
            Self::Low => "L",
            Self::Medium => "M",
            Self::Quartile => "Q",
            Self::High => "H",
        }
    }

    fn ec_level(self) -> EcLevel {
        match self {
            Self::Low => EcLevel::L,
            Self::Medium => EcLevel::M,
            Self::Quartile => EcLevel::Q,
            Self::High => EcLevel::H,
        }
    }
}

/// Square grid of QR modules, row-major, `true` = dark.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleGrid {
    width: usize,
    dark: Vec<bool>,
}

impl ModuleGrid {
    /// Build a grid from row-major module values.
    ///
    /// Returns `None` unless `dark.len() == width * width`.
    pub fn new(width: usize, dark: Vec<bool>) -> Option<Self> {
        (dark.len() == width * width).then_some(Self { width, dark })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0
    }

    /// Whether the module at column `x`, row `y` is dark.
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.dark[y * self.width + x]
    }

    /// Surround the grid with `modules` rows/columns of light modules.
    pub fn with_quiet_zone(&self, modules: usize) -> Self {
        if modules == 0 {
            return self.clone();
        }
        let width = self.width + modules * 2;
        let mut dark = vec![false; width * width];
        for y in 0..self.width {
            for x in 0..self.width {
                dark[(y + modules) * width + x + modules] = self.is_dark(x, y);
            }
        }
        Self { width, dark }
    }
}

/// External QR encoding capability: bytes in, module grid out.
pub trait QrEncoder: Send + Sync {
    fn encode(&self, data: &[u8]) -> Result<ModuleGrid, QrError>;
}

/// [`QrEncoder`] backed by the `qrcode` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrcodeEncoder {
    pub error_correction: ErrorCorrection,
}

impl QrcodeEncoder {
    pub fn new(error_correction: ErrorCorrection) -> Self {
        Self { error_correction }
    }
}

impl QrEncoder for QrcodeEncoder {
    fn encode(&self, data: &[u8]) -> Result<ModuleGrid, QrError> {
        let code = QrCode::with_error_correction_level(data, self.error_correction.ec_level())?;
        let dark = code
            .to_colors()
            .into_iter()
            .map(|c| c == Color::Dark)
            .collect();
        ModuleGrid::new(code.width(), dark).ok_or(QrError::EmptyGrid)
    }
}
