//! Text → displayable QR bitmap.

use std::io::Cursor;
use std::sync::Arc;

use image::{GrayImage, ImageFormat};
use tracing::debug;

use crate::qr::{ModuleGrid, QrEncoder, QrcodeEncoder};
use crate::raster::rasterize_nearest;
use crate::{DEFAULT_QUIET_ZONE, DISPLAY_SIZE, QrError};

/// A rendered QR code: the module grid it was drawn from and the bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrImage {
    modules: ModuleGrid,
    bitmap: GrayImage,
}

impl QrImage {
    /// Module grid including the quiet zone.
    pub fn modules(&self) -> &ModuleGrid {
        &self.modules
    }

    pub fn bitmap(&self) -> &GrayImage {
        &self.bitmap
    }

    pub fn width(&self) -> u32 {
        self.bitmap.width()
    }

    pub fn height(&self) -> u32 {
        self.bitmap.height()
    }

    /// Encode the bitmap as PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>, QrError> {
        let mut buf = Cursor::new(Vec::new());
        self.bitmap.write_to(&mut buf, ImageFormat::Png)?;
        Ok(buf.into_inner())
    }
}

/// Renders strings into fixed-size QR bitmaps through a [`QrEncoder`].
#[derive(Clone)]
pub struct QrRenderer {
    encoder: Arc<dyn QrEncoder>,
    size: u32,
    quiet_zone: usize,
}

impl std::fmt::Debug for QrRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QrRenderer")
            .field("size", &self.size)
            .field("quiet_zone", &self.quiet_zone)
            .finish_non_exhaustive()
    }
}

impl Default for QrRenderer {
    fn default() -> Self {
        Self::new(Arc::new(QrcodeEncoder::default()))
    }
}

impl QrRenderer {
    pub fn new(encoder: Arc<dyn QrEncoder>) -> Self {
        Self {
            encoder,
            size: DISPLAY_SIZE,
            quiet_zone: DEFAULT_QUIET_ZONE,
        }
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    pub fn with_quiet_zone(mut self, modules: usize) -> Self {
        self.quiet_zone = modules;
        self
    }

    /// Encode `text` (as UTF-8) and rasterize it at the configured size.
    pub fn render(&self, text: &str) -> Result<QrImage, QrError> {
        let modules = self
            .encoder
            .encode(text.as_bytes())?
            .with_quiet_zone(self.quiet_zone);
        let bitmap = rasterize_nearest(&modules, self.size)?;
        debug!(
            len = text.len(),
            modules = modules.width(),
            size = self.size,
            "Rendered QR code"
        );
        Ok(QrImage { modules, bitmap })
    }
}
