//! QR code rendering for the link generator screen.
//!
//! Encoding itself is delegated to a [`QrEncoder`]; this crate turns the
//! resulting module grid into a square grayscale bitmap with nearest-neighbor
//! scaling and can export it as PNG.

pub mod qr;
pub mod raster;
pub mod render;

// Re-exports for convenience
pub use qr::{ErrorCorrection, ModuleGrid, QrEncoder, QrcodeEncoder};
pub use raster::rasterize_nearest;
pub use render::{QrImage, QrRenderer};

/// Edge length, in pixels, of the image display region.
pub const DISPLAY_SIZE: u32 = 200;

/// Quiet-zone width, in modules, added around the symbol by default.
pub const DEFAULT_QUIET_ZONE: usize = 1;

#[derive(Debug, thiserror::Error)]
pub enum QrError {
    #[error("QR encode error: {0}")]
    Encode(#[from] qrcode::types::QrError),

    #[error("Encoder produced an empty module grid")]
    EmptyGrid,

    #[error("Target size must be non-zero")]
    ZeroSize,

    #[error("PNG export failed: {0}")]
    Png(#[from] image::ImageError),
}
