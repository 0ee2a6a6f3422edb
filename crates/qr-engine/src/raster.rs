//! Module grid rasterization.
//!
//! Scales without interpolation: every output pixel takes the value of the
//! module it falls into, so edges stay crisp at any target size.

use image::{GrayImage, Luma};
use tracing::debug;

use crate::qr::ModuleGrid;
use crate::QrError;

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

/// Rasterize `grid` into a `size`×`size` grayscale image using
/// nearest-neighbor sampling.
pub fn rasterize_nearest(grid: &ModuleGrid, size: u32) -> Result<GrayImage, QrError> {
    if grid.is_empty() {
        return Err(QrError::EmptyGrid);
    }
    if size == 0 {
        return Err(QrError::ZeroSize);
    }

    let modules = grid.width() as u64;
    debug!(modules, size, "Rasterizing QR module grid");

    let module_at = |px: u32| (u64::from(px) * modules / u64::from(size)) as usize;

    Ok(GrayImage::from_fn(size, size, |x, y| {
        if grid.is_dark(module_at(x), module_at(y)) {
            DARK
        } else {
            LIGHT
        }
    }))
}
