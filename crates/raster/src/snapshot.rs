//! PNG output for rasterized frames.
//!
//! Gated behind the `png` feature; the buffer itself comes from
//! [`crate::pixel`].

use driftfield_core::error::FieldError;
use std::path::Path;

use crate::pixel::Raster;

/// Writes a raster as an RGBA PNG.
///
/// Returns `FieldError::InvalidDimensions` if a side overflows `u32`, or
/// `FieldError::Io` when encoding or writing fails.
pub fn write_png(raster: &Raster, path: &Path) -> Result<(), FieldError> {
    let w = u32::try_from(raster.width()).map_err(|_| FieldError::InvalidDimensions)?;
    let h = u32::try_from(raster.height()).map_err(|_| FieldError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, raster.data().to_vec())
        .ok_or_else(|| FieldError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| FieldError::Io(e.to_string()))
}
