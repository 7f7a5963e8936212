//! Software rendering of draw commands into an RGBA8 buffer.
//!
//! Always available (no feature gate) so tests and non-PNG hosts can
//! rasterize without pulling in the `image` crate.

use driftfield_core::error::FieldError;
use driftfield_core::{Bounds, DrawCommand, RenderSurface, Srgb};
use std::f64::consts::PI;

/// An opaque RGBA8 image that particles are composited onto.
#[derive(Debug, Clone)]
pub struct Raster {
    width: usize,
    height: usize,
    background: Srgb,
    data: Vec<u8>,
}

impl Raster {
    /// Creates a raster filled with `background`.
    ///
    /// Returns `InvalidDimensions` if either side is zero or the buffer size
    /// overflows.
    pub fn new(width: usize, height: usize, background: Srgb) -> Result<Self, FieldError> {
        if width == 0 || height == 0 {
            return Err(FieldError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or(FieldError::InvalidDimensions)?;
        let mut raster = Self {
            width,
            height,
            background,
            data: vec![0; len],
        };
        raster.clear();
        Ok(raster)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major RGBA8 bytes, `width * height * 4` long.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// RGBA at `(x, y)`; `None` outside the raster.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Fills every pixel with the background color.
    pub fn clear(&mut self) {
        let [r, g, b] = self.background.to_rgb8();
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&[r, g, b, 255]);
        }
    }

    /// Composites one translucent circle using source-over blending.
    ///
    /// Edges get a one-pixel linear falloff. Circles smaller than a pixel
    /// are faded by their area instead of vanishing. Non-finite commands and
    /// anything outside the raster are skipped.
    pub fn fill_circle(&mut self, cmd: &DrawCommand) {
        let DrawCommand {
            center,
            radius,
            color,
            alpha,
        } = *cmd;
        let visible = center.is_finite() && radius.is_finite() && radius > 0.0 && alpha > 0.0;
        if !visible {
            return;
        }
        let reach = radius + 0.5;
        let x0 = (center.x - reach).floor().max(0.0);
        let y0 = (center.y - reach).floor().max(0.0);
        let x1 = (center.x + reach).ceil().min(self.width as f64);
        let y1 = (center.y + reach).ceil().min(self.height as f64);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let sub_pixel = (PI * radius * radius).min(1.0);
        let opacity = alpha.min(1.0) * sub_pixel;
        let src = [color.r, color.g, color.b].map(|c| c.clamp(0.0, 1.0) * 255.0);

        for y in y0 as usize..y1 as usize {
            for x in x0 as usize..x1 as usize {
                let dx = x as f64 + 0.5 - center.x;
                let dy = y as f64 + 0.5 - center.y;
                let coverage = (reach - (dx * dx + dy * dy).sqrt()).clamp(0.0, 1.0);
                let a = opacity * coverage;
                if a <= 0.0 {
                    continue;
                }
                let i = (y * self.width + x) * 4;
                for (dst, s) in self.data[i..i + 3].iter_mut().zip(src) {
                    *dst = (s * a + *dst as f64 * (1.0 - a)).round() as u8;
                }
            }
        }
    }
}

impl RenderSurface for Raster {
    fn draw(&mut self, _bounds: Bounds, commands: &[DrawCommand]) -> Result<(), FieldError> {
        self.clear();
        for cmd in commands {
            self.fill_circle(cmd);
        }
        Ok(())
    }
}

/// Rasterizes one frame of commands onto a fresh `background`-filled buffer.
pub fn commands_to_rgba(
    width: usize,
    height: usize,
    background: Srgb,
    commands: &[DrawCommand],
) -> Result<Vec<u8>, FieldError> {
    let mut raster = Raster::new(width, height, background)?;
    raster.draw(Bounds::new(width as f64, height as f64), commands)?;
    Ok(raster.into_data())
}
