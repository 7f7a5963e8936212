//! Viewport bounds, draw commands, and the surface they are drawn onto.

use crate::color::Srgb;
use crate::error::FieldError;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Viewport size in device-independent pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// `width * height`, never negative.
    pub fn area(&self) -> f64 {
        (self.width * self.height).max(0.0)
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width * 0.5, self.height * 0.5)
    }

    pub fn contains(&self, p: DVec2) -> bool {
        (0.0..self.width).contains(&p.x) && (0.0..self.height).contains(&p.y)
    }

    /// Rejects negative or non-finite sizes. Zero is valid (an empty field).
    pub fn validate(&self) -> Result<(), FieldError> {
        let ok = |v: f64| v.is_finite() && v >= 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(FieldError::InvalidDimensions)
        }
    }
}

/// One translucent filled circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub center: DVec2,
    pub radius: f64,
    pub color: Srgb,
    pub alpha: f64,
}

/// Anything that can present one frame of draw commands.
///
/// `draw` clears the surface to its background, then fills every circle in
/// order. Returning [`FieldError::SurfaceLost`] tells the animation loop the
/// host went away; the loop stops instead of retrying.
pub trait RenderSurface {
    fn draw(&mut self, bounds: Bounds, commands: &[DrawCommand]) -> Result<(), FieldError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_of_zero_sized_viewport_is_zero() {
        assert_eq!(Bounds::new(0.0, 600.0).area(), 0.0);
        assert_eq!(Bounds::new(800.0, 600.0).area(), 480_000.0);
    }

    #[test]
    fn validate_accepts_zero_and_rejects_negative_or_nan() {
        assert!(Bounds::new(0.0, 0.0).validate().is_ok());
        assert!(Bounds::new(-1.0, 10.0).validate().is_err());
        assert!(Bounds::new(10.0, f64::NAN).validate().is_err());
        assert!(Bounds::new(f64::INFINITY, 10.0).validate().is_err());
    }

    #[test]
    fn contains_is_half_open() {
        let b = Bounds::new(10.0, 10.0);
        assert!(b.contains(DVec2::ZERO));
        assert!(!b.contains(DVec2::new(10.0, 5.0)));
        assert!(!b.contains(DVec2::new(5.0, -0.1)));
    }

    #[test]
    fn center_is_half_extent() {
        assert_eq!(Bounds::new(800.0, 600.0).center(), DVec2::new(400.0, 300.0));
    }
}
