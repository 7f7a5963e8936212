#![deny(unsafe_code)]
//! CPU rasterization of driftfield draw commands.
//!
//! Hosts without a canvas (the CLI, tests) draw frames into a [`Raster`].
//! PNG output sits behind the default `png` feature so the pixel code can be
//! used without the `image` crate.

pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

pub use pixel::{commands_to_rgba, Raster};

use driftfield_core::error::FieldError;
use driftfield_core::{RenderSurface, Simulation, Srgb};

/// Rasterizes the current frame of `sim` at its own viewport size.
///
/// Fractional viewport sizes are rounded up so edge particles are kept.
pub fn snapshot_simulation(sim: &dyn Simulation, background: Srgb) -> Result<Raster, FieldError> {
    let bounds = sim.bounds();
    bounds.validate()?;
    let width = bounds.width.ceil() as usize;
    let height = bounds.height.ceil() as usize;
    let mut raster = Raster::new(width, height, background)?;
    raster.draw(bounds, &sim.render())?;
    Ok(raster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use driftfield_core::{Bounds, DVec2, DrawCommand};
    use proptest::prelude::*;
    use serde_json::{json, Value};

    struct Dots {
        bounds: Bounds,
        at: Vec<DVec2>,
    }

    impl Simulation for Dots {
        fn tick(&mut self, _cursor: DVec2) {}

        fn resize(&mut self, bounds: Bounds) {
            self.bounds = bounds;
        }

        fn bounds(&self) -> Bounds {
            self.bounds
        }

        fn render(&self) -> Vec<DrawCommand> {
            self.at
                .iter()
                .map(|&center| DrawCommand {
                    center,
                    radius: 2.0,
                    color: Srgb {
                        r: 1.0,
                        g: 0.0,
                        b: 0.0,
                    },
                    alpha: 1.0,
                })
                .collect()
        }

        fn params(&self) -> Value {
            json!({})
        }

        fn param_schema(&self) -> Value {
            json!({})
        }
    }

    #[test]
    fn snapshot_matches_viewport_and_draws_particles() {
        let sim = Dots {
            bounds: Bounds::new(20.5, 10.0),
            at: vec![DVec2::new(5.5, 5.5)],
        };
        let raster = snapshot_simulation(&sim, Srgb::BLACK).unwrap();
        assert_eq!((raster.width(), raster.height()), (21, 10));
        assert_eq!(raster.pixel(5, 5), Some([255, 0, 0, 255]));
    }

    #[test]
    fn snapshot_of_empty_viewport_is_an_error() {
        let sim = Dots {
            bounds: Bounds::new(0.0, 10.0),
            at: vec![],
        };
        assert!(matches!(
            snapshot_simulation(&sim, Srgb::BLACK),
            Err(FieldError::InvalidDimensions)
        ));
    }

    proptest! {
        #[test]
        fn arbitrary_commands_keep_pixels_opaque(
            x in -50.0f64..150.0,
            y in -50.0f64..150.0,
            radius in 0.0f64..40.0,
            alpha in 0.0f64..1.0,
        ) {
            let cmd = DrawCommand {
                center: DVec2::new(x, y),
                radius,
                color: Srgb { r: 0.3, g: 0.6, b: 0.9 },
                alpha,
            };
            let buf = commands_to_rgba(32, 24, Srgb::BLACK, &[cmd]).unwrap();
            prop_assert_eq!(buf.len(), 32 * 24 * 4);
            prop_assert!(buf.chunks_exact(4).all(|px| px[3] == 255));
        }
    }
}
