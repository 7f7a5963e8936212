//! Reproducible description of one rendered frame.
//!
//! A [`Scene`] captures preset name, viewport size, parameter overrides,
//! PRNG seed, tick count, and the cursor held during those ticks. Replaying
//! a scene with the same binary yields bit-identical particle state.

use crate::draw::Bounds;
use crate::error::FieldError;
use glam::DVec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scene {
    pub preset: String,
    pub width: f64,
    pub height: f64,
    #[serde(default = "empty_params")]
    pub params: serde_json::Value,
    pub seed: u64,
    #[serde(default)]
    pub ticks: usize,
    pub cursor: [f64; 2],
}

fn empty_params() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl Scene {
    /// Creates a scene with no overrides, zero ticks, and the cursor at the
    /// viewport center.
    pub fn new(preset: &str, width: f64, height: f64, seed: u64) -> Self {
        Self {
            preset: preset.to_string(),
            width,
            height,
            params: empty_params(),
            seed,
            ticks: 0,
            cursor: [width * 0.5, height * 0.5],
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.width, self.height)
    }

    pub fn cursor(&self) -> DVec2 {
        DVec2::from_array(self.cursor)
    }

    /// Checks the viewport and cursor are finite, and the viewport non-negative.
    pub fn validate(&self) -> Result<(), FieldError> {
        self.bounds().validate()?;
        if !self.cursor().is_finite() {
            return Err(FieldError::InvalidDimensions);
        }
        Ok(())
    }
}
