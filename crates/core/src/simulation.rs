//! The `Simulation` trait driven by [`AnimationLoop`](crate::animation::AnimationLoop).
//!
//! The trait is object-safe so hosts can hold a `Box<dyn Simulation>` and
//! switch presets at runtime.

use crate::draw::{Bounds, DrawCommand};
use glam::DVec2;
use serde_json::Value;

/// A frame-stepped simulation that projects its state into draw commands.
///
/// Viewport size and pointer position are explicit inputs: implementations
/// never read ambient window or input state.
pub trait Simulation {
    /// Advance by one frame with the latest cursor position.
    fn tick(&mut self, cursor: DVec2);

    /// Rebuild for a new viewport size.
    fn resize(&mut self, bounds: Bounds);

    /// Current viewport size.
    fn bounds(&self) -> Bounds;

    /// Draw commands for the current state. Must not mutate.
    fn render(&self) -> Vec<DrawCommand>;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Types, ranges, and defaults of every parameter.
    fn param_schema(&self) -> Value;
}
