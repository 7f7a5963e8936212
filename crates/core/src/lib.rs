#![deny(unsafe_code)]
//! Core types and traits for driftfield, a cursor-reactive particle
//! background.
//!
//! Provides the `Simulation` trait, `Bounds`/`DrawCommand`/`RenderSurface`,
//! the cancellable `AnimationLoop` over a `FrameScheduler`, `Srgb` and indexed
//! `Palette` colors, the `Xorshift64` PRNG, reproducible `Scene`s, and
//! parameter helpers.

pub mod animation;
pub mod color;
pub mod draw;
pub mod error;
pub mod palette;
pub mod params;
pub mod prng;
pub mod scene;
pub mod simulation;

pub use animation::{AnimationLoop, FrameHandle, FrameScheduler};
pub use color::Srgb;
pub use draw::{Bounds, DrawCommand, RenderSurface};
pub use error::FieldError;
pub use glam::DVec2;
pub use palette::Palette;
pub use prng::Xorshift64;
pub use scene::Scene;
pub use simulation::Simulation;
