//! Error types for driftfield.

use thiserror::Error;

/// Errors produced by configuration, palette, scene, and host-surface operations.
///
/// The simulator's `initialize`/`tick`/`render` path never returns these;
/// they come from building inputs for it and from the hosts that drive it.
#[derive(Debug, Error)]
pub enum FieldError {
    /// Viewport width or height was negative or non-finite.
    #[error("invalid dimensions: width and height must be finite and non-negative")]
    InvalidDimensions,

    /// A configuration value was outside its recognized range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// No preset is registered under this name.
    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A palette could not be constructed from the given colors.
    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    /// The rendering surface went away while the loop was running.
    #[error("rendering surface lost: {0}")]
    SurfaceLost(String),

    /// The host refused to schedule another frame.
    #[error("frame scheduler failed: {0}")]
    Scheduler(String),

    /// File or image I/O failed.
    #[error("i/o error: {0}")]
    Io(String),
}
