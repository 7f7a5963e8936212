//! Indexed color palettes.
//!
//! Each particle stores a color index chosen once at creation; the palette
//! resolves it when draw commands are built. Built-ins match the background
//! presets.

use crate::color::Srgb;
use crate::error::FieldError;
use serde::{Deserialize, Serialize};

/// All built-in palette names.
const PALETTE_NAMES: &[&str] = &["indigo", "violet", "ember", "mono"];

/// A non-empty, ordered list of colors addressed by index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Srgb>", into = "Vec<Srgb>")]
pub struct Palette {
    colors: Vec<Srgb>,
}

impl Palette {
    /// Creates a palette. Requires at least one color.
    pub fn new(colors: Vec<Srgb>) -> Result<Self, FieldError> {
        if colors.is_empty() {
            return Err(FieldError::InvalidPalette(
                "palette requires at least 1 color".to_string(),
            ));
        }
        Ok(Self { colors })
    }

    /// Parses `#rrggbb` strings into a palette.
    pub fn from_hex(hexes: &[&str]) -> Result<Self, FieldError> {
        let colors = hexes
            .iter()
            .map(|h| Srgb::from_hex(h))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    /// Number of colors.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false for a constructed palette.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at `index`, wrapping modulo the palette length.
    pub fn get(&self, index: usize) -> Srgb {
        self.colors[index % self.colors.len()]
    }

    pub fn colors(&self) -> &[Srgb] {
        &self.colors
    }

    /// Looks up a built-in palette by name.
    pub fn from_name(name: &str) -> Result<Self, FieldError> {
        match name {
            "indigo" => Ok(Self::indigo()),
            "violet" => Ok(Self::violet()),
            "ember" => Ok(Self::ember()),
            "mono" => Ok(Self::mono()),
            other => Err(FieldError::InvalidPalette(format!(
                "unknown palette '{other}', expected one of: {}",
                PALETTE_NAMES.join(", ")
            ))),
        }
    }

    /// Names accepted by [`Palette::from_name`].
    pub fn list_names() -> &'static [&'static str] {
        PALETTE_NAMES
    }

    // -- Built-in palettes --

    /// Indigo blues on a dark background.
    pub fn indigo() -> Self {
        Self::builtin(&["#4f46e5", "#818cf8", "#312e81", "#1e1b4b"])
    }

    /// Indigo with purple accents.
    pub fn violet() -> Self {
        Self::builtin(&["#6366f1", "#a855f7", "#4f46e5", "#312e81"])
    }

    /// Warm reds and oranges.
    pub fn ember() -> Self {
        Self::builtin(&["#f97316", "#fb923c", "#dc2626", "#7f1d1d"])
    }

    /// Grays.
    pub fn mono() -> Self {
        Self::builtin(&["#e5e5e5", "#a3a3a3", "#525252"])
    }

    fn builtin(hexes: &[&str]) -> Self {
        let colors = hexes
            .iter()
            .filter_map(|h| Srgb::from_hex(h).ok())
            .collect();
        Self { colors }
    }
}

impl TryFrom<Vec<Srgb>> for Palette {
    type Error = FieldError;

    fn try_from(colors: Vec<Srgb>) -> Result<Self, Self::Error> {
        Self::new(colors)
    }
}

impl From<Palette> for Vec<Srgb> {
    fn from(palette: Palette) -> Self {
        palette.colors
    }
}
