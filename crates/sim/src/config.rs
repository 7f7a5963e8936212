//! Tuning parameters and named presets.
//!
//! The background variants this simulator replaces differ only in these
//! constants, so each one is a [`Preset`] rather than its own update loop.

use driftfield_core::error::FieldError;
use driftfield_core::params::{param_f64, param_usize};
use driftfield_core::Palette;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// All preset names.
const PRESET_NAMES: &[&str] = &["indigo", "violet"];

// Inclusive `(min, max)` per key, shared by `validate` and `schema`.
const INTERACTION_RADIUS: (f64, f64) = (1.0, 600.0);
const REPULSION_STRENGTH: (f64, f64) = (0.0, 10.0);
const SPRING_CONSTANT: (f64, f64) = (0.0, 1.0);
const DAMPING_FACTOR: (f64, f64) = (0.0, 0.999);
const DENSITY_CONSTANT: (f64, f64) = (1.0, 100_000.0);
const PARTICLE_RADIUS: (f64, f64) = (0.0, 20.0);
const ALPHA: (f64, f64) = (0.0, 1.0);
const MAX_PARTICLE_LIMIT: usize = 2000;
const PARTICLE_COUNT: (f64, f64) = (0.0, MAX_PARTICLE_LIMIT as f64);

/// Physics and appearance constants for a [`ParticleField`](crate::ParticleField).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Distance within which the cursor repels particles.
    pub interaction_radius: f64,
    /// Velocity added per tick at zero distance from the cursor.
    pub repulsion_strength: f64,
    /// Fraction of the offset from origin added back to velocity each tick.
    pub spring_constant: f64,
    /// Velocity multiplier per tick, at most 0.999.
    pub damping_factor: f64,
    /// Upper bound on the particle count.
    pub max_particle_count: usize,
    /// Viewport area per particle, in square pixels.
    pub density_constant: f64,
    /// Smallest particle radius (inclusive).
    pub radius_min: f64,
    /// Largest particle radius (exclusive).
    pub radius_max: f64,
    /// Opacity of every drawn particle.
    pub alpha: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Preset::Indigo.config()
    }
}

impl FieldConfig {
    /// Reads overrides from a JSON object on top of `base`.
    ///
    /// Missing or mistyped keys keep the `base` value. The result is not
    /// validated; call [`validate`](Self::validate).
    pub fn from_json(params: &Value, base: &FieldConfig) -> Self {
        Self {
            interaction_radius: param_f64(params, "interaction_radius", base.interaction_radius),
            repulsion_strength: param_f64(params, "repulsion_strength", base.repulsion_strength),
            spring_constant: param_f64(params, "spring_constant", base.spring_constant),
            damping_factor: param_f64(params, "damping_factor", base.damping_factor),
            max_particle_count: param_usize(params, "max_particle_count", base.max_particle_count),
            density_constant: param_f64(params, "density_constant", base.density_constant),
            radius_min: param_f64(params, "radius_min", base.radius_min),
            radius_max: param_f64(params, "radius_max", base.radius_max),
            alpha: param_f64(params, "alpha", base.alpha),
        }
    }

    /// Rejects non-finite values and anything outside the ranges
    /// [`schema`](Self::schema) advertises.
    ///
    /// Inside these ranges the spring/damping system is stable and the
    /// repulsion impulse is bounded, so positions stay finite for any cursor
    /// path, and the particle count stays small.
    pub fn validate(&self) -> Result<(), FieldError> {
        let checks = [
            ("interaction_radius", self.interaction_radius, INTERACTION_RADIUS),
            ("repulsion_strength", self.repulsion_strength, REPULSION_STRENGTH),
            ("spring_constant", self.spring_constant, SPRING_CONSTANT),
            ("damping_factor", self.damping_factor, DAMPING_FACTOR),
            ("max_particle_count", self.max_particle_count as f64, PARTICLE_COUNT),
            ("density_constant", self.density_constant, DENSITY_CONSTANT),
            ("radius_min", self.radius_min, PARTICLE_RADIUS),
            ("radius_max", self.radius_max, PARTICLE_RADIUS),
            ("alpha", self.alpha, ALPHA),
        ];
        for (name, value, (min, max)) in checks {
            if !value.is_finite() {
                return Err(invalid(format!("{name} must be finite, got {value}")));
            }
            if !(min..=max).contains(&value) {
                return Err(invalid(format!("{name} must be in [{min}, {max}], got {value}")));
            }
        }
        if self.radius_max < self.radius_min {
            return Err(invalid("radius_min must not exceed radius_max".into()));
        }
        Ok(())
    }

    /// Current values as a JSON object, keyed like [`from_json`](Self::from_json).
    pub fn to_json(&self) -> Value {
        json!({
            "interaction_radius": self.interaction_radius,
            "repulsion_strength": self.repulsion_strength,
            "spring_constant": self.spring_constant,
            "damping_factor": self.damping_factor,
            "max_particle_count": self.max_particle_count,
            "density_constant": self.density_constant,
            "radius_min": self.radius_min,
            "radius_max": self.radius_max,
            "alpha": self.alpha,
        })
    }

    /// Parameter schema with `self` as the defaults.
    pub fn schema(&self) -> Value {
        json!({
            "interaction_radius": {
                "type": "number",
                "default": self.interaction_radius,
                "min": INTERACTION_RADIUS.0,
                "max": INTERACTION_RADIUS.1,
                "description": "Distance within which the cursor repels particles"
            },
            "repulsion_strength": {
                "type": "number",
                "default": self.repulsion_strength,
                "min": REPULSION_STRENGTH.0,
                "max": REPULSION_STRENGTH.1,
                "description": "Velocity added per tick at zero distance from the cursor"
            },
            "spring_constant": {
                "type": "number",
                "default": self.spring_constant,
                "min": SPRING_CONSTANT.0,
                "max": SPRING_CONSTANT.1,
                "description": "Pull back toward the origin per unit of displacement"
            },
            "damping_factor": {
                "type": "number",
                "default": self.damping_factor,
                "min": DAMPING_FACTOR.0,
                "max": DAMPING_FACTOR.1,
                "description": "Velocity multiplier applied every tick"
            },
            "max_particle_count": {
                "type": "integer",
                "default": self.max_particle_count,
                "min": 0,
                "max": MAX_PARTICLE_LIMIT,
                "description": "Upper bound on the number of particles"
            },
            "density_constant": {
                "type": "number",
                "default": self.density_constant,
                "min": DENSITY_CONSTANT.0,
                "max": DENSITY_CONSTANT.1,
                "description": "Viewport area (px^2) per particle"
            },
            "radius_min": {
                "type": "number",
                "default": self.radius_min,
                "min": PARTICLE_RADIUS.0,
                "max": PARTICLE_RADIUS.1,
                "description": "Smallest particle radius"
            },
            "radius_max": {
                "type": "number",
                "default": self.radius_max,
                "min": PARTICLE_RADIUS.0,
                "max": PARTICLE_RADIUS.1,
                "description": "Largest particle radius"
            },
            "alpha": {
                "type": "number",
                "default": self.alpha,
                "min": ALPHA.0,
                "max": ALPHA.1,
                "description": "Opacity of every particle"
            },
            "palette": {
                "type": "string",
                "default": "",
                "options": Palette::list_names(),
                "description": "Built-in palette name; empty keeps the preset palette"
            }
        })
    }
}

fn invalid(msg: String) -> FieldError {
    FieldError::InvalidConfig(msg)
}

/// Named configuration + palette pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Dense indigo dots that snap back quickly.
    Indigo,
    /// Sparser, softer violet dots with a wider, gentler push.
    Violet,
}

impl Preset {
    /// Looks up a preset by name.
    pub fn from_name(name: &str) -> Result<Self, FieldError> {
        match name {
            "indigo" => Ok(Preset::Indigo),
            "violet" => Ok(Preset::Violet),
            other => Err(FieldError::UnknownPreset(other.to_string())),
        }
    }

    /// Names accepted by [`Preset::from_name`].
    pub fn list_names() -> &'static [&'static str] {
        PRESET_NAMES
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::Indigo => "indigo",
            Preset::Violet => "violet",
        }
    }

    pub fn config(self) -> FieldConfig {
        match self {
            Preset::Indigo => FieldConfig {
                interaction_radius: 150.0,
                repulsion_strength: 2.0,
                spring_constant: 0.03,
                damping_factor: 0.9,
                max_particle_count: 150,
                density_constant: 4000.0,
                radius_min: 0.5,
                radius_max: 2.5,
                alpha: 0.5,
            },
            Preset::Violet => FieldConfig {
                interaction_radius: 180.0,
                repulsion_strength: 1.8,
                spring_constant: 0.015,
                damping_factor: 0.94,
                max_particle_count: 100,
                density_constant: 4800.0,
                radius_min: 0.2,
                radius_max: 2.2,
                alpha: 0.3,
            },
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Preset::Indigo => Palette::indigo(),
            Preset::Violet => Palette::violet(),
        }
    }
}
