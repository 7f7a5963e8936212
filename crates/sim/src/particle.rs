//! A single anchored particle and its per-tick update rule.

use crate::config::FieldConfig;
use glam::DVec2;

/// Direction used when the cursor sits exactly on a particle.
const TIE_BREAK_DIRECTION: DVec2 = DVec2::X;

/// A point anchored to a fixed origin.
///
/// Only `position` and `velocity` change after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    position: DVec2,
    origin: DVec2,
    velocity: DVec2,
    radius: f64,
    color_index: usize,
}

impl Particle {
    /// A particle at rest on its origin.
    pub fn at_rest(origin: DVec2, radius: f64, color_index: usize) -> Self {
        Self {
            position: origin,
            origin,
            velocity: DVec2::ZERO,
            radius,
            color_index,
        }
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn origin(&self) -> DVec2 {
        self.origin
    }

    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn color_index(&self) -> usize {
        self.color_index
    }

    /// Distance from the rest position.
    pub fn displacement(&self) -> f64 {
        self.position.distance(self.origin)
    }

    /// One frame: cursor repulsion, spring back to origin, damping, then
    /// explicit Euler integration.
    pub fn advance(&mut self, cursor: DVec2, config: &FieldConfig) {
        let away = self.position - cursor;
        let dist = away.length();
        if dist < config.interaction_radius {
            let dir = if dist > 0.0 {
                away / dist
            } else {
                TIE_BREAK_DIRECTION
            };
            let force = (config.interaction_radius - dist) / config.interaction_radius;
            self.velocity += dir * force * config.repulsion_strength;
        }

        self.velocity += (self.origin - self.position) * config.spring_constant;
        self.velocity *= config.damping_factor;
        self.position += self.velocity;
    }
}
