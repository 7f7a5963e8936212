#![deny(unsafe_code)]
//! Cursor-reactive particle field.
//!
//! Particles are scattered uniformly over the viewport and anchored to where
//! they spawned. Every tick the cursor pushes nearby particles away, a spring
//! pulls each one back toward its origin, and damping bleeds off velocity so
//! the field settles once the cursor leaves. Particles never interact with
//! each other, so a tick is a single O(N) pass.
//!
//! The particle count follows viewport area:
//! `N = min(floor(width * height / density_constant), max_particle_count)`.

pub mod config;
pub mod particle;

pub use config::{FieldConfig, Preset};
pub use particle::Particle;

use driftfield_core::error::FieldError;
use driftfield_core::params::param_string;
use driftfield_core::prng::Xorshift64;
use driftfield_core::{Bounds, DrawCommand, Palette, Simulation};
use glam::DVec2;
use serde_json::{json, Value};
use tracing::debug;

/// Number of particles a viewport of this size gets under `config`.
///
/// Zero or negative area gives zero.
pub fn particle_count_for(config: &FieldConfig, bounds: Bounds) -> usize {
    let area = bounds.area();
    if area <= 0.0 {
        return 0;
    }
    let by_density = (area / config.density_constant).floor();
    if by_density >= config.max_particle_count as f64 {
        config.max_particle_count
    } else {
        by_density as usize
    }
}

/// The simulator state: particles, viewport, tuning, palette, and the PRNG
/// that places particles on (re)seeding.
pub struct ParticleField {
    particles: Vec<Particle>,
    bounds: Bounds,
    config: FieldConfig,
    palette: Palette,
    rng: Xorshift64,
}

impl ParticleField {
    /// Seeds a new field for `bounds`.
    ///
    /// Each particle gets a uniform position in `[0, width) x [0, height)`
    /// which is also its origin, zero velocity, a uniform radius in
    /// `[radius_min, radius_max)`, and a uniform palette index. The same
    /// inputs always produce the same field.
    pub fn initialize(bounds: Bounds, config: FieldConfig, palette: Palette, seed: u64) -> Self {
        let mut field = Self {
            particles: Vec::new(),
            bounds,
            config,
            palette,
            rng: Xorshift64::new(seed),
        };
        field.reseed(bounds);
        field
    }

    /// Builds a field from a preset plus JSON overrides.
    ///
    /// `params` may override any [`FieldConfig`] key and may name a built-in
    /// `"palette"`. Returns `InvalidDimensions` for negative or non-finite
    /// bounds and `InvalidConfig` for out-of-range overrides.
    pub fn from_json(
        bounds: Bounds,
        seed: u64,
        preset: Preset,
        params: &Value,
    ) -> Result<Self, FieldError> {
        bounds.validate()?;
        let config = FieldConfig::from_json(params, &preset.config());
        config.validate()?;
        let palette = match param_string(params, "palette", "").as_str() {
            "" => preset.palette(),
            name => Palette::from_name(name)?,
        };
        Ok(Self::initialize(bounds, config, palette, seed))
    }

    /// Discards every particle and seeds a fresh set for `bounds`.
    ///
    /// The count depends only on `bounds`. Positions continue the PRNG
    /// stream, so the new layout is unrelated to the old one.
    pub fn resize(&mut self, bounds: Bounds) {
        self.reseed(bounds);
    }

    /// Advances every particle by one frame against `cursor`.
    ///
    /// Deterministic: identical state and cursor give identical results.
    pub fn tick(&mut self, cursor: DVec2) {
        let config = self.config;
        for p in &mut self.particles {
            p.advance(cursor, &config);
        }
    }

    /// One filled circle per particle, in particle order.
    pub fn render(&self) -> Vec<DrawCommand> {
        self.particles
            .iter()
            .map(|p| DrawCommand {
                center: p.position(),
                radius: p.radius(),
                color: self.palette.get(p.color_index()),
                alpha: self.config.alpha,
            })
            .collect()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Sum of `|v|^2 / 2` over all particles (unit mass).
    pub fn kinetic_energy(&self) -> f64 {
        self.particles
            .iter()
            .map(|p| 0.5 * p.velocity().length_squared())
            .sum()
    }

    /// Largest distance of any particle from its origin.
    pub fn max_displacement(&self) -> f64 {
        self.particles
            .iter()
            .map(Particle::displacement)
            .fold(0.0, f64::max)
    }

    fn reseed(&mut self, bounds: Bounds) {
        let count = particle_count_for(&self.config, bounds);
        let palette_len = self.palette.len();
        let (r_min, r_max) = (self.config.radius_min, self.config.radius_max);
        let rng = &mut self.rng;
        self.particles = (0..count)
            .map(|_| {
                let x = rng.next_range(0.0, bounds.width);
                let y = rng.next_range(0.0, bounds.height);
                let radius = rng.next_range(r_min, r_max);
                let color_index = rng.next_index(palette_len);
                Particle::at_rest(DVec2::new(x, y), radius, color_index)
            })
            .collect();
        self.bounds = bounds;
        debug!(
            width = bounds.width,
            height = bounds.height,
            particles = count,
            "particle field seeded"
        );
    }
}

impl Simulation for ParticleField {
    fn tick(&mut self, cursor: DVec2) {
        ParticleField::tick(self, cursor);
    }

    fn resize(&mut self, bounds: Bounds) {
        ParticleField::resize(self, bounds);
    }

    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn render(&self) -> Vec<DrawCommand> {
        ParticleField::render(self)
    }

    fn params(&self) -> Value {
        let mut params = self.config.to_json();
        params["palette"] = json!(self.palette);
        params
    }

    fn param_schema(&self) -> Value {
        self.config.schema()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAR: DVec2 = DVec2::new(-10_000.0, -10_000.0);

    fn violet(width: f64, height: f64, seed: u64) -> ParticleField {
        ParticleField::initialize(
            Bounds::new(width, height),
            Preset::Violet.config(),
            Preset::Violet.palette(),
            seed,
        )
    }

    fn indigo(width: f64, height: f64, seed: u64) -> ParticleField {
        ParticleField::initialize(
            Bounds::new(width, height),
            Preset::Indigo.config(),
            Preset::Indigo.palette(),
            seed,
        )
    }

    fn bits(field: &ParticleField) -> Vec<u64> {
        field
            .particles()
            .iter()
            .flat_map(|p| {
                let (pos, vel) = (p.position(), p.velocity());
                [pos.x, pos.y, vel.x, vel.y, p.radius()]
            })
            .map(f64::to_bits)
            .collect()
    }

    // ---- Count ----

    #[test]
    fn count_follows_area_over_density() {
        let cfg = Preset::Violet.config();
        assert_eq!(particle_count_for(&cfg, Bounds::new(800.0, 600.0)), 100);
        assert_eq!(particle_count_for(&cfg, Bounds::new(400.0, 300.0)), 25);
        assert_eq!(particle_count_for(&cfg, Bounds::new(10.0, 10.0)), 0);
    }

    #[test]
    fn count_is_capped_at_max() {
        let cfg = Preset::Indigo.config();
        assert_eq!(particle_count_for(&cfg, Bounds::new(3840.0, 2160.0)), 150);
        assert_eq!(particle_count_for(&cfg, Bounds::new(1e300, 1e300)), 150);
    }

    #[test]
    fn zero_area_gives_empty_valid_field() {
        let mut field = violet(0.0, 600.0, 1);
        assert!(field.is_empty());
        field.tick(DVec2::ZERO);
        assert!(field.render().is_empty());
        assert_eq!(field.kinetic_energy(), 0.0);
    }

    // ---- Initialization ----

    #[test]
    fn initialize_places_particles_at_rest_inside_viewport() {
        let field = indigo(800.0, 600.0, 42);
        assert_eq!(field.len(), 120);
        let cfg = field.config();
        for p in field.particles() {
            assert!(field.bounds().contains(p.origin()), "{:?}", p.origin());
            assert_eq!(p.position(), p.origin());
            assert_eq!(p.velocity(), DVec2::ZERO);
            assert!(p.radius() >= cfg.radius_min && p.radius() < cfg.radius_max);
            assert!(p.color_index() < field.palette().len());
        }
    }

    #[test]
    fn render_before_any_tick_matches_origins_exactly() {
        let field = violet(800.0, 600.0, 7);
        let commands = field.render();
        assert_eq!(commands.len(), field.len());
        for (cmd, p) in commands.iter().zip(field.particles()) {
            assert_eq!(cmd.center, p.origin());
            assert_eq!(cmd.radius, p.radius());
            assert_eq!(cmd.color, field.palette().get(p.color_index()));
            assert_eq!(cmd.alpha, 0.3);
        }
    }

    #[test]
    fn same_seed_same_layout_different_seed_different_layout() {
        assert_eq!(bits(&indigo(800.0, 600.0, 5)), bits(&indigo(800.0, 600.0, 5)));
        assert_ne!(bits(&indigo(800.0, 600.0, 5)), bits(&indigo(800.0, 600.0, 6)));
    }

    #[test]
    fn colors_use_more_than_one_palette_entry() {
        let field = indigo(800.0, 600.0, 42);
        let first = field.particles()[0].color_index();
        assert!(field.particles().iter().any(|p| p.color_index() != first));
    }

    // ---- Resize ----

    #[test]
    fn resize_count_depends_only_on_new_bounds() {
        let mut big_first = violet(800.0, 600.0, 3);
        let mut small_first = violet(100.0, 100.0, 3);
        assert_eq!(small_first.len(), 2);
        let target = Bounds::new(400.0, 300.0);
        big_first.resize(target);
        small_first.resize(target);
        assert_eq!(big_first.len(), 25);
        assert_eq!(small_first.len(), 25);
        assert_eq!(big_first.bounds(), target);
    }

    #[test]
    fn resize_reseeds_at_rest_inside_new_viewport() {
        let mut field = violet(800.0, 600.0, 3);
        for _ in 0..30 {
            field.tick(DVec2::new(400.0, 300.0));
        }
        assert!(field.kinetic_energy() > 0.0);
        field.resize(Bounds::new(480.0, 480.0));
        assert_eq!(field.kinetic_energy(), 0.0);
        for p in field.particles() {
            assert_eq!(p.position(), p.origin());
            assert!(field.bounds().contains(p.origin()));
        }
    }

    #[test]
    fn resize_to_zero_empties_field() {
        let mut field = violet(800.0, 600.0, 3);
        field.resize(Bounds::new(0.0, 0.0));
        assert!(field.is_empty());
    }

    // ---- Physics scenarios ----

    #[test]
    fn centered_cursor_pushes_nearby_particles_outward_on_first_tick() {
        let mut field = violet(800.0, 600.0, 11);
        assert_eq!(field.len(), 100);
        let cursor = DVec2::new(400.0, 300.0);
        let radius = field.config().interaction_radius;
        let near: Vec<usize> = field
            .particles()
            .iter()
            .enumerate()
            .filter(|(_, p)| {
                let d = p.origin().distance(cursor);
                d > 0.0 && d < radius
            })
            .map(|(i, _)| i)
            .collect();
        assert!(!near.is_empty(), "seed 11 should place particles near center");

        field.tick(cursor);
        for &i in &near {
            let p = &field.particles()[i];
            let moved = p.position() - p.origin();
            let outward = p.origin() - cursor;
            assert!(moved.dot(outward) > 0.0, "particle {i} moved {moved:?}");
            assert!(p.velocity().dot(outward) > 0.0);
        }

        for _ in 1..60 {
            field.tick(cursor);
        }
        assert!(field.max_displacement() > 1.0);
    }

    #[test]
    fn far_cursor_returns_every_particle_to_origin() {
        let mut field = violet(800.0, 600.0, 11);
        for _ in 0..60 {
            field.tick(DVec2::new(400.0, 300.0));
        }
        assert!(field.max_displacement() > 1.0);
        for _ in 0..500 {
            field.tick(FAR);
        }
        for p in field.particles() {
            assert!(p.displacement() < 0.01, "displacement {}", p.displacement());
        }
    }

    #[test]
    fn far_cursor_shrinks_displacement_envelope() {
        let mut field = indigo(800.0, 600.0, 19);
        for _ in 0..40 {
            field.tick(DVec2::new(300.0, 200.0));
        }
        let window_max = |field: &mut ParticleField| {
            (0..50).fold(0.0_f64, |acc, _| {
                field.tick(FAR);
                acc.max(field.max_displacement())
            })
        };
        let mut previous = window_max(&mut field);
        assert!(previous > 1.0);
        for _ in 1..10 {
            let current = window_max(&mut field);
            assert!(current < previous, "{current} !< {previous}");
            previous = current;
        }
        assert!(previous < 0.01);
    }

    #[test]
    fn particles_at_rest_stay_put_when_cursor_is_far() {
        let mut field = indigo(800.0, 600.0, 2);
        let before = bits(&field);
        for _ in 0..100 {
            field.tick(FAR);
        }
        assert_eq!(before, bits(&field));
    }

    #[test]
    fn tick_is_deterministic() {
        let mut a = indigo(640.0, 480.0, 77);
        let mut b = indigo(640.0, 480.0, 77);
        for i in 0..200 {
            let cursor = DVec2::new((i * 7 % 640) as f64, (i * 13 % 480) as f64);
            a.tick(cursor);
            b.tick(cursor);
        }
        assert_eq!(bits(&a), bits(&b));
    }

    #[test]
    fn render_is_idempotent() {
        let mut field = indigo(800.0, 600.0, 4);
        for _ in 0..10 {
            field.tick(DVec2::new(200.0, 200.0));
        }
        assert_eq!(field.render(), field.render());
    }

    // ---- Construction from JSON ----

    #[test]
    fn from_json_applies_overrides_and_palette() {
        let params = json!({"max_particle_count": 10, "palette": "mono"});
        let field =
            ParticleField::from_json(Bounds::new(800.0, 600.0), 1, Preset::Violet, &params)
                .unwrap();
        assert_eq!(field.len(), 10);
        assert_eq!(field.palette(), &Palette::mono());
        assert_eq!(field.config().damping_factor, 0.94);
    }

    #[test]
    fn from_json_rejects_bad_config_palette_and_bounds() {
        let b = Bounds::new(800.0, 600.0);
        assert!(matches!(
            ParticleField::from_json(b, 1, Preset::Indigo, &json!({"damping_factor": 1.2})),
            Err(FieldError::InvalidConfig(_))
        ));
        assert!(matches!(
            ParticleField::from_json(b, 1, Preset::Indigo, &json!({"palette": "sepia"})),
            Err(FieldError::InvalidPalette(_))
        ));
        assert!(matches!(
            ParticleField::from_json(Bounds::new(-1.0, 5.0), 1, Preset::Indigo, &json!({})),
            Err(FieldError::InvalidDimensions)
        ));
    }

    #[test]
    fn from_json_rejects_unbounded_repulsion() {
        let b = Bounds::new(800.0, 600.0);
        assert!(matches!(
            ParticleField::from_json(b, 1, Preset::Violet, &json!({"repulsion_strength": 1e308})),
            Err(FieldError::InvalidConfig(_))
        ));
    }

    #[test]
    fn strongest_accepted_config_keeps_positions_finite() {
        let params = json!({
            "interaction_radius": 600.0,
            "repulsion_strength": 10.0,
            "spring_constant": 1.0,
            "damping_factor": 0.999,
            "max_particle_count": 2000,
            "density_constant": 1.0,
        });
        let mut field =
            ParticleField::from_json(Bounds::new(800.0, 600.0), 9, Preset::Violet, &params)
                .unwrap();
        assert_eq!(field.len(), 2000);
        for i in 0..1000 {
            let angle = i as f64 * 0.05;
            field.tick(DVec2::new(400.0 + 250.0 * angle.cos(), 300.0 + 200.0 * angle.sin()));
        }
        for p in field.particles() {
            assert!(p.position().is_finite(), "{:?}", p.position());
            assert!(p.velocity().is_finite(), "{:?}", p.velocity());
        }
    }

    // ---- Trait compliance ----

    #[test]
    fn params_include_config_and_palette() {
        let field = violet(100.0, 100.0, 1);
        let p = Simulation::params(&field);
        assert_eq!(p["damping_factor"], 0.94);
        assert_eq!(p["palette"][1], "#a855f7");
    }

    #[test]
    fn simulation_is_object_safe() {
        let mut sim: Box<dyn Simulation> = Box::new(violet(800.0, 600.0, 1));
        sim.tick(DVec2::new(400.0, 300.0));
        sim.resize(Bounds::new(400.0, 300.0));
        assert_eq!(sim.render().len(), 25);
        assert!(sim.param_schema().get("spring_constant").is_some());
    }

    // ---- Property-based tests ----

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn tuned_config() -> impl Strategy<Value = FieldConfig> {
            (
                150.0_f64..=180.0,
                1.8_f64..=4.0,
                0.015_f64..=0.04,
                0.90_f64..=0.94,
            )
                .prop_map(|(radius, strength, spring, damping)| FieldConfig {
                    interaction_radius: radius,
                    repulsion_strength: strength,
                    spring_constant: spring,
                    damping_factor: damping,
                    ..Preset::Indigo.config()
                })
        }

        proptest! {
            #[test]
            fn velocity_stays_bounded_for_cursor_inside_viewport(
                seed: u64,
                cfg in tuned_config(),
                path in prop::collection::vec((0.0_f64..800.0, 0.0_f64..600.0), 1..40),
            ) {
                let mut field = ParticleField::initialize(
                    Bounds::new(800.0, 600.0), cfg, Palette::indigo(), seed,
                );
                for i in 0..200 {
                    let (x, y) = path[i % path.len()];
                    field.tick(DVec2::new(x, y));
                    for p in field.particles() {
                        prop_assert!(p.position().is_finite() && p.velocity().is_finite());
                        prop_assert!(p.velocity().length() < 100.0, "|v| = {}", p.velocity().length());
                    }
                }
            }

            #[test]
            fn count_never_depends_on_previous_field(
                seed: u64,
                w0 in 0.0_f64..2000.0, h0 in 0.0_f64..2000.0,
                w1 in 0.0_f64..2000.0, h1 in 0.0_f64..2000.0,
            ) {
                let cfg = Preset::Indigo.config();
                let mut field = ParticleField::initialize(
                    Bounds::new(w0, h0), cfg, Palette::indigo(), seed,
                );
                field.resize(Bounds::new(w1, h1));
                prop_assert_eq!(field.len(), particle_count_for(&cfg, Bounds::new(w1, h1)));
            }

            #[test]
            fn origins_are_never_mutated(
                seed: u64,
                cursors in prop::collection::vec((-100.0_f64..900.0, -100.0_f64..700.0), 1..60),
            ) {
                let mut field = ParticleField::initialize(
                    Bounds::new(800.0, 600.0), Preset::Violet.config(), Palette::violet(), seed,
                );
                let origins: Vec<DVec2> = field.particles().iter().map(Particle::origin).collect();
                for (x, y) in cursors {
                    field.tick(DVec2::new(x, y));
                }
                let after: Vec<DVec2> = field.particles().iter().map(Particle::origin).collect();
                prop_assert_eq!(origins, after);
            }
        }
    }
}
