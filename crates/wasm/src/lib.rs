#![deny(unsafe_code)]
//! Browser bindings: a [`ParticleBackground`] that animates a
//! [`ParticleField`] on a 2D canvas via `requestAnimationFrame`.
//!
//! ```text
//!   ParticleBackground ──Rc──► RefCell<Runtime { AnimationLoop, CanvasSurface }>
//!                                   ▲
//!   rAF closure (owned by RafScheduler) ──Weak──┘
//! ```
//!
//! The scheduler's callback only holds a weak reference, so dropping the
//! background (or calling `free()` from JS) tears the loop down and the
//! pending frame is cancelled by `AnimationLoop`'s `Drop`.

mod scheduler;
mod surface;

use driftfield_core::{AnimationLoop, Bounds, DVec2};
use driftfield_sim::{ParticleField, Preset};
use scheduler::RafScheduler;
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;
use surface::CanvasSurface;
use tracing::debug;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

/// Loop plus the surface its frames are drawn on.
pub(crate) struct Runtime {
    anim: AnimationLoop<ParticleField, RafScheduler>,
    surface: CanvasSurface,
}

impl Runtime {
    /// Runs one frame if the loop is still armed.
    pub(crate) fn frame(&mut self) {
        let Runtime { anim, surface } = self;
        anim.on_frame(surface);
    }
}

/// Cursor-reactive particle background bound to one canvas.
#[wasm_bindgen]
pub struct ParticleBackground {
    runtime: Rc<RefCell<Runtime>>,
}

#[wasm_bindgen]
impl ParticleBackground {
    /// Seeds a field sized to the canvas using a named preset.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, preset: &str) -> Result<ParticleBackground, JsValue> {
        Self::with_params(canvas, preset, "{}")
    }

    /// Like `new`, with config overrides given as a JSON object string.
    pub fn with_params(
        canvas: HtmlCanvasElement,
        preset: &str,
        params_json: &str,
    ) -> Result<ParticleBackground, JsValue> {
        let params: Value = serde_json::from_str(params_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid params: {e}")))?;
        let preset = Preset::from_name(preset).map_err(to_js)?;
        let bounds = Bounds::new(f64::from(canvas.width()), f64::from(canvas.height()));
        let seed = random_seed();
        let field = ParticleField::from_json(bounds, seed, preset, &params).map_err(to_js)?;
        let surface = CanvasSurface::new(canvas).map_err(to_js)?;
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        debug!(preset = preset.name(), particles = field.len(), seed, "background created");

        let runtime = Rc::new_cyclic(|weak| {
            let scheduler = RafScheduler::new(window, weak.clone());
            RefCell::new(Runtime {
                anim: AnimationLoop::new(field, scheduler),
                surface,
            })
        });
        Ok(ParticleBackground { runtime })
    }

    /// Latest pointer position in canvas pixels; read by the next frame.
    pub fn set_cursor(&self, x: f64, y: f64) {
        self.runtime.borrow_mut().anim.set_cursor(DVec2::new(x, y));
    }

    /// Resizes the canvas backing store and re-seeds every particle.
    pub fn resize(&self, width: f64, height: f64) {
        let (w, h, bounds) = extents(width, height);
        let mut rt = self.runtime.borrow_mut();
        rt.surface.set_size(w, h);
        rt.anim.resize(bounds);
    }

    pub fn start(&self) -> Result<(), JsValue> {
        self.runtime.borrow_mut().anim.start().map_err(to_js)
    }

    pub fn stop(&self) {
        self.runtime.borrow_mut().anim.stop();
    }

    pub fn is_running(&self) -> bool {
        self.runtime.borrow().anim.is_running()
    }

    pub fn particle_count(&self) -> usize {
        self.runtime.borrow().anim.simulation().len()
    }
}

fn to_js(e: driftfield_core::FieldError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn random_seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64
}

/// Backing-store size and matching simulation bounds for a CSS-pixel size.
/// Particles are seeded over the rounded canvas, never past its edge.
fn extents(width: f64, height: f64) -> (u32, u32, Bounds) {
    let (w, h) = (canvas_extent(width), canvas_extent(height));
    (w, h, Bounds::new(f64::from(w), f64::from(h)))
}

/// Canvas backing-store size for a CSS-pixel extent. Negative and NaN map
/// to zero; fractions round to the nearest pixel.
fn canvas_extent(v: f64) -> u32 {
    if v.is_nan() || v <= 0.0 {
        0
    } else {
        v.round().min(f64::from(u32::MAX)) as u32
    }
}
