//! 2D-canvas [`RenderSurface`].

use crate::scheduler::describe;
use driftfield_core::{Bounds, DrawCommand, FieldError, RenderSurface};
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub(crate) struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Acquires the canvas's 2D context.
    pub(crate) fn new(canvas: HtmlCanvasElement) -> Result<Self, FieldError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| FieldError::SurfaceLost(describe(&e)))?
            .ok_or_else(|| FieldError::SurfaceLost("2d context unavailable".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| FieldError::SurfaceLost("context is not 2d".into()))?;
        Ok(Self { canvas, ctx })
    }

    pub(crate) fn set_size(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }
}

impl RenderSurface for CanvasSurface {
    fn draw(&mut self, bounds: Bounds, commands: &[DrawCommand]) -> Result<(), FieldError> {
        if !self.canvas.is_connected() {
            return Err(FieldError::SurfaceLost("canvas removed from document".into()));
        }
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, bounds.width, bounds.height);
        for cmd in commands {
            ctx.set_global_alpha(cmd.alpha);
            ctx.set_fill_style_str(&cmd.color.to_hex());
            ctx.begin_path();
            ctx.arc(cmd.center.x, cmd.center.y, cmd.radius, 0.0, TAU)
                .map_err(|e| FieldError::SurfaceLost(describe(&e)))?;
            ctx.fill();
        }
        ctx.set_global_alpha(1.0);
        Ok(())
    }
}
