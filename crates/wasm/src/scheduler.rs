//! `requestAnimationFrame`-backed [`FrameScheduler`].

use crate::Runtime;
use driftfield_core::{FieldError, FrameHandle, FrameScheduler};
use std::cell::RefCell;
use std::rc::Weak;
use tracing::{debug, trace};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

/// Schedules one persistent callback per frame.
///
/// The callback is created once and reused for every request, so it is never
/// dropped while the browser is invoking it.
pub(crate) struct RafScheduler {
    window: Window,
    callback: Closure<dyn FnMut(f64)>,
}

impl RafScheduler {
    pub(crate) fn new(window: Window, target: Weak<RefCell<Runtime>>) -> Self {
        let callback = Closure::wrap(Box::new(move |_timestamp: f64| {
            let Some(runtime) = target.upgrade() else {
                trace!("frame fired after background was dropped");
                return;
            };
            // A frame can only be reentrant if JS calls back into the
            // background from inside the draw; skip it rather than panic.
            let Ok(mut runtime) = runtime.try_borrow_mut() else {
                debug!("frame skipped: background busy");
                return;
            };
            runtime.frame();
        }) as Box<dyn FnMut(f64)>);
        Self { window, callback }
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> Result<FrameHandle, FieldError> {
        let id = self
            .window
            .request_animation_frame(self.callback.as_ref().unchecked_ref())
            .map_err(|e| FieldError::Scheduler(describe(&e)))?;
        Ok(FrameHandle(u64::from(id as u32)))
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Err(e) = self.window.cancel_animation_frame(handle.0 as i32) {
            debug!(error = %describe(&e), "cancelAnimationFrame failed");
        }
    }
}

pub(crate) fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
