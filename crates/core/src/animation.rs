//! Cancellable, host-scheduled animation loop.
//!
//! The host owns the display-refresh callback (`requestAnimationFrame` in a
//! browser, a timer or a plain `for` loop elsewhere). [`AnimationLoop`] only
//! asks a [`FrameScheduler`] for the next frame and remembers the handle it
//! got back, so that `stop` (or dropping the loop) can always release it.
//!
//! ```text
//!   start() ──request_frame──► pending = Some(h)
//!   host fires h ──► on_frame(): pending.take(), tick, render, draw, re-arm
//!   stop() / drop ──cancel_frame(h)──► pending = None
//! ```

use crate::draw::{Bounds, RenderSurface};
use crate::error::FieldError;
use crate::simulation::Simulation;
use glam::DVec2;
use tracing::{debug, trace};

/// Opaque id of one scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Arms and disarms one-shot frame callbacks at the host's refresh cadence.
pub trait FrameScheduler {
    /// Schedule one callback for the next frame.
    fn request_frame(&mut self) -> Result<FrameHandle, FieldError>;

    /// Release a callback that has not fired yet. Unknown or already-fired
    /// handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Drives a [`Simulation`] once per host frame until stopped.
///
/// At most one frame is pending at a time. Cursor updates overwrite each
/// other; a frame reads whatever value was written last.
pub struct AnimationLoop<S: Simulation, F: FrameScheduler> {
    simulation: S,
    scheduler: F,
    pending: Option<FrameHandle>,
    cursor: DVec2,
    frames: u64,
}

impl<S: Simulation, F: FrameScheduler> AnimationLoop<S, F> {
    /// Creates a stopped loop. The cursor starts at the viewport center.
    pub fn new(simulation: S, scheduler: F) -> Self {
        let cursor = simulation.bounds().center();
        Self {
            simulation,
            scheduler,
            pending: None,
            cursor,
            frames: 0,
        }
    }

    /// Arms the first frame. No-op while already running.
    pub fn start(&mut self) -> Result<(), FieldError> {
        if self.pending.is_some() {
            return Ok(());
        }
        self.pending = Some(self.scheduler.request_frame()?);
        debug!(frames = self.frames, "animation loop started");
        Ok(())
    }

    /// Releases the pending frame. After this returns no further tick or
    /// render happens until [`start`](Self::start) is called again.
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
            debug!(frames = self.frames, "animation loop stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Last-write-wins cursor update.
    pub fn set_cursor(&mut self, cursor: DVec2) {
        self.cursor = cursor;
    }

    pub fn cursor(&self) -> DVec2 {
        self.cursor
    }

    /// Forwards a viewport change to the simulation.
    pub fn resize(&mut self, bounds: Bounds) {
        self.simulation.resize(bounds);
    }

    pub fn simulation(&self) -> &S {
        &self.simulation
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    /// Frames drawn since construction.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Runs one frame. Called by the host when the pending callback fires.
    ///
    /// Does nothing when the loop is stopped, which also covers a callback
    /// that was already in flight when `stop` ran. A lost surface or a
    /// scheduler failure stops the loop quietly. Returns whether the loop is
    /// still running.
    pub fn on_frame(&mut self, surface: &mut dyn RenderSurface) -> bool {
        if self.pending.take().is_none() {
            return false;
        }

        self.simulation.tick(self.cursor);
        let commands = self.simulation.render();
        if let Err(err) = surface.draw(self.simulation.bounds(), &commands) {
            debug!(error = %err, frames = self.frames, "surface unavailable, stopping");
            return false;
        }
        self.frames += 1;
        trace!(frame = self.frames, circles = commands.len(), "frame drawn");

        match self.scheduler.request_frame() {
            Ok(handle) => {
                self.pending = Some(handle);
                true
            }
            Err(err) => {
                debug!(error = %err, "could not re-arm frame, stopping");
                false
            }
        }
    }
}

impl<S: Simulation, F: FrameScheduler> Drop for AnimationLoop<S, F> {
    fn drop(&mut self) {
        self.stop();
    }
}
