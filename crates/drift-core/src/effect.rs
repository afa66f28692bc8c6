//! Frame loop driver.
//!
//! The engine never owns a thread or a timer. A [`Host`] supplies the clock,
//! schedules exactly one callback per display refresh and presents finished
//! frames; the host's callback calls [`Effect::tick`], which runs one full
//! pass and asks for the next frame only after the current one completed.

use glam::Vec2;

use crate::config::EffectConfig;
use crate::error::EffectError;
use crate::quality::FrameTiming;
use crate::render::{render, FrameBuffer};
use crate::solver::{Simulation, StepStats};
use crate::source::ImageData;

/// Environment the effect runs in.
pub trait Host {
    /// Monotonic wall clock in milliseconds.
    fn now_ms(&self) -> f64;

    /// Arrange for [`Effect::tick`] to be called on the next refresh.
    fn request_frame(&mut self) -> Result<(), EffectError>;

    /// Drop any pending frame request.
    fn cancel_frame(&mut self);

    /// Show a finished frame.
    fn present(&mut self, frame: &FrameBuffer) -> Result<(), EffectError>;

    /// Release the render surface. Called once, on stop.
    fn release(&mut self) {}
}

/// A running particle effect bound to its host.
pub struct Effect<H: Host> {
    simulation: Simulation,
    frame: FrameBuffer,
    timing: FrameTiming,
    host: H,
    running: bool,
}

impl<H: Host> Effect<H> {
    /// Build the field from `image` and schedule the first frame.
    pub fn start(image: &ImageData, config: EffectConfig, mut host: H) -> Result<Self, EffectError> {
        let simulation = Simulation::new(image, config, host.now_ms())?;
        host.request_frame()?;

        log::info!(
            "particle effect started: {} particles on {}x{}",
            simulation.particles().len(),
            image.width(),
            image.height()
        );

        Ok(Self {
            simulation,
            frame: FrameBuffer::new(image.width(), image.height()),
            timing: FrameTiming::default(),
            host,
            running: true,
        })
    }

    /// Run one simulate + render + present pass and schedule the next one.
    ///
    /// Returns `Ok(None)` once the effect has been stopped.
    pub fn tick(&mut self) -> Result<Option<StepStats>, EffectError> {
        if !self.running {
            return Ok(None);
        }

        let started = self.host.now_ms();
        let stats = self.simulation.step(started);
        render(self.simulation.particles(), &mut self.frame);
        self.host.present(&self.frame)?;
        self.timing.record((self.host.now_ms() - started) as f32);

        self.host.request_frame()?;
        Ok(Some(stats))
    }

    /// Halt scheduling and release the surface. Idempotent.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.host.cancel_frame();
        self.host.release();
        log::info!(
            "particle effect stopped after {} frames",
            self.simulation.frame()
        );
    }

    pub fn pointer_moved(&mut self, position: Vec2) {
        self.simulation.pointer_moved(position);
    }

    pub fn pointer_left(&mut self) {
        self.simulation.pointer_left();
    }

    /// Manual wave trigger at `position`, stamped with the host clock.
    pub fn clicked(&mut self, position: Vec2) -> bool {
        let now = self.host.now_ms();
        self.simulation.clicked(position, now)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn timing(&self) -> &FrameTiming {
        &self.timing
    }

    pub fn host(&self) -> &H {
        &self.host
    }
}

impl<H: Host> Drop for Effect<H> {
    fn drop(&mut self) {
        self.stop();
    }
}
