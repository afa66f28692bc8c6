//! Pointer and reveal-wave state.
//!
//! Input events land here between frames. At the start of each frame the
//! simulation takes a [`FrameInput`] snapshot, so a frame never observes a
//! half-applied event.

use glam::Vec2;

use crate::config::EffectConfig;

/// What started a wave.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaveTrigger {
    /// Click or tap.
    Manual,
    /// Fired once after the field stayed untouched for the dormant delay.
    Dormant,
}

/// A wave in flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wave {
    pub origin: Vec2,
    pub start_ms: f64,
    /// True when the wave turns the image colored, false when it drains it.
    pub colorize: bool,
    pub trigger: WaveTrigger,
}

impl Wave {
    /// Front radius after `now_ms`. Never negative, even for a clock that
    /// reads slightly behind the trigger.
    pub fn radius(&self, now_ms: f64, speed: f32) -> f32 {
        let elapsed_s = ((now_ms - self.start_ms) / 1000.0).max(0.0);
        (elapsed_s * speed as f64) as f32
    }
}

/// Wave as seen by one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveFront {
    pub origin: Vec2,
    pub radius: f32,
    pub band: f32,
    pub colorize: bool,
}

impl WaveFront {
    /// How far past the front a point sits, in [0,1], or `None` when the
    /// front has not reached it yet.
    #[inline]
    pub fn progress_at(&self, point: Vec2) -> Option<f32> {
        let d2 = point.distance_squared(self.origin);
        if d2 > self.radius * self.radius {
            return None;
        }
        Some(((self.radius - d2.sqrt()) / self.band).min(1.0))
    }
}

/// Consistent view of the interaction state for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInput {
    /// Pointer position, already suppressed while a wave runs.
    pub pointer: Option<Vec2>,
    pub wave: Option<WaveFront>,
    /// Persisted mode: true once a colorize wave has completed.
    pub colorized: bool,
}

#[derive(Clone, Debug)]
pub struct InteractionState {
    pointer: Option<Vec2>,
    wave: Option<Wave>,
    colorized: bool,
    dormant_armed: bool,
    created_ms: f64,
    bounds: Vec2,
    wave_speed: f32,
    wave_band: f32,
    dormant_delay_ms: f64,
}

impl InteractionState {
    /// `bounds` is the image size in simulation units.
    pub fn new(config: &EffectConfig, bounds: Vec2, now_ms: f64) -> Self {
        Self {
            pointer: None,
            wave: None,
            colorized: false,
            dormant_armed: true,
            created_ms: now_ms,
            bounds,
            wave_speed: config.wave_speed,
            wave_band: config.wave_band,
            dormant_delay_ms: config.dormant_delay_ms,
        }
    }

    pub fn pointer_moved(&mut self, position: Vec2) {
        if position.is_finite() {
            self.pointer = Some(position);
        }
    }

    pub fn pointer_left(&mut self) {
        self.pointer = None;
    }

    /// Start a manual wave toggling the persisted mode.
    ///
    /// Ignored while another wave is in flight; returns whether a wave
    /// started. The origin is clamped into the image rectangle.
    pub fn clicked(&mut self, position: Vec2, now_ms: f64) -> bool {
        if self.wave.is_some() {
            log::debug!("click at {:?} ignored, wave already running", position);
            return false;
        }
        if !position.is_finite() {
            return false;
        }
        let origin = position.clamp(Vec2::ZERO, self.bounds);
        self.dormant_armed = false;
        self.launch(Wave {
            origin,
            start_ms: now_ms,
            colorize: !self.colorized,
            trigger: WaveTrigger::Manual,
        });
        true
    }

    /// Advance time-driven transitions and snapshot the state for a frame.
    pub fn begin_frame(&mut self, now_ms: f64) -> FrameInput {
        if self.dormant_armed
            && self.wave.is_none()
            && now_ms - self.created_ms >= self.dormant_delay_ms
        {
            self.dormant_armed = false;
            self.launch(Wave {
                origin: self.bounds * 0.5,
                start_ms: now_ms,
                colorize: true,
                trigger: WaveTrigger::Dormant,
            });
        }

        let wave = self.wave.map(|w| WaveFront {
            origin: w.origin,
            radius: w.radius(now_ms, self.wave_speed),
            band: self.wave_band,
            colorize: w.colorize,
        });

        FrameInput {
            pointer: if wave.is_some() { None } else { self.pointer },
            wave,
            colorized: self.colorized,
        }
    }

    /// Complete the wave once its front has cleared the whole image.
    ///
    /// Called after the frame's particle pass, so every particle within the
    /// image diagonal has seen full progress before the mode is committed.
    pub fn finish_frame(&mut self, input: &FrameInput) {
        let (Some(front), Some(wave)) = (input.wave, self.wave) else {
            return;
        };
        if front.radius >= self.completion_radius() {
            self.colorized = wave.colorize;
            self.wave = None;
            log::info!(
                "{:?} wave complete, image is now {}",
                wave.trigger,
                if self.colorized { "colored" } else { "grayscale" }
            );
        }
    }

    /// Front radius at which a wave is considered done.
    pub fn completion_radius(&self) -> f32 {
        self.bounds.length() + self.wave_band
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    pub fn wave(&self) -> Option<&Wave> {
        self.wave.as_ref()
    }

    pub fn is_colorized(&self) -> bool {
        self.colorized
    }

    /// Whether the one-shot automatic reveal can still fire.
    pub fn dormant_armed(&self) -> bool {
        self.dormant_armed
    }

    fn launch(&mut self, wave: Wave) {
        log::info!(
            "{:?} wave from ({:.1}, {:.1}), {}",
            wave.trigger,
            wave.origin.x,
            wave.origin.y,
            if wave.colorize { "colorizing" } else { "decolorizing" }
        );
        self.wave = Some(wave);
    }
}
