/// Frame time monitor.
///
/// Tracks an exponential moving average of the simulate + render + present
/// pass and reports when it crosses the frame budget. Over-budget episodes
/// are logged once on entry and once on recovery so a slow device does not
/// flood the console.
#[derive(Clone, Debug)]
pub struct FrameTiming {
    /// Target pass duration in milliseconds (default: one 60 Hz frame).
    pub budget_ms: f32,
    /// Exponential moving average of the pass duration.
    ema_ms: f32,
    /// Whether the average is currently above budget.
    over_budget: bool,
    /// Number of frames recorded.
    frames: u64,
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new(1000.0 / 60.0)
    }
}

impl FrameTiming {
    pub fn new(budget_ms: f32) -> Self {
        Self {
            budget_ms,
            ema_ms: 0.0,
            over_budget: false,
            frames: 0,
        }
    }

    /// Record the latest pass duration in milliseconds.
    pub fn record(&mut self, frame_ms: f32) {
        if !frame_ms.is_finite() || frame_ms < 0.0 {
            return;
        }

        // EMA with alpha=0.3 for responsiveness; seed with the first sample
        self.ema_ms = if self.frames == 0 {
            frame_ms
        } else {
            self.ema_ms * 0.7 + frame_ms * 0.3
        };
        self.frames += 1;

        if !self.over_budget && self.ema_ms > self.budget_ms {
            self.over_budget = true;
            log::warn!(
                "frame pass averaging {:.2} ms, over the {:.2} ms budget",
                self.ema_ms,
                self.budget_ms
            );
        } else if self.over_budget && self.ema_ms < self.budget_ms * 0.8 {
            self.over_budget = false;
            log::info!("frame pass back under budget ({:.2} ms)", self.ema_ms);
        }
    }

    pub fn average_ms(&self) -> f32 {
        self.ema_ms
    }

    pub fn is_over_budget(&self) -> bool {
        self.over_budget
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
