use super::MotionParams;
use crate::math::mix;

/// Illumination gained per frame while the image rests colored.
pub const COLOR_CREEP: f32 = 0.02;
/// Illumination kept per frame while the image rests in grayscale.
pub const GRAY_DECAY: f32 = 0.95;
/// Decayed illumination below this snaps to zero.
const GRAY_FLOOR: f32 = 1e-3;

/// Snap tuning shared by the wave and settled colored states.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapParams {
    pub return_scale: f32,
    pub flow_scale: f32,
}

impl SnapParams {
    /// Motion after the wave has passed by `progress` in [0,1].
    #[inline]
    pub fn apply(&self, baseline: MotionParams, progress: f32) -> MotionParams {
        baseline.scaled(
            mix(1.0, self.return_scale, progress),
            mix(1.0, self.flow_scale, progress),
        )
    }
}

/// Wave treatment for a particle the front has passed by `progress`.
///
/// A colorizing wave lights the particle and tightens its spring as the
/// band passes; a decolorizing wave drains it and restores baseline motion.
#[inline]
pub fn apply_wave(
    illumination: f32,
    progress: f32,
    colorize: bool,
    baseline: MotionParams,
    snap: &SnapParams,
) -> (f32, MotionParams) {
    if colorize {
        (illumination.max(progress), snap.apply(baseline, progress))
    } else {
        (illumination.min(1.0 - progress), baseline)
    }
}

/// Resting behaviour with no wave passing over the particle.
#[inline]
pub fn settle(
    illumination: f32,
    colorized: bool,
    baseline: MotionParams,
    snap: &SnapParams,
) -> (f32, MotionParams) {
    if colorized {
        ((illumination + COLOR_CREEP).min(1.0), snap.apply(baseline, 1.0))
    } else {
        let decayed = illumination * GRAY_DECAY;
        let decayed = if decayed < GRAY_FLOOR { 0.0 } else { decayed };
        (decayed, baseline)
    }
}
