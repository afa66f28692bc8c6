//! Per-particle force terms combined by the integrator.
pub mod flow;
pub mod pointer;
pub mod wave;

/// Spring and drift parameters in effect for one particle this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionParams {
    pub return_speed: f32,
    pub flow_amplitude: f32,
}

impl MotionParams {
    /// Scale both terms.
    #[inline]
    pub fn scaled(self, return_scale: f32, flow_scale: f32) -> Self {
        Self {
            return_speed: self.return_speed * return_scale,
            flow_amplitude: self.flow_amplitude * flow_scale,
        }
    }
}
