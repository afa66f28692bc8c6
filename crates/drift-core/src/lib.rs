//! Image-driven particle field: samples a still image into particles that
//! drift, scatter away from a pointer and sweep between grayscale and color
//! with a radial reveal wave.

pub mod color;
pub mod config;
pub mod effect;
pub mod error;
pub mod forces;
pub mod interaction;
pub mod math;
pub mod particle;
pub mod quality;
pub mod render;
pub mod sampler;
pub mod solver;
pub mod source;

pub use color::Rgba;
pub use config::EffectConfig;
pub use effect::{Effect, Host};
pub use error::{ConfigError, EffectError, SourceError};
pub use render::FrameBuffer;
pub use solver::{Simulation, StepStats};
pub use source::ImageData;
