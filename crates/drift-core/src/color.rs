use bytemuck::{Pod, Zeroable};

use crate::math::{luminance, to_channel};

/// Below this illumination the grayscale color is drawn as-is.
pub const BLEND_EPSILON: f32 = 0.01;

/// 8-bit RGBA pixel, laid out the way canvas `ImageData` expects.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Luminance-derived gray with the same alpha.
    pub fn grayscale(self) -> Self {
        let y = to_channel(luminance(self.r, self.g, self.b));
        Self::new(y, y, y, self.a)
    }
}

/// Blend `gray` toward `base` by `illumination` in [0,1].
pub fn blend(gray: Rgba, base: Rgba, illumination: f32) -> Rgba {
    if illumination <= BLEND_EPSILON {
        return gray;
    }
    let t = illumination.min(1.0);
    let lerp = |g: u8, b: u8| to_channel(g as f32 + (b as f32 - g as f32) * t);
    Rgba::new(
        lerp(gray.r, base.r),
        lerp(gray.g, base.g),
        lerp(gray.b, base.b),
        lerp(gray.a, base.a),
    )
}
