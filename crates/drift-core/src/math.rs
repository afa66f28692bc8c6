/// `mix(a, b, t)` for scalars.
#[inline]
pub fn mix(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Position of `x` inside `[edge0, edge1]`, clamped to [0,1].
///
/// A degenerate range yields 1.0 for any `x >= edge1` and 0.0 otherwise.
#[inline]
pub fn linear_step(edge0: f32, edge1: f32, x: f32) -> f32 {
    let span = edge1 - edge0;
    if span <= f32::EPSILON {
        return if x >= edge1 { 1.0 } else { 0.0 };
    }
    ((x - edge0) / span).clamp(0.0, 1.0)
}

/// Rec. 601 luma of an sRGB triple.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> f32 {
    0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32
}

/// Round and clamp a channel value to a byte.
#[inline]
pub fn to_channel(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
