use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use crate::config::EffectConfig;
use crate::particle::ParticleSet;
use crate::source::ImageData;

/// Samples at or below this alpha are dropped.
pub const ALPHA_THRESHOLD: u8 = 128;

/// Sample `image` on a `particle_gap` grid into a particle set.
///
/// Iteration is row-major, so index order is top-to-bottom, left-to-right.
/// With `circular` set, samples farther from the image center than
/// `min(width, height) / 2 - circular_padding` are skipped; a mask radius
/// of zero or less yields an empty set.
pub fn sample_particles<R: Rng + ?Sized>(
    image: &ImageData,
    config: &EffectConfig,
    rng: &mut R,
) -> ParticleSet {
    let gap = config.particle_gap.max(1) as usize;
    let (width, height) = (image.width(), image.height());
    let center = image.center();

    let mask_radius = width.min(height) as f32 * 0.5 - config.circular_padding;
    let mask_radius_sq = mask_radius * mask_radius;
    if config.circular && mask_radius <= 0.0 {
        log::debug!(
            "circular mask radius {} leaves no particles for a {}x{} image",
            mask_radius,
            width,
            height
        );
        return ParticleSet::with_capacity(0, config.particle_size);
    }

    let estimate = (width as usize).div_ceil(gap) * (height as usize).div_ceil(gap);
    let mut particles = ParticleSet::with_capacity(estimate, config.particle_size);

    for y in (0..height).step_by(gap) {
        for x in (0..width).step_by(gap) {
            let at = Vec2::new(x as f32, y as f32);
            if config.circular && at.distance_squared(center) > mask_radius_sq {
                continue;
            }
            let color = image.pixel(x, y);
            if color.a <= ALPHA_THRESHOLD {
                continue;
            }
            particles.push(at, color, rng.gen_range(0.0..TAU));
        }
    }

    log::debug!(
        "sampled {} particles from {}x{} image (gap {}, circular {})",
        particles.len(),
        width,
        height,
        gap,
        config.circular
    );
    particles
}
