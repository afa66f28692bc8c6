use glam::Vec2;

use crate::color::{blend, Rgba};

/// One particle, copied out of the set for inspection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub origin: Vec2,
    pub velocity: Vec2,
    pub base_color: Rgba,
    pub gray_color: Rgba,
    pub phase: f32,
    pub illumination: f32,
    pub size: f32,
}

impl Particle {
    /// Color this particle paints with right now.
    pub fn color(&self) -> Rgba {
        blend(self.gray_color, self.base_color, self.illumination)
    }
}

/// Borrowed columns for one integration pass: fixed build-time data
/// alongside the mutable simulation state.
pub(crate) struct Lanes<'a> {
    pub origin: &'a [Vec2],
    pub phase: &'a [f32],
    pub position: &'a mut [Vec2],
    pub velocity: &'a mut [Vec2],
    pub illumination: &'a mut [f32],
}

/// SoA particle storage.
///
/// Particles are appended only while the field is being built; afterwards
/// the set is owned by the simulation, which mutates position, velocity and
/// illumination in place. Index order is the painter's order.
#[derive(Clone, Debug, Default)]
pub struct ParticleSet {
    position: Vec<Vec2>,
    velocity: Vec<Vec2>,
    illumination: Vec<f32>,
    origin: Vec<Vec2>,
    base_color: Vec<Rgba>,
    gray_color: Vec<Rgba>,
    /// Flow phase offset in [0, 2pi)
    phase: Vec<f32>,
    size: f32,
}

impl ParticleSet {
    pub fn with_capacity(capacity: usize, size: f32) -> Self {
        Self {
            position: Vec::with_capacity(capacity),
            velocity: Vec::with_capacity(capacity),
            illumination: Vec::with_capacity(capacity),
            origin: Vec::with_capacity(capacity),
            base_color: Vec::with_capacity(capacity),
            gray_color: Vec::with_capacity(capacity),
            phase: Vec::with_capacity(capacity),
            size,
        }
    }

    /// Append a resting, unlit particle at `origin`.
    pub fn push(&mut self, origin: Vec2, color: Rgba, phase: f32) {
        self.position.push(origin);
        self.velocity.push(Vec2::ZERO);
        self.illumination.push(0.0);
        self.origin.push(origin);
        self.base_color.push(color);
        self.gray_color.push(color.grayscale());
        self.phase.push(phase);
    }

    pub fn len(&self) -> usize {
        self.origin.len()
    }

    pub fn is_empty(&self) -> bool {
        self.origin.is_empty()
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn get(&self, index: usize) -> Option<Particle> {
        if index >= self.len() {
            return None;
        }
        Some(Particle {
            position: self.position[index],
            origin: self.origin[index],
            velocity: self.velocity[index],
            base_color: self.base_color[index],
            gray_color: self.gray_color[index],
            phase: self.phase[index],
            illumination: self.illumination[index],
            size: self.size,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = Particle> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }

    pub fn positions(&self) -> &[Vec2] {
        &self.position
    }

    pub fn velocities(&self) -> &[Vec2] {
        &self.velocity
    }

    pub fn illumination(&self) -> &[f32] {
        &self.illumination
    }

    pub fn origins(&self) -> &[Vec2] {
        &self.origin
    }

    pub fn phases(&self) -> &[f32] {
        &self.phase
    }

    pub fn base_colors(&self) -> &[Rgba] {
        &self.base_color
    }

    pub fn gray_colors(&self) -> &[Rgba] {
        &self.gray_color
    }

    pub(crate) fn lanes_mut(&mut self) -> Lanes<'_> {
        Lanes {
            origin: &self.origin,
            phase: &self.phase,
            position: &mut self.position,
            velocity: &mut self.velocity,
            illumination: &mut self.illumination,
        }
    }

    /// Blended draw color of particle `index`.
    #[inline]
    pub fn color(&self, index: usize) -> Rgba {
        blend(
            self.gray_color[index],
            self.base_color[index],
            self.illumination[index],
        )
    }
}
