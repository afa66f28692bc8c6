use crate::color::Rgba;
use crate::particle::ParticleSet;

/// RGBA frame the particles are composited into.
///
/// Cleared to transparent at the start of every frame; nothing accumulates
/// between frames.
#[derive(Clone, Debug)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba::TRANSPARENT; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self) {
        self.pixels.fill(Rgba::TRANSPARENT);
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y * self.width + x) as usize])
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Raw bytes, ready for canvas `ImageData`.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Paint a `side` x `side` square whose top-left corner is (x0, y0),
    /// clipped to the buffer.
    pub fn fill_square(&mut self, x0: i32, y0: i32, side: i32, color: Rgba) {
        let x_start = x0.max(0);
        let y_start = y0.max(0);
        let x_end = x0.saturating_add(side).min(self.width as i32);
        let y_end = y0.saturating_add(side).min(self.height as i32);
        if x_start >= x_end || y_start >= y_end {
            return;
        }

        let stride = self.width as usize;
        for y in y_start as usize..y_end as usize {
            let row = y * stride;
            self.pixels[row + x_start as usize..row + x_end as usize].fill(color);
        }
    }
}

/// Composite every particle into `frame` in painter's order.
///
/// Each particle covers a `size` x `size` square centered on its rounded
/// position; later particles overwrite earlier ones. Returns how many
/// particles landed at least partly inside the frame.
pub fn render(particles: &ParticleSet, frame: &mut FrameBuffer) -> usize {
    frame.clear();

    let side = particles.size().round().max(1.0) as i32;
    let half = side / 2;
    let (width, height) = (frame.width() as i32, frame.height() as i32);
    let mut drawn = 0;

    for (i, pos) in particles.positions().iter().enumerate() {
        if !pos.is_finite() {
            continue;
        }
        let x0 = (pos.x.round() as i32).saturating_sub(half);
        let y0 = (pos.y.round() as i32).saturating_sub(half);
        if x0 >= width || y0 >= height || x0.saturating_add(side) <= 0 || y0.saturating_add(side) <= 0 {
            continue;
        }
        frame.fill_square(x0, y0, side, particles.color(i));
        drawn += 1;
    }

    drawn
}
