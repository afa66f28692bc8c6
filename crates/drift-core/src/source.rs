use glam::Vec2;

use crate::color::Rgba;
use crate::error::SourceError;

/// Decoded RGBA pixels of the source image, row-major.
#[derive(Clone, Debug)]
pub struct ImageData {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl ImageData {
    /// Wrap decoded pixels. A zero-sized image means decoding has not
    /// finished yet and is reported as such.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, SourceError> {
        if width == 0 || height == 0 {
            return Err(SourceError::NotDecoded { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(SourceError::LengthMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Fill every pixel with `color`.
    pub fn solid(width: u32, height: u32, color: Rgba) -> Result<Self, SourceError> {
        let pixels = std::iter::repeat([color.r, color.g, color.b, color.a])
            .take(width as usize * height as usize)
            .flatten()
            .collect();
        Self::new(width, height, pixels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    pub fn center(&self) -> Vec2 {
        self.size() * 0.5
    }

    pub fn diagonal(&self) -> f32 {
        self.size().length()
    }

    /// Pixel at (x, y). Caller guarantees the coordinate is in bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Rgba::new(
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        )
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }
}
