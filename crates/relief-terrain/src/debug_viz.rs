//! Heightfield debug visualization: grayscale RGBA images and PNG export.

use std::path::Path;

use crate::error::TerrainError;
use crate::height_field::HeightField;

/// A 2D debug image stored as row-major RGBA pixels.
#[derive(Clone, Debug)]
pub struct DebugImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Pixel data in row-major RGBA format. Length = `width * height * 4`.
    pub pixels: Vec<u8>,
}

impl DebugImage {
    /// Create a new black (all-zero) image with the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width * height * 4) as usize],
        }
    }

    /// Set a single pixel's RGBA value.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let idx = ((y * self.width + x) * 4) as usize;
        self.pixels[idx..idx + 4].copy_from_slice(&rgba);
    }

    /// Get a pixel's RGBA value.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * self.width + x) * 4) as usize;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    /// Encode as an 8-bit RGBA PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>, TerrainError> {
        let mut buf = Vec::new();
        {
            let mut encoder =
                png::Encoder::new(std::io::Cursor::new(&mut buf), self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().map_err(TerrainError::Png)?;
            writer
                .write_image_data(&self.pixels)
                .map_err(TerrainError::Png)?;
            writer.finish().map_err(TerrainError::Png)?;
        }
        Ok(buf)
    }

    /// Encode as PNG and write to `path`.
    pub fn save_png(&self, path: &Path) -> Result<(), TerrainError> {
        let bytes = self.encode_png()?;
        std::fs::write(path, bytes).map_err(TerrainError::Io)
    }
}

/// Render a heightfield as grayscale: the lowest sample is black, the highest
/// white. A flat field renders mid-gray. Image rows follow the z axis.
pub fn render_height_field(field: &HeightField) -> DebugImage {
    let mut image = DebugImage::new(field.width() as u32, field.depth() as u32);
    let (min, max) = field.min_max();
    let range = max - min;

    for z in 0..field.depth() {
        for x in 0..field.width() {
            let t = if range > 0.0 {
                (field.at(x, z) - min) / range
            } else {
                0.5
            };
            let level = (t.clamp(0.0, 1.0) * 255.0).round() as u8;
            image.set_pixel(x as u32, z as u32, [level, level, level, 255]);
        }
    }
    image
}
