//! Render output buffer and its encoders.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::{Color, RenderResult};
use lumen_math::Interval;

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    const INTENSITY: Interval = Interval::new(0.0, 1.0);

    let to_byte = |c: f64| (255.0 * INTENSITY.clamp(linear_to_gamma(c))) as u8;
    [to_byte(color.x), to_byte(color.y), to_byte(color.z), 255]
}

/// Row-major buffer of linear colors, index = y * width + x.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// One scanline.
    pub fn row(&self, y: u32) -> &[Color] {
        let start = self.index(0, y);
        &self.pixels[start..start + self.width as usize]
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| color_to_rgba(*c)).collect()
    }

    /// Convert to tightly packed RGB bytes.
    pub fn to_rgb(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|c| {
                let [r, g, b, _] = color_to_rgba(*c);
                [r, g, b]
            })
            .collect()
    }

    /// Write as ASCII PPM (P3), one pixel per line.
    pub fn write_ppm<W: Write>(&self, mut writer: W) -> RenderResult<()> {
        writeln!(writer, "P3")?;
        writeln!(writer, "{} {}", self.width, self.height)?;
        writeln!(writer, "255")?;

        for color in &self.pixels {
            let [r, g, b, _] = color_to_rgba(*color);
            writeln!(writer, "{} {} {}", r, g, b)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Save to `path`. `.ppm` is written as ASCII PPM, anything else is
    /// encoded by the `image` crate from the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        let path = path.as_ref();
        let is_ppm = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("ppm"));

        if is_ppm {
            let file = File::create(path)?;
            self.write_ppm(BufWriter::new(file))?;
        } else {
            ::image::save_buffer(
                path,
                &self.to_rgb(),
                self.width,
                self.height,
                ::image::ColorType::Rgb8,
            )?;
        }

        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(-1.0), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 1e-12);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_color_to_rgba_clamps() {
        assert_eq!(color_to_rgba(Color::ZERO), [0, 0, 0, 255]);
        assert_eq!(color_to_rgba(Color::ONE), [255, 255, 255, 255]);
        assert_eq!(color_to_rgba(Color::new(15.0, -2.0, 0.25)), [255, 0, 127, 255]);
    }

    #[test]
    fn test_row_major_indexing() {
        let mut image = ImageBuffer::new(3, 2);
        image.set(2, 1, Color::ONE);

        assert_eq!(image.pixels.len(), 6);
        assert_eq!(image.pixels[5], Color::ONE);
        assert_eq!(image.get(2, 1), Color::ONE);
        assert_eq!(image.row(1), &[Color::ZERO, Color::ZERO, Color::ONE]);
    }

    #[test]
    fn test_to_rgba_layout() {
        let mut image = ImageBuffer::new(2, 1);
        image.set(1, 0, Color::ONE);
        assert_eq!(image.to_rgba(), vec![0, 0, 0, 255, 255, 255, 255, 255]);
        assert_eq!(image.to_rgb(), vec![0, 0, 0, 255, 255, 255]);
    }

    #[test]
    fn test_write_ppm() {
        let mut image = ImageBuffer::new(2, 2);
        image.set(0, 0, Color::ONE);
        image.set(1, 1, Color::new(0.25, 0.0, 1.0));

        let mut out = Vec::new();
        image.write_ppm(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "P3\n2 2\n255\n255 255 255\n0 0 0\n0 0 0\n127 0 255\n"
        );
    }
}
