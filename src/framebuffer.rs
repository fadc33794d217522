//! RGBA pixel buffer used as the source of image plots.
//!
//! Image plots sample this buffer two pixel rows per terminal cell, so it
//! only needs cheap per-pixel access and bulk construction from decoded
//! image bytes.

use crate::color::Rgba;
use crate::error::{Error, Result};
use trueno::Vector;

/// Row-major RGBA pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    /// Width in pixels.
    width: u32,
    /// Height in pixels.
    height: u32,
    /// RGBA pixels in row-major order, 4 bytes per pixel.
    pixels: Vec<u8>,
}

impl Framebuffer {
    /// Create a transparent framebuffer with the given dimensions.
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use termplot::framebuffer::Framebuffer;
    ///
    /// let fb = Framebuffer::new(30, 20).unwrap();
    /// assert_eq!(fb.width(), 30);
    /// assert_eq!(fb.height(), 20);
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        })
    }

    /// Wrap already decoded RGBA bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the byte count does not match `width × height × 4`.
    pub fn from_rgba_bytes(width: u32, height: u32, bytes: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 || bytes.len() != width as usize * height as usize * 4 {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok(Self { width, height, pixels: bytes })
    }

    /// Get the width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Get the height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Get the raw pixel data as a slice.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Clear the framebuffer to a solid color.
    pub fn clear(&mut self, color: Rgba) {
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.r, color.g, color.b, color.a]);
        }
    }

    /// Get the color at a specific pixel coordinate.
    ///
    /// Returns `None` if the coordinates are out of bounds.
    #[must_use]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = self.pixel_index(x, y);
        Some(Rgba::new(
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ))
    }

    /// Set the color at a specific pixel coordinate.
    ///
    /// Does nothing if the coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = self.pixel_index(x, y);
        self.pixels[idx..idx + 4].copy_from_slice(&[color.r, color.g, color.b, color.a]);
    }

    /// Luminance statistics `(min, max, mean)` in `0.0..=255.0`.
    #[must_use]
    pub fn luminance_stats(&self) -> (f32, f32, f32) {
        let luminances: Vec<f32> = self
            .pixels
            .chunks_exact(4)
            .map(|c| 0.2126 * f32::from(c[0]) + 0.7152 * f32::from(c[1]) + 0.0722 * f32::from(c[2]))
            .collect();

        let vec = Vector::from_vec(luminances);
        let min = vec.min().unwrap_or(0.0);
        let max = vec.max().unwrap_or(255.0);
        let mean = vec.mean().unwrap_or(127.5);

        (min, max, mean)
    }

    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }
}
