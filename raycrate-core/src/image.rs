//! RGB pixel buffer produced by a render

use crate::error::{Error, Result};
use crate::viewport::Viewport;

/// An 8-bit per channel RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

/// Bytes per pixel in [`ImageBuffer::as_raw`]
pub const CHANNELS: usize = 3;

/// A finished, row-major RGB8 image tagged with the density it was rendered for
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    pixel_density: f64,
    pixels: Vec<u8>,
}

impl ImageBuffer {
    /// Create a black image.
    ///
    /// Panics when the byte length overflows `usize`; see [`ImageBuffer::try_new`].
    pub fn new(width: u32, height: u32, pixel_density: f64) -> Self {
        match Self::try_new(width, height, pixel_density) {
            Ok(image) => image,
            Err(e) => panic!("{}", e),
        }
    }

    /// Create a black image, failing when its byte length does not fit in memory
    pub fn try_new(width: u32, height: u32, pixel_density: f64) -> Result<Self> {
        let len = byte_len(width, height).ok_or_else(|| {
            Error::InvalidViewport(format!("{}x{} image is too large to allocate", width, height))
        })?;
        Ok(Self {
            width,
            height,
            pixel_density,
            pixels: vec![0; len],
        })
    }

    /// Wrap raw row-major RGB bytes, returning `None` when the length does not fit
    pub fn from_raw(width: u32, height: u32, pixel_density: f64, pixels: Vec<u8>) -> Option<Self> {
        if byte_len(width, height) != Some(pixels.len()) {
            return None;
        }
        Some(Self {
            width,
            height,
            pixel_density,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixel_density(&self) -> f64 {
        self.pixel_density
    }

    /// Byte length of one row
    pub fn stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Color at `(x, y)`; row 0 is the top row
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = y as usize * self.stride() + x as usize * CHANNELS;
        let px = &self.pixels[offset..offset + CHANNELS];
        Some(Rgb::new(px[0], px[1], px[2]))
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.pixels
    }

    pub fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }

    /// Iterate over all pixels in row-major order
    pub fn pixels(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.pixels
            .chunks_exact(CHANNELS)
            .map(|px| Rgb::new(px[0], px[1], px[2]))
    }

    /// Whether this image is what a render of `viewport` would produce in size and density
    pub fn matches(&self, viewport: &Viewport) -> bool {
        self.dimensions() == viewport.pixel_size() && self.pixel_density == viewport.pixel_density()
    }
}

fn byte_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(CHANNELS)
        .filter(|&len| len <= isize::MAX as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_image_is_black() {
        let image = ImageBuffer::new(4, 3, 1.0);
        assert_eq!(image.as_raw().len(), 4 * 3 * CHANNELS);
        assert!(image.pixels().all(|px| px == Rgb::BLACK));
    }

    #[test]
    fn test_pixel_addressing_is_row_major() {
        let mut image = ImageBuffer::new(3, 2, 1.0);
        let stride = image.stride();
        image.as_raw_mut()[stride + 2 * CHANNELS] = 200;

        assert_eq!(image.pixel(2, 1), Some(Rgb::new(200, 0, 0)));
        assert_eq!(image.pixel(1, 2), None);
        assert_eq!(image.pixel(3, 0), None);
    }

    #[test]
    fn test_try_new_rejects_overflowing_size() {
        assert!(ImageBuffer::try_new(3, 2, 1.0).is_ok());
        assert!(matches!(
            ImageBuffer::try_new(u32::MAX, u32::MAX, 1.0),
            Err(Error::InvalidViewport(_))
        ));
    }

    #[test]
    fn test_from_raw_checks_length() {
        assert!(ImageBuffer::from_raw(2, 2, 1.0, vec![0; 12]).is_some());
        assert!(ImageBuffer::from_raw(2, 2, 1.0, vec![0; 11]).is_none());
    }

    #[test]
    fn test_matches_compares_size_and_density() {
        let viewport = Viewport::new(10, 5, 2.0).unwrap();
        assert!(ImageBuffer::new(20, 10, 2.0).matches(&viewport));
        assert!(!ImageBuffer::new(20, 10, 1.0).matches(&viewport));
        assert!(!ImageBuffer::new(10, 5, 2.0).matches(&viewport));
    }
}
