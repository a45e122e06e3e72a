//! Shared helpers for the raycrate demos

use anyhow::{bail, Context, Result};
use raycrate::ImageBuffer;
use std::path::Path;

/// Convert a rendered buffer into an `image` RGB image
pub fn to_rgb_image(buffer: ImageBuffer) -> Result<image::RgbImage> {
    let (width, height) = buffer.dimensions();
    image::RgbImage::from_raw(width, height, buffer.into_raw())
        .context("pixel buffer does not match its dimensions")
}

/// Write a rendered buffer as PNG
pub fn save_png(buffer: ImageBuffer, path: &Path) -> Result<()> {
    to_rgb_image(buffer)?
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))
}

/// Parse a `WIDTHxHEIGHT` logical size
pub fn parse_size(s: &str) -> Result<(u32, u32)> {
    let Some((w, h)) = s.trim().split_once(['x', 'X']) else {
        bail!("expected WIDTHxHEIGHT, got {:?}", s);
    };
    let width = w.parse().with_context(|| format!("bad width in {:?}", s))?;
    let height = h.parse().with_context(|| format!("bad height in {:?}", s))?;
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("800x600").unwrap(), (800, 600));
        assert_eq!(parse_size(" 3X2 ").unwrap(), (3, 2));
        assert!(parse_size("800").is_err());
        assert!(parse_size("ax2").is_err());
    }

    #[test]
    fn test_to_rgb_image_keeps_pixels() {
        let mut buffer = ImageBuffer::new(2, 1, 1.0);
        buffer.as_raw_mut()[3] = 9;
        let image = to_rgb_image(buffer).unwrap();

        assert_eq!(image.dimensions(), (2, 1));
        assert_eq!(image.get_pixel(1, 0).0, [9, 0, 0]);
    }
}
