//! Viewport descriptor captured from the windowing layer

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Largest device pixel side a render will allocate
pub const MAX_PIXEL_DIMENSION: u32 = 16_384;

/// Snapshot of an on-screen viewport in logical units plus its device pixel density.
///
/// Values are validated on construction and never mutated afterwards; each render
/// job works from its own copy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawViewport")]
pub struct Viewport {
    logical_width: u32,
    logical_height: u32,
    pixel_density: f64,
}

impl Viewport {
    /// Create a viewport descriptor
    pub fn new(logical_width: u32, logical_height: u32, pixel_density: f64) -> Result<Self> {
        if logical_width == 0 || logical_height == 0 {
            return Err(Error::InvalidViewport(format!(
                "logical size must be at least 1x1, got {}x{}",
                logical_width, logical_height
            )));
        }
        if !pixel_density.is_finite() || pixel_density <= 0.0 {
            return Err(Error::InvalidViewport(format!(
                "pixel density must be positive, got {}",
                pixel_density
            )));
        }

        for logical in [logical_width, logical_height] {
            if scale_dimension(logical, pixel_density) > u32::MAX as f64 {
                return Err(Error::InvalidViewport(format!(
                    "{}x{} at density {} does not fit a device pixel size",
                    logical_width, logical_height, pixel_density
                )));
            }
        }

        Ok(Self {
            logical_width,
            logical_height,
            pixel_density,
        })
    }

    /// Whether a buffer of this device size stays within [`MAX_PIXEL_DIMENSION`]
    pub fn is_renderable_size(&self) -> bool {
        let (width, height) = self.pixel_size();
        width <= MAX_PIXEL_DIMENSION && height <= MAX_PIXEL_DIMENSION
    }

    pub fn logical_width(&self) -> u32 {
        self.logical_width
    }

    pub fn logical_height(&self) -> u32 {
        self.logical_height
    }

    pub fn pixel_density(&self) -> f64 {
        self.pixel_density
    }

    /// Length of the shorter logical side
    pub fn min_dimension(&self) -> u32 {
        self.logical_width.min(self.logical_height)
    }

    /// Device pixel size of the image buffer rendered for this viewport.
    ///
    /// Each side is `round(logical * density)`, rounding halves away from zero.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            scale_dimension(self.logical_width, self.pixel_density) as u32,
            scale_dimension(self.logical_height, self.pixel_density) as u32,
        )
    }
}

/// Field layout accepted from serialized data, checked by [`Viewport::new`]
#[derive(Deserialize)]
struct RawViewport {
    logical_width: u32,
    logical_height: u32,
    pixel_density: f64,
}

impl TryFrom<RawViewport> for Viewport {
    type Error = Error;

    fn try_from(raw: RawViewport) -> Result<Self> {
        Viewport::new(raw.logical_width, raw.logical_height, raw.pixel_density)
    }
}

// Always finite and non-negative for a validated density; range checked by `Viewport::new`.
fn scale_dimension(logical: u32, density: f64) -> f64 {
    (logical as f64 * density).round()
}
