//! Camera ray generation and per-pixel rendering

use rayon::prelude::*;
use raycrate_core::{
    intersect_sphere, Error, ImageBuffer, Point3d, Ray, Result, Rgb, Scene, Viewport, CHANNELS,
    MAX_PIXEL_DIMENSION,
};

use crate::shader::shade;

/// Rendering configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Split rows across the current rayon pool
    pub parallel: bool,
    /// Fewest rows handed to one rayon task
    pub min_rows_per_task: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            min_rows_per_task: 8,
        }
    }
}

impl RenderConfig {
    /// Enable or disable row-parallel rendering
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the minimum number of rows per rayon task
    pub fn with_min_rows_per_task(mut self, rows: usize) -> Self {
        self.min_rows_per_task = rows.max(1);
        self
    }
}

/// The world-plane rectangle at `z = 0` sampled by the camera.
///
/// The shorter viewport side always spans one world unit and the rectangle is
/// centered on the optical axis, so zoom does not depend on window size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenRect {
    pub fn for_viewport(viewport: &Viewport) -> Self {
        let min_dimension = viewport.min_dimension() as f64;
        let width = viewport.logical_width() as f64 / min_dimension;
        let height = viewport.logical_height() as f64 / min_dimension;
        Self {
            x: -0.5 * width,
            y: -0.5 * height,
            width,
            height,
        }
    }
}

/// Maps device pixels to camera rays
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    rect: ScreenRect,
    step_x: f64,
    step_y: f64,
    pixel_width: u32,
    pixel_height: u32,
}

impl Camera {
    /// Set up the camera for `viewport`.
    ///
    /// Fails with [`Error::DegenerateViewport`] when either device pixel side is
    /// below 2, since the per-pixel step would divide by zero, and with
    /// [`Error::InvalidViewport`] when a side exceeds [`MAX_PIXEL_DIMENSION`].
    pub fn new(viewport: &Viewport) -> Result<Self> {
        let (pixel_width, pixel_height) = viewport.pixel_size();
        if !viewport.is_renderable_size() {
            return Err(Error::InvalidViewport(format!(
                "{}x{} device pixels exceeds the {} pixel limit",
                pixel_width, pixel_height, MAX_PIXEL_DIMENSION
            )));
        }
        if pixel_width < 2 || pixel_height < 2 {
            return Err(Error::DegenerateViewport {
                width: pixel_width,
                height: pixel_height,
            });
        }

        let rect = ScreenRect::for_viewport(viewport);
        Ok(Self {
            rect,
            step_x: rect.width / (pixel_width - 1) as f64,
            step_y: rect.height / (pixel_height - 1) as f64,
            pixel_width,
            pixel_height,
        })
    }

    pub fn rect(&self) -> ScreenRect {
        self.rect
    }

    pub fn pixel_size(&self) -> (u32, u32) {
        (self.pixel_width, self.pixel_height)
    }

    /// Ray for pixel `(x, y)`, leaving the world plane along +z; row 0 is the top row
    pub fn ray(&self, x: u32, y: u32) -> Result<Ray> {
        let wx = self.rect.x + x as f64 * self.step_x;
        let wy = self.rect.y + y as f64 * self.step_y;
        Ray::new(Point3d::new(wx, wy, 0.0), Point3d::new(wx, wy, 1.0))
    }
}

/// Color seen along a single ray
pub fn trace(ray: &Ray, scene: &Scene) -> Result<Rgb> {
    let color = match intersect_sphere(ray, scene.sphere())? {
        Some(hit) => shade(&hit.normal, &scene.light_direction()),
        None => Rgb::BLACK,
    };
    Ok(color)
}

/// CPU ray caster for the sphere scene
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render `scene` at the device resolution of `viewport`.
    ///
    /// The output depends only on the inputs; parallel and sequential rendering
    /// produce identical buffers.
    pub fn render(&self, viewport: &Viewport, scene: &Scene) -> Result<ImageBuffer> {
        let camera = Camera::new(viewport)?;
        let (width, height) = camera.pixel_size();
        let mut image = ImageBuffer::try_new(width, height, viewport.pixel_density())?;
        let stride = image.stride();

        let render_row = |(y, row): (usize, &mut [u8])| -> Result<()> {
            for (x, px) in row.chunks_exact_mut(CHANNELS).enumerate() {
                let ray = camera.ray(x as u32, y as u32)?;
                px.copy_from_slice(&trace(&ray, scene)?.to_array());
            }
            Ok(())
        };

        if self.config.parallel {
            image
                .as_raw_mut()
                .par_chunks_mut(stride)
                .with_min_len(self.config.min_rows_per_task.max(1))
                .enumerate()
                .try_for_each(render_row)?;
        } else {
            image
                .as_raw_mut()
                .chunks_mut(stride)
                .enumerate()
                .try_for_each(render_row)?;
        }

        Ok(image)
    }
}

/// Render with the default configuration
pub fn render(viewport: &Viewport, scene: &Scene) -> Result<ImageBuffer> {
    Renderer::default().render(viewport, scene)
}
