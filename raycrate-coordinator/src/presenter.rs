//! Hand-off of accepted images to the display layer

use raycrate_core::{ImageBuffer, Viewport};

/// Receives images the coordinator has accepted as current.
///
/// Called on the thread that drives the coordinator, never on a worker.
pub trait Presenter {
    fn present(&mut self, image: ImageBuffer);
}

impl<F> Presenter for F
where
    F: FnMut(ImageBuffer),
{
    fn present(&mut self, image: ImageBuffer) {
        self(image)
    }
}

/// Display-side sink that keeps the newest image fitting its display surface.
///
/// The display size is tracked separately from the coordinator, so an image
/// accepted by the coordinator is checked once more before it replaces the
/// current frame.
#[derive(Debug, Default)]
pub struct LatestFrame {
    display: Option<Viewport>,
    frame: Option<ImageBuffer>,
    accepted: usize,
    rejected: usize,
}

impl LatestFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the size the display surface currently has
    pub fn set_display(&mut self, viewport: Viewport) {
        self.display = Some(viewport);
    }

    pub fn display(&self) -> Option<Viewport> {
        self.display
    }

    /// Image currently on screen
    pub fn frame(&self) -> Option<&ImageBuffer> {
        self.frame.as_ref()
    }

    pub fn take(&mut self) -> Option<ImageBuffer> {
        self.frame.take()
    }

    /// Images that replaced the frame
    pub fn accepted(&self) -> usize {
        self.accepted
    }

    /// Images dropped because they did not fit the display
    pub fn rejected(&self) -> usize {
        self.rejected
    }
}

impl Presenter for LatestFrame {
    fn present(&mut self, image: ImageBuffer) {
        if let Some(display) = &self.display {
            if !image.matches(display) {
                log::debug!(
                    "display rejected {}x{} frame, surface expects {:?}",
                    image.width(),
                    image.height(),
                    display.pixel_size()
                );
                self.rejected += 1;
                return;
            }
        }
        self.accepted += 1;
        self.frame = Some(image);
    }
}
