//! Resize-driven render scheduling
//!
//! The thread that receives viewport changes owns the [`RenderCoordinator`].
//! Each change records the new viewport in a shared [`ViewportSlot`] and spawns
//! a render job on a rayon pool. A finished job compares its image against the
//! slot: stale images are dropped on the worker, current ones travel over a
//! channel and are presented the next time the owner calls [`RenderCoordinator::poll`].

use parking_lot::RwLock;
use rayon::ThreadPool;
use raycrate_core::{Error, ImageBuffer, Result, Scene, Viewport};
use raycrate_render::{build_thread_pool, global_thread_pool, RenderConfig, Renderer, ThreadPoolConfig};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::presenter::Presenter;

/// Identifier of one render job, increasing in spawn order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JobId(pub u64);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "job#{}", self.0)
    }
}

/// The most recently reported viewport, readable from any thread.
///
/// Only the owning [`RenderCoordinator`] writes it:
///
/// ```compile_fail
/// let slot = raycrate_coordinator::ViewportSlot::new();
/// slot.set(raycrate_core::Viewport::new(4, 4, 1.0).unwrap());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ViewportSlot(Arc<RwLock<Option<Viewport>>>);

impl ViewportSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<Viewport> {
        *self.0.read()
    }

    pub(crate) fn set(&self, viewport: Viewport) {
        *self.0.write() = Some(viewport);
    }

    /// Whether `image` was rendered for the current viewport
    pub fn accepts(&self, image: &ImageBuffer) -> bool {
        self.0
            .read()
            .as_ref()
            .map_or(false, |viewport| image.matches(viewport))
    }
}

/// Message sent from a finished job to the coordinator
#[derive(Debug)]
pub enum RenderMsg {
    /// The image matched the current viewport when the job finished
    Finished { job: JobId, image: ImageBuffer },
    /// The viewport changed while the job was running; the image was dropped
    Stale { job: JobId, size: (u32, u32) },
    /// Rendering failed; no image exists
    Failed {
        job: JobId,
        viewport: Viewport,
        error: Error,
    },
}

/// Outcome of offering a finished image to the coordinator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Presented,
    Discarded,
}

/// Counts of completions handled by one poll
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollSummary {
    pub presented: usize,
    pub discarded: usize,
    pub failed: usize,
}

impl PollSummary {
    /// Total completions handled
    pub fn handled(&self) -> usize {
        self.presented + self.discarded + self.failed
    }
}

impl std::ops::AddAssign for PollSummary {
    fn add_assign(&mut self, rhs: Self) {
        self.presented += rhs.presented;
        self.discarded += rhs.discarded;
        self.failed += rhs.failed;
    }
}

/// Coordinator configuration
#[derive(Debug, Clone, Default)]
pub struct CoordinatorConfig {
    pub render: RenderConfig,
    /// Dedicated worker pool; `None` uses the process-wide render pool
    pub thread_pool: Option<ThreadPoolConfig>,
}

impl CoordinatorConfig {
    pub fn with_render(mut self, render: RenderConfig) -> Self {
        self.render = render;
        self
    }

    pub fn with_thread_pool(mut self, thread_pool: ThreadPoolConfig) -> Self {
        self.thread_pool = Some(thread_pool);
        self
    }
}

/// Schedules one render per viewport change and presents only current results
pub struct RenderCoordinator {
    scene: Arc<Scene>,
    renderer: Arc<Renderer>,
    pool: Arc<ThreadPool>,
    last_known: ViewportSlot,
    next_job: u64,
    in_flight: usize,
    tx: mpsc::Sender<RenderMsg>,
    rx: mpsc::Receiver<RenderMsg>,
}

impl RenderCoordinator {
    /// Create a coordinator rendering `scene`
    pub fn new(scene: Arc<Scene>, config: CoordinatorConfig) -> Result<Self> {
        let pool = match &config.thread_pool {
            Some(pool_config) => Arc::new(build_thread_pool(pool_config)?),
            None => global_thread_pool()?,
        };
        let (tx, rx) = mpsc::channel();

        Ok(Self {
            scene,
            renderer: Arc::new(Renderer::new(config.render)),
            pool,
            last_known: ViewportSlot::new(),
            next_job: 0,
            in_flight: 0,
            tx,
            rx,
        })
    }

    pub fn scene(&self) -> &Arc<Scene> {
        &self.scene
    }

    /// Shared handle to the last known viewport
    pub fn viewport_slot(&self) -> ViewportSlot {
        self.last_known.clone()
    }

    pub fn last_known_viewport(&self) -> Option<Viewport> {
        self.last_known.get()
    }

    /// Device pixel size an image must have to be presented now
    pub fn expected_pixel_size(&self) -> Option<(u32, u32)> {
        self.last_known.get().map(|viewport| viewport.pixel_size())
    }

    /// Jobs spawned whose completion has not been handled yet
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Record `viewport` as current and spawn a render job for it.
    ///
    /// Every call spawns a job; earlier jobs keep running and are judged
    /// against whatever viewport is current when they finish.
    pub fn on_viewport_changed(&mut self, viewport: Viewport) -> JobId {
        self.last_known.set(viewport);

        let job = JobId(self.next_job);
        self.next_job += 1;
        self.in_flight += 1;

        let scene = Arc::clone(&self.scene);
        let renderer = Arc::clone(&self.renderer);
        let slot = self.last_known.clone();
        let tx = self.tx.clone();

        log::debug!(
            "{} spawned for {}x{} @ {}",
            job,
            viewport.logical_width(),
            viewport.logical_height(),
            viewport.pixel_density()
        );

        self.pool.spawn(move || {
            let msg = run_job(job, viewport, &slot, || renderer.render(&viewport, &scene));
            // The coordinator may be gone; its result is not wanted then.
            let _ = tx.send(msg);
        });

        job
    }

    /// Present `image` if it matches the current viewport, otherwise drop it
    pub fn on_job_complete<P: Presenter + ?Sized>(
        &mut self,
        image: ImageBuffer,
        presenter: &mut P,
    ) -> Completion {
        if self.last_known.accepts(&image) {
            presenter.present(image);
            Completion::Presented
        } else {
            log::debug!(
                "discarding stale {}x{} image, current viewport expects {:?}",
                image.width(),
                image.height(),
                self.expected_pixel_size()
            );
            Completion::Discarded
        }
    }

    /// Handle every completion already delivered, without blocking
    pub fn poll<P: Presenter + ?Sized>(&mut self, presenter: &mut P) -> PollSummary {
        let mut summary = PollSummary::default();
        while let Ok(msg) = self.rx.try_recv() {
            self.handle(msg, presenter, &mut summary);
        }
        summary
    }

    /// Block up to `timeout` for the next completion, then drain the rest
    pub fn wait<P: Presenter + ?Sized>(&mut self, timeout: Duration, presenter: &mut P) -> PollSummary {
        let mut summary = PollSummary::default();
        if self.in_flight == 0 {
            return summary;
        }
        if let Ok(msg) = self.rx.recv_timeout(timeout) {
            self.handle(msg, presenter, &mut summary);
        }
        summary += self.poll(presenter);
        summary
    }

    /// Keep handling completions until no job is in flight or `timeout` elapses
    pub fn wait_idle<P: Presenter + ?Sized>(
        &mut self,
        timeout: Duration,
        presenter: &mut P,
    ) -> PollSummary {
        let deadline = Instant::now() + timeout;
        let mut summary = self.poll(presenter);

        while self.in_flight > 0 {
            let now = Instant::now();
            if now >= deadline {
                log::warn!("{} render jobs still running after {:?}", self.in_flight, timeout);
                break;
            }
            summary += self.wait(deadline - now, presenter);
        }
        summary
    }

    fn handle<P: Presenter + ?Sized>(
        &mut self,
        msg: RenderMsg,
        presenter: &mut P,
        summary: &mut PollSummary,
    ) {
        self.in_flight = self.in_flight.saturating_sub(1);

        match msg {
            RenderMsg::Finished { job, image } => match self.on_job_complete(image, presenter) {
                Completion::Presented => {
                    log::debug!("{} presented", job);
                    summary.presented += 1;
                }
                Completion::Discarded => summary.discarded += 1,
            },
            RenderMsg::Stale { job, size } => {
                log::debug!("{} finished stale at {}x{}", job, size.0, size.1);
                summary.discarded += 1;
            }
            RenderMsg::Failed {
                job,
                viewport,
                error,
            } => {
                log::warn!(
                    "{} failed for {}x{} @ {}: {}",
                    job,
                    viewport.logical_width(),
                    viewport.logical_height(),
                    viewport.pixel_density(),
                    error
                );
                summary.failed += 1;
            }
        }
    }
}

/// Render on the current worker and classify the outcome against `slot`.
///
/// A panic inside `render` becomes [`Error::JobPanicked`]; it must not unwind
/// into the pool, where rayon would abort the process.
fn run_job<F>(job: JobId, viewport: Viewport, slot: &ViewportSlot, render: F) -> RenderMsg
where
    F: FnOnce() -> Result<ImageBuffer>,
{
    let result = panic::catch_unwind(AssertUnwindSafe(render)).unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        Err(Error::JobPanicked(message))
    });

    match result {
        Ok(image) if slot.accepts(&image) => RenderMsg::Finished { job, image },
        Ok(image) => RenderMsg::Stale {
            job,
            size: image.dimensions(),
        },
        Err(error) => RenderMsg::Failed {
            job,
            viewport,
            error,
        },
    }
}

impl fmt::Debug for RenderCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderCoordinator")
            .field("last_known", &self.last_known.get())
            .field("next_job", &self.next_job)
            .field("in_flight", &self.in_flight)
            .finish()
    }
}
