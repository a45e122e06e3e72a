//! # raycrate
//!
//! An analytic sphere ray caster that keeps its image in sync with a resizing viewport.
//!
//! This is the umbrella crate that provides convenient access to all raycrate functionality.
//! You can use this crate to get everything in one place, or use individual crates for
//! more granular control over dependencies.
//!
//! ## Features
//!
//! - **Core**: Geometry, viewport, image and scene types
//! - **Render**: Shading and row-parallel CPU ray casting
//! - **Coordinator**: Background render jobs with stale result discard
//!
//! ## Quick Start
//!
//! ```rust
//! use raycrate::prelude::*;
//!
//! let viewport = Viewport::new(64, 48, 1.0).unwrap();
//! let image = render(&viewport, &Scene::default()).unwrap();
//! assert_eq!(image.dimensions(), (64, 48));
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables render and coordinator
//! - `render`: Shader and renderer
//! - `coordinator`: Render coordinator and logging setup (implies `render`)

// Re-export core functionality
pub use raycrate_core::*;

// Re-export sub-crates
#[cfg(feature = "render")]
pub use raycrate_render as render;

#[cfg(feature = "coordinator")]
pub use raycrate_coordinator as coordinator;

/// Convenient imports for common use cases
pub mod prelude {
    pub use raycrate_core::*;

    #[cfg(feature = "render")]
    pub use raycrate_render::*;

    #[cfg(feature = "coordinator")]
    pub use raycrate_coordinator::*;

    #[cfg(feature = "coordinator")]
    pub use raycrate_coordinator::logging::{init_logging, LoggingConfig};
}
