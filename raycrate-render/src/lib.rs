//! # Raycrate Render
//!
//! CPU ray casting of the analytic sphere scene.
//!
//! This crate turns a [`Viewport`](raycrate_core::Viewport) into a finished
//! [`ImageBuffer`](raycrate_core::ImageBuffer):
//! - Lambert plus ambient shading
//! - Camera ray generation with a fixed field of view
//! - Row-parallel rendering on a rayon thread pool

pub mod shader;
pub mod renderer;
pub mod parallel;

// Re-export commonly used items
pub use shader::*;
pub use renderer::*;
pub use parallel::{build_thread_pool, global_thread_pool, ThreadPoolConfig};
