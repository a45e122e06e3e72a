//! Core data structures for raycrate
//!
//! This crate provides the fundamental types for the analytic sphere ray caster:
//! vectors and rays, the ray/sphere intersection solver, the viewport descriptor,
//! the RGB image buffer and the fixed scene description.

pub mod geometry;
pub mod viewport;
pub mod image;
pub mod scene;
pub mod error;

pub use geometry::*;
pub use viewport::*;
pub use image::*;
pub use scene::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3};
