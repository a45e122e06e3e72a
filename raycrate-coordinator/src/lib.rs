//! # Raycrate Coordinator
//!
//! Keeps a rendered image in sync with a resizing viewport.
//!
//! Every viewport change spawns a render job on a worker pool. Jobs run to
//! completion and are never cancelled; a finished image is presented only if
//! its size still matches the most recently reported viewport, so completions
//! may arrive in any order.

pub mod coordinator;
pub mod presenter;
pub mod logging;

pub use coordinator::*;
pub use presenter::*;
