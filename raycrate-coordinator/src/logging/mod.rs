//! Logger setup for raycrate binaries.
//!
//! The render and coordinator crates only go through the `log` macros. A
//! binary picks a sink by calling [`init_logging`] before it creates a
//! coordinator; tests and embedders are free to install their own.

mod init;

pub use init::{init_logging, LoggingConfig};
