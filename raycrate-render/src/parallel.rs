//! Thread pool management for render jobs
//!
//! Render jobs and the row-parallel loop inside each render share one rayon
//! pool. Callers can build a dedicated pool from a [`ThreadPoolConfig`] or use
//! the lazily created process-wide pool.

use rayon::{ThreadPool, ThreadPoolBuilder};
use raycrate_core::{Error, Result};
use std::sync::{Arc, OnceLock};

static GLOBAL_THREAD_POOL: OnceLock<Arc<ThreadPool>> = OnceLock::new();

/// Thread pool configuration for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadPoolConfig {
    /// Number of threads to use (None = one per logical CPU)
    pub num_threads: Option<usize>,
    /// Thread stack size in bytes
    pub stack_size: Option<usize>,
    /// Thread name prefix
    pub thread_name_prefix: String,
}

impl ThreadPoolConfig {
    /// Set number of threads
    pub fn with_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads);
        self
    }

    /// Set stack size
    pub fn with_stack_size(mut self, stack_size: usize) -> Self {
        self.stack_size = Some(stack_size);
        self
    }

    /// Set the prefix used to name worker threads
    pub fn with_thread_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }
}

impl Default for ThreadPoolConfig {
    fn default() -> Self {
        Self {
            num_threads: None,
            stack_size: None,
            thread_name_prefix: "raycrate-render".to_string(),
        }
    }
}

/// Build a thread pool from `config`
pub fn build_thread_pool(config: &ThreadPoolConfig) -> Result<ThreadPool> {
    let mut builder = ThreadPoolBuilder::new()
        .num_threads(config.num_threads.unwrap_or_else(num_cpus::get));

    if let Some(stack_size) = config.stack_size {
        builder = builder.stack_size(stack_size);
    }

    if !config.thread_name_prefix.is_empty() {
        let prefix = config.thread_name_prefix.clone();
        builder = builder.thread_name(move |index| format!("{}-{}", prefix, index));
    }

    let pool = builder
        .build()
        .map_err(|e| Error::ThreadPool(format!("Failed to create thread pool: {}", e)))?;

    log::debug!(
        "built render thread pool with {} threads",
        pool.current_num_threads()
    );
    Ok(pool)
}

/// Get the process-wide render pool, creating it with defaults on first use
pub fn global_thread_pool() -> Result<Arc<ThreadPool>> {
    if let Some(pool) = GLOBAL_THREAD_POOL.get() {
        return Ok(pool.clone());
    }

    let pool = Arc::new(build_thread_pool(&ThreadPoolConfig::default())?);
    // A racing initializer may have won; either pool is equivalent.
    Ok(GLOBAL_THREAD_POOL.get_or_init(|| pool).clone())
}
