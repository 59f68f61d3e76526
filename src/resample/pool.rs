//! Worker pool.

use std::sync::OnceLock;

use crate::common::{Error, Result};

/// Worker-thread cap; oversubscribing past the processor count has no
/// measured benefit.
pub(crate) const MAX_WORKERS: usize = 64;

/// A persistent worker pool for parallel resampling.
///
/// Workers are spawned once and reused across frames; dropping the pool
/// joins them. [`default_pool`] provides a lazily-built process-wide
/// instance.
///
/// A resample must not be issued against a pool from inside one of that
/// pool's own jobs; callers needing concurrent resamples should use
/// distinct pools or the serial entry point. This contract is documented,
/// not enforced.
pub struct ThreadPool {
    inner: rayon::ThreadPool,
    threads: usize,
}

impl ThreadPool {
    /// Creates a pool with `max_threads` workers, clamped to the 64-worker
    /// cap; `0` selects the processor count.
    pub fn new(max_threads: usize) -> Result<ThreadPool> {
        let threads = if max_threads == 0 {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        } else {
            max_threads
        }
        .min(MAX_WORKERS);

        let inner = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("loupe-worker-{i}"))
            .build()
            .map_err(|e| Error::PoolBuild(e.to_string()))?;

        Ok(ThreadPool { inner, threads })
    }

    /// Number of worker threads in the pool.
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Runs `op` inside the pool and waits for every job it spawned; the
    /// return establishes happens-before on all job writes.
    pub(crate) fn scope<'scope, OP>(&self, op: OP)
    where
        OP: FnOnce(&rayon::Scope<'scope>) + Send,
    {
        self.inner.scope(op);
    }
}

/// Returns the process-wide default pool, building it on first use.
pub fn default_pool() -> &'static ThreadPool {
    static POOL: OnceLock<ThreadPool> = OnceLock::new();
    POOL.get_or_init(|| {
        ThreadPool::new(0).unwrap_or_else(|e| panic!("Failed to build default worker pool: {e}"))
    })
}
