//! Worker pool backing the radix-2 butterfly stages

use std::sync::{Arc, PoisonError, RwLock};

use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

use crate::error::FftError;

/// Replaceable rayon pool
///
/// `None` means "run on rayon's global pool", which is sized to the host's
/// available parallelism. A transform clones the current `Arc` before it
/// starts, so replacing the pool never affects a call already in flight.
#[derive(Debug, Default)]
pub struct WorkerPool {
    pool: RwLock<Option<Arc<ThreadPool>>>,
}

impl WorkerPool {
    /// Pool with `workers` threads, or the host default for 0
    pub fn new(workers: usize) -> Result<Self, FftError> {
        Ok(Self {
            pool: RwLock::new(build_pool(workers)?),
        })
    }

    /// Replace the pool; 0 resets to the host default
    pub fn resize(&self, workers: usize) -> Result<(), FftError> {
        let pool = build_pool(workers)?;
        *self.pool.write().unwrap_or_else(PoisonError::into_inner) = pool;
        debug!(workers = self.workers(), "replaced fft worker pool");
        Ok(())
    }

    /// Number of threads the next transform will use
    pub fn workers(&self) -> usize {
        match self.current() {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    /// Run `op` inside the pool, passing it the worker count
    ///
    /// Parallel iterators used by `op` execute on this pool's threads and
    /// `install` returns once they have all finished.
    pub fn install<R, OP>(&self, op: OP) -> R
    where
        R: Send,
        OP: FnOnce(usize) -> R + Send,
    {
        match self.current() {
            Some(pool) => {
                let workers = pool.current_num_threads();
                pool.install(|| op(workers))
            }
            None => op(rayon::current_num_threads()),
        }
    }

    fn current(&self) -> Option<Arc<ThreadPool>> {
        self.pool
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

fn build_pool(workers: usize) -> Result<Option<Arc<ThreadPool>>, FftError> {
    if workers == 0 {
        return Ok(None);
    }
    let pool = ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|index| format!("fft-worker-{index}"))
        .build()
        .map_err(|err| FftError::WorkerPool(err.to_string()))?;
    Ok(Some(Arc::new(pool)))
}
