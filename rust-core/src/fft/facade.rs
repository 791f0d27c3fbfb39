//! Transform facade: engine dispatch, inverse, real input and convolution

use std::sync::Arc;

use num_complex::Complex64;
use tracing::debug;

use super::bitrev::mirror;
use super::bluestein::BluesteinEngine;
use super::pool::WorkerPool;
use super::radix2::{Radix2Engine, MIN_GRAIN};
use super::twiddle::TwiddleCache;
use crate::error::FftError;
use crate::utils::{is_power_of_two, to_complex};

/// Transform engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FftConfig {
    /// Worker threads for radix-2 stages; 0 uses the host's parallelism
    pub workers: usize,

    /// Lower bound on butterflies per work item (at least 2)
    pub min_grain: usize,
}

impl Default for FftConfig {
    fn default() -> Self {
        Self {
            workers: 0,
            min_grain: MIN_GRAIN,
        }
    }
}

impl FftConfig {
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_min_grain(mut self, min_grain: usize) -> Self {
        self.min_grain = min_grain;
        self
    }
}

/// Forward/inverse DFT of any length
///
/// Power-of-two lengths go to the radix-2 engine, everything else to
/// Bluestein. Both share one [`TwiddleCache`]. `Fft` is `Send + Sync`;
/// share it by reference or `Arc`.
#[derive(Debug)]
pub struct Fft {
    twiddles: Arc<TwiddleCache>,
    radix2: Radix2Engine,
    bluestein: BluesteinEngine,
}

impl Default for Fft {
    fn default() -> Self {
        Self::from_parts(
            Arc::new(TwiddleCache::new()),
            WorkerPool::default(),
            MIN_GRAIN,
        )
    }
}

impl Fft {
    /// Create a facade with its own twiddle cache
    pub fn new(config: FftConfig) -> Result<Self, FftError> {
        Self::with_cache(config, Arc::new(TwiddleCache::new()))
    }

    /// Create a facade sharing an existing twiddle cache
    pub fn with_cache(config: FftConfig, twiddles: Arc<TwiddleCache>) -> Result<Self, FftError> {
        let pool = WorkerPool::new(config.workers)?;
        Ok(Self::from_parts(twiddles, pool, config.min_grain))
    }

    fn from_parts(twiddles: Arc<TwiddleCache>, pool: WorkerPool, min_grain: usize) -> Self {
        Self {
            radix2: Radix2Engine::new(Arc::clone(&twiddles), pool, min_grain),
            bluestein: BluesteinEngine::new(Arc::clone(&twiddles)),
            twiddles,
        }
    }

    pub fn twiddles(&self) -> &Arc<TwiddleCache> {
        &self.twiddles
    }

    /// Forward DFT, X[k] = Σ x[n]·e^{-2πikn/N}
    pub fn forward(&self, x: &[Complex64]) -> Vec<Complex64> {
        if x.len() <= 1 {
            return x.to_vec();
        }
        if is_power_of_two(x.len()) {
            self.radix2.transform(x)
        } else {
            debug!(len = x.len(), "bluestein transform");
            self.bluestein.transform(x, &self.radix2)
        }
    }

    /// Inverse DFT, scaled by 1/N
    pub fn inverse(&self, x: &[Complex64]) -> Vec<Complex64> {
        if x.is_empty() {
            return Vec::new();
        }
        let scale = 1.0 / x.len() as f64;
        let mut r = self.forward(&mirror(x));
        for v in r.iter_mut() {
            *v *= scale;
        }
        r
    }

    /// Forward DFT of a real sequence
    pub fn forward_real(&self, x: &[f64]) -> Vec<Complex64> {
        self.forward(&to_complex(x))
    }

    /// Inverse DFT of a real sequence
    pub fn inverse_real(&self, x: &[f64]) -> Vec<Complex64> {
        self.inverse(&to_complex(x))
    }

    /// Circular convolution of two equal-length sequences
    pub fn convolve(&self, x: &[Complex64], y: &[Complex64]) -> Result<Vec<Complex64>, FftError> {
        if x.len() != y.len() {
            return Err(FftError::LengthMismatch {
                left: x.len(),
                right: y.len(),
            });
        }

        let fx = self.forward(x);
        let fy = self.forward(y);
        let product: Vec<Complex64> = fx.iter().zip(&fy).map(|(a, b)| a * b).collect();
        Ok(self.inverse(&product))
    }

    /// Replace the worker pool; 0 resets to the host's parallelism
    pub fn set_worker_pool_size(&self, workers: usize) -> Result<(), FftError> {
        self.radix2.set_workers(workers)
    }

    pub fn workers(&self) -> usize {
        self.radix2.workers()
    }
}
