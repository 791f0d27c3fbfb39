//! Iterative radix-2 decimation-in-time transform
//!
//! The input is bit-reverse reordered, then combined stage by stage
//! (2, 4, 8, ... points). Each stage reads one buffer and writes the other;
//! the buffers swap between stages. Butterflies within a stage are split into
//! [`WorkItem`]s and run on the worker pool, and a stage only starts after
//! every item of the previous one has finished.

use std::sync::Arc;

use num_complex::Complex64;
use rayon::prelude::*;
use tracing::trace;

use super::bitrev::{bit_reverse_permute, mirror};
use super::pool::WorkerPool;
use super::twiddle::TwiddleCache;
use crate::error::FftError;
use crate::utils::{is_power_of_two, log2};

/// Smallest number of butterflies handed to one worker
pub const MIN_GRAIN: usize = 2;

/// Contiguous range `[start, end)` of butterfly indices within one stage
///
/// Butterfly `t` of a stage with half-size `s2` belongs to block `t / s2`
/// and uses twiddle `t % s2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkItem {
    pub start: usize,
    pub end: usize,
}

impl WorkItem {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Butterflies per work item for a `len`-point transform on `workers` threads
///
/// Always a power of two, so an item either spans whole blocks or an aligned
/// part of a single block.
pub fn grain_size(len: usize, workers: usize, min_grain: usize) -> usize {
    let butterflies = len / 2;
    let per_worker = butterflies / workers.max(1);
    per_worker.max(min_grain).max(MIN_GRAIN).next_power_of_two()
}

/// Partition of one stage's `len / 2` butterflies into work items
pub fn stage_work_items(len: usize, grain: usize) -> Vec<WorkItem> {
    let butterflies = len / 2;
    (0..butterflies)
        .step_by(grain.max(1))
        .map(|start| WorkItem::new(start, (start + grain).min(butterflies)))
        .collect()
}

/// Radix-2 engine for power-of-two lengths
#[derive(Debug)]
pub struct Radix2Engine {
    twiddles: Arc<TwiddleCache>,
    pool: WorkerPool,
    min_grain: usize,
}

impl Radix2Engine {
    pub fn new(twiddles: Arc<TwiddleCache>, pool: WorkerPool, min_grain: usize) -> Self {
        Self {
            twiddles,
            pool,
            min_grain: min_grain.max(MIN_GRAIN),
        }
    }

    /// Forward DFT of `x`; `x.len()` must be a power of two
    ///
    /// Lengths 0 and 1 return a copy.
    pub fn transform(&self, x: &[Complex64]) -> Vec<Complex64> {
        let len = x.len();
        if len <= 1 {
            return x.to_vec();
        }
        debug_assert!(is_power_of_two(len), "radix-2 transform of length {len}");

        let mut src = bit_reverse_permute(x, log2(len));
        let mut dst = vec![Complex64::new(0.0, 0.0); len];

        self.pool.install(|workers| {
            let grain = grain_size(len, workers, self.min_grain);
            let mut stage = 2;
            while stage <= len {
                let twiddles = self.twiddles.radix2(stage);
                trace!(
                    stage,
                    grain,
                    items = (len / 2).div_ceil(grain),
                    "radix-2 stage"
                );
                run_stage(&src, &mut dst, stage, &twiddles, grain);
                std::mem::swap(&mut src, &mut dst);
                stage <<= 1;
            }
        });

        src
    }

    /// Inverse DFT of `x` through the mirrored forward transform
    pub fn inverse(&self, x: &[Complex64]) -> Vec<Complex64> {
        let len = x.len();
        let mut r = self.transform(&mirror(x));
        let scale = 1.0 / len.max(1) as f64;
        for v in r.iter_mut() {
            *v *= scale;
        }
        r
    }

    pub fn workers(&self) -> usize {
        self.pool.workers()
    }

    pub fn set_workers(&self, workers: usize) -> Result<(), FftError> {
        self.pool.resize(workers)
    }
}

/// One stage: `dst` from `src`, returning once every work item is done
fn run_stage(
    src: &[Complex64],
    dst: &mut [Complex64],
    stage: usize,
    twiddles: &[Complex64],
    grain: usize,
) {
    let s2 = stage / 2;

    if s2 >= grain {
        // Items are aligned slices of a single block
        dst.par_chunks_mut(stage)
            .enumerate()
            .for_each(|(block, out)| {
                let (lo, hi) = out.split_at_mut(s2);
                lo.par_chunks_mut(grain)
                    .zip(hi.par_chunks_mut(grain))
                    .enumerate()
                    .for_each(|(chunk, (lo, hi))| {
                        let start = block * s2 + chunk * grain;
                        let item = WorkItem::new(start, start + lo.len());
                        butterflies(src, twiddles, s2, item, lo, hi);
                    });
            });
    } else {
        // Items span `grain / s2` whole blocks
        dst.par_chunks_mut(2 * grain)
            .enumerate()
            .for_each(|(chunk, out)| {
                for (block, out) in out.chunks_mut(stage).enumerate() {
                    let (lo, hi) = out.split_at_mut(s2);
                    let start = chunk * grain + block * s2;
                    butterflies(src, twiddles, s2, WorkItem::new(start, start + s2), lo, hi);
                }
            });
    }
}

/// Butterflies of `item`, all within one block
///
/// `lo` and `hi` are the item's slots in the lower and upper half-block.
#[inline]
fn butterflies(
    src: &[Complex64],
    twiddles: &[Complex64],
    s2: usize,
    item: WorkItem,
    lo: &mut [Complex64],
    hi: &mut [Complex64],
) {
    let nb = (item.start / s2) * 2 * s2;
    let j0 = item.start % s2;

    for (k, (lo, hi)) in lo.iter_mut().zip(hi.iter_mut()).enumerate() {
        let j = j0 + k;
        let a = src[nb + j];
        let b = if s2 == 1 {
            src[nb + j + 1]
        } else {
            src[nb + j + s2] * twiddles[j]
        };
        *lo = a + b;
        *hi = a - b;
    }
}
