//! Fourier transform engine
//!
//! [`Fft`] is the entry point. Power-of-two lengths run through the parallel
//! radix-2 engine, all other lengths through Bluestein. The free functions in
//! this module use a lazily built process-default [`Fft`]; construct your own
//! when you need a separate cache or worker pool.

pub mod bitrev;
pub mod bluestein;
pub mod facade;
pub mod matrix;
pub mod pool;
pub mod radix2;
pub mod twiddle;

use std::sync::OnceLock;

use num_complex::Complex64;

pub use bitrev::{bit_reverse_permute, mirror, reverse_bits};
pub use bluestein::BluesteinEngine;
pub use facade::{Fft, FftConfig};
pub use matrix::{Direction, Matrix, Odometer};
pub use pool::WorkerPool;
pub use radix2::{grain_size, stage_work_items, Radix2Engine, WorkItem, MIN_GRAIN};
pub use twiddle::{ChirpPair, TwiddleCache};

use crate::error::FftError;
use crate::utils::to_complex_2d;

static GLOBAL: OnceLock<Fft> = OnceLock::new();

/// Process-default transform engine
pub fn global() -> &'static Fft {
    GLOBAL.get_or_init(Fft::default)
}

pub fn forward_fft(x: &[Complex64]) -> Vec<Complex64> {
    global().forward(x)
}

pub fn inverse_fft(x: &[Complex64]) -> Vec<Complex64> {
    global().inverse(x)
}

pub fn forward_fft_real(x: &[f64]) -> Vec<Complex64> {
    global().forward_real(x)
}

pub fn inverse_fft_real(x: &[f64]) -> Vec<Complex64> {
    global().inverse_real(x)
}

/// Circular convolution; operands must have equal length
pub fn convolve(x: &[Complex64], y: &[Complex64]) -> Result<Vec<Complex64>, FftError> {
    global().convolve(x, y)
}

pub fn forward_fft2(rows: &[Vec<Complex64>]) -> Result<Vec<Vec<Complex64>>, FftError> {
    global().forward_2d(rows)
}

pub fn inverse_fft2(rows: &[Vec<Complex64>]) -> Result<Vec<Vec<Complex64>>, FftError> {
    global().inverse_2d(rows)
}

pub fn forward_fft2_real(rows: &[Vec<f64>]) -> Result<Vec<Vec<Complex64>>, FftError> {
    global().forward_2d(&to_complex_2d(rows))
}

pub fn inverse_fft2_real(rows: &[Vec<f64>]) -> Result<Vec<Vec<Complex64>>, FftError> {
    global().inverse_2d(&to_complex_2d(rows))
}

pub fn forward_fftn(matrix: &Matrix) -> Result<Matrix, FftError> {
    global().forward_n(matrix)
}

pub fn inverse_fftn(matrix: &Matrix) -> Result<Matrix, FftError> {
    global().inverse_n(matrix)
}

/// Resize the default engine's worker pool; 0 resets to host parallelism
pub fn set_worker_pool_size(workers: usize) -> Result<(), FftError> {
    global().set_worker_pool_size(workers)
}
