//! Spectral DSP - Parallel FFT Core
//!
//! Arbitrary-length discrete Fourier transforms (parallel radix-2 for powers
//! of two, Bluestein for everything else), 2-D and N-D transforms, windowing,
//! IIR filtering and Welch power spectral density estimation.

pub mod error;
pub mod fft;
pub mod filters;
pub mod spectrum;
pub mod utils;

pub use error::FftError;
pub use fft::{Direction, Fft, FftConfig, Matrix};
pub use filters::{FilterError, IirFilter, WindowType};
pub use num_complex::Complex64;
pub use spectrum::{pwelch, SpectralError, WelchConfig};
