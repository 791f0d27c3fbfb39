//! Power spectral density estimation

pub mod welch;

pub use welch::{pwelch, pwelch_with, segment, SpectralError, WelchConfig};
