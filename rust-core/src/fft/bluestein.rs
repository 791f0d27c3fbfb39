//! Bluestein (chirp-z) transform for arbitrary lengths
//!
//! With 2kn = k² + n² − (k − n)², an L-point DFT becomes
//! `X[k] = w̄[k] · Σ (x[n]·w̄[n]) · w[k − n]` where `w[k] = e^{iπk²/L}`.
//! The sum is a circular convolution of length M ≥ 2L − 1, M a power of two,
//! computed with the radix-2 engine.

use std::sync::Arc;

use num_complex::Complex64;

use super::radix2::Radix2Engine;
use super::twiddle::{ChirpPair, TwiddleCache};
use crate::utils::next_power_of_two;

#[derive(Debug)]
pub struct BluesteinEngine {
    twiddles: Arc<TwiddleCache>,
}

impl BluesteinEngine {
    pub fn new(twiddles: Arc<TwiddleCache>) -> Self {
        Self { twiddles }
    }

    /// Forward DFT of `x` for any length
    pub fn transform(&self, x: &[Complex64], radix2: &Radix2Engine) -> Vec<Complex64> {
        let len = x.len();
        if len <= 1 {
            return x.to_vec();
        }

        let padded_len = next_power_of_two(2 * len - 1);
        let ChirpPair { chirp, inv_chirp } = self.twiddles.bluestein(len);

        let mut a = vec![Complex64::new(0.0, 0.0); padded_len];
        for (slot, (&v, &w)) in a.iter_mut().zip(x.iter().zip(inv_chirp.iter())) {
            *slot = v * w;
        }

        // Chirp wrapped symmetrically so index M − i holds chirp[i]
        let mut b = vec![Complex64::new(0.0, 0.0); padded_len];
        b[0] = chirp[0];
        for i in 1..len {
            b[i] = chirp[i];
            b[padded_len - i] = chirp[i];
        }

        let fa = radix2.transform(&a);
        let fb = radix2.transform(&b);
        let product: Vec<Complex64> = fa.iter().zip(&fb).map(|(p, q)| p * q).collect();
        let r = radix2.inverse(&product);

        r[..len]
            .iter()
            .zip(inv_chirp.iter())
            .map(|(v, w)| v * w)
            .collect()
    }
}
