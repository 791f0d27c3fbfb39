//! Window functions for spectral analysis
//!
//! All windows are symmetric: coefficients are evaluated over n = 0..L-1
//! against a denominator of L-1.

use std::f64::consts::PI;

/// Flat-top cosine-sum coefficients
const FLAT_TOP: [f64; 5] = [0.21557895, 0.41663158, 0.277263158, 0.083578947, 0.006947368];

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowType {
    /// Rectangular window (no windowing)
    Rectangular,

    /// Hann window: w[n] = 0.5 - 0.5*cos(2πn/(L-1))
    #[default]
    Hann,

    /// Hamming window: w[n] = 0.54 - 0.46*cos(2πn/(L-1))
    Hamming,

    /// Bartlett (triangular) window: w[n] = 1 - |(n - (L-1)/2) / ((L-1)/2)|
    Bartlett,

    /// Blackman window: w[n] = 0.42 - 0.5*cos(2πn/(L-1)) + 0.08*cos(4πn/(L-1))
    Blackman,

    /// Flat-top window, five-term cosine sum
    /// Very flat passband, used for amplitude measurements
    FlatTop,
}

/// Generate window coefficients
///
/// # Arguments
/// * `window_type` - Type of window function
/// * `length` - Number of samples (L)
///
/// # Returns
/// Vector of window coefficients w[n] for n = 0..L-1. A length-1 window is `[1.0]`.
pub fn generate_window(window_type: WindowType, length: usize) -> Vec<f64> {
    if length <= 1 {
        return vec![1.0; length];
    }

    let denom = (length - 1) as f64;
    (0..length)
        .map(|n| {
            let n = n as f64;
            let x = 2.0 * PI * n / denom;
            match window_type {
                WindowType::Rectangular => 1.0,
                WindowType::Hann => 0.5 - 0.5 * x.cos(),
                WindowType::Hamming => 0.54 - 0.46 * x.cos(),
                WindowType::Bartlett => {
                    let half = denom / 2.0;
                    1.0 - ((n - half) / half).abs()
                }
                WindowType::Blackman => 0.42 - 0.5 * x.cos() + 0.08 * (2.0 * x).cos(),
                WindowType::FlatTop => {
                    FLAT_TOP[0] - FLAT_TOP[1] * x.cos() + FLAT_TOP[2] * (2.0 * x).cos()
                        - FLAT_TOP[3] * (3.0 * x).cos()
                        + FLAT_TOP[4] * (4.0 * x).cos()
                }
            }
        })
        .collect()
}

/// Multiply `signal` in place by the window of its own length
pub fn apply_window(signal: &mut [f64], window_type: WindowType) {
    let window = generate_window(window_type, signal.len());
    for (s, w) in signal.iter_mut().zip(window.iter()) {
        *s *= w;
    }
}

/// Windowed copy of `signal`
pub fn apply_window_to(signal: &[f64], window_type: WindowType) -> Vec<f64> {
    let mut windowed = signal.to_vec();
    apply_window(&mut windowed, window_type);
    windowed
}

/// Sum of squared coefficients, the power normalisation used by Welch
pub fn window_power(window_type: WindowType, length: usize) -> f64 {
    generate_window(window_type, length)
        .iter()
        .map(|&w| w * w)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [WindowType; 6] = [
        WindowType::Rectangular,
        WindowType::Hann,
        WindowType::Hamming,
        WindowType::Bartlett,
        WindowType::Blackman,
        WindowType::FlatTop,
    ];

    #[test]
    fn test_window_generation() {
        let length = 161;

        for window_type in ALL {
            let window = generate_window(window_type, length);
            assert_eq!(window.len(), length);

            // Symmetric
            for n in 0..length {
                assert!((window[n] - window[length - 1 - n]).abs() < 1e-10);
            }

            // Peak of 1.0 at the centre
            assert!((window[length / 2] - 1.0).abs() < 1e-6, "{window_type:?}");
        }
    }

    #[test]
    fn test_window_endpoints() {
        let hann = generate_window(WindowType::Hann, 64);
        assert!(hann[0].abs() < 1e-12);

        // Hamming should have non-zero endpoints (0.08)
        let hamming = generate_window(WindowType::Hamming, 64);
        assert!((hamming[0] - 0.08).abs() < 1e-12);

        let bartlett = generate_window(WindowType::Bartlett, 5);
        let expected = [0.0, 0.5, 1.0, 0.5, 0.0];
        for (w, e) in bartlett.iter().zip(expected.iter()) {
            assert!((w - e).abs() < 1e-12);
        }

        let blackman = generate_window(WindowType::Blackman, 32);
        assert!(blackman[0].abs() < 1e-12);

        // Flat-top dips slightly below zero at its ends
        let flat_top = generate_window(WindowType::FlatTop, 32);
        assert!(flat_top[0] < 0.0 && flat_top[0] > -0.001);
    }

    #[test]
    fn test_degenerate_lengths() {
        for window_type in ALL {
            assert!(generate_window(window_type, 0).is_empty());
            assert_eq!(generate_window(window_type, 1), vec![1.0]);
        }
    }

    #[test]
    fn test_apply_window() {
        let signal = vec![1.0; 100];
        let windowed = apply_window_to(&signal, WindowType::Hamming);

        assert_eq!(windowed.len(), 100);

        // Centre close to 1.0, edges reduced
        assert!((windowed[50] - 1.0).abs() < 0.01);
        assert!(windowed[0] < 0.1);
        assert!(windowed[99] < 0.1);
    }

    #[test]
    fn test_window_power() {
        assert!((window_power(WindowType::Rectangular, 100) - 100.0).abs() < 1e-12);
        // Hann power tends to 3L/8
        let hann = window_power(WindowType::Hann, 1001);
        assert!((hann / 1001.0 - 0.375).abs() < 1e-3);
    }
}
