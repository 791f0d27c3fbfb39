//! Small helpers shared by the transform, filter and spectrum modules

use num_complex::Complex64;

/// Default tolerance used by [`pretty_close`]
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Returns true if `n` is a power of two. Zero is not.
#[inline]
pub fn is_power_of_two(n: usize) -> bool {
    n != 0 && n & (n - 1) == 0
}

/// Smallest power of two >= `n` (1 for `n == 0`)
#[inline]
pub fn next_power_of_two(n: usize) -> usize {
    n.next_power_of_two()
}

/// Floor of log2(n). `n` must be non-zero.
#[inline]
pub fn log2(n: usize) -> u32 {
    debug_assert!(n > 0, "log2 of zero");
    n.ilog2()
}

/// Copy `x` into a buffer of `len` elements, zero-filling the tail
///
/// If `x` is longer than `len` it is truncated.
pub fn zero_pad(x: &[Complex64], len: usize) -> Vec<Complex64> {
    let mut padded = vec![Complex64::new(0.0, 0.0); len];
    let copy_len = x.len().min(len);
    padded[..copy_len].copy_from_slice(&x[..copy_len]);
    padded
}

/// Real-valued counterpart of [`zero_pad`]
pub fn zero_pad_real(x: &[f64], len: usize) -> Vec<f64> {
    let mut padded = vec![0.0; len];
    let copy_len = x.len().min(len);
    padded[..copy_len].copy_from_slice(&x[..copy_len]);
    padded
}

/// Lift a real sequence to complex with zero imaginary part
pub fn to_complex(x: &[f64]) -> Vec<Complex64> {
    x.iter().map(|&re| Complex64::new(re, 0.0)).collect()
}

/// Row-wise [`to_complex`]
pub fn to_complex_2d(rows: &[Vec<f64>]) -> Vec<Vec<Complex64>> {
    rows.iter().map(|row| to_complex(row)).collect()
}

/// Compare two complex sequences with [`DEFAULT_TOLERANCE`]
pub fn pretty_close(a: &[Complex64], b: &[Complex64]) -> bool {
    pretty_close_with(a, b, DEFAULT_TOLERANCE)
}

/// Compare two complex sequences elementwise
///
/// Each pair must agree within `tolerance` relative to the larger magnitude,
/// or absolutely when both values are smaller than 1.
pub fn pretty_close_with(a: &[Complex64], b: &[Complex64], tolerance: f64) -> bool {
    a.len() == b.len()
        && a.iter().zip(b).all(|(x, y)| {
            let scale = x.norm().max(y.norm()).max(1.0);
            (x - y).norm() <= tolerance * scale
        })
}
