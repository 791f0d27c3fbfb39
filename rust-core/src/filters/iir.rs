//! Direct-form IIR filtering
//!
//! Transposed direct form II, the same recurrence as SciPy's `lfilter`:
//!
//! ```text
//! y[n]   = b[0]·x[n] + z[0]
//! z[k]   = b[k+1]·x[n] + z[k+1] - a[k+1]·y[n]
//! z[K-1] = b[K]·x[n] - a[K]·y[n]
//! ```
//!
//! Coefficients are normalised so that a[0] = 1.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("Filter needs at least one numerator and one denominator coefficient")]
    CoefficientLength,

    #[error("Leading denominator coefficient a[0] must be non-zero")]
    ZeroLeadingCoefficient,

    #[error("Initial state has {actual} values, expected {expected}")]
    StateLength { expected: usize, actual: usize },
}

/// IIR filter with state carried across blocks
#[derive(Debug, Clone)]
pub struct IirFilter {
    /// Numerator coefficients, normalised by a[0]
    b: Vec<f64>,

    /// Denominator coefficients, normalised by a[0]
    a: Vec<f64>,

    /// Delay line, length max(len(b), len(a)) - 1
    state: Vec<f64>,
}

impl IirFilter {
    /// Create a filter from numerator `b` and denominator `a`
    ///
    /// The shorter coefficient vector is zero-extended to the longer one.
    pub fn new(b: &[f64], a: &[f64]) -> Result<Self, FilterError> {
        if b.is_empty() || a.is_empty() {
            return Err(FilterError::CoefficientLength);
        }
        let a0 = a[0];
        if a0 == 0.0 {
            return Err(FilterError::ZeroLeadingCoefficient);
        }

        let order = b.len().max(a.len());
        let normalise = |coeffs: &[f64]| {
            let mut out: Vec<f64> = coeffs.iter().map(|&c| c / a0).collect();
            out.resize(order, 0.0);
            out
        };

        Ok(Self {
            b: normalise(b),
            a: normalise(a),
            state: vec![0.0; order - 1],
        })
    }

    /// Replace the delay line, e.g. to resume a previous run
    pub fn set_state(&mut self, state: &[f64]) -> Result<(), FilterError> {
        if state.len() != self.state.len() {
            return Err(FilterError::StateLength {
                expected: self.state.len(),
                actual: state.len(),
            });
        }
        self.state.copy_from_slice(state);
        Ok(())
    }

    /// Process single sample
    #[inline]
    pub fn process_sample(&mut self, input: f64) -> f64 {
        let output = self.b[0] * input + self.state.first().copied().unwrap_or(0.0);

        let taps = self.state.len();
        for k in 0..taps {
            let next = if k + 1 < taps { self.state[k + 1] } else { 0.0 };
            self.state[k] = self.b[k + 1] * input + next - self.a[k + 1] * output;
        }

        output
    }

    /// Process a block of samples
    pub fn process_block(&mut self, input: &[f64]) -> Vec<f64> {
        input.iter().map(|&x| self.process_sample(x)).collect()
    }

    /// Process a block in-place
    pub fn process_block_inplace(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.process_sample(*sample);
        }
    }

    /// Process a block from its last sample to its first, in-place
    pub fn process_block_reverse(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut().rev() {
            *sample = self.process_sample(*sample);
        }
    }

    /// Reset filter state (clear delay line)
    pub fn reset(&mut self) {
        self.state.fill(0.0);
    }

    /// Current delay line
    pub fn state(&self) -> &[f64] {
        &self.state
    }

    /// Normalised numerator coefficients
    pub fn numerator(&self) -> &[f64] {
        &self.b
    }

    /// Normalised denominator coefficients
    pub fn denominator(&self) -> &[f64] {
        &self.a
    }
}

/// Filter `x` from rest, returning the output and the final delay line
pub fn lfilter(b: &[f64], a: &[f64], x: &[f64]) -> Result<(Vec<f64>, Vec<f64>), FilterError> {
    let mut filter = IirFilter::new(b, a)?;
    let y = filter.process_block(x);
    Ok((y, filter.state().to_vec()))
}

/// Like [`lfilter`] but running from the last sample to the first
pub fn lfilter_reverse(
    b: &[f64],
    a: &[f64],
    x: &[f64],
) -> Result<(Vec<f64>, Vec<f64>), FilterError> {
    let mut filter = IirFilter::new(b, a)?;
    let mut y = x.to_vec();
    filter.process_block_reverse(&mut y);
    Ok((y, filter.state().to_vec()))
}

/// Zero-phase filtering: a forward pass followed by a reverse pass
pub fn filtfilt(b: &[f64], a: &[f64], x: &[f64]) -> Result<Vec<f64>, FilterError> {
    let mut filter = IirFilter::new(b, a)?;
    let mut y = x.to_vec();
    filter.process_block_inplace(&mut y);
    filter.reset();
    filter.process_block_reverse(&mut y);
    Ok(y)
}
