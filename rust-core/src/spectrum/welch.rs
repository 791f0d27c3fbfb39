//! Welch's method
//!
//! The signal is cut into (optionally overlapping) segments, each segment is
//! zero-padded, windowed and transformed, and the periodograms are averaged.
//! Output is one-sided: bins `0..=pad/2`, with every bin except DC and the
//! last doubled.

use thiserror::Error;
use tracing::debug;

use crate::fft::{self, Fft};
use crate::filters::windows::{apply_window, window_power, WindowType};
use crate::utils::zero_pad_real;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpectralError {
    #[error("Segment overlap {overlap} must be smaller than segment size {size}")]
    InvalidSegment { size: usize, overlap: usize },

    #[error("Sample rate must be finite and positive, got {0}")]
    InvalidSampleRate(f64),
}

/// Welch estimator configuration
#[derive(Debug, Clone, PartialEq)]
pub struct WelchConfig {
    /// Data points per segment
    pub segment_len: usize,

    /// Transform length each segment is padded to; 0 uses `segment_len`
    pub pad: usize,

    /// Points shared by consecutive segments
    pub overlap: usize,

    /// Window applied to each padded segment
    pub window: WindowType,

    /// Divide by the sample rate, giving density per Hz
    pub scale_by_rate: bool,
}

impl Default for WelchConfig {
    fn default() -> Self {
        Self {
            segment_len: 256,
            pad: 0,
            overlap: 0,
            window: WindowType::Hann,
            scale_by_rate: true,
        }
    }
}

impl WelchConfig {
    pub fn with_segment_len(mut self, segment_len: usize) -> Self {
        self.segment_len = segment_len;
        self
    }

    pub fn with_pad(mut self, pad: usize) -> Self {
        self.pad = pad;
        self
    }

    pub fn with_overlap(mut self, overlap: usize) -> Self {
        self.overlap = overlap;
        self
    }

    pub fn with_window(mut self, window: WindowType) -> Self {
        self.window = window;
        self
    }

    pub fn with_scale_by_rate(mut self, scale_by_rate: bool) -> Self {
        self.scale_by_rate = scale_by_rate;
        self
    }

    fn transform_len(&self) -> usize {
        if self.pad == 0 {
            self.segment_len
        } else {
            self.pad
        }
    }
}

/// Split `x` into segments of `size` samples, consecutive segments sharing
/// `overlap` samples
///
/// A trailing partial segment is dropped. Input shorter than `size` yields
/// no segments.
pub fn segment(x: &[f64], size: usize, overlap: usize) -> Result<Vec<Vec<f64>>, SpectralError> {
    if overlap >= size {
        return Err(SpectralError::InvalidSegment { size, overlap });
    }
    let stride = size - overlap;

    let count = if x.len() < size {
        0
    } else {
        (x.len() - size) / stride + 1
    };

    Ok((0..count)
        .map(|i| x[i * stride..i * stride + size].to_vec())
        .collect())
}

/// Estimate the power spectral density of `x` sampled at `fs`
///
/// Returns `(pxx, freqs)`, both of length `pad / 2 + 1`, where
/// `freqs[i] = i * fs / pad`. Uses the process-default [`Fft`].
pub fn pwelch(
    x: &[f64],
    fs: f64,
    config: &WelchConfig,
) -> Result<(Vec<f64>, Vec<f64>), SpectralError> {
    pwelch_with(fft::global(), x, fs, config)
}

/// [`pwelch`] on an explicit transform engine
pub fn pwelch_with(
    engine: &Fft,
    x: &[f64],
    fs: f64,
    config: &WelchConfig,
) -> Result<(Vec<f64>, Vec<f64>), SpectralError> {
    if !fs.is_finite() || fs <= 0.0 {
        return Err(SpectralError::InvalidSampleRate(fs));
    }
    if x.is_empty() {
        return Ok((Vec::new(), Vec::new()));
    }

    let nfft = config.segment_len;
    let pad = config.transform_len();

    let padded;
    let x = if x.len() < nfft {
        padded = zero_pad_real(x, nfft);
        &padded[..]
    } else {
        x
    };

    let segments = segment(x, nfft, config.overlap)?;
    debug!(
        segments = segments.len(),
        segment_len = nfft,
        pad,
        "welch estimate"
    );

    let lp = pad / 2 + 1;
    let mut pxx = vec![0.0; lp];
    let count = segments.len() as f64;

    for seg in &segments {
        let mut buf = zero_pad_real(seg, pad);
        apply_window(&mut buf, config.window);
        let pgram = engine.forward_real(&buf);

        for (j, p) in pxx.iter_mut().enumerate() {
            let mut d = pgram[j].norm_sqr() / count;
            if j > 0 && j < lp - 1 {
                d *= 2.0;
            }
            *p += d;
        }
    }

    let mut norm = window_power(config.window, nfft);
    if config.scale_by_rate {
        norm *= fs;
    }
    for p in pxx.iter_mut() {
        *p /= norm;
    }

    let step = fs / pad as f64;
    let freqs = (0..lp).map(|i| i as f64 * step).collect();

    Ok((pxx, freqs))
}
