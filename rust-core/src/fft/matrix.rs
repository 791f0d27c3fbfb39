//! N-dimensional transforms by axis-separable composition
//!
//! For every axis, each 1-D line along that axis (all other indices fixed)
//! is pulled out, transformed, and written back. Lines are enumerated with an
//! [`Odometer`] so each one is visited exactly once.

use ndarray::{ArrayD, IxDyn};
use num_complex::Complex64;

use super::facade::Fft;
use crate::error::FftError;
use crate::utils::to_complex;

/// Transform direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Inverse,
}

/// N-dimensional complex array
///
/// Element count always equals the product of `dims()`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: ArrayD<Complex64>,
}

impl From<ArrayD<Complex64>> for Matrix {
    fn from(data: ArrayD<Complex64>) -> Self {
        Self { data }
    }
}

impl Matrix {
    /// Build from row-major `data` with shape `dims`
    pub fn new(dims: &[usize], data: Vec<Complex64>) -> Result<Self, FftError> {
        let expected: usize = dims.iter().product();
        if data.len() != expected {
            return Err(FftError::ShapeMismatch {
                dims: dims.to_vec(),
                expected,
                actual: data.len(),
            });
        }
        ArrayD::from_shape_vec(IxDyn(dims), data)
            .map(Self::from)
            .map_err(|_| FftError::ShapeMismatch {
                dims: dims.to_vec(),
                expected,
                actual: expected,
            })
    }

    /// Real-valued data lifted to complex
    pub fn from_real(dims: &[usize], data: &[f64]) -> Result<Self, FftError> {
        Self::new(dims, to_complex(data))
    }

    pub fn zeros(dims: &[usize]) -> Self {
        Self {
            data: ArrayD::from_elem(IxDyn(dims), Complex64::new(0.0, 0.0)),
        }
    }

    /// 2-D matrix from rows, rejecting empty and ragged input
    pub fn from_rows(rows: &[Vec<Complex64>]) -> Result<Self, FftError> {
        let cols = match rows.first() {
            Some(first) => first.len(),
            None => return Err(FftError::EmptyInput { axis: 0 }),
        };
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(FftError::RaggedInput {
                row,
                expected: cols,
                actual: r.len(),
            });
        }
        if cols == 0 {
            return Err(FftError::EmptyInput { axis: 1 });
        }

        let data: Vec<Complex64> = rows.iter().flatten().copied().collect();
        Self::new(&[rows.len(), cols], data)
    }

    /// Rows of a rank-2 matrix
    pub fn to_rows(&self) -> Option<Vec<Vec<Complex64>>> {
        if self.rank() != 2 {
            return None;
        }
        Some(
            self.data
                .outer_iter()
                .map(|row| row.iter().copied().collect())
                .collect(),
        )
    }

    pub fn dims(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn rank(&self) -> usize {
        self.data.ndim()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, index: &[usize]) -> Option<&Complex64> {
        self.data.get(IxDyn(index))
    }

    pub fn as_array(&self) -> &ArrayD<Complex64> {
        &self.data
    }

    pub fn into_array(self) -> ArrayD<Complex64> {
        self.data
    }

    /// The line along `axis` through `index` (`index[axis]` is ignored)
    pub fn line(&self, axis: usize, index: &[usize]) -> Vec<Complex64> {
        let mut at = index.to_vec();
        (0..self.dims()[axis])
            .map(|k| {
                at[axis] = k;
                self.data[IxDyn(&at)]
            })
            .collect()
    }

    /// Overwrite the line along `axis` through `index`
    pub fn set_line(&mut self, axis: usize, index: &[usize], values: &[Complex64]) {
        debug_assert_eq!(values.len(), self.dims()[axis]);
        let mut at = index.to_vec();
        for (k, &value) in values.iter().enumerate() {
            at[axis] = k;
            self.data[IxDyn(&at)] = value;
        }
    }
}

/// Multi-radix counter over every index combination except one axis
///
/// Starts with each free digit at its maximum and counts down; a digit that
/// would go below zero wraps to its maximum and borrows from the next axis
/// to the left. The skipped axis stays at 0.
#[derive(Debug, Clone)]
pub struct Odometer {
    dims: Vec<usize>,
    axis: usize,
    digits: Vec<usize>,
    remaining: usize,
}

impl Odometer {
    pub fn new(dims: &[usize], axis: usize) -> Self {
        let remaining = dims
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != axis)
            .map(|(_, &d)| d)
            .product();
        let digits = dims
            .iter()
            .enumerate()
            .map(|(i, &d)| if i == axis { 0 } else { d.saturating_sub(1) })
            .collect();

        Self {
            dims: dims.to_vec(),
            axis,
            digits,
            remaining,
        }
    }

    fn decrement(&mut self) {
        for i in (0..self.dims.len()).rev() {
            if i == self.axis {
                continue;
            }
            if self.digits[i] > 0 {
                self.digits[i] -= 1;
                return;
            }
            self.digits[i] = self.dims[i] - 1;
        }
    }
}

impl Iterator for Odometer {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.digits.clone();
        self.remaining -= 1;
        if self.remaining > 0 {
            self.decrement();
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Odometer {}

impl Fft {
    /// Transform every axis of `matrix`; the input is left untouched
    pub fn transform_n(&self, matrix: &Matrix, direction: Direction) -> Result<Matrix, FftError> {
        self.transform_axes(matrix, direction, 0..matrix.rank())
    }

    /// Like [`Fft::transform_n`] with an explicit axis visiting order
    ///
    /// Every axis in `axes` is transformed once per occurrence.
    pub fn transform_axes(
        &self,
        matrix: &Matrix,
        direction: Direction,
        axes: impl IntoIterator<Item = usize>,
    ) -> Result<Matrix, FftError> {
        if let Some(axis) = matrix.dims().iter().position(|&d| d == 0) {
            return Err(FftError::EmptyInput { axis });
        }

        let mut scratch = matrix.clone();
        let dims = matrix.dims().to_vec();
        for axis in axes {
            for index in Odometer::new(&dims, axis) {
                let line = scratch.line(axis, &index);
                let out = match direction {
                    Direction::Forward => self.forward(&line),
                    Direction::Inverse => self.inverse(&line),
                };
                scratch.set_line(axis, &index, &out);
            }
        }
        Ok(scratch)
    }

    pub fn forward_n(&self, matrix: &Matrix) -> Result<Matrix, FftError> {
        self.transform_n(matrix, Direction::Forward)
    }

    pub fn inverse_n(&self, matrix: &Matrix) -> Result<Matrix, FftError> {
        self.transform_n(matrix, Direction::Inverse)
    }

    /// 2-D forward transform of row-major input
    pub fn forward_2d(&self, rows: &[Vec<Complex64>]) -> Result<Vec<Vec<Complex64>>, FftError> {
        self.transform_2d(rows, Direction::Forward)
    }

    /// 2-D inverse transform of row-major input
    pub fn inverse_2d(&self, rows: &[Vec<Complex64>]) -> Result<Vec<Vec<Complex64>>, FftError> {
        self.transform_2d(rows, Direction::Inverse)
    }

    fn transform_2d(
        &self,
        rows: &[Vec<Complex64>],
        direction: Direction,
    ) -> Result<Vec<Vec<Complex64>>, FftError> {
        let matrix = Matrix::from_rows(rows)?;
        let out = self.transform_n(&matrix, direction)?;
        // Rank is preserved, so this is always Some
        Ok(out.to_rows().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fft::facade::FftConfig;
    use crate::utils::pretty_close;

    fn fft() -> Fft {
        Fft::new(FftConfig::default().with_workers(2)).unwrap()
    }

    fn sample(dims: &[usize]) -> Matrix {
        let len: usize = dims.iter().product();
        let data = (0..len)
            .map(|i| Complex64::new((i as f64 * 0.9).sin(), (i as f64 * 0.4).cos()))
            .collect();
        Matrix::new(dims, data).unwrap()
    }

    fn flat(m: &Matrix) -> Vec<Complex64> {
        m.as_array().iter().copied().collect()
    }

    #[test]
    fn test_odometer_visits_each_line_once() {
        let dims = [2, 3, 4];
        for axis in 0..3 {
            let mut seen: Vec<Vec<usize>> = Odometer::new(&dims, axis).collect();
            let expected = 24 / dims[axis];
            assert_eq!(seen.len(), expected);
            assert!(seen.iter().all(|idx| idx[axis] == 0));

            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), expected);
        }
    }

    #[test]
    fn test_odometer_counts_down_with_borrow() {
        let visits: Vec<Vec<usize>> = Odometer::new(&[2, 2, 3], 2).collect();
        assert_eq!(
            visits,
            vec![vec![1, 1, 0], vec![1, 0, 0], vec![0, 1, 0], vec![0, 0, 0]]
        );
    }

    #[test]
    fn test_line_roundtrip() {
        let mut m = sample(&[3, 4]);
        let column = m.line(0, &[0, 2]);
        assert_eq!(column.len(), 3);
        assert_eq!(column[1], *m.get(&[1, 2]).unwrap());

        let zeros = vec![Complex64::new(0.0, 0.0); 4];
        m.set_line(1, &[2, 0], &zeros);
        assert_eq!(m.line(1, &[2, 3]), zeros);
    }

    #[test]
    fn test_shape_mismatch() {
        let err = Matrix::new(&[2, 3], vec![Complex64::new(0.0, 0.0); 5]).unwrap_err();
        assert_eq!(
            err,
            FftError::ShapeMismatch {
                dims: vec![2, 3],
                expected: 6,
                actual: 5
            }
        );
    }

    #[test]
    fn test_one_dimensional_matches_forward() {
        let engine = fft();
        let m = sample(&[12]);
        let out = engine.forward_n(&m).unwrap();
        assert!(pretty_close(&flat(&out), &engine.forward(&flat(&m))));
    }

    #[test]
    fn test_separable_in_any_axis_order() {
        let engine = fft();
        let m = sample(&[3, 4, 5]);
        let reference = engine.forward_n(&m).unwrap();

        for order in [[2, 1, 0], [1, 0, 2], [0, 2, 1]] {
            let out = engine.transform_axes(&m, Direction::Forward, order).unwrap();
            assert!(pretty_close(&flat(&out), &flat(&reference)));
        }
    }

    #[test]
    fn test_nd_roundtrip_leaves_input_untouched() {
        let engine = fft();
        let m = sample(&[4, 3, 2]);
        let before = m.clone();

        let spectrum = engine.forward_n(&m).unwrap();
        let back = engine.inverse_n(&spectrum).unwrap();
        assert_eq!(m, before);
        assert_eq!(back.dims(), &[4, 3, 2]);
        assert!(pretty_close(&flat(&back), &flat(&m)));
    }

    #[test]
    fn test_empty_axis_rejected() {
        let err = fft().forward_n(&Matrix::zeros(&[3, 0, 2])).unwrap_err();
        assert_eq!(err, FftError::EmptyInput { axis: 1 });
    }

    #[test]
    fn test_two_dimensional_dc() {
        let engine = fft();
        let rows = vec![vec![Complex64::new(1.0, 0.0); 3]; 2];
        let out = engine.forward_2d(&rows).unwrap();
        assert_eq!(out.len(), 2);
        assert!((out[0][0] - Complex64::new(6.0, 0.0)).norm() < 1e-9);
        assert!(out.iter().flatten().skip(1).all(|v| v.norm() < 1e-9));

        let back = engine.inverse_2d(&out).unwrap();
        assert!(pretty_close(&back.concat(), &rows.concat()));
    }

    #[test]
    fn test_two_dimensional_input_validation() {
        let engine = fft();
        let ragged = vec![
            vec![Complex64::new(1.0, 0.0); 3],
            vec![Complex64::new(1.0, 0.0); 2],
        ];
        assert_eq!(
            engine.forward_2d(&ragged).unwrap_err(),
            FftError::RaggedInput {
                row: 1,
                expected: 3,
                actual: 2
            }
        );
        assert_eq!(
            engine.forward_2d(&[]).unwrap_err(),
            FftError::EmptyInput { axis: 0 }
        );
        assert_eq!(
            engine.inverse_2d(&[Vec::new(), Vec::new()]).unwrap_err(),
            FftError::EmptyInput { axis: 1 }
        );
    }
}
