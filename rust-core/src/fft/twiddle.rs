//! Memoized roots of unity and Bluestein chirps
//!
//! Tables are built once per length and shared as `Arc<[Complex64]>`.
//! Writers only ever insert complete tables, so a reader that finds an entry
//! sees all of it.

use std::collections::HashMap;
use std::f64::consts::PI;
use std::sync::{Arc, PoisonError, RwLock};

use num_complex::Complex64;
use tracing::debug;

use crate::utils::is_power_of_two;

type Table = Arc<[Complex64]>;

/// Chirp and inverse chirp for one Bluestein length
#[derive(Debug, Clone)]
pub struct ChirpPair {
    /// chirp[k] = e^{iπk²/L}
    pub chirp: Table,
    /// Complex conjugate of `chirp`
    pub inv_chirp: Table,
}

/// Thread-safe cache of radix-2 twiddle tables and Bluestein chirps
#[derive(Debug)]
pub struct TwiddleCache {
    radix2: RwLock<HashMap<usize, Table>>,
    bluestein: RwLock<HashMap<usize, ChirpPair>>,
}

impl Default for TwiddleCache {
    fn default() -> Self {
        Self::new()
    }
}

impl TwiddleCache {
    /// Create a cache seeded with the 1-, 2- and 4-point radix-2 tables
    pub fn new() -> Self {
        let one = Complex64::new(1.0, 0.0);
        let mut radix2: HashMap<usize, Table> = HashMap::new();
        radix2.insert(1, Arc::from(vec![one]));
        radix2.insert(2, Arc::from(vec![one, Complex64::new(-1.0, 0.0)]));
        radix2.insert(
            4,
            Arc::from(vec![
                one,
                Complex64::new(0.0, -1.0),
                Complex64::new(-1.0, 0.0),
                Complex64::new(0.0, 1.0),
            ]),
        );

        Self {
            radix2: RwLock::new(radix2),
            bluestein: RwLock::new(HashMap::new()),
        }
    }

    /// L-point table of e^{-2πik/L}, k in [0, L)
    ///
    /// `len` must be a power of two. Missing tables between 8 and `len` are
    /// all filled in on the way up, each from its half-size table.
    pub fn radix2(&self, len: usize) -> Table {
        debug_assert!(is_power_of_two(len), "radix-2 table for non power of two {len}");

        if let Some(table) = self
            .radix2
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&len)
        {
            return Arc::clone(table);
        }

        let mut tables = self.radix2.write().unwrap_or_else(PoisonError::into_inner);
        // Another writer may have won the race
        if let Some(table) = tables.get(&len) {
            return Arc::clone(table);
        }

        let mut size = 8;
        while size <= len {
            if !tables.contains_key(&size) {
                let half = Arc::clone(&tables[&(size / 2)]);
                let table = extend_table(&half, size);
                debug!(target: "spectral_dsp::twiddle", len = size, "computed radix-2 twiddles");
                tables.insert(size, table);
            }
            size <<= 1;
        }

        Arc::clone(&tables[&len])
    }

    /// Bluestein chirp pair for length `len`
    pub fn bluestein(&self, len: usize) -> ChirpPair {
        if let Some(pair) = self
            .bluestein
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&len)
        {
            return pair.clone();
        }

        let mut pairs = self.bluestein.write().unwrap_or_else(PoisonError::into_inner);
        pairs
            .entry(len)
            .or_insert_with(|| {
                debug!(target: "spectral_dsp::twiddle", len, "computed bluestein chirp");
                chirp_pair(len)
            })
            .clone()
    }

    /// Lengths with a cached radix-2 table, ascending
    pub fn radix2_lengths(&self) -> Vec<usize> {
        let tables = self.radix2.read().unwrap_or_else(PoisonError::into_inner);
        let mut lengths: Vec<usize> = tables.keys().copied().collect();
        lengths.sort_unstable();
        lengths
    }

    /// Lengths with a cached chirp pair, ascending
    pub fn bluestein_lengths(&self) -> Vec<usize> {
        let pairs = self.bluestein.read().unwrap_or_else(PoisonError::into_inner);
        let mut lengths: Vec<usize> = pairs.keys().copied().collect();
        lengths.sort_unstable();
        lengths
    }
}

/// Build the `size`-point table from the `size / 2` table
///
/// Even entries are the half table's entries; odd ones are computed.
fn extend_table(half: &[Complex64], size: usize) -> Table {
    let step = -2.0 * PI / size as f64;
    let table: Vec<Complex64> = (0..size)
        .map(|n| {
            if n % 2 == 0 {
                half[n / 2]
            } else {
                let (sin, cos) = (step * n as f64).sin_cos();
                Complex64::new(cos, sin)
            }
        })
        .collect();
    Arc::from(table)
}

fn chirp_pair(len: usize) -> ChirpPair {
    // πk²/L only depends on k² mod 2L
    let period = 2 * len as u128;
    let chirp: Vec<Complex64> = (0..len)
        .map(|k| {
            if k == 0 {
                return Complex64::new(1.0, 0.0);
            }
            let k = k as u128;
            let phase = PI * ((k * k) % period) as f64 / len as f64;
            let (sin, cos) = phase.sin_cos();
            Complex64::new(cos, sin)
        })
        .collect();
    let inv_chirp: Vec<Complex64> = chirp.iter().map(|c| c.conj()).collect();

    ChirpPair {
        chirp: Arc::from(chirp),
        inv_chirp: Arc::from(inv_chirp),
    }
}
