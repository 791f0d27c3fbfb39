//! Index permutations: bit reversal for the radix-2 pass and the modular
//! mirror used by the inverse transform

use num_complex::Complex64;

/// Reverse the low `bits` bits of `index`
#[inline]
pub fn reverse_bits(index: usize, bits: u32) -> usize {
    if bits == 0 {
        return 0;
    }
    index.reverse_bits() >> (usize::BITS - bits)
}

/// Reorder `input` so that `output[reverse_bits(i, bits)] = input[i]`
///
/// `input.len()` must equal `1 << bits`.
pub fn bit_reverse_permute(input: &[Complex64], bits: u32) -> Vec<Complex64> {
    debug_assert_eq!(input.len(), 1usize << bits);

    let mut output = vec![Complex64::new(0.0, 0.0); input.len()];
    for (i, &value) in input.iter().enumerate() {
        output[reverse_bits(i, bits)] = value;
    }
    output
}

/// Mirror indices modulo the length: `output[k] = input[(len - k) % len]`
///
/// A forward DFT of the mirrored sequence is `len` times the inverse DFT of
/// `input`, given forward twiddles e^{-2πik/len}.
pub fn mirror(input: &[Complex64]) -> Vec<Complex64> {
    let len = input.len();
    (0..len).map(|k| input[(len - k) % len]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_bits() {
        assert_eq!(reverse_bits(0, 0), 0);
        assert_eq!(reverse_bits(1, 1), 1);
        assert_eq!(reverse_bits(0b001, 3), 0b100);
        assert_eq!(reverse_bits(0b110, 3), 0b011);
        assert_eq!(reverse_bits(0b1011, 4), 0b1101);
    }

    #[test]
    fn test_reverse_bits_is_an_involution() {
        for bits in 0..10 {
            for i in 0..(1usize << bits) {
                assert_eq!(reverse_bits(reverse_bits(i, bits), bits), i);
            }
        }
    }

    #[test]
    fn test_permute_eight_points() {
        let input: Vec<Complex64> = (0..8).map(|i| Complex64::new(i as f64, 0.0)).collect();
        let output = bit_reverse_permute(&input, 3);
        let order: Vec<f64> = output.iter().map(|c| c.re).collect();
        assert_eq!(order, vec![0.0, 4.0, 2.0, 6.0, 1.0, 5.0, 3.0, 7.0]);
    }

    #[test]
    fn test_mirror_keeps_index_zero() {
        let input: Vec<Complex64> = (0..5).map(|i| Complex64::new(i as f64, 0.0)).collect();
        let order: Vec<f64> = mirror(&input).iter().map(|c| c.re).collect();
        assert_eq!(order, vec![0.0, 4.0, 3.0, 2.0, 1.0]);
        assert!(mirror(&[]).is_empty());
    }

    #[test]
    fn test_permute_single_point() {
        let input = vec![Complex64::new(3.0, -1.0)];
        assert_eq!(bit_reverse_permute(&input, 0), input);
    }
}
