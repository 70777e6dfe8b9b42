//! Deterministic, integer-only RNG for planners and the tiered generator.
//! One instance per stream (blue shuffle, anchor plan, brute-force tier), each
//! explicitly seeded and owned by a single run. There is no process-wide source.
//!
//! • Seeding: `u64` seed → ChaCha20, little-endian bytes in the first 8 positions.
//! • Ranges: unbiased via rejection sampling (threshold trick), no floats.

use rand_chacha::ChaCha20Rng;
use rand_core::{RngCore, SeedableRng};

/// Seeded stream owned by one run.
#[derive(Debug, Clone)]
pub struct RunRng {
    rng: ChaCha20Rng,
}

impl RunRng {
    /// `seed.to_le_bytes()` fills the first 8 bytes of the ChaCha20 seed; the
    /// remaining 24 bytes are zero.
    #[inline]
    pub fn from_seed_u64(seed: u64) -> Self {
        let mut seed32 = [0u8; 32];
        seed32[..8].copy_from_slice(&seed.to_le_bytes());
        Self { rng: ChaCha20Rng::from_seed(seed32) }
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    /// Unbiased integer in `[0, n)`; `None` if `n == 0`.
    ///
    /// `threshold = 2^64 mod n`; draws below it are rejected so that `x % n`
    /// is uniform.
    #[inline]
    pub fn gen_range(&mut self, n: u64) -> Option<u64> {
        if n == 0 {
            return None;
        }
        let threshold = n.wrapping_neg() % n;
        loop {
            let x = self.next_u64();
            if x >= threshold {
                return Some(x % n);
            }
        }
    }

    /// Index in `[0, n)`; `None` if `n == 0`.
    #[inline]
    pub fn choose_index(&mut self, n: usize) -> Option<usize> {
        self.gen_range(n as u64).map(|v| v as usize)
    }

    /// Pick one element of a slice by copy.
    pub fn choose<T: Copy>(&mut self, slice: &[T]) -> Option<T> {
        let i = self.choose_index(slice.len())?;
        slice.get(i).copied()
    }

    /// Fisher–Yates, walking `i = len-1` down to `1`.
    pub fn shuffle_in_place<T>(&mut self, slice: &mut [T]) {
        let len = slice.len();
        if len <= 1 {
            return;
        }
        for i in (1..len).rev() {
            if let Some(j) = self.choose_index(i + 1) {
                slice.swap(i, j);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gen_range_zero_none() {
        let mut rng = RunRng::from_seed_u64(0xDEAD_BEEF_CAFE_BABE);
        assert_eq!(rng.gen_range(0), None);
        // an empty range draws nothing, so the stream is untouched
        assert_eq!(rng.gen_range(1 << 40), RunRng::from_seed_u64(0xDEAD_BEEF_CAFE_BABE).gen_range(1 << 40));
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = RunRng::from_seed_u64(123_456_789);
        let mut b = RunRng::from_seed_u64(123_456_789);
        let xs: Vec<u64> = (0..32).map(|_| a.gen_range(33).unwrap()).collect();
        let ys: Vec<u64> = (0..32).map(|_| b.gen_range(33).unwrap()).collect();
        assert_eq!(xs, ys);
        assert!(xs.iter().all(|&x| x < 33));
        assert_eq!(a.gen_range(u64::MAX), b.gen_range(u64::MAX));
    }

    #[test]
    fn shuffle_is_a_deterministic_permutation() {
        let mut a = RunRng::from_seed_u64(42);
        let mut b = RunRng::from_seed_u64(42);
        let mut xs: Vec<u8> = (1..=16).collect();
        let mut ys = xs.clone();
        a.shuffle_in_place(&mut xs);
        b.shuffle_in_place(&mut ys);
        assert_eq!(xs, ys);
        let mut sorted = xs.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (1..=16).collect::<Vec<u8>>());
    }

    #[test]
    fn choose_handles_empty() {
        let mut rng = RunRng::from_seed_u64(7);
        let empty: [u8; 0] = [];
        assert_eq!(rng.choose(&empty), None);
        let data = [10u8, 20, 30];
        for _ in 0..10 {
            assert!(data.contains(&rng.choose(&data).unwrap()));
        }
    }
}
