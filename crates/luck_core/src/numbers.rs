//! Number domains and a fixed-size set over them.
//!
//! Every domain the engine touches is tiny (`1..=33` reds, `1..=16` blues,
//! `1..=28` anchors), so membership is a single `u64` bitmask. Iteration is
//! always ascending, which keeps every scan over a set deterministic.

use core::fmt;

pub const RED_MIN: u8 = 1;
pub const RED_MAX: u8 = 33;
pub const BLUE_MIN: u8 = 1;
pub const BLUE_MAX: u8 = 16;
/// Highest anchor that still leaves room for six ascending reds.
pub const ANCHOR_MAX: u8 = 28;
pub const REDS_PER_TICKET: usize = 6;

#[inline]
pub fn is_red(n: i64) -> bool {
    (RED_MIN as i64..=RED_MAX as i64).contains(&n)
}

#[inline]
pub fn is_blue(n: i64) -> bool {
    (BLUE_MIN as i64..=BLUE_MAX as i64).contains(&n)
}

/// Bitset over `0..64`. Values outside that range are never members.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NumberSet(u64);

impl NumberSet {
    pub const fn new() -> Self {
        Self(0)
    }

    /// Insert `n`; returns `true` if it was not already present.
    #[inline]
    pub fn insert(&mut self, n: u8) -> bool {
        if n >= 64 {
            return false;
        }
        let bit = 1u64 << n;
        let fresh = self.0 & bit == 0;
        self.0 |= bit;
        fresh
    }

    #[inline]
    pub fn remove(&mut self, n: u8) -> bool {
        if n >= 64 {
            return false;
        }
        let bit = 1u64 << n;
        let present = self.0 & bit != 0;
        self.0 &= !bit;
        present
    }

    #[inline]
    pub fn contains(&self, n: u8) -> bool {
        n < 64 && self.0 & (1u64 << n) != 0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Number of members shared with `other`.
    #[inline]
    pub fn intersection_len(&self, other: &NumberSet) -> usize {
        (self.0 & other.0).count_ones() as usize
    }

    /// Ascending iteration.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        let bits = self.0;
        (0u8..64).filter(move |&n| bits & (1u64 << n) != 0)
    }

    /// Build a set from possibly out-of-domain integers, keeping only those in `lo..=hi`.
    pub fn from_domain<I>(values: I, lo: u8, hi: u8) -> Self
    where
        I: IntoIterator,
        I::Item: Into<i64>,
    {
        let mut s = NumberSet::new();
        for v in values {
            let v: i64 = v.into();
            if v >= lo as i64 && v <= hi as i64 {
                s.insert(v as u8);
            }
        }
        s
    }
}

impl FromIterator<u8> for NumberSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut s = NumberSet::new();
        for n in iter {
            s.insert(n);
        }
        s
    }
}

impl fmt::Debug for NumberSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_remove_contains() {
        let mut s = NumberSet::new();
        assert!(s.insert(33));
        assert!(!s.insert(33));
        assert!(s.contains(33));
        assert!(!s.contains(32));
        assert!(s.remove(33));
        assert!(s.is_empty());
        assert!(!s.insert(64));
    }

    #[test]
    fn iteration_is_ascending() {
        let s: NumberSet = [30u8, 1, 17, 5].into_iter().collect();
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![1, 5, 17, 30]);
        assert_eq!(s.len(), 4);
    }

    #[test]
    fn from_domain_filters() {
        let s = NumberSet::from_domain([-3i64, 0, 1, 16, 17, 40], BLUE_MIN, BLUE_MAX);
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![1, 16]);
    }

    #[test]
    fn intersection_counts_shared() {
        let a: NumberSet = [1u8, 2, 3, 4, 5, 6].into_iter().collect();
        let b: NumberSet = [4u8, 5, 6, 7, 8, 9].into_iter().collect();
        assert_eq!(a.intersection_len(&b), 3);
    }
}
