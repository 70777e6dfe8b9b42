//! History index: committed red combinations and per-number occurrence counts.
//!
//! Built once from the store snapshot before a run and shared read-only with
//! the generator. The generator never mutates it; in-run bookkeeping lives in
//! the batch state.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::numbers::{RED_MAX, REDS_PER_TICKET};
use crate::ticket::ComboKey;

#[derive(Clone, Debug)]
pub struct HistoryIndex {
    combos: BTreeSet<ComboKey>,
    freq: [u32; RED_MAX as usize + 1],
    rows: usize,
}

impl Default for HistoryIndex {
    fn default() -> Self {
        Self { combos: BTreeSet::new(), freq: [0; RED_MAX as usize + 1], rows: 0 }
    }
}

/// Row/combination counts of a loaded history.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct HistorySummary {
    pub total_rows: usize,
    pub total_combos: usize,
    pub initialized: bool,
}

impl HistoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from already-normalized red sets (each six distinct reds in range).
    pub fn from_draws<I>(draws: I) -> Self
    where
        I: IntoIterator<Item = [u8; REDS_PER_TICKET]>,
    {
        let mut idx = Self::new();
        for reds in draws {
            idx.record(&reds);
        }
        idx
    }

    /// Assemble from a store that tracks keys and frequencies separately.
    /// `freq[0]` is ignored.
    pub fn from_parts<I>(combos: I, freq: [u32; RED_MAX as usize + 1], rows: usize) -> Self
    where
        I: IntoIterator<Item = ComboKey>,
    {
        let mut freq = freq;
        freq[0] = 0;
        Self { combos: combos.into_iter().collect(), freq, rows }
    }

    /// Add one committed draw. Repeated combinations count once in the key set
    /// but every row contributes to the frequency table.
    pub fn record(&mut self, reds: &[u8; REDS_PER_TICKET]) {
        self.combos.insert(ComboKey::from_reds(reds));
        for &r in reds {
            if let Some(slot) = self.freq.get_mut(r as usize) {
                *slot += 1;
            }
        }
        self.rows += 1;
    }

    #[inline]
    pub fn contains(&self, key: &ComboKey) -> bool {
        self.combos.contains(key)
    }

    /// Historical count of red `n` (0 outside `1..=33`).
    #[inline]
    pub fn frequency(&self, n: u8) -> u32 {
        if n == 0 {
            return 0;
        }
        self.freq.get(n as usize).copied().unwrap_or(0)
    }

    pub fn summary(&self) -> HistorySummary {
        HistorySummary {
            total_rows: self.rows,
            total_combos: self.combos.len(),
            initialized: self.rows > 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_keys_and_frequencies() {
        let idx = HistoryIndex::from_draws([
            [1, 2, 3, 4, 5, 6],
            [6, 5, 4, 3, 2, 1],
            [1, 10, 20, 30, 31, 33],
        ]);
        let s = idx.summary();
        assert_eq!(s.total_rows, 3);
        assert_eq!(s.total_combos, 2);
        assert!(s.initialized);
        assert_eq!(idx.frequency(1), 3);
        assert_eq!(idx.frequency(6), 2);
        assert_eq!(idx.frequency(33), 1);
        assert_eq!(idx.frequency(0), 0);
        assert!(idx.contains(&ComboKey::from_reds(&[1, 2, 3, 4, 5, 6])));
    }

    #[test]
    fn from_parts_keeps_keys_and_table() {
        let mut freq = [0u32; 34];
        freq[0] = 9;
        freq[7] = 4;
        let key = ComboKey::from_reds(&[2, 4, 6, 8, 10, 12]);
        let idx = HistoryIndex::from_parts([key.clone()], freq, 1);
        assert!(idx.contains(&key));
        assert_eq!(idx.frequency(7), 4);
        assert_eq!(idx.frequency(0), 0);
        assert_eq!(idx.frequency(2), 0);
    }

    #[test]
    fn empty_index_is_uninitialized() {
        let idx = HistoryIndex::default();
        assert_eq!(idx.summary(), HistorySummary::default());
        assert!((0..=RED_MAX).all(|n| idx.frequency(n) == 0));
    }
}
