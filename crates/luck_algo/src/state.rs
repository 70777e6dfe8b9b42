//! Batch state: everything one run accumulates while it emits tickets.
//!
//! Owned by exactly one run and passed by `&mut` through the tiers. The
//! history index stays read-only; membership checks consult both.

use std::collections::BTreeSet;

use luck_core::numbers::{RED_MAX, REDS_PER_TICKET};
use luck_core::{ComboKey, HistoryIndex, NumberSet};

#[derive(Debug, Clone)]
pub struct BatchState {
    freq: [u32; RED_MAX as usize + 1],
    /// Reds bumped since the last commit.
    pending: NumberSet,
    accepted: Vec<NumberSet>,
    accepted_keys: BTreeSet<ComboKey>,
}

impl Default for BatchState {
    fn default() -> Self {
        Self {
            freq: [0; RED_MAX as usize + 1],
            pending: NumberSet::new(),
            accepted: Vec::new(),
            accepted_keys: BTreeSet::new(),
        }
    }
}

impl BatchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// In-run count of red `n`.
    #[inline]
    pub fn frequency(&self, n: u8) -> u32 {
        self.freq.get(n as usize).copied().unwrap_or(0)
    }

    /// Historical plus in-run count; the quantity the per-number cap bounds.
    #[inline]
    pub fn combined_frequency(&self, history: &HistoryIndex, n: u8) -> u32 {
        history.frequency(n).saturating_add(self.frequency(n))
    }

    #[inline]
    pub fn bump(&mut self, n: u8) {
        if let Some(slot) = self.freq.get_mut(n as usize) {
            *slot = slot.saturating_add(1);
            self.pending.insert(n);
        }
    }

    pub fn bump_all(&mut self, reds: &[u8]) {
        for &n in reds {
            self.bump(n);
        }
    }

    /// Red sets accepted so far, in emission order.
    pub fn accepted(&self) -> &[NumberSet] {
        &self.accepted
    }

    /// Key already committed, either in history or earlier in this run.
    pub fn is_used(&self, history: &HistoryIndex, key: &ComboKey) -> bool {
        history.contains(key) || self.accepted_keys.contains(key)
    }

    /// Record an accepted ticket: key and red set. Reds the tiers already
    /// bumped since the last commit keep that count; the rest (lucky numbers,
    /// or a ticket built by hand) get theirs here.
    pub fn commit(&mut self, reds: &[u8; REDS_PER_TICKET]) {
        self.accepted_keys.insert(ComboKey::from_reds(reds));
        self.accepted.push(reds.iter().copied().collect());
        for &n in reds {
            if !self.pending.contains(n) {
                self.bump(n);
            }
        }
        self.pending = NumberSet::new();
    }

    pub fn len(&self) -> usize {
        self.accepted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_tracks_keys_sets_and_counts() {
        let mut st = BatchState::new();
        let reds = [3, 9, 14, 20, 27, 33];
        st.commit(&reds);
        assert_eq!(st.len(), 1);
        assert_eq!(st.frequency(3), 1);
        assert_eq!(st.frequency(4), 0);
        let hist = HistoryIndex::new();
        assert!(st.is_used(&hist, &ComboKey::from_reds(&reds)));
        assert!(!st.is_used(&hist, &ComboKey::from_reds(&[1, 2, 3, 4, 5, 6])));
    }

    #[test]
    fn commit_counts_tier_picks_once() {
        // a strict pick bumps its non-lucky reds; 5 is the lucky number
        let mut st = BatchState::new();
        let reds = [5, 9, 14, 20, 27, 33];
        st.bump_all(&reds[1..]);
        st.commit(&reds);
        assert!(reds.iter().all(|&n| st.frequency(n) == 1), "{st:?}");

        // the next ticket starts from a clean slate
        st.bump(9);
        st.commit(&[1, 2, 3, 4, 9, 10]);
        assert_eq!(st.frequency(9), 2);
        assert_eq!(st.frequency(1), 1);
    }

    #[test]
    fn combined_frequency_adds_history() {
        let hist = HistoryIndex::from_draws([[1, 2, 3, 4, 5, 6]]);
        let mut st = BatchState::new();
        st.bump(1);
        st.bump(1);
        assert_eq!(st.combined_frequency(&hist, 1), 3);
        assert_eq!(st.combined_frequency(&hist, 7), 0);
        assert!(st.is_used(&hist, &ComboKey::from_reds(&[6, 5, 4, 3, 2, 1])));
    }
}
