//! Tier 1: quota-directed greedy fill.
//!
//! Lucky numbers at or above the anchor seed the ticket. Candidates are the
//! non-blocked reds at or above the anchor still under the cap, coldest first
//! (combined frequency, then value). Band quotas are served low, mid, high,
//! one pick per round; when no band can make progress the remainder is filled
//! band-agnostically. Every non-lucky pick keeps the overlap bound.

use luck_core::numbers::{is_red, RED_MAX, REDS_PER_TICKET};
use luck_core::{BandKind, NumberSet};

use super::{respects_overlap, sorted_six, TierInput};
use crate::state::BatchState;

pub fn pick(input: &TierInput<'_>, state: &mut BatchState) -> Option<[u8; REDS_PER_TICKET]> {
    let under_cap = |n: u8| state.combined_frequency(input.history, n) < input.cap;
    let eligible = |n: u8| n >= input.min_start && is_red(n as i64) && !input.blocked.contains(n);

    // ----- fixed (lucky) -----
    let mut seen = NumberSet::new();
    let mut fixed: Vec<u8> = Vec::with_capacity(REDS_PER_TICKET);
    for &n in input.lucky {
        if !eligible(n) || !under_cap(n) || !seen.insert(n) {
            continue;
        }
        if fixed.len() < REDS_PER_TICKET {
            fixed.push(n);
        }
    }
    fixed.sort_unstable();

    // ----- candidates -----
    let mut cands: Vec<u8> = (input.min_start.max(1)..=RED_MAX)
        .filter(|&n| !input.blocked.contains(n) && under_cap(n))
        .collect();

    if cands.len() + fixed.len() < REDS_PER_TICKET {
        // admit over-cap lucky numbers
        for &n in input.lucky {
            if !eligible(n) || !seen.insert(n) {
                continue;
            }
            fixed.push(n);
            if fixed.len() >= REDS_PER_TICKET {
                break;
            }
        }
    }
    if cands.len() + fixed.len() < REDS_PER_TICKET {
        return None;
    }

    cands.sort_by_key(|&n| (state.combined_frequency(input.history, n), n));

    // ----- quota-directed fill -----
    let mut chosen: NumberSet = fixed.iter().copied().collect();
    let mut order: Vec<u8> = fixed.clone();
    let mut quota = input.quota;
    let accepted = state.accepted();

    let next_in = |chosen: &NumberSet, band: Option<BandKind>| {
        cands.iter().copied().find(|&n| {
            if chosen.contains(n) {
                return false;
            }
            if let Some(kind) = band {
                if input.bands.band_of(n) != kind {
                    return false;
                }
            }
            let mut trial = *chosen;
            trial.insert(n);
            respects_overlap(&trial, accepted, input.max_overlap)
        })
    };

    while order.len() < REDS_PER_TICKET && quota.total() > 0 {
        let mut progressed = false;
        for kind in BandKind::ALL {
            if quota.get(kind) == 0 {
                continue;
            }
            if let Some(n) = next_in(&chosen, Some(kind)) {
                chosen.insert(n);
                order.push(n);
                *quota.get_mut(kind) -= 1;
                progressed = true;
                break;
            }
        }
        if !progressed {
            break;
        }
    }

    // ----- flexible fill -----
    while order.len() < REDS_PER_TICKET {
        let n = next_in(&chosen, None)?;
        chosen.insert(n);
        order.push(n);
    }

    let reds = sorted_six(&order)?;
    for &n in &order {
        if !fixed.contains(&n) {
            state.bump(n);
        }
    }
    Some(reds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bands::BandQuota;
    use luck_core::{BandRange, HistoryIndex};

    fn input<'a>(
        history: &'a HistoryIndex,
        bands: &'a BandRange,
        lucky: &'a [u8],
        min_start: u8,
    ) -> TierInput<'a> {
        TierInput {
            history,
            blocked: NumberSet::new(),
            bands,
            lucky,
            min_start,
            quota: BandQuota { low: 2, mid: 2, high: 2 },
            max_overlap: 3,
            cap: u32::MAX,
        }
    }

    #[test]
    fn fresh_state_takes_lowest_values_per_band() {
        let hist = HistoryIndex::new();
        let bands = BandRange::default();
        let mut st = BatchState::new();
        let reds = pick(&input(&hist, &bands, &[], 1), &mut st).unwrap();
        assert_eq!(reds, [1, 2, 12, 13, 23, 24]);
        assert_eq!(st.frequency(1), 1);
    }

    #[test]
    fn lucky_numbers_are_kept_but_not_bumped() {
        let hist = HistoryIndex::new();
        let bands = BandRange::default();
        let mut st = BatchState::new();
        let mut inp = input(&hist, &bands, &[7], 1);
        inp.quota = BandQuota { low: 1, mid: 3, high: 2 };
        let reds = pick(&inp, &mut st).unwrap();
        assert!(reds.contains(&7));
        assert_eq!(st.frequency(7), 0);
        assert_eq!(reds, [1, 7, 12, 13, 14, 23]);
    }

    #[test]
    fn respects_anchor_and_blocklist() {
        let hist = HistoryIndex::new();
        let bands = BandRange::default();
        let mut st = BatchState::new();
        let mut inp = input(&hist, &bands, &[], 20);
        inp.blocked = [20u8, 21].into_iter().collect();
        let reds = pick(&inp, &mut st).unwrap();
        assert!(reds.iter().all(|&n| n >= 20 && n != 20 && n != 21));
    }

    #[test]
    fn history_frequency_pushes_hot_numbers_back() {
        let hist = HistoryIndex::from_draws([[1, 2, 12, 13, 23, 24]]);
        let bands = BandRange::default();
        let mut st = BatchState::new();
        let reds = pick(&input(&hist, &bands, &[], 1), &mut st).unwrap();
        assert_eq!(reds, [3, 4, 14, 15, 25, 26]);
    }

    #[test]
    fn overlap_bound_blocks_repeat() {
        let hist = HistoryIndex::new();
        let bands = BandRange::default();
        let mut st = BatchState::new();
        st.commit(&[28, 29, 30, 31, 32, 33]);
        let mut inp = input(&hist, &bands, &[], 28);
        inp.max_overlap = 5;
        assert!(pick(&inp, &mut st).is_none());
        assert_eq!(st.frequency(28), 1);
    }

    #[test]
    fn too_few_candidates_fails() {
        let hist = HistoryIndex::new();
        let bands = BandRange::default();
        let mut st = BatchState::new();
        let mut inp = input(&hist, &bands, &[], 1);
        inp.blocked = (1u8..=28).collect();
        assert!(pick(&inp, &mut st).is_none());
    }

    #[test]
    fn over_cap_lucky_admitted_when_short() {
        // 23..=27 are the only reds under the cap; lucky 33 is over it but
        // completes the ticket
        let hist = HistoryIndex::from_draws([[28, 29, 30, 31, 32, 33]]);
        let bands = BandRange::default();
        let mut st = BatchState::new();
        let mut inp = input(&hist, &bands, &[33], 23);
        inp.cap = 1;
        let reds = pick(&inp, &mut st).unwrap();
        assert_eq!(reds, [23, 24, 25, 26, 27, 33]);
        assert_eq!(st.frequency(33), 0);
        assert_eq!(st.frequency(23), 1);
    }
}
