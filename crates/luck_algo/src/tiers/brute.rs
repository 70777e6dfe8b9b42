//! Tier 3: brute force over the non-blocked reds at or above the anchor.
//!
//! Only uniqueness (history + this run) is enforced. Random shuffles first,
//! then a deterministic coldest-six pick with single-position substitution.

use luck_core::numbers::{RED_MAX, REDS_PER_TICKET};
use luck_core::{ComboKey, HistoryIndex, NumberSet, RunRng};

use super::sorted_six;
use crate::state::BatchState;

pub const RANDOM_ATTEMPTS: usize = 5000;

pub fn pick(
    history: &HistoryIndex,
    blocked: NumberSet,
    min_start: u8,
    state: &mut BatchState,
    rng: &mut RunRng,
) -> Option<[u8; REDS_PER_TICKET]> {
    let mut cands: Vec<u8> = (min_start.max(1)..=RED_MAX).filter(|&n| !blocked.contains(n)).collect();
    if cands.len() < REDS_PER_TICKET {
        return None;
    }

    let fresh = |reds: &[u8; REDS_PER_TICKET], state: &BatchState| {
        !state.is_used(history, &ComboKey::from_reds(reds))
    };

    for _ in 0..RANDOM_ATTEMPTS {
        rng.shuffle_in_place(&mut cands);
        let reds = sorted_six(&cands[..REDS_PER_TICKET])?;
        if fresh(&reds, state) {
            state.bump_all(&reds);
            return Some(reds);
        }
    }

    // ----- deterministic fallback -----
    let mut ranked = cands;
    ranked.sort_by_key(|&n| (state.combined_frequency(history, n), n));
    let mut red = sorted_six(&ranked[..REDS_PER_TICKET])?;
    if fresh(&red, state) {
        state.bump_all(&red);
        return Some(red);
    }

    for pos in (0..REDS_PER_TICKET).rev() {
        let original = red[pos];
        for &alt in &ranked[REDS_PER_TICKET..] {
            red[pos] = alt;
            let mut trial = red;
            trial.sort_unstable();
            if fresh(&trial, state) {
                state.bump_all(&trial);
                return Some(trial);
            }
        }
        red[pos] = original;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fewer_than_six_candidates_fails() {
        let hist = HistoryIndex::new();
        let mut st = BatchState::new();
        let mut rng = RunRng::from_seed_u64(1);
        assert!(pick(&hist, NumberSet::new(), 29, &mut st, &mut rng).is_none());
    }

    #[test]
    fn random_pick_is_fresh_and_above_anchor() {
        let hist = HistoryIndex::new();
        let mut st = BatchState::new();
        let mut rng = RunRng::from_seed_u64(11);
        let blocked: NumberSet = [25u8].into_iter().collect();
        let reds = pick(&hist, blocked, 20, &mut st, &mut rng).unwrap();
        assert!(reds.iter().all(|&n| n >= 20 && n != 25));
        assert!(reds.windows(2).all(|w| w[0] < w[1]));
        assert!(reds.iter().all(|&n| st.frequency(n) == 1));
    }

    #[test]
    fn exhausted_pool_fails_explicitly() {
        // 28..=33 is the only combination and it is already in history
        let hist = HistoryIndex::from_draws([[28, 29, 30, 31, 32, 33]]);
        let mut st = BatchState::new();
        let mut rng = RunRng::from_seed_u64(3);
        assert!(pick(&hist, NumberSet::new(), 28, &mut st, &mut rng).is_none());
        assert_eq!(st.frequency(28), 0);
    }

    #[test]
    fn substitution_finds_the_last_free_combination() {
        // 27..=33 gives seven six-subsets; all but {27,28,29,30,31,32} are taken
        let draws = [
            [28, 29, 30, 31, 32, 33],
            [27, 29, 30, 31, 32, 33],
            [27, 28, 30, 31, 32, 33],
            [27, 28, 29, 31, 32, 33],
            [27, 28, 29, 30, 32, 33],
            [27, 28, 29, 30, 31, 33],
        ];
        let hist = HistoryIndex::from_draws(draws);
        let mut st = BatchState::new();
        let mut rng = RunRng::from_seed_u64(8);
        let reds = pick(&hist, NumberSet::new(), 27, &mut st, &mut rng).unwrap();
        assert_eq!(reds, [27, 28, 29, 30, 31, 32]);
    }
}
