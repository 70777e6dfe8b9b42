//! Three-tier red sampler.
//!
//! - `strict`: band quotas, per-number cap and overlap bound, lucky numbers first.
//! - `relaxed`: re-runs `strict` over a fixed sweep of loosened parameters.
//! - `brute`: ignores soft constraints; only blocklist, anchor and uniqueness.
//!
//! Tiers return `None` on failure and never panic. Batch-frequency bumps made
//! by a tier are part of its success path only.

pub mod brute;
pub mod relaxed;
pub mod strict;

use serde::Serialize;
use tracing::warn;

use luck_core::numbers::REDS_PER_TICKET;
use luck_core::{BandRange, HistoryIndex, NumberSet, RunRng};

use crate::bands::BandQuota;
use crate::state::BatchState;

/// Which tier produced a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Strict,
    Relaxed,
    BruteForce,
}

/// Inputs for one ticket attempt. `lucky`, `max_overlap` and `cap` are the
/// knobs the relaxed tier turns.
#[derive(Debug, Clone, Copy)]
pub struct TierInput<'a> {
    pub history: &'a HistoryIndex,
    pub blocked: NumberSet,
    pub bands: &'a BandRange,
    pub lucky: &'a [u8],
    pub min_start: u8,
    pub quota: BandQuota,
    pub max_overlap: u8,
    pub cap: u32,
}

/// True when `trial` shares at most `max_overlap` reds with every accepted set.
pub fn respects_overlap(trial: &NumberSet, accepted: &[NumberSet], max_overlap: u8) -> bool {
    accepted
        .iter()
        .all(|prev| trial.intersection_len(prev) <= max_overlap as usize)
}

/// Tier 1, then the Tier 2 sweep, then Tier 3.
pub fn pick_reds(
    input: &TierInput<'_>,
    state: &mut BatchState,
    rng: &mut RunRng,
) -> Option<([u8; REDS_PER_TICKET], Tier)> {
    if let Some(reds) = strict::pick(input, state) {
        return Some((reds, Tier::Strict));
    }
    if let Some(reds) = relaxed::pick(input, state) {
        warn!(anchor = input.min_start, "strict tier failed; relaxed constraints");
        return Some((reds, Tier::Relaxed));
    }
    warn!(anchor = input.min_start, "relaxed tier failed; falling back to brute force");
    brute::pick(input.history, input.blocked, input.min_start, state, rng)
        .map(|reds| (reds, Tier::BruteForce))
}

/// Ascending `[u8; 6]` from a chosen list of exactly six.
pub(crate) fn sorted_six(chosen: &[u8]) -> Option<[u8; REDS_PER_TICKET]> {
    let mut out: [u8; REDS_PER_TICKET] = chosen.try_into().ok()?;
    out.sort_unstable();
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_bound_is_inclusive() {
        let prev: NumberSet = [1u8, 2, 3, 4, 5, 6].into_iter().collect();
        let trial: NumberSet = [4u8, 5, 6, 7, 8, 9].into_iter().collect();
        assert!(respects_overlap(&trial, &[prev], 3));
        assert!(!respects_overlap(&trial, &[prev], 2));
        assert!(respects_overlap(&trial, &[], 0));
    }

    #[test]
    fn sorted_six_requires_six() {
        assert_eq!(sorted_six(&[9, 1, 5, 3, 7, 2]), Some([1, 2, 3, 5, 7, 9]));
        assert_eq!(sorted_six(&[1, 2, 3]), None);
    }
}
