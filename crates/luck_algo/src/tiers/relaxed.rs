//! Tier 2: re-run the strict tier over a nested sweep of relaxations.
//!
//! Order (outer to inner): overlap bound `+0..=3` (at most 6), cap `+0..=3`,
//! lucky strength (full list, first number only, none). First success wins.

use luck_core::numbers::REDS_PER_TICKET;

use super::{strict, TierInput};
use crate::state::BatchState;

const MAX_EXTRA_OVERLAP: u8 = 3;
const MAX_EXTRA_CAP: u32 = 3;

pub fn pick(input: &TierInput<'_>, state: &mut BatchState) -> Option<[u8; REDS_PER_TICKET]> {
    let mut lucky_plans: Vec<&[u8]> = vec![input.lucky];
    if input.lucky.len() > 1 {
        lucky_plans.push(&input.lucky[..1]);
    }
    lucky_plans.push(&[]);

    for add_ov in 0..=MAX_EXTRA_OVERLAP {
        let max_overlap = input.max_overlap.saturating_add(add_ov).min(REDS_PER_TICKET as u8);
        for add_cap in 0..=MAX_EXTRA_CAP {
            let cap = input.cap.saturating_add(add_cap);
            for &lucky in &lucky_plans {
                let attempt = TierInput { lucky, max_overlap, cap, ..*input };
                if let Some(reds) = strict::pick(&attempt, state) {
                    return Some(reds);
                }
            }
        }
    }
    None
}
