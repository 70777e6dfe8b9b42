//! Blue sequence: one blue per ticket, round-robin over the allowed blues.
//!
//! Start point precedence: birthday (shuffled list, offset `seed mod len`),
//! then zodiac (`(z-1) mod len`, no shuffle), then 0. The birthday branch is
//! taken whenever the birthday parses, whatever the selection mode.

use luck_core::{Config, RunRng};

use crate::AlgoError;

pub fn plan_blues(cfg: &Config, count: usize) -> Result<Vec<u8>, AlgoError> {
    let mut base = cfg.allowed_blues();
    if base.is_empty() {
        return Err(AlgoError::EmptyBluePool);
    }
    let len = base.len();

    let offset = if let Some(b) = cfg.birthday() {
        let seed = b.stable_seed();
        RunRng::from_seed_u64(seed).shuffle_in_place(&mut base);
        (seed % len as u64) as usize
    } else if let Some(z) = cfg.zodiac() {
        (z.index() as usize - 1) % len
    } else {
        0
    };

    Ok(round_robin(&base, count, offset))
}

fn round_robin(base: &[u8], n: usize, offset: usize) -> Vec<u8> {
    (0..n).map(|i| base[(offset + i) % base.len()]).collect()
}
