//! Anchor plan: a per-ticket minimum red, spread across configured buckets.
//!
//! Contract:
//! - Exactly `n` anchors, each in `1..=28`.
//! - No value appears more than the per-anchor cap. When `n` exceeds what the
//!   cap allows over 28 values, the cap is raised to `ceil(n / 28)` so the
//!   plan always completes.
//!
//! Determinism: the output is a pure function of the buckets, the cap, `n`
//! and the RNG stream handed in.

use luck_core::numbers::ANCHOR_MAX;
use luck_core::{AnchorBucket, Config, RunRng};

/// Anchor stream seed: birthday, else zodiac, else the run seed.
pub fn anchor_seed(cfg: &Config, run_seed: u64) -> u64 {
    if let Some(b) = cfg.birthday() {
        b.stable_seed()
    } else if let Some(z) = cfg.zodiac() {
        z.anchor_seed()
    } else {
        run_seed
    }
}

pub fn plan_anchors(
    buckets: &[AnchorBucket],
    max_per_anchor: u32,
    n: usize,
    rng: &mut RunRng,
) -> Vec<u8> {
    if n == 0 {
        return Vec::new();
    }

    // ----- per-bucket sequences -----
    let mut sequences: Vec<Vec<u8>> = Vec::new();
    for b in buckets {
        if b.count == 0 {
            continue;
        }
        let hi_cap = ANCHOR_MAX as i32;
        let lo = b.from.clamp(1, hi_cap);
        let to = if b.to <= 0 { hi_cap } else { b.to };
        let hi = to.clamp(lo, hi_cap);
        let width = hi - lo + 1;
        let want = (b.count as usize).min(n);
        let step = (width as i64 + want as i64 - 1) / want as i64;
        let step = step.max(1) as i32;
        let offset = rng.gen_range(step as u64).unwrap_or(0) as i32;

        let mut items = Vec::with_capacity(want);
        let mut cur = lo + offset;
        while items.len() < want {
            if cur > hi {
                cur = lo + (cur - hi - 1);
            }
            items.push(cur as u8);
            cur += step;
        }
        rng.shuffle_in_place(&mut items);
        sequences.push(items);
    }

    // ----- interleave -----
    let mut plan = Vec::with_capacity(n);
    let mut round = 0usize;
    'outer: loop {
        let mut any = false;
        for seq in &sequences {
            if let Some(&a) = seq.get(round) {
                plan.push(a);
                any = true;
                if plan.len() >= n {
                    break 'outer;
                }
            }
        }
        if !any {
            break;
        }
        round += 1;
    }

    // ----- cap + pad -----
    let slots = ANCHOR_MAX as usize;
    let cap = (max_per_anchor.max(1) as usize).max(n.div_ceil(slots));
    let mut used = [0usize; ANCHOR_MAX as usize + 1];
    let mut out = Vec::with_capacity(n);
    for a in plan {
        if used[a as usize] < cap {
            used[a as usize] += 1;
            out.push(a);
        }
    }
    while out.len() < n {
        let open: Vec<u8> = (1..=ANCHOR_MAX).filter(|&a| used[a as usize] < cap).collect();
        let Some(a) = rng.choose(&open) else {
            break;
        };
        used[a as usize] += 1;
        out.push(a);
    }
    out
}
