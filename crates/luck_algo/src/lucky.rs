//! Lucky numbers: the personal pool and the per-ticket subset drawn from it.

use luck_core::numbers::{is_red, REDS_PER_TICKET};
use luck_core::personal::digit_sum;
use luck_core::{Config, LuckyMode, NumberSet};

/// Ascending, deduplicated pool from fixed reds, the zodiac index (zodiac or
/// mixed mode) and the birthday's month, day and year digit sum (birthday or
/// mixed mode). Invalid personalization inputs contribute nothing.
pub fn build_lucky(cfg: &Config) -> Vec<u8> {
    let mut pool = NumberSet::new();
    for &n in &cfg.fixed_reds {
        if is_red(n) {
            pool.insert(n as u8);
        }
    }
    if cfg.mode.uses_zodiac() {
        if let Some(z) = cfg.zodiac() {
            pool.insert(z.index());
        }
    }
    if cfg.mode.uses_birthday() {
        if let Some(b) = cfg.birthday() {
            for n in [b.month, b.day, digit_sum(b.year) as u32] {
                if is_red(n as i64) {
                    pool.insert(n as u8);
                }
            }
        }
    }
    pool.iter().collect()
}

/// Subset of `pool` used by ticket `index`.
///
/// `Always`: the first six. `Rotate`: `per_ticket` values (at most six)
/// starting at `index mod len`, wrapping; the whole pool if it is not larger
/// than that.
pub fn lucky_for_ticket(pool: &[u8], mode: LuckyMode, per_ticket: u32, index: usize) -> Vec<u8> {
    if pool.is_empty() {
        return Vec::new();
    }
    match mode {
        LuckyMode::Always => pool.iter().take(REDS_PER_TICKET).copied().collect(),
        LuckyMode::Rotate => {
            let k = (per_ticket as usize).min(REDS_PER_TICKET);
            if k == 0 {
                return Vec::new();
            }
            if pool.len() <= k {
                return pool.to_vec();
            }
            let start = index % pool.len();
            (0..k).map(|i| pool[(start + i) % pool.len()]).collect()
        }
    }
}

/// Put the anchor in front of the subset unless it is already there.
pub fn with_anchor(mut subset: Vec<u8>, anchor: u8) -> Vec<u8> {
    if !subset.contains(&anchor) {
        subset.insert(0, anchor);
    }
    subset
}

#[cfg(test)]
mod tests {
    use super::*;
    use luck_core::SelectionMode;

    #[test]
    fn stock_config_pool() {
        // mixed: zodiac 8, birthday 1991-05-28 → 5, 28, digit_sum(1991)=20
        let pool = build_lucky(&Config::default());
        assert_eq!(pool, vec![5, 8, 20, 28]);
    }

    #[test]
    fn mode_gates_sources() {
        let cfg = Config { mode: SelectionMode::Random, fixed_reds: vec![3, 40, 3], ..Config::default() };
        assert_eq!(build_lucky(&cfg), vec![3]);

        let cfg = Config { mode: SelectionMode::Zodiac, ..Config::default() };
        assert_eq!(build_lucky(&cfg), vec![8]);

        let cfg = Config { mode: SelectionMode::Birthday, birthday: Some("bad".into()), ..Config::default() };
        assert!(build_lucky(&cfg).is_empty());
    }

    #[test]
    fn rotate_wraps_around_pool() {
        let pool = [5, 8, 20, 28];
        assert_eq!(lucky_for_ticket(&pool, LuckyMode::Rotate, 1, 0), vec![5]);
        assert_eq!(lucky_for_ticket(&pool, LuckyMode::Rotate, 1, 5), vec![8]);
        assert_eq!(lucky_for_ticket(&pool, LuckyMode::Rotate, 2, 3), vec![28, 5]);
        assert_eq!(lucky_for_ticket(&pool, LuckyMode::Rotate, 4, 3), pool.to_vec());
        assert!(lucky_for_ticket(&pool, LuckyMode::Rotate, 0, 3).is_empty());
    }

    #[test]
    fn always_truncates_to_six() {
        let pool = [1, 2, 3, 4, 5, 6, 7, 8];
        assert_eq!(lucky_for_ticket(&pool, LuckyMode::Always, 0, 9), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn anchor_goes_first_when_absent() {
        assert_eq!(with_anchor(vec![5, 8], 3), vec![3, 5, 8]);
        assert_eq!(with_anchor(vec![5, 8], 8), vec![5, 8]);
    }
}
