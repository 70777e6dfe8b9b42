//! Band allocator: residual low/mid/high quota for one ticket.

use luck_core::numbers::{is_red, REDS_PER_TICKET};
use luck_core::{BandKind, Config};

const DEFAULT_TEMPLATE: [u8; 3] = [2, 2, 2];
const DEFAULT_REPEAT: u32 = 2;

/// Per-band count still to fill from non-lucky candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BandQuota {
    pub low: u32,
    pub mid: u32,
    pub high: u32,
}

impl BandQuota {
    pub fn total(&self) -> u32 {
        self.low + self.mid + self.high
    }

    pub fn get(&self, kind: BandKind) -> u32 {
        match kind {
            BandKind::Low => self.low,
            BandKind::Mid => self.mid,
            BandKind::High => self.high,
        }
    }

    pub fn get_mut(&mut self, kind: BandKind) -> &mut u32 {
        match kind {
            BandKind::Low => &mut self.low,
            BandKind::Mid => &mut self.mid,
            BandKind::High => &mut self.high,
        }
    }
}

/// Template for ticket `index`: `templates[(index / repeat) mod len]`.
pub fn template_for(cfg: &Config, index: usize) -> [u8; 3] {
    if cfg.band_templates.is_empty() {
        return DEFAULT_TEMPLATE;
    }
    let repeat = if cfg.template_repeat == 0 { DEFAULT_REPEAT } else { cfg.template_repeat };
    cfg.band_templates[(index / repeat as usize) % cfg.band_templates.len()]
}

/// Start from the ticket's template, reserve one slot per lucky number at or
/// above `min_start`, then normalize the total to six (shave high, mid, low;
/// or top up mid).
pub fn band_quota(cfg: &Config, index: usize, lucky: &[u8], min_start: u8) -> BandQuota {
    let [l, m, h] = template_for(cfg, index);
    let mut q = BandQuota { low: l as u32, mid: m as u32, high: h as u32 };

    for &n in lucky {
        if n < min_start || !is_red(n as i64) {
            continue;
        }
        let slot = q.get_mut(cfg.bands.band_of(n));
        *slot = slot.saturating_sub(1);
    }

    let target = REDS_PER_TICKET as u32;
    let sum = q.total();
    if sum > target {
        let mut excess = sum - target;
        for kind in [BandKind::High, BandKind::Mid, BandKind::Low] {
            let slot = q.get_mut(kind);
            let take = excess.min(*slot);
            *slot -= take;
            excess -= take;
        }
    } else if sum < target {
        q.mid += target - sum;
    }
    q
}
