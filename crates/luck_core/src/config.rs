//! Per-run parameter bundle with the stock defaults.
//!
//! Every field has a default, so a partial JSON document deserializes into a
//! complete `Config`. Numeric inputs that name red/blue numbers are kept as
//! raw integers here; out-of-domain values are dropped when the typed sets
//! are derived (and reported by the pipeline validator).

use serde::{Deserialize, Serialize};

use crate::numbers::{NumberSet, BLUE_MAX, BLUE_MIN, RED_MAX, RED_MIN, REDS_PER_TICKET};
use crate::personal::{Birthday, Zodiac};

/// Price of one ticket in budget units.
pub const TICKET_PRICE: u32 = 2;

/// Floor applied to the per-number cap when capping is enabled.
pub const MIN_PER_NUMBER_CAP: u32 = 2;

/// Define a serde'd enum with explicit wire tokens.
macro_rules! serde_enum {
    ($name:ident => { $($variant:ident = $token:expr),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $token)]
                $variant,
            )+
        }
    };
}

serde_enum!(SelectionMode => {
    Random   = "random",
    Zodiac   = "zodiac",
    Birthday = "birthday",
    Mixed    = "mixed",
});

serde_enum!(LuckyMode => {
    Always = "always",
    Rotate = "rotate",
});

impl SelectionMode {
    pub fn uses_zodiac(self) -> bool {
        matches!(self, SelectionMode::Zodiac | SelectionMode::Mixed)
    }

    pub fn uses_birthday(self) -> bool {
        matches!(self, SelectionMode::Birthday | SelectionMode::Mixed)
    }
}

// ----- bands -----

/// Inclusive numeric range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    pub lo: u8,
    pub hi: u8,
}

impl Band {
    pub const fn new(lo: u8, hi: u8) -> Self {
        Self { lo, hi }
    }

    #[inline]
    pub fn contains(&self, n: u8) -> bool {
        self.lo <= n && n <= self.hi
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BandKind {
    Low,
    Mid,
    High,
}

impl BandKind {
    pub const ALL: [BandKind; 3] = [BandKind::Low, BandKind::Mid, BandKind::High];
}

/// Low/mid/high partition of the red domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandRange {
    pub low: Band,
    pub mid: Band,
    pub high: Band,
}

impl Default for BandRange {
    fn default() -> Self {
        Self {
            low: Band::new(1, 11),
            mid: Band::new(12, 22),
            high: Band::new(23, 33),
        }
    }
}

impl BandRange {
    /// Low if inside the low range, mid if inside the mid range, else high.
    pub fn band_of(&self, n: u8) -> BandKind {
        if self.low.contains(n) {
            BandKind::Low
        } else if self.mid.contains(n) {
            BandKind::Mid
        } else {
            BandKind::High
        }
    }

    /// True when the three ranges are ordered, contiguous and cover `1..=33`.
    pub fn is_partition(&self) -> bool {
        self.low.lo == RED_MIN
            && self.low.lo <= self.low.hi
            && self.mid.lo == self.low.hi.saturating_add(1)
            && self.mid.lo <= self.mid.hi
            && self.high.lo == self.mid.hi.saturating_add(1)
            && self.high.lo <= self.high.hi
            && self.high.hi == RED_MAX
    }
}

// ----- anchors -----

/// Anchor bucket: `count` tickets should start inside `from..=to`.
/// Bounds are clamped into `1..=28` by the planner; `to <= 0` means "up to 28".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorBucket {
    pub from: i32,
    pub to: i32,
    pub count: u32,
}

impl AnchorBucket {
    pub const fn new(from: i32, to: i32, count: u32) -> Self {
        Self { from, to, count }
    }
}

// ----- config -----

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub mode: SelectionMode,
    /// 1-based zodiac index; values outside `1..=12` are ignored.
    pub zodiac: Option<i64>,
    /// `YYYY-MM-DD`; unparsable values are ignored.
    pub birthday: Option<String>,
    pub count: u32,
    /// Optional spending cap; `0` disables it.
    pub budget: u32,
    pub red_blocklist: Vec<i64>,
    pub blue_blocklist: Vec<i64>,
    pub fixed_reds: Vec<i64>,
    pub lucky_mode: LuckyMode,
    pub lucky_per_ticket: u32,
    pub max_overlap: u8,
    pub per_number_cap: bool,
    pub anchor_buckets: Vec<AnchorBucket>,
    pub max_per_anchor: u32,
    pub bands: BandRange,
    pub band_templates: Vec<[u8; 3]>,
    pub template_repeat: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: SelectionMode::Mixed,
            zodiac: Some(Zodiac::Goat.index() as i64),
            birthday: Some("1991-05-28".to_string()),
            count: 10,
            budget: 0,
            red_blocklist: Vec::new(),
            blue_blocklist: Vec::new(),
            fixed_reds: Vec::new(),
            lucky_mode: LuckyMode::Rotate,
            lucky_per_ticket: 1,
            max_overlap: 3,
            per_number_cap: true,
            anchor_buckets: vec![
                AnchorBucket::new(1, 10, 3),
                AnchorBucket::new(11, 18, 2),
                AnchorBucket::new(19, 32, 2),
            ],
            max_per_anchor: 1,
            bands: BandRange::default(),
            band_templates: vec![[2, 2, 2], [2, 3, 1], [3, 2, 1], [1, 2, 3], [1, 3, 2]],
            template_repeat: 2,
        }
    }
}

impl Config {
    /// Requested count after the budget clamp (`budget / TICKET_PRICE`).
    pub fn effective_count(&self) -> u32 {
        if self.budget > 0 {
            self.count.min(self.budget / TICKET_PRICE)
        } else {
            self.count
        }
    }

    /// `max(ceil(6 * count / 33), 2)` when capping is on, else unlimited.
    pub fn per_number_cap(&self, count: u32) -> u32 {
        if !self.per_number_cap {
            return u32::MAX;
        }
        let total = REDS_PER_TICKET as u64 * count as u64;
        let cap = total.div_ceil(RED_MAX as u64);
        (cap.min(u32::MAX as u64) as u32).max(MIN_PER_NUMBER_CAP)
    }

    /// Parsed birthday, if present and valid.
    pub fn birthday(&self) -> Option<Birthday> {
        self.birthday.as_deref().and_then(|s| Birthday::parse(s).ok())
    }

    /// Zodiac sign, if present and in `1..=12`.
    pub fn zodiac(&self) -> Option<Zodiac> {
        self.zodiac.and_then(Zodiac::from_index)
    }

    pub fn red_blocked(&self) -> NumberSet {
        NumberSet::from_domain(self.red_blocklist.iter().copied(), RED_MIN, RED_MAX)
    }

    pub fn blue_blocked(&self) -> NumberSet {
        NumberSet::from_domain(self.blue_blocklist.iter().copied(), BLUE_MIN, BLUE_MAX)
    }

    /// Blues `1..=16` minus the blocklist, ascending.
    pub fn allowed_blues(&self) -> Vec<u8> {
        let blocked = self.blue_blocked();
        (BLUE_MIN..=BLUE_MAX).filter(|b| !blocked.contains(*b)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_profile() {
        let c = Config::default();
        assert_eq!(c.mode, SelectionMode::Mixed);
        assert_eq!(c.zodiac(), Some(Zodiac::Goat));
        assert_eq!(c.birthday().map(|b| b.month), Some(5));
        assert_eq!(c.count, 10);
        assert!(c.band_templates.iter().all(|t| t.iter().sum::<u8>() == 6));
        assert!(c.bands.is_partition());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let c: Config = serde_json::from_str(r#"{"count": 3, "lucky_mode": "always"}"#).unwrap();
        assert_eq!(c.count, 3);
        assert_eq!(c.lucky_mode, LuckyMode::Always);
        assert_eq!(c.max_overlap, 3);
        assert_eq!(c.anchor_buckets.len(), 3);
    }

    #[test]
    fn wire_tokens_are_lowercase() {
        assert_eq!(serde_json::to_string(&SelectionMode::Mixed).unwrap(), "\"mixed\"");
        assert!(serde_json::from_str::<LuckyMode>("\"Rotate\"").is_err());
    }

    #[test]
    fn budget_clamps_count() {
        let mut c = Config { count: 10, budget: 7, ..Config::default() };
        assert_eq!(c.effective_count(), 3);
        c.budget = 0;
        assert_eq!(c.effective_count(), 10);
        c.budget = 1;
        assert_eq!(c.effective_count(), 0);
    }

    #[test]
    fn per_number_cap_formula() {
        let mut c = Config::default();
        assert_eq!(c.per_number_cap(5), 2); // ceil(30/33)=1 → floor 2
        assert_eq!(c.per_number_cap(20), 4); // ceil(120/33)=4
        assert_eq!(c.per_number_cap(11), 2);
        assert_eq!(c.per_number_cap(12), 3);
        c.per_number_cap = false;
        assert_eq!(c.per_number_cap(20), u32::MAX);
    }

    #[test]
    fn band_of_prefers_low_then_mid() {
        let b = BandRange::default();
        assert_eq!(b.band_of(11), BandKind::Low);
        assert_eq!(b.band_of(12), BandKind::Mid);
        assert_eq!(b.band_of(33), BandKind::High);
    }

    #[test]
    fn blocklists_ignore_out_of_domain() {
        let c = Config {
            red_blocklist: vec![0, 1, 34],
            blue_blocklist: vec![16, 17, -1],
            ..Config::default()
        };
        assert_eq!(c.red_blocked().iter().collect::<Vec<_>>(), vec![1]);
        assert_eq!(c.allowed_blues().len(), 15);
    }
}
