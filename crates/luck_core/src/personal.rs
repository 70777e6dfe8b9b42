//! Personalization inputs: birthday and zodiac sign, plus the stable seeds
//! derived from them.
//!
//! Both inputs are optional and lenient: an unparsable birthday or an
//! out-of-range zodiac index is treated as absent (the validator reports it
//! as a warning).

use chrono::{Datelike, NaiveDate};

use crate::errors::CoreError;
use crate::numbers::RED_MAX;

/// Digit sum of `n`, folded into `1..=33` (minimum 1).
pub fn digit_sum(n: u32) -> u8 {
    let mut sum = 0u32;
    let mut rest = n;
    while rest > 0 {
        sum += rest % 10;
        rest /= 10;
    }
    if sum < 1 {
        return 1;
    }
    let red_max = RED_MAX as u32;
    if sum > red_max {
        sum = (sum - 1) % red_max + 1;
    }
    sum as u8
}

/// Calendar date of birth.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Birthday {
    pub year: u32,
    pub month: u32,
    pub day: u32,
}

impl Birthday {
    /// Parse `YYYY-MM-DD`; rejects impossible dates (e.g. `2023-02-30`).
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        let s = s.trim();
        let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| CoreError::InvalidBirthday(s.to_string()))?;
        let year = date.year();
        if !(1..=9999).contains(&year) {
            return Err(CoreError::InvalidBirthday(s.to_string()));
        }
        Ok(Self { year: year as u32, month: date.month(), day: date.day() })
    }

    /// Stable seed: `(y*10000 + m*100 + d) * 131 + digit_sum(y + m + d) * 17`.
    pub fn stable_seed(&self) -> u64 {
        let base = self.year as u64 * 10_000 + self.month as u64 * 100 + self.day as u64;
        base * 131 + digit_sum(self.year + self.month + self.day) as u64 * 17
    }
}

/// The twelve signs, 1-based in the traditional order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Zodiac {
    Rat = 1,
    Ox,
    Tiger,
    Rabbit,
    Dragon,
    Snake,
    Horse,
    Goat,
    Monkey,
    Rooster,
    Dog,
    Pig,
}

impl Zodiac {
    pub const ALL: [Zodiac; 12] = [
        Zodiac::Rat,
        Zodiac::Ox,
        Zodiac::Tiger,
        Zodiac::Rabbit,
        Zodiac::Dragon,
        Zodiac::Snake,
        Zodiac::Horse,
        Zodiac::Goat,
        Zodiac::Monkey,
        Zodiac::Rooster,
        Zodiac::Dog,
        Zodiac::Pig,
    ];

    pub fn from_index(i: i64) -> Option<Self> {
        if (1..=12).contains(&i) {
            Some(Self::ALL[(i - 1) as usize])
        } else {
            None
        }
    }

    /// 1-based index (`Rat == 1`).
    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Anchor-plan seed used when no birthday is present.
    pub fn anchor_seed(self) -> u64 {
        20_011 + self.index() as u64 * 137
    }
}
