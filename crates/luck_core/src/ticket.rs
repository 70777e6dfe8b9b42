//! Tickets and canonical combination keys.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::numbers::{is_blue, is_red, NumberSet, REDS_PER_TICKET};

/// Canonical textual key of a red combination: ascending, zero-padded,
/// comma-joined (`"01,05,12,20,28,33"`). Equality of keys is equality of sets.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ComboKey(String);

impl ComboKey {
    /// Key of any six reds; order of `reds` does not matter.
    pub fn from_reds(reds: &[u8; REDS_PER_TICKET]) -> Self {
        let mut sorted = *reds;
        sorted.sort_unstable();
        let parts: Vec<String> = sorted.iter().map(|n| format!("{n:02}")).collect();
        Self(parts.join(","))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComboKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ComboKey {
    type Err = CoreError;

    /// Accepts only the canonical form: six two-digit reds, strictly ascending.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || CoreError::InvalidKey(s.to_string());
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != REDS_PER_TICKET {
            return Err(bad());
        }
        let mut prev = 0u8;
        for p in parts {
            if p.len() != 2 || !p.bytes().all(|b| b.is_ascii_digit()) {
                return Err(bad());
            }
            let n: u8 = p.parse().map_err(|_| bad())?;
            if !is_red(n as i64) || n <= prev {
                return Err(bad());
            }
            prev = n;
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for ComboKey {
    type Error = CoreError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ComboKey> for String {
    fn from(k: ComboKey) -> Self {
        k.0
    }
}

/// One ticket: six ascending distinct reds and one blue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticket {
    pub reds: [u8; REDS_PER_TICKET],
    pub blue: u8,
}

impl Ticket {
    /// Validate and normalize (reds sorted ascending).
    pub fn new(mut reds: [u8; REDS_PER_TICKET], blue: u8) -> Result<Self, CoreError> {
        for &r in &reds {
            if !is_red(r as i64) {
                return Err(CoreError::OutOfRange { what: "red", value: r as i64 });
            }
        }
        if !is_blue(blue as i64) {
            return Err(CoreError::OutOfRange { what: "blue", value: blue as i64 });
        }
        reds.sort_unstable();
        if let Some(w) = reds.windows(2).find(|w| w[0] == w[1]) {
            return Err(CoreError::DuplicateRed(w[0]));
        }
        Ok(Self { reds, blue })
    }

    pub fn key(&self) -> ComboKey {
        ComboKey::from_reds(&self.reds)
    }

    pub fn red_set(&self) -> NumberSet {
        self.reds.iter().copied().collect()
    }

    /// Count of reds shared with `other`.
    pub fn overlap(&self, other: &Ticket) -> usize {
        self.red_set().intersection_len(&other.red_set())
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, r) in self.reds.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{r:02}")?;
        }
        write!(f, " + {:02}", self.blue)
    }
}
