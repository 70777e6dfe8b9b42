//! Core types, number domains, history index, config and seeded RNG.
//!
//! This crate is **I/O-free**. It defines stable types/APIs used across the
//! engine (`luck_algo`, `luck_io`, `luck_pipeline`, `luck_cli`).
//!
//! - Number domains: reds `1..=33`, blues `1..=16`, anchors `1..=28`
//! - `NumberSet`: fixed-size bitset over the bounded domains
//! - `Ticket` + `ComboKey` (canonical `"01,05,12,20,28,33"` key)
//! - `HistoryIndex`: read-only snapshot of committed combinations + frequencies
//! - `Config`: per-run parameter bundle with the stock defaults
//! - Personalization: birthday/zodiac parsing and stable seeds
//! - Seedable RNG (ChaCha20), one instance per run

#![forbid(unsafe_code)]

pub mod config;
pub mod history;
pub mod numbers;
pub mod personal;
pub mod rng;
pub mod ticket;

pub mod errors {
    use thiserror::Error;

    /// Minimal error set for core-domain validation & parsing.
    #[derive(Clone, Debug, Eq, PartialEq, Error)]
    pub enum CoreError {
        #[error("{what} out of range: {value}")]
        OutOfRange { what: &'static str, value: i64 },
        #[error("duplicate red number: {0}")]
        DuplicateRed(u8),
        #[error("invalid combination key: {0}")]
        InvalidKey(String),
        #[error("invalid birthday (expected YYYY-MM-DD): {0}")]
        InvalidBirthday(String),
    }
}

pub use config::{AnchorBucket, Band, BandKind, BandRange, Config, LuckyMode, SelectionMode};
pub use errors::CoreError;
pub use history::{HistoryIndex, HistorySummary};
pub use numbers::NumberSet;
pub use personal::{Birthday, Zodiac};
pub use rng::RunRng;
pub use ticket::{ComboKey, Ticket};
