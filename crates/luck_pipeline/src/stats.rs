//! Batch statistics over the generated tickets.
//!
//! Maps are `BTreeMap` so serialized key order is fixed. Band share uses the
//! configured bands (low, then mid, everything else high); the high/low split
//! puts every red below the mid band start in "low".

use std::collections::BTreeMap;

use serde::Serialize;

use luck_core::{BandKind, BandRange, Ticket};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BandShare {
    pub low: u32,
    pub mid: u32,
    pub high: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OddEven {
    pub odd: u32,
    pub even: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HighLow {
    pub low: u32,
    pub high: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchStats {
    pub red_freq: BTreeMap<u8, u32>,
    pub blue_freq: BTreeMap<u8, u32>,
    pub band_share: BandShare,
    pub odd_even: OddEven,
    pub high_low: HighLow,
}

pub fn batch_stats(tickets: &[Ticket], bands: &BandRange) -> BatchStats {
    let mut s = BatchStats::default();
    let mid_start = bands.mid.lo;

    for t in tickets {
        for &n in &t.reds {
            *s.red_freq.entry(n).or_insert(0) += 1;

            if n % 2 == 0 {
                s.odd_even.even += 1;
            } else {
                s.odd_even.odd += 1;
            }

            if n < mid_start {
                s.high_low.low += 1;
            } else {
                s.high_low.high += 1;
            }

            match bands.band_of(n) {
                BandKind::Low => s.band_share.low += 1,
                BandKind::Mid => s.band_share.mid += 1,
                BandKind::High => s.band_share.high += 1,
            }
        }
        *s.blue_freq.entry(t.blue).or_insert(0) += 1;
    }
    s
}
