//! Generation layer. Pure functions over `luck_core` types plus one explicit
//! mutable `BatchState` per run. No I/O, no clock, no global RNG.

#![forbid(unsafe_code)]

pub mod anchor_plan;
pub mod bands;
pub mod batch;
pub mod blue_plan;
pub mod lucky;
pub mod state;
pub mod tiers;

use luck_core::CoreError;
use thiserror::Error;

/// Upper bound on same-index retries after a duplicate combination.
pub const MAX_DUPLICATE_RETRIES: u32 = 256;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlgoError {
    #[error("no blue numbers left after applying the blue blocklist")]
    EmptyBluePool,
    #[error(
        "no feasible ticket at index {index} (anchor {anchor}); relax the red blocklist, overlap limit or ticket count"
    )]
    NoFeasibleTicket { index: usize, anchor: u8 },
    #[error("ticket {index}: {retries} duplicate combinations in a row; history leaves no room")]
    RetriesExhausted { index: usize, retries: u32 },
    #[error(transparent)]
    Core(#[from] CoreError),
}

pub use anchor_plan::{anchor_seed, plan_anchors};
pub use bands::{band_quota, BandQuota};
pub use batch::{generate_batch, BatchOutcome, BatchPlan};
pub use blue_plan::plan_blues;
pub use lucky::{build_lucky, lucky_for_ticket};
pub use state::BatchState;
pub use tiers::Tier;
