//! Batch loop: plans in, tickets out.
//!
//! Per index: anchor → lucky subset (+anchor) → band quota → tiers → uniqueness
//! check → commit. A duplicate combination retries the same index, at most
//! `MAX_DUPLICATE_RETRIES` times in a row. Any failure aborts the whole batch.

use tracing::debug;

use luck_core::{Config, HistoryIndex, RunRng, Ticket};

use crate::anchor_plan::{anchor_seed, plan_anchors};
use crate::bands::band_quota;
use crate::blue_plan::plan_blues;
use crate::lucky::{build_lucky, lucky_for_ticket, with_anchor};
use crate::state::BatchState;
use crate::tiers::{pick_reds, Tier, TierInput};
use crate::{AlgoError, MAX_DUPLICATE_RETRIES};

/// Everything planned once per batch before the first ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchPlan {
    pub blues: Vec<u8>,
    pub anchors: Vec<u8>,
    pub lucky: Vec<u8>,
}

impl BatchPlan {
    /// Blue sequence, anchor plan (own seeded stream) and lucky pool for
    /// `count` tickets.
    pub fn build(cfg: &Config, count: usize, run_seed: u64) -> Result<Self, AlgoError> {
        let blues = plan_blues(cfg, count)?;
        let mut anchor_rng = RunRng::from_seed_u64(anchor_seed(cfg, run_seed));
        let anchors = plan_anchors(&cfg.anchor_buckets, cfg.max_per_anchor, count, &mut anchor_rng);
        Ok(Self { blues, anchors, lucky: build_lucky(cfg) })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub tickets: Vec<Ticket>,
    /// Tier that produced each ticket, aligned with `tickets`.
    pub tiers: Vec<Tier>,
    pub duplicate_retries: u32,
}

/// Generate `count` tickets. `rng` drives the brute-force tier only.
pub fn generate_batch(
    cfg: &Config,
    history: &HistoryIndex,
    plan: &BatchPlan,
    count: usize,
    rng: &mut RunRng,
) -> Result<BatchOutcome, AlgoError> {
    let cap = cfg.per_number_cap(count as u32);
    let blocked = cfg.red_blocked();
    let mut state = BatchState::new();
    let mut out = BatchOutcome {
        tickets: Vec::with_capacity(count),
        tiers: Vec::with_capacity(count),
        duplicate_retries: 0,
    };

    for index in 0..count {
        let anchor = plan.anchors.get(index).copied().unwrap_or(1).max(1);
        let blue = plan.blues.get(index).copied().ok_or(AlgoError::EmptyBluePool)?;
        let lucky = with_anchor(
            lucky_for_ticket(&plan.lucky, cfg.lucky_mode, cfg.lucky_per_ticket, index),
            anchor,
        );
        let quota = band_quota(cfg, index, &lucky, anchor);
        let input = TierInput {
            history,
            blocked,
            bands: &cfg.bands,
            lucky: &lucky,
            min_start: anchor,
            quota,
            max_overlap: cfg.max_overlap,
            cap,
        };

        let mut retries = 0u32;
        loop {
            let (reds, tier) = pick_reds(&input, &mut state, rng)
                .ok_or(AlgoError::NoFeasibleTicket { index, anchor })?;
            let ticket = Ticket::new(reds, blue)?;
            if state.is_used(history, &ticket.key()) {
                retries += 1;
                out.duplicate_retries += 1;
                debug!(index, key = %ticket.key(), retries, "duplicate combination; retrying");
                if retries > MAX_DUPLICATE_RETRIES {
                    return Err(AlgoError::RetriesExhausted { index, retries: MAX_DUPLICATE_RETRIES });
                }
                continue;
            }
            state.commit(&ticket.reds);
            debug!(index, anchor, ?tier, ticket = %ticket, "ticket accepted");
            out.tickets.push(ticket);
            out.tiers.push(tier);
            break;
        }
    }
    Ok(out)
}
