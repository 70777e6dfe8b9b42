//! One generation run: validate → plan → generate → stats → run record.
//!
//! This crate stays I/O-light: loading is done by the caller through `luck_io`, and
//! the only write is the optional batch artifact (`GeneratedBatch::write_to`).
//! No clock and no global RNG: the seed and timestamp arrive in `RunOptions`.

#![forbid(unsafe_code)]

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use luck_algo::{generate_batch, AlgoError, BatchPlan, Tier};
use luck_core::{Config, HistoryIndex, RunRng, Ticket};
use luck_io::{IoError, IoResult};

pub mod run_record;
pub mod stats;
pub mod validate;

pub use run_record::{build_run_record, write_batch, BatchDocument, RecordInputs, RunRecord, BATCH_FILE_NAME};
pub use stats::{batch_stats, BatchStats};
pub use validate::{validate, Severity, ValidationIssue, ValidationReport};

/// Engine identifiers echoed into every run record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineMeta {
    pub name: String,
    pub version: String,
}

impl EngineMeta {
    pub fn current() -> Self {
        Self { name: "luck-engine".to_string(), version: env!("CARGO_PKG_VERSION").to_string() }
    }
}

/// Per-run knobs that do not belong in the config file.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub seed: u64,
    /// Digest of the history snapshot bytes, if one was loaded.
    pub history_sha256: Option<String>,
    /// RFC 3339 UTC; left out of the record when `None`.
    pub timestamp_utc: Option<String>,
}

impl RunOptions {
    pub fn seeded(seed: u64) -> Self {
        Self { seed, ..Self::default() }
    }
}

/// Single error surface for a run.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Rejected before generation; the report carries every finding.
    #[error("invalid configuration: {}", first_error(.0))]
    Config(ValidationReport),
    /// Total infeasibility: no ticket could be produced at some index.
    #[error(transparent)]
    Infeasible(AlgoError),
    #[error(transparent)]
    Io(#[from] IoError),
}

impl From<AlgoError> for GenerateError {
    fn from(e: AlgoError) -> Self {
        match e {
            AlgoError::EmptyBluePool => GenerateError::Config(ValidationReport {
                pass: false,
                issues: vec![ValidationIssue {
                    severity: Severity::Error,
                    code: "Blue.PoolEmpty",
                    message: e.to_string(),
                    where_: "blue_blocklist".to_string(),
                }],
            }),
            other => GenerateError::Infeasible(other),
        }
    }
}

fn first_error(report: &ValidationReport) -> String {
    report
        .errors()
        .next()
        .map(|i| format!("{} at {}: {}", i.code, i.where_, i.message))
        .unwrap_or_else(|| "unknown".to_string())
}

/// Everything a run produced. `plan` is kept for inspection; it is not written out.
#[derive(Debug, Clone)]
pub struct GeneratedBatch {
    pub tickets: Vec<Ticket>,
    pub plan: BatchPlan,
    pub stats: BatchStats,
    pub run_record: RunRecord,
    pub report: ValidationReport,
}

impl GeneratedBatch {
    pub fn document(&self) -> BatchDocument<'_> {
        BatchDocument {
            tickets: &self.tickets,
            stats: &self.stats,
            run_record: &self.run_record,
            warnings: &self.report.issues,
        }
    }

    /// Write `<dir>/batch.json` (canonical, atomic).
    pub fn write_to(&self, dir: &Path) -> IoResult<PathBuf> {
        write_batch(dir, &self.document())
    }
}

/// Run one batch against a read-only history index.
///
/// All-or-nothing: on any error no ticket is returned.
pub fn generate(cfg: &Config, history: &HistoryIndex, opts: RunOptions) -> Result<GeneratedBatch, GenerateError> {
    let report = validate(cfg);
    for issue in report.warnings() {
        warn!(code = issue.code, field = %issue.where_, "{}", issue.message);
    }
    if !report.pass {
        return Err(GenerateError::Config(report));
    }

    let count = cfg.effective_count() as usize;
    let plan = BatchPlan::build(cfg, count, opts.seed)?;
    debug!(blues = ?plan.blues, anchors = ?plan.anchors, lucky = ?plan.lucky, "batch planned");

    let mut rng = RunRng::from_seed_u64(opts.seed);
    let outcome = generate_batch(cfg, history, &plan, count, &mut rng)?;

    let stats = batch_stats(&outcome.tickets, &cfg.bands);
    let run_record = build_run_record(
        RecordInputs {
            cfg,
            seed: opts.seed,
            history: history.summary(),
            history_sha256: opts.history_sha256,
            timestamp_utc: opts.timestamp_utc,
        },
        &outcome.tiers,
        outcome.duplicate_retries,
    )?;

    let tier_count = |t: Tier| outcome.tiers.iter().filter(|&&x| x == t).count();
    info!(
        count,
        seed = opts.seed,
        strict = tier_count(Tier::Strict),
        relaxed = tier_count(Tier::Relaxed),
        brute_force = tier_count(Tier::BruteForce),
        duplicate_retries = outcome.duplicate_retries,
        "batch generated"
    );

    Ok(GeneratedBatch { tickets: outcome.tickets, plan, stats, run_record, report })
}
