//! Run record and the batch document written to disk.
//!
//! The record echoes everything needed to reproduce a batch: the seed that was
//! actually used, the effective count and cap, the tier behind each ticket and
//! digests of both inputs. Digests go through canonical JSON (config) or the
//! raw snapshot bytes (history), so they match `luck_io::hasher`.

use std::path::{Path, PathBuf};

use serde::Serialize;

use luck_algo::Tier;
use luck_core::{Config, HistorySummary, Ticket};
use luck_io::canonical_json::write_canonical_file;
use luck_io::hasher::sha256_canonical;
use luck_io::IoResult;

use crate::stats::BatchStats;
use crate::validate::ValidationIssue;
use crate::EngineMeta;

/// Artifact file name inside the output directory.
pub const BATCH_FILE_NAME: &str = "batch.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunRecord {
    pub engine: EngineMeta,
    pub seed: u64,
    /// `0x`-prefixed copy of `seed`; JSON readers lose precision above 2^53.
    pub seed_hex: String,
    pub requested_count: u32,
    pub effective_count: u32,
    /// Absent when capping is off.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_number_cap: Option<u32>,
    pub tiers: Vec<Tier>,
    pub duplicate_retries: u32,
    pub config_sha256: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_sha256: Option<String>,
    pub history: HistorySummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp_utc: Option<String>,
}

/// Inputs to `build_run_record` that are not part of the batch outcome.
#[derive(Debug, Clone)]
pub struct RecordInputs<'a> {
    pub cfg: &'a Config,
    pub seed: u64,
    pub history: HistorySummary,
    pub history_sha256: Option<String>,
    pub timestamp_utc: Option<String>,
}

pub fn build_run_record(
    inputs: RecordInputs<'_>,
    tiers: &[Tier],
    duplicate_retries: u32,
) -> IoResult<RunRecord> {
    let cfg = inputs.cfg;
    let effective = cfg.effective_count();
    Ok(RunRecord {
        engine: EngineMeta::current(),
        seed: inputs.seed,
        seed_hex: format!("0x{:016x}", inputs.seed),
        requested_count: cfg.count,
        effective_count: effective,
        per_number_cap: cfg.per_number_cap.then(|| cfg.per_number_cap(effective)),
        tiers: tiers.to_vec(),
        duplicate_retries,
        config_sha256: sha256_canonical(cfg)?,
        history_sha256: inputs.history_sha256,
        history: inputs.history,
        timestamp_utc: inputs.timestamp_utc,
    })
}

/// What lands in `batch.json`.
#[derive(Debug, Clone, Serialize)]
pub struct BatchDocument<'a> {
    pub tickets: &'a [Ticket],
    pub stats: &'a BatchStats,
    pub run_record: &'a RunRecord,
    pub warnings: &'a [ValidationIssue],
}

/// Write the batch document canonically and atomically to `<dir>/batch.json`.
pub fn write_batch(dir: &Path, doc: &BatchDocument<'_>) -> IoResult<PathBuf> {
    let path = dir.join(BATCH_FILE_NAME);
    write_canonical_file(&path, doc)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(cfg: &Config) -> RecordInputs<'_> {
        RecordInputs {
            cfg,
            seed: 0xDEAD_BEEF,
            history: HistorySummary::default(),
            history_sha256: None,
            timestamp_utc: None,
        }
    }

    #[test]
    fn record_echoes_seed_and_cap() {
        let cfg = Config { count: 20, ..Config::default() };
        let rec = build_run_record(inputs(&cfg), &[Tier::Strict, Tier::Relaxed], 3).unwrap();
        assert_eq!(rec.seed_hex, "0x00000000deadbeef");
        assert_eq!(rec.effective_count, 20);
        assert_eq!(rec.per_number_cap, Some(4));
        assert_eq!(rec.duplicate_retries, 3);
        assert_eq!(rec.config_sha256.len(), 64);

        let off = Config { per_number_cap: false, ..cfg.clone() };
        let rec = build_run_record(inputs(&off), &[], 0).unwrap();
        assert_eq!(rec.per_number_cap, None);
        assert_ne!(rec.config_sha256, sha256_canonical(&cfg).unwrap());
    }

    #[test]
    fn batch_file_is_canonical_json() {
        let cfg = Config { count: 1, ..Config::default() };
        let rec = build_run_record(inputs(&cfg), &[Tier::Strict], 0).unwrap();
        let tickets = [Ticket::new([3, 9, 14, 22, 27, 1], 7).unwrap()];
        let stats = crate::stats::batch_stats(&tickets, &cfg.bands);
        let doc = BatchDocument { tickets: &tickets, stats: &stats, run_record: &rec, warnings: &[] };

        let dir = tempfile::tempdir().unwrap();
        let path = write_batch(dir.path(), &doc).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with(r#"{"run_record":{"config_sha256":""#));
        assert!(text.contains(r#""tickets":[{"blue":7,"reds":[1,3,9,14,22,27]}]"#));
        assert!(text.contains(r#""tiers":["strict"]"#));
        assert!(!text.contains("timestamp_utc"));
    }
}
