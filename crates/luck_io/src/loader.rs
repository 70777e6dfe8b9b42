//! Loader: read the run config and the history snapshot from local JSON files.
//!
//! Config: one JSON object; missing fields take `Config::default()` values.
//! History: a JSON array of draws `{issue?, draw_date?, reds[6], blue, source?}`.
//! Rows that do not parse or normalize are skipped and reported back to the
//! caller, never fatal. No network I/O.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use luck_core::numbers::{is_blue, is_red, REDS_PER_TICKET};
use luck_core::{Config, HistoryIndex, HistorySummary, NumberSet};

use crate::hasher::sha256_hex;
use crate::{IoError, IoResult};

/// Hard cap on input file size.
pub const MAX_INPUT_BYTES: u64 = 64 * 1024 * 1024;

/// One committed draw as stored by the history source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draw {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draw_date: Option<String>,
    pub reds: Vec<i64>,
    pub blue: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// A history row that was left out of the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    /// 0-based position in the snapshot array.
    pub row: usize,
    pub reason: String,
}

/// History index plus what the caller needs to report about it.
#[derive(Debug, Clone)]
pub struct HistorySnapshot {
    pub index: HistoryIndex,
    pub summary: HistorySummary,
    pub skipped: Vec<SkippedRow>,
    /// SHA-256 of the raw snapshot bytes.
    pub sha256: String,
}

impl HistorySnapshot {
    /// Snapshot with no history (first run, or no file given).
    pub fn empty() -> Self {
        Self {
            index: HistoryIndex::new(),
            summary: HistorySummary::default(),
            skipped: Vec::new(),
            sha256: sha256_hex(b"[]"),
        }
    }
}

// ----------------------------- Public loaders -----------------------------

pub fn load_config(path: &Path) -> IoResult<Config> {
    let bytes = read_limited(path)?;
    serde_json::from_slice(&bytes)
        .map_err(|e| IoError::Json { pointer: format!("{}:{}", path.display(), e.line()), msg: e.to_string() })
}

pub fn load_history(path: &Path) -> IoResult<HistorySnapshot> {
    let bytes = read_limited(path)?;
    parse_history(&bytes)
}

/// Parse snapshot bytes; the top level must be an array.
pub fn parse_history(bytes: &[u8]) -> IoResult<HistorySnapshot> {
    let v: Value = serde_json::from_slice(bytes)?;
    let rows = match v {
        Value::Array(rows) => rows,
        _ => return Err(IoError::Invalid("history snapshot must be a JSON array of draws".into())),
    };

    let mut draws = Vec::with_capacity(rows.len());
    let mut skipped = Vec::new();
    for (row, raw) in rows.into_iter().enumerate() {
        let parsed = serde_json::from_value::<Draw>(raw)
            .map_err(|e| e.to_string())
            .and_then(normalize_draw);
        match parsed {
            Ok(d) => draws.push(d),
            Err(reason) => skipped.push(SkippedRow { row, reason }),
        }
    }

    let index = HistoryIndex::from_draws(draws.iter().filter_map(|d| reds_array(&d.reds)));
    let summary = index.summary();
    Ok(HistorySnapshot { index, summary, skipped, sha256: sha256_hex(bytes) })
}

// ----------------------------- Normalization -----------------------------

/// Six distinct reds in range (sorted ascending on return), blue in range,
/// draw date trimmed to `YYYY-MM-DD` when recognizable.
pub fn normalize_draw(mut d: Draw) -> Result<Draw, String> {
    if d.reds.len() != REDS_PER_TICKET {
        return Err(format!("reds length must be {REDS_PER_TICKET}, got {}", d.reds.len()));
    }
    if let Some(&bad) = d.reds.iter().find(|&&r| !is_red(r)) {
        return Err(format!("red out of range: {bad}"));
    }
    if !is_blue(d.blue) {
        return Err(format!("blue out of range: {}", d.blue));
    }
    let distinct = NumberSet::from_domain(d.reds.iter().copied(), 1, 33);
    if distinct.len() != REDS_PER_TICKET {
        return Err("duplicate red numbers".to_string());
    }
    d.reds.sort_unstable();
    d.draw_date = d.draw_date.map(|s| normalize_date(&s)).filter(|s| !s.is_empty());
    Ok(d)
}

/// Best-effort date cleanup: drop a trailing `(weekday)`, accept `/` or `.`
/// separators and two-digit years; unrecognized input is trimmed to 10 chars.
pub fn normalize_date(s: &str) -> String {
    let mut s = s.trim();
    if let Some(i) = s.find('(') {
        s = s[..i].trim();
    }
    if s.is_empty() {
        return String::new();
    }
    let unified = s.replace(['/', '.'], "-");
    let head_len = unified.split('-').next().map(str::len).unwrap_or(0);
    let layout = if head_len == 2 { "%y-%m-%d" } else { "%Y-%m-%d" };
    if let Ok(d) = NaiveDate::parse_from_str(&unified, layout) {
        return d.format("%Y-%m-%d").to_string();
    }
    unified.chars().take(10).collect()
}

fn reds_array(reds: &[i64]) -> Option<[u8; REDS_PER_TICKET]> {
    let mut out = [0u8; REDS_PER_TICKET];
    for (slot, &r) in out.iter_mut().zip(reds) {
        *slot = u8::try_from(r).ok()?;
    }
    (reds.len() == REDS_PER_TICKET).then_some(out)
}

fn read_limited(path: &Path) -> IoResult<Vec<u8>> {
    let f = File::open(path).map_err(|e| IoError::Path(format!("{}: {e}", path.display())))?;
    let mut buf = Vec::new();
    f.take(MAX_INPUT_BYTES + 1).read_to_end(&mut buf)?;
    if buf.len() as u64 > MAX_INPUT_BYTES {
        return Err(IoError::Invalid(format!("{} exceeds {MAX_INPUT_BYTES} bytes", path.display())));
    }
    Ok(buf)
}
