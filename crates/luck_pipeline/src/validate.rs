//! Configuration validation before any planning or sampling.
//! Deterministic outputs; no RNG; no clock.
//!
//! Errors reject the run (non-positive count, empty blue pool, bands that do
//! not partition 1..=33, templates that do not sum to six). Warnings flag
//! inputs the generator ignores or repairs on its own.

use serde::Serialize;

use luck_core::numbers::{is_blue, is_red, REDS_PER_TICKET, RED_MAX, RED_MIN};
use luck_core::{Birthday, Config, Zodiac};

/// Issue severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// One validation finding. `where_` is the config field path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub code: &'static str,
    pub message: String,
    #[serde(rename = "where")]
    pub where_: String,
}

/// Deterministic report: pass = (no Error); ordering of issues is stable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub pass: bool,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.issues.iter().any(|i| i.code == code)
    }
}

/// Top-level entry point.
pub fn validate(cfg: &Config) -> ValidationReport {
    let mut issues: Vec<ValidationIssue> = Vec::new();

    issues.extend(check_count(cfg));
    issues.extend(check_personal(cfg));
    issues.extend(check_numbers(cfg));
    issues.extend(check_bands(cfg));
    issues.extend(check_anchors(cfg));
    issues.extend(check_overlap(cfg));

    sort_issues_stably(&mut issues);

    ValidationReport {
        pass: !issues.iter().any(|i| i.severity == Severity::Error),
        issues,
    }
}

// ------------------------------------------------------------------------------------------------
// Checks
// ------------------------------------------------------------------------------------------------

fn check_count(cfg: &Config) -> Vec<ValidationIssue> {
    let mut out = Vec::new();
    if cfg.effective_count() == 0 {
        let msg = if cfg.count == 0 {
            "ticket count must be positive".to_string()
        } else {
            format!("budget {} buys no ticket (count {} clamps to 0)", cfg.budget, cfg.count)
        };
        out.push(err("Count.NonPositive", msg, "count"));
    }
    out
}

fn check_personal(cfg: &Config) -> Vec<ValidationIssue> {
    let mut out = Vec::new();
    if let Some(raw) = cfg.birthday.as_deref() {
        if let Err(e) = Birthday::parse(raw) {
            out.push(warn("Birthday.Invalid", format!("{e}; birthday ignored"), "birthday"));
        }
    }
    if let Some(z) = cfg.zodiac {
        if Zodiac::from_index(z).is_none() {
            out.push(warn("Zodiac.OutOfRange", format!("zodiac {z} not in 1..=12; ignored"), "zodiac"));
        }
    }
    out
}

fn check_numbers(cfg: &Config) -> Vec<ValidationIssue> {
    let mut out = Vec::new();

    for (i, &n) in cfg.fixed_reds.iter().enumerate() {
        if !is_red(n) {
            out.push(warn(
                "Red.FixedOutOfRange",
                format!("fixed red {n} not in {RED_MIN}..={RED_MAX}; ignored"),
                format!("fixed_reds[{i}]"),
            ));
        }
    }
    for (i, &n) in cfg.red_blocklist.iter().enumerate() {
        if !is_red(n) {
            out.push(warn(
                "Red.BlocklistOutOfRange",
                format!("blocked red {n} not in {RED_MIN}..={RED_MAX}; ignored"),
                format!("red_blocklist[{i}]"),
            ));
        }
    }
    for (i, &n) in cfg.blue_blocklist.iter().enumerate() {
        if !is_blue(n) {
            out.push(warn(
                "Blue.BlocklistOutOfRange",
                format!("blocked blue {n} not in 1..=16; ignored"),
                format!("blue_blocklist[{i}]"),
            ));
        }
    }

    if cfg.allowed_blues().is_empty() {
        out.push(err("Blue.PoolEmpty", "every blue number is blocked".to_string(), "blue_blocklist"));
    }

    let open_reds = (RED_MAX - RED_MIN + 1) as usize - cfg.red_blocked().len();
    if open_reds < REDS_PER_TICKET {
        out.push(warn(
            "Red.PoolTooSmall",
            format!("only {open_reds} red numbers remain unblocked; no ticket can be formed"),
            "red_blocklist",
        ));
    }
    out
}

fn check_bands(cfg: &Config) -> Vec<ValidationIssue> {
    let mut out = Vec::new();
    if !cfg.bands.is_partition() {
        let b = cfg.bands;
        out.push(err(
            "Band.NotPartition",
            format!(
                "bands {}-{} / {}-{} / {}-{} must be contiguous and cover {RED_MIN}..={RED_MAX}",
                b.low.lo, b.low.hi, b.mid.lo, b.mid.hi, b.high.lo, b.high.hi
            ),
            "bands",
        ));
    }
    if cfg.band_templates.is_empty() {
        out.push(warn("Band.TemplatesEmpty", "no templates; 2-2-2 is used".to_string(), "band_templates"));
    }
    for (i, t) in cfg.band_templates.iter().enumerate() {
        let sum: u32 = t.iter().map(|&x| x as u32).sum();
        if sum != REDS_PER_TICKET as u32 {
            out.push(err(
                "Band.TemplateSum",
                format!("template {}-{}-{} sums to {sum}, expected {REDS_PER_TICKET}", t[0], t[1], t[2]),
                format!("band_templates[{i}]"),
            ));
        }
    }
    if cfg.template_repeat == 0 {
        out.push(warn("Band.RepeatZero", "template_repeat 0; 2 is used".to_string(), "template_repeat"));
    }
    out
}

fn check_anchors(cfg: &Config) -> Vec<ValidationIssue> {
    let mut out = Vec::new();
    for (i, b) in cfg.anchor_buckets.iter().enumerate() {
        if b.count > 0 && b.to > 0 && b.from > b.to {
            out.push(warn(
                "Anchor.BucketInverted",
                format!("bucket {}..{} is inverted; its anchors collapse to one value", b.from, b.to),
                format!("anchor_buckets[{i}]"),
            ));
        }
    }
    if cfg.max_per_anchor == 0 {
        out.push(warn(
            "Anchor.CapZero",
            "max_per_anchor 0; treated as 1".to_string(),
            "max_per_anchor",
        ));
    }
    out
}

fn check_overlap(cfg: &Config) -> Vec<ValidationIssue> {
    let mut out = Vec::new();
    if cfg.max_overlap as usize >= REDS_PER_TICKET {
        out.push(warn(
            "Overlap.Unbounded",
            format!("max_overlap {} never rejects a ticket", cfg.max_overlap),
            "max_overlap",
        ));
    }
    out
}

// ------------------------------------------------------------------------------------------------
// Helpers
// ------------------------------------------------------------------------------------------------

fn err(code: &'static str, message: String, where_: impl Into<String>) -> ValidationIssue {
    ValidationIssue { severity: Severity::Error, code, message, where_: where_.into() }
}

fn warn(code: &'static str, message: String, where_: impl Into<String>) -> ValidationIssue {
    ValidationIssue { severity: Severity::Warning, code, message, where_: where_.into() }
}

/// Errors first, then by code, location, message.
fn sort_issues_stably(issues: &mut [ValidationIssue]) {
    issues.sort_by(|a, b| {
        a.severity
            .cmp(&b.severity)
            .then_with(|| a.code.cmp(b.code))
            .then_with(|| a.where_.cmp(&b.where_))
            .then_with(|| a.message.cmp(&b.message))
    });
}
