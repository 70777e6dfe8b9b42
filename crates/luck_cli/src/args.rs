//! Offline CLI argument surface.
//! - Local paths only (reject any scheme:// like http/https/file)
//! - --config and --history are optional: stock defaults / empty history
//! - --count and --budget override the config file
//! - Seed accepts decimal u64 or 0x-hex (1..=16 nybbles)
//! - --validate-only loads inputs and validates the config, nothing is generated

use std::path::{Path, PathBuf};

use clap::Parser;
use thiserror::Error;

/// Parsed CLI arguments (raw).
#[derive(Debug, Parser, Clone)]
#[command(
    name = "luck",
    version,
    disable_help_subcommand = true,
    about = "Offline, seeded lottery ticket generator (6 reds of 33 + 1 blue of 16)"
)]
pub struct Args {
    /// Run config JSON; missing fields take the stock defaults.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// History snapshot JSON (array of past draws).
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// Output directory for batch.json (default: current directory).
    #[arg(long, default_value = ".")]
    pub out: PathBuf,

    /// Override the ticket count from the config.
    #[arg(long)]
    pub count: Option<u32>,

    /// Override the budget from the config (2 per ticket, 0 = no cap).
    #[arg(long)]
    pub budget: Option<u32>,

    /// Run seed. Decimal u64 or 0x-hex (≤16 hex digits). Omit to seed from the clock.
    #[arg(long, value_parser = parse_seed)]
    pub seed: Option<u64>,

    /// Load and validate inputs only; no tickets, no artifacts.
    #[arg(long)]
    pub validate_only: bool,

    /// No tickets on stdout; log level defaults to warn.
    #[arg(long)]
    pub quiet: bool,
}

/// Errors surfaced by argument checks. Messages stay short and stable.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("path must be local file (no scheme): {0}")]
    NonLocalPath(String),
    #[error("file not found: {0}")]
    NotFound(String),
}

/// Entry point used by main.rs
pub fn parse_and_validate() -> Result<Args, CliError> {
    let args = Args::parse();
    check_paths(&args)?;
    Ok(args)
}

/// Scheme check on every path flag, existence check on the inputs.
pub fn check_paths(args: &Args) -> Result<(), CliError> {
    for p in iter_all_paths(args) {
        ensure_local_path(p)?;
    }
    for p in [args.config.as_deref(), args.history.as_deref()].into_iter().flatten() {
        if !p.is_file() {
            return Err(CliError::NotFound(p.display().to_string()));
        }
    }
    Ok(())
}

/// Decimal u64 or 0x-hex (1..=16 nybbles).
pub fn parse_seed(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty seed".into());
    }
    if let Some(rest) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        if rest.is_empty() || rest.len() > 16 || !rest.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err("hex seed must be 1..16 hex digits".into());
        }
        u64::from_str_radix(rest, 16).map_err(|_| "hex seed out of range".into())
    } else {
        s.parse::<u64>().map_err(|_| "decimal seed must be a valid u64".into())
    }
}

#[inline]
fn has_scheme(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    lower.contains("://") || lower.starts_with("http:") || lower.starts_with("https:") || lower.starts_with("file:")
}

#[inline]
fn ensure_local_path(p: &Path) -> Result<(), CliError> {
    if let Some(s) = p.to_str() {
        if has_scheme(s) {
            return Err(CliError::NonLocalPath(s.to_string()));
        }
    }
    Ok(())
}

fn iter_all_paths(args: &Args) -> impl Iterator<Item = &Path> {
    [args.config.as_deref(), args.history.as_deref(), Some(args.out.as_path())]
        .into_iter()
        .flatten()
}
