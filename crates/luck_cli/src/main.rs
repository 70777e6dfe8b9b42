//! load → (overrides) → validate → generate → batch.json → tickets on stdout.
//! The CLI owns the clock (seed fallback, run timestamp) and the log subscriber.

mod args;

mod exitcodes {
    pub const OK: u8 = 0;
    /// Config rejected, malformed input JSON, bad flags.
    pub const VALIDATION: u8 = 2;
    /// No feasible ticket for some index.
    pub const INFEASIBLE: u8 = 3;
    pub const IO: u8 = 4;
}

use std::process::ExitCode;

use chrono::{SecondsFormat, Utc};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use args::{parse_and_validate as parse_cli, Args, CliError};
use luck_core::Config;
use luck_io::{load_config, load_history, HistorySnapshot, IoError};
use luck_pipeline::{generate, validate, GenerateError, RunOptions, ValidationReport};

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    Validation(String),
    Infeasible(String),
    Io(String),
}

impl MainError {
    fn code(&self) -> u8 {
        match self {
            MainError::Validation(_) => exitcodes::VALIDATION,
            MainError::Infeasible(_) => exitcodes::INFEASIBLE,
            MainError::Io(_) => exitcodes::IO,
        }
    }

    fn message(&self) -> &str {
        match self {
            MainError::Validation(m) | MainError::Infeasible(m) | MainError::Io(m) => m,
        }
    }
}

fn main() -> ExitCode {
    let args = match parse_cli() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("luck: error: {e}");
            return ExitCode::from(map_cli_err(&e));
        }
    };
    init_logging(args.quiet);

    let result = if args.validate_only { validate_only(&args) } else { run_once(&args) };
    match result {
        Ok(()) => ExitCode::from(exitcodes::OK),
        Err(e) => {
            eprintln!("luck: error: {}", e.message());
            ExitCode::from(e.code())
        }
    }
}

/// stderr only; `RUST_LOG` wins over the default level.
fn init_logging(quiet: bool) {
    let default = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

// ------------------------------------------------------------------------------------------------
// Paths
// ------------------------------------------------------------------------------------------------

fn validate_only(args: &Args) -> Result<(), MainError> {
    let (cfg, _history) = load_inputs(args)?;
    let report = validate(&cfg);
    print_report(&report);
    if !report.pass {
        return Err(MainError::Validation("configuration rejected".to_string()));
    }
    if !args.quiet {
        eprintln!("validate-only: inputs OK ({} tickets)", cfg.effective_count());
    }
    Ok(())
}

fn run_once(args: &Args) -> Result<(), MainError> {
    let (cfg, history) = load_inputs(args)?;

    let seed = match args.seed {
        Some(s) => s,
        None => {
            let s = clock_seed();
            info!(seed = s, "no --seed given; seeded from the clock");
            s
        }
    };
    let opts = RunOptions {
        seed,
        history_sha256: Some(history.sha256.clone()),
        timestamp_utc: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
    };

    let batch = generate(&cfg, &history.index, opts).map_err(map_generate_err)?;
    let path = batch.write_to(&args.out).map_err(map_io_err)?;

    if !args.quiet {
        for t in &batch.tickets {
            println!("{t}");
        }
        eprintln!("luck: seed 0x{seed:016x}; {} tickets written to {}", batch.tickets.len(), path.display());
    }
    Ok(())
}

// ------------------------------------------------------------------------------------------------
// Loading
// ------------------------------------------------------------------------------------------------

fn load_inputs(args: &Args) -> Result<(Config, HistorySnapshot), MainError> {
    let mut cfg = match &args.config {
        Some(p) => load_config(p).map_err(map_io_err)?,
        None => Config::default(),
    };
    if let Some(n) = args.count {
        cfg.count = n;
    }
    if let Some(b) = args.budget {
        cfg.budget = b;
    }

    let history = match &args.history {
        Some(p) => load_history(p).map_err(map_io_err)?,
        None => HistorySnapshot::empty(),
    };
    for s in &history.skipped {
        warn!(row = s.row, reason = %s.reason, "history row skipped");
    }
    info!(
        rows = history.summary.total_rows,
        combos = history.summary.total_combos,
        skipped = history.skipped.len(),
        "history loaded"
    );
    Ok((cfg, history))
}

/// Nanoseconds since the epoch, folded with the pid so parallel runs differ.
fn clock_seed() -> u64 {
    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default() as u64;
    nanos ^ ((std::process::id() as u64) << 32)
}

fn print_report(report: &ValidationReport) {
    for i in &report.issues {
        eprintln!("{:?} {} at {}: {}", i.severity, i.code, i.where_, i.message);
    }
}

// ------------------------------------------------------------------------------------------------
// Error mapping
// ------------------------------------------------------------------------------------------------

fn map_cli_err(e: &CliError) -> u8 {
    match e {
        CliError::NonLocalPath(_) => exitcodes::VALIDATION,
        CliError::NotFound(_) => exitcodes::IO,
    }
}

/// Malformed JSON or wrong document shape is a validation failure; the rest is I/O.
fn map_io_err(e: IoError) -> MainError {
    match e {
        IoError::Json { pointer, msg } => MainError::Validation(format!("json {pointer}: {msg}")),
        IoError::Invalid(m) => MainError::Validation(format!("invalid input: {m}")),
        IoError::Path(m) => MainError::Io(format!("path: {m}")),
    }
}

fn map_generate_err(e: GenerateError) -> MainError {
    match e {
        GenerateError::Config(report) => {
            print_report(&report);
            MainError::Validation(GenerateError::Config(report).to_string())
        }
        GenerateError::Infeasible(a) => MainError::Infeasible(a.to_string()),
        GenerateError::Io(io) => map_io_err(io),
    }
}
