//! Binary-level runs of `luck`: output shape, seeds, overrides and exit codes.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

#[allow(deprecated)]
fn luck(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("luck").expect("binary");
    cmd.current_dir(workdir).env_remove("RUST_LOG");
    cmd
}

fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
    let p = dir.join(name);
    fs::write(&p, body).unwrap();
    p
}

fn ticket_lines(stdout: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(stdout).lines().map(str::to_string).collect()
}

fn looks_like_ticket(line: &str) -> bool {
    let Some((reds, blue)) = line.split_once(" + ") else {
        return false;
    };
    let reds: Vec<&str> = reds.split(' ').collect();
    reds.len() == 6 && reds.iter().chain([&blue]).all(|s| s.len() == 2 && s.bytes().all(|b| b.is_ascii_digit()))
}

#[test]
fn prints_tickets_and_writes_batch() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    let cfg = write(root, "cfg.json", r#"{"count": 3}"#);
    let hist = write(
        root,
        "hist.json",
        r#"[{"issue": "2024001", "reds": [1, 5, 12, 20, 28, 33], "blue": 7}, {"reds": [1, 2], "blue": 3}]"#,
    );

    let out = luck(root)
        .args(["--config", cfg.to_str().unwrap(), "--history", hist.to_str().unwrap()])
        .args(["--out", "out", "--seed", "42"])
        .output()
        .expect("command run");
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let lines = ticket_lines(&out.stdout);
    assert_eq!(lines.len(), 3);
    assert!(lines.iter().all(|l| looks_like_ticket(l)), "{lines:?}");

    let doc: Value = serde_json::from_slice(&fs::read(root.join("out/batch.json")).unwrap()).unwrap();
    assert_eq!(doc["run_record"]["seed"], 42);
    assert_eq!(doc["run_record"]["history"]["total_rows"], 1);
    assert_eq!(doc["tickets"].as_array().map(Vec::len), Some(3));
    assert!(doc["run_record"]["timestamp_utc"].as_str().is_some_and(|s| s.ends_with('Z')));
}

#[test]
fn hex_and_decimal_seeds_agree() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    let a = luck(root).args(["--count", "4", "--seed", "42", "--out", "a"]).output().unwrap();
    let b = luck(root).args(["--count", "4", "--seed", "0x2a", "--out", "b"]).output().unwrap();
    assert!(a.status.success() && b.status.success());
    assert_eq!(a.stdout, b.stdout);
}

#[test]
fn count_and_budget_flags_override_config() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    let cfg = write(root, "cfg.json", r#"{"count": 9}"#);
    let out = luck(root)
        .args(["--config", cfg.to_str().unwrap(), "--count", "2", "--seed", "1"])
        .output()
        .unwrap();
    assert_eq!(ticket_lines(&out.stdout).len(), 2);

    let out = luck(root).args(["--count", "5", "--budget", "3", "--seed", "1"]).output().unwrap();
    assert_eq!(ticket_lines(&out.stdout).len(), 1);
}

#[test]
fn quiet_prints_nothing_but_still_writes() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    luck(root)
        .args(["--count", "2", "--seed", "5", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    assert!(root.join("batch.json").is_file());
}

#[test]
fn validate_only_rejects_bad_config_with_code_2() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    let cfg = write(root, "cfg.json", r#"{"count": 0, "band_templates": [[3, 3, 3]]}"#);
    luck(root)
        .args(["--config", cfg.to_str().unwrap(), "--validate-only"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Count.NonPositive").and(predicate::str::contains("Band.TemplateSum")));
    assert!(!root.join("batch.json").exists());
}

#[test]
fn validate_only_accepts_stock_config() {
    let temp = tempdir().unwrap();
    luck(temp.path())
        .arg("--validate-only")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("inputs OK"));
}

#[test]
fn malformed_config_json_exits_2() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    let cfg = write(root, "cfg.json", r#"{"mode": "lunar"}"#);
    luck(root).args(["--config", cfg.to_str().unwrap()]).assert().code(2);
}

#[test]
fn infeasible_blocklist_exits_3() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    let blocked: Vec<String> = (1..=29).map(|n| n.to_string()).collect();
    let cfg = write(root, "cfg.json", &format!(r#"{{"count": 3, "red_blocklist": [{}]}}"#, blocked.join(",")));
    luck(root)
        .args(["--config", cfg.to_str().unwrap(), "--seed", "5"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("no feasible ticket"));
    assert!(!root.join("batch.json").exists());
}

#[test]
fn missing_history_file_exits_4() {
    let temp = tempdir().unwrap();
    luck(temp.path()).args(["--history", "nope.json"]).assert().code(4);
}

#[test]
fn bad_seed_is_a_usage_error() {
    let temp = tempdir().unwrap();
    luck(temp.path()).args(["--seed", "0xZZ"]).assert().code(2);
}
