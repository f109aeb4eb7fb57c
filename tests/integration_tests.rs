//! Integration tests for the traceline CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get a traceline command isolated from the user's config and environment
fn traceline(tmp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("traceline").unwrap();
    cmd.current_dir(tmp.path())
        .env("TRACELINE_CONFIG", tmp.path().join("no-config.yaml"))
        .env_remove("TRACELINE_DB")
        .env_remove("TRACELINE_FORMAT")
        .env_remove("TRACELINE_LOG");
    cmd
}

/// Helper to seed a database inside the temp directory, returning its path
fn seeded_db(tmp: &TempDir) -> String {
    let db = tmp.path().join("trace.db").to_string_lossy().to_string();
    traceline(tmp)
        .args(["seed", "--db", &db, "--quiet"])
        .assert()
        .success();
    db
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "command failed: {:?}", output);
    String::from_utf8_lossy(&output.stdout).to_string()
}

// ============================================================================
// Basic CLI
// ============================================================================

#[test]
fn test_help_displays() {
    let tmp = TempDir::new().unwrap();
    traceline(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("seed"))
        .stdout(predicate::str::contains("conformance"));
}

#[test]
fn test_version_displays() {
    let tmp = TempDir::new().unwrap();
    traceline(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("traceline"));
}

#[test]
fn test_completions_bash() {
    let tmp = TempDir::new().unwrap();
    traceline(&tmp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("traceline"));
}

// ============================================================================
// Seed
// ============================================================================

#[test]
fn test_seed_reports_counts() {
    let tmp = TempDir::new().unwrap();
    let db = tmp.path().join("trace.db");
    traceline(&tmp)
        .args(["seed", "--db"])
        .arg(&db)
        .assert()
        .success()
        .stdout(predicate::str::contains("Seeded"))
        .stdout(predicate::str::contains("U-1001, U-1002"))
        .stdout(predicate::str::contains("process step execution"));
    assert!(db.exists());
}

#[test]
fn test_reseed_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    let db = seeded_db(&tmp);

    let out = stdout_of(traceline(&tmp).args(["seed", "--db", &db, "--format", "json"]));
    let report: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(report["counts"]["unit"], 2);
    assert_eq!(report["counts"]["ctq"], 3);
    assert_eq!(report["counts"]["execution"], 3);
    assert_eq!(report["counts"]["measurement"], 5);
    assert_eq!(report["cleared"], report["counts"]);
}

#[test]
fn test_seed_clear_only_empties_store() {
    let tmp = TempDir::new().unwrap();
    let db = seeded_db(&tmp);

    traceline(&tmp)
        .args(["seed", "--clear-only", "--db", &db])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 20 record(s)"));

    traceline(&tmp)
        .args(["list", "units", "--db", &db])
        .assert()
        .success()
        .stdout(predicate::str::contains("No unit found."));
}

#[test]
fn test_seed_into_missing_directory_fails() {
    let tmp = TempDir::new().unwrap();
    let db = tmp.path().join("missing").join("trace.db");
    traceline(&tmp)
        .args(["seed", "--db"])
        .arg(&db)
        .assert()
        .failure();
}

// ============================================================================
// List / Show
// ============================================================================

#[test]
fn test_list_units_csv() {
    let tmp = TempDir::new().unwrap();
    let db = seeded_db(&tmp);

    traceline(&tmp)
        .args(["list", "unit", "--db", &db, "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ID,NAME,KEY,DETAIL,CREATED"))
        .stdout(predicate::str::contains("U-1001"))
        .stdout(predicate::str::contains("Unit Beta"));
}

#[test]
fn test_list_ids_only() {
    let tmp = TempDir::new().unwrap();
    let db = seeded_db(&tmp);

    let out = stdout_of(traceline(&tmp).args(["list", "ctqs", "--db", &db, "--format", "id"]));
    let ids: Vec<&str> = out.lines().collect();
    assert_eq!(ids.len(), 3);
    assert!(ids.iter().all(|id| id.starts_with("CTQ-")));
}

#[test]
fn test_list_limit() {
    let tmp = TempDir::new().unwrap();
    let db = seeded_db(&tmp);

    let out = stdout_of(traceline(&tmp).args([
        "list", "measurement", "--db", &db, "--format", "id", "-n", "2",
    ]));
    assert_eq!(out.lines().count(), 2);
}

#[test]
fn test_list_unknown_kind_fails() {
    let tmp = TempDir::new().unwrap();
    let db = seeded_db(&tmp);

    traceline(&tmp)
        .args(["list", "widgets", "--db", &db])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid entity prefix"));
}

#[test]
fn test_show_seeded_execution() {
    let tmp = TempDir::new().unwrap();
    let db = tmp.path().join("trace.db").to_string_lossy().to_string();

    let out = stdout_of(traceline(&tmp).args(["seed", "--db", &db, "--format", "id"]));
    let exec_id = out.trim().to_string();
    assert!(exec_id.starts_with("EXEC-"));

    traceline(&tmp)
        .args(["show", &exec_id, "--db", &db])
        .assert()
        .success()
        .stdout(predicate::str::contains("Samira I."))
        .stdout(predicate::str::contains("Used calibrated wrench"))
        .stdout(predicate::str::contains("Torque Application"))
        .stdout(predicate::str::contains("Alpha Pilot Run"));

    let json = stdout_of(traceline(&tmp).args(["show", &exec_id, "--db", &db, "-f", "json"]));
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["kind"], "execution");
    assert_eq!(value["id"], exec_id.as_str());
}

#[test]
fn test_show_malformed_id_fails() {
    let tmp = TempDir::new().unwrap();
    let db = seeded_db(&tmp);

    traceline(&tmp)
        .args(["show", "not-an-id", "--db", &db])
        .assert()
        .failure();
}

#[test]
fn test_show_unknown_id_fails() {
    let tmp = TempDir::new().unwrap();
    let db = seeded_db(&tmp);

    traceline(&tmp)
        .args(["show", "UNIT-01ARZ3NDEKTSV4RRFFQ69G5FAV", "--db", &db])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

// ============================================================================
// Conformance
// ============================================================================

#[test]
fn test_conformance_all_pass_after_seed() {
    let tmp = TempDir::new().unwrap();
    let db = seeded_db(&tmp);

    traceline(&tmp)
        .args(["conformance", "--db", &db])
        .assert()
        .success()
        .stdout(predicate::str::contains("Scratch Length"))
        .stdout(predicate::str::contains("All 5 measurement(s) in spec"));
}

#[test]
fn test_conformance_json() {
    let tmp = TempDir::new().unwrap();
    let db = seeded_db(&tmp);

    let out = stdout_of(traceline(&tmp).args(["conformance", "--db", &db, "--format", "json"]));
    let rows: Vec<serde_json::Value> = serde_json::from_str(&out).unwrap();
    assert_eq!(rows.len(), 5);
    assert!(rows.iter().all(|r| r["verdict"] == "pass"));
}

#[test]
fn test_conformance_failures_only_is_empty() {
    let tmp = TempDir::new().unwrap();
    let db = seeded_db(&tmp);

    traceline(&tmp)
        .args(["conformance", "--failures", "--db", &db])
        .assert()
        .success()
        .stdout(predicate::str::contains("No measurement found."));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_file_sets_database_and_format() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("config.yaml");
    fs::write(&config, "database: from-config.db\ndefault_format: json\n").unwrap();

    traceline(&tmp)
        .env("TRACELINE_CONFIG", &config)
        .args(["seed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"torque_execution\""));
    assert!(tmp.path().join("from-config.db").exists());
}

#[test]
fn test_env_database_used_without_flag() {
    let tmp = TempDir::new().unwrap();
    traceline(&tmp)
        .env("TRACELINE_DB", "env.db")
        .args(["seed", "--quiet"])
        .assert()
        .success();
    assert!(tmp.path().join("env.db").exists());

    traceline(&tmp)
        .env("TRACELINE_DB", "env.db")
        .args(["list", "kits", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("KIT-002"));
}
