//! CLI binary smoke tests using assert_cmd.
//!
//! These tests exercise the compiled `matcalc` binary to verify that
//! argument parsing, help text, and error reporting work end-to-end.

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("matcalc").unwrap()
}

// ---------------------------------------------------------------------------
// Top-level
// ---------------------------------------------------------------------------

#[test]
fn no_args_shows_help() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_flag() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("session"))
        .stdout(predicate::str::contains("compute"));
}

#[test]
fn version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("matcalc"));
}

// ---------------------------------------------------------------------------
// compute
// ---------------------------------------------------------------------------

#[test]
fn compute_add() {
    cmd()
        .args(["compute", "--op", "add", "--a", "1,2;3,4", "--b", "5,6;7,8"])
        .assert()
        .success()
        .stdout("6 8\n10 12\n");
}

#[test]
fn compute_multiply_json() {
    cmd()
        .args([
            "compute", "--op", "multiply", "--a", "1,2;3,4", "--b", "5,6;7,8", "--json",
        ])
        .assert()
        .success()
        .stdout("[[19.0,22.0],[43.0,50.0]]\n");
}

#[test]
fn compute_inverse_needs_only_one_matrix() {
    cmd()
        .args(["compute", "--op", "inverse", "--a", "1,2;3,4"])
        .assert()
        .success()
        .stdout("-2 1\n1.5 -0.5\n");
}

#[test]
fn compute_singular_inverse_reports_error() {
    cmd()
        .args(["compute", "--op", "inverse", "--a", "1,2;2,4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Matrix is not invertible"));
}

#[test]
fn compute_inverse_of_three_by_three_is_unsupported() {
    cmd()
        .args(["compute", "--op", "inverse", "--a", "1,0,0;0,1,0;0,0,1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Only 2x2 matrix inversion is supported"));
}

#[test]
fn compute_shape_mismatch_reports_error() {
    cmd()
        .args(["compute", "--op", "add", "--a", "1,2;3,4", "--b", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Matrix dimensions do not match"));
}

#[test]
fn compute_binary_without_second_matrix_errors() {
    cmd()
        .args(["compute", "--op", "subtract", "--a", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("needs a second matrix"));
}

#[test]
fn compute_unknown_operation_is_rejected() {
    cmd()
        .args(["compute", "--op", "transpose", "--a", "1"])
        .assert()
        .failure();
}

#[test]
fn compute_oversized_grid_is_rejected() {
    cmd()
        .args([
            "compute",
            "--op",
            "add",
            "--a",
            "1,1,1,1;1,1,1,1;1,1,1,1;1,1,1,1",
            "--b",
            "1,1,1,1;1,1,1,1;1,1,1,1;1,1,1,1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("up to 3x3"));
}

// ---------------------------------------------------------------------------
// session
// ---------------------------------------------------------------------------

#[test]
fn session_no_config_prints_template() {
    cmd()
        .arg("session")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"events\""))
        .stdout(predicate::str::contains("\"SetDimension\""))
        .stderr(predicate::str::contains("No config file provided"));
}

#[test]
fn session_nonexistent_config_errors() {
    cmd()
        .args(["session", "/nonexistent/session.json"])
        .assert()
        .failure();
}

#[test]
fn session_template_replays() {
    let template = cmd().arg("session").output().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, &template.stdout).unwrap();

    cmd()
        .arg("session")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Result:\n19 22\n43 50"));
}

#[test]
fn session_with_invalid_event_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, r#"{"events": [{"SetDimension": 2}, {"SetDimension": 4}, "Execute"]}"#)
        .unwrap();

    cmd()
        .arg("session")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid session event #1"));
}

#[test]
fn session_logs_progress_by_default() {
    let template = cmd().arg("session").output().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, &template.stdout).unwrap();

    cmd()
        .env_remove("MATCALC_LOG")
        .arg("session")
        .arg(&path)
        .assert()
        .success()
        .stderr(predicate::str::contains("Replaying session"))
        .stderr(predicate::str::contains("Replayed 11 events"));
}
