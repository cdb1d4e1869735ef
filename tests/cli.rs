use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn eval_chains_addition_and_prints_the_result() {
    let mut cmd = cargo_bin_cmd!("timecalc");
    cmd.arg("--eval")
        .arg("1230 + 45 =")
        .assert()
        .success()
        .stdout(predicate::str::contains(" 12:30 +"))
        .stdout(predicate::str::contains("  0:45 = 13:15"))
        .stdout(predicate::str::contains("input: 13:15"));
}

#[test]
fn eval_prints_negative_totals_with_a_sign() {
    let mut cmd = cargo_bin_cmd!("timecalc");
    cmd.arg("--eval")
        .arg("100 - 2:00 =")
        .assert()
        .success()
        .stdout(predicate::str::contains("  2:00 = -0:20"))
        .stdout(predicate::str::contains("input: 0:20"));
}

#[test]
fn eval_rejects_unknown_tokens() {
    let mut cmd = cargo_bin_cmd!("timecalc");
    cmd.arg("--eval")
        .arg("12x0 =")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown token"));
}

#[test]
fn eval_persists_and_resumes_a_session() {
    let dir = tempdir().expect("tempdir");
    let session = dir.path().join("session.json");

    let mut first = cargo_bin_cmd!("timecalc");
    first
        .arg("--session")
        .arg(&session)
        .arg("--eval")
        .arg("130 +")
        .assert()
        .success()
        .stdout(predicate::str::contains("  2:10 +"));

    let saved = fs::read_to_string(&session).expect("session file written");
    assert!(saved.contains("\"version\": 1"));
    assert!(saved.contains("\"total_minutes\": 130"));

    // The second run resumes the chain from the saved total.
    let mut second = cargo_bin_cmd!("timecalc");
    second
        .arg("--session")
        .arg(&session)
        .arg("--eval")
        .arg("15 =")
        .assert()
        .success()
        .stdout(predicate::str::contains("  0:15 = 2:25"))
        .stdout(predicate::str::contains("input: 2:25"));
}

#[test]
fn malformed_session_file_fails_with_clear_error() {
    let dir = tempdir().expect("tempdir");
    let session = dir.path().join("session.json");
    fs::write(&session, "{ not-valid-json ").expect("write invalid json");

    let mut cmd = cargo_bin_cmd!("timecalc");
    cmd.arg("--session")
        .arg(&session)
        .arg("--eval")
        .arg("1 =")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid JSON"));
}

#[test]
fn double_clear_resets_everything() {
    let mut cmd = cargo_bin_cmd!("timecalc");
    cmd.arg("--eval")
        .arg("1230 + 45 CE CE")
        .assert()
        .success()
        .stdout(predicate::eq("input: \n"));
}
