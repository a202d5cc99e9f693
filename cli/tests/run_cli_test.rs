use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::error::Error;
use std::process::Command;
use tempfile::tempdir;

fn tpb() -> Command {
    Command::cargo_bin("tpb").expect("tpb binary builds")
}

#[test]
fn single_run_reports_ops_per_sec() -> Result<(), Box<dyn Error>> {
    tpb()
        .args(["--version", "native", "--argument", "true", "-n", "1000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("any-view/native/true: 1000 ops"))
        .stdout(predicate::str::contains("ops/sec"));
    Ok(())
}

#[test]
fn scripted_byte_view_false_object_scenario() {
    tpb()
        .args([
            "--type",
            "byte-view",
            "--version",
            "js",
            "--argument",
            "false-object",
            "-n",
            "3",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("byte-view/scripted/false-object: 3 ops"));
}

#[test]
fn zero_iterations_still_complete() {
    tpb()
        .args(["--version", "native", "--argument", "true", "-n", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("any-view/native/true: 0 ops"));
}

#[test]
fn negative_count_coerces_to_zero_iterations() {
    tpb()
        .args(["--version", "native", "--argument", "true", "-n", "-5"])
        .assert()
        .success()
        .stdout(predicate::str::contains(": 0 ops"));
}

#[test]
fn unknown_implementation_fails_before_running() {
    tpb()
        .args(["--version", "wasm", "--argument", "true", "-n", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown implementation 'wasm'"));
}

#[test]
fn unknown_argument_fails_before_running() {
    tpb()
        .args(["--version", "native", "--argument", "perhaps", "-n", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown argument label 'perhaps'"));
}

#[test]
fn default_sweep_prints_a_summary_table() -> Result<(), Box<dyn Error>> {
    tpb()
        .args(["-n", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("family"))
        .stdout(predicate::str::contains("byte-view/scripted/false-object"));
    Ok(())
}

#[test]
fn export_writes_json_and_csv() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let out = dir.path().join("results");

    tpb().args(["-n", "100", "--export"]).arg(&out).assert().success();

    let json = std::fs::read_to_string(out.join("results.json"))?;
    let parsed: serde_json::Value = serde_json::from_str(&json)?;
    let records = parsed["records"].as_array().expect("records array");
    assert_eq!(records.len(), 12);
    assert!(records.iter().all(|r| r["ops"] == 100));

    let csv = std::fs::read_to_string(out.join("results.csv"))?;
    assert_eq!(csv.lines().count(), 13);
    Ok(())
}

#[test]
fn matrix_file_drives_the_sweep() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let matrix = dir.path().join("matrix.toml");
    std::fs::write(
        &matrix,
        "family = [\"byte-view\"]\nversion = [\"native\", \"js\"]\nargument = [\"true\"]\nn = [10.0]\n",
    )?;

    tpb()
        .arg("--matrix")
        .arg(&matrix)
        .assert()
        .success()
        .stdout(predicate::str::contains("byte-view/native/true: 10 ops"))
        .stdout(predicate::str::contains("byte-view/scripted/true: 10 ops"));
    Ok(())
}
