use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("teleinfo"))
}

fn repo_root() -> std::path::PathBuf {
    let manifest = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest
        .parent()
        .and_then(|p| p.parent())
        .expect("repo root")
        .to_path_buf()
}

fn golden_input(case: &str) -> std::path::PathBuf {
    repo_root()
        .join("tests")
        .join("golden")
        .join(case)
        .join("input.txt")
}

fn sample_frame() -> std::path::PathBuf {
    golden_input("historic_hchp")
}

#[test]
fn help_lists_decode() {
    cmd()
        .arg("frame")
        .arg("decode")
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("--mode"));
}

#[test]
fn missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.txt");
    let report = temp.path().join("report.json");

    cmd()
        .arg("frame")
        .arg("decode")
        .arg(missing)
        .arg("-o")
        .arg(report)
        .assert()
        .failure()
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn stdout_outputs_json() {
    let assert = cmd()
        .arg("frame")
        .arg("decode")
        .arg(sample_frame())
        .arg("--stdout")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let value: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(value["frame"]["frame_type"], "HC..");
    assert_eq!(value["frame"]["fields"]["ISOUSC"], "15");
}

#[test]
fn standard_mode_flag() {
    let assert = cmd()
        .arg("frame")
        .arg("decode")
        .arg(golden_input("standard"))
        .arg("--mode")
        .arg("standard")
        .arg("--stdout")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let value: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(value["mode"], "standard");
    assert_eq!(value["frame"]["fields"]["VTIC"], "02");
}

#[test]
fn stdout_and_report_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("frame")
        .arg("decode")
        .arg(sample_frame())
        .arg("--stdout")
        .arg("-o")
        .arg(report)
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn pretty_and_compact_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("frame")
        .arg("decode")
        .arg(sample_frame())
        .arg("-o")
        .arg(report)
        .arg("--pretty")
        .arg("--compact")
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn report_is_written_to_nested_directory() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("out").join("report.json");

    cmd()
        .arg("frame")
        .arg("decode")
        .arg(sample_frame())
        .arg("-o")
        .arg(&report)
        .assert()
        .success()
        .stderr(contains("OK: report written"));

    let json = std::fs::read_to_string(&report).expect("report written");
    let value: Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["counters"]["frames_decoded"], 1);
}

#[test]
fn quiet_suppresses_ok_message() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("frame")
        .arg("decode")
        .arg(sample_frame())
        .arg("-o")
        .arg(report)
        .arg("--quiet")
        .assert()
        .success()
        .stderr(contains("OK:").not());
}

#[test]
fn list_fields_outputs_names() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("frame")
        .arg("decode")
        .arg(sample_frame())
        .arg("-o")
        .arg(report)
        .arg("--list-fields")
        .assert()
        .success()
        .stderr(contains("Decoded fields (historic frame):").and(contains("PAPP = 01790")));
}

#[test]
fn decode_error_is_reported_but_not_fatal() {
    let assert = cmd()
        .arg("frame")
        .arg("decode")
        .arg(golden_input("historic_checksum_error"))
        .arg("--stdout")
        .assert()
        .success()
        .stderr(contains("warning: invalid checksum"));
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let value: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(value["error"]["error_type"], "checksum_error");
}

#[test]
fn strict_fails_on_decode_error() {
    let temp = TempDir::new().expect("tempdir");
    let report = temp.path().join("report.json");

    cmd()
        .arg("frame")
        .arg("decode")
        .arg(golden_input("historic_unknown_field"))
        .arg("-o")
        .arg(&report)
        .arg("--strict")
        .assert()
        .failure()
        .stderr(contains("frame could not be decoded (unknown_field)"));
    assert!(report.exists());
}

#[test]
fn report_must_differ_from_input() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("frame.txt");
    std::fs::copy(sample_frame(), &input).expect("copy frame");

    cmd()
        .arg("frame")
        .arg("decode")
        .arg(&input)
        .arg("-o")
        .arg(&input)
        .assert()
        .failure()
        .stderr(contains("report path must differ from input"));
}

#[test]
fn glob_matching_several_files_is_rejected() {
    let pattern = repo_root()
        .join("tests")
        .join("golden")
        .join("*")
        .join("input.txt");

    cmd()
        .arg("frame")
        .arg("decode")
        .arg(pattern)
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("multiple files match pattern"));
}
