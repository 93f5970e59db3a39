use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;

// Helper function to get the path to the compiled binary
fn vidpress_cmd() -> Command {
    Command::cargo_bin("vidpress").expect("Failed to find vidpress binary")
}

#[test]
fn test_check_valid_path_exits_zero() {
    vidpress_cmd()
        .arg("check")
        .arg("clip.mp4")
        .assert()
        .success()
        .stdout(contains("VALID"));
}

#[test]
fn test_check_invalid_path_reports_once() {
    // The classification goes to stdout and sets the exit code; it must not
    // be logged a second time as an error on stderr.
    vidpress_cmd()
        .arg("check")
        .arg("notes.txt")
        .assert()
        .code(2)
        .stdout(contains("INVALID_EXTENSION"))
        .stderr(contains("Invalid path").not());
}

#[test]
fn test_estimate_from_raw_size() {
    vidpress_cmd()
        .args(["estimate", "--size", "1048576", "-t", "40"])
        .assert()
        .success()
        .stdout(contains("Estimated:"));
}

#[test]
fn test_encode_rejects_unsupported_extension() {
    vidpress_cmd()
        .args(["encode", "-i", "document.txt"])
        .assert()
        .code(1)
        .stderr(contains("unsupported video extension"));
}
