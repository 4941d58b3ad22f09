//! Integration tests for the command-line binary.

use std::fs;
use std::process::Command;

use tempfile::TempDir;

fn batlz() -> Command {
    Command::new(env!("CARGO_BIN_EXE_batlz"))
}

#[test]
fn factorizes_a_file_and_reports_the_phrase_count() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("input.txt");
    fs::write(&path, "abcabcabc").unwrap();

    let output = batlz().arg(&path).arg("10").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec!["(-1,0,97)", "(-1,0,98)", "(-1,0,99)", "(0,6,0)", "z = 4"]
    );

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("4 phrases"));
}

#[test]
fn quiet_mode_silences_progress() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("input.txt");
    fs::write(&path, "banana").unwrap();

    let output = batlz().arg(&path).arg("3").arg("--quiet").output().unwrap();
    assert!(output.status.success());
    assert!(output.stderr.is_empty());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.trim_end().ends_with("z = 5"));
}

#[test]
fn self_test_flag_passes_on_well_formed_input() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("input.txt");
    fs::write(&path, "mississippi").unwrap();

    let output = batlz()
        .arg(&path)
        .arg("2")
        .arg("--self-test")
        .output()
        .unwrap();
    assert!(output.status.success());
}

#[test]
fn zero_byte_in_the_input_fails_with_a_diagnostic() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("input.bin");
    fs::write(&path, b"ab\0cd").unwrap();

    let output = batlz().arg(&path).arg("4").output().unwrap();
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("zero byte"));
}

#[test]
fn missing_file_fails_with_a_diagnostic() {
    let output = batlz().arg("/no/such/file").arg("4").output().unwrap();
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("failed to read"));
}

#[test]
fn zero_cost_fails_with_exit_status_one() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("input.txt");
    fs::write(&path, "abc").unwrap();

    let output = batlz().arg(&path).arg("0").output().unwrap();
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("cost ceiling must be positive"));
}

#[test]
fn missing_arguments_fail_with_exit_status_one() {
    let output = batlz().output().unwrap();
    assert_eq!(output.status.code(), Some(1));

    let output = batlz().arg("input.txt").output().unwrap();
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn help_keeps_its_conventional_exit_status() {
    let output = batlz().arg("--help").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Cost ceiling"));
}
