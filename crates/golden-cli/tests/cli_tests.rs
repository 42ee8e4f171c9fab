//! CLI integration tests
//!
//! Spawn the built `golden` binary against temporary fixture trees.

use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

const GOLDEN_VARS: &[&str] = &[
    "GOLDEN_UPDATE",
    "GOLDEN_VERBOSE",
    "GOLDEN_COLOR",
    "GOLDEN_EXTENSION",
    "GOLDEN_BASE_PATH",
    "GOLDEN_CHANNEL_SIZE",
];

fn command(dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_golden"));
    cmd.current_dir(dir.path()).arg("--no-color");
    for var in GOLDEN_VARS {
        cmd.env_remove(var);
    }
    cmd
}

fn golden(args: &[&str], dir: &TempDir) -> Output {
    command(dir)
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn fixture_tree() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("fixtures");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("a.txt"), "a").unwrap();
    fs::write(root.join("a.txt.golden"), "a").unwrap();
    fs::write(root.join("b.txt"), "b").unwrap();
    fs::write(root.join("gone.txt.golden"), "old").unwrap();
    temp_dir
}

#[test]
fn test_list_reports_golden_state() {
    let temp_dir = fixture_tree();
    let output = golden(&["list", "fixtures"], &temp_dir);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("a.txt"));
    assert!(stdout.contains("b.txt (no golden file)"));
    assert!(stdout.contains("2 case(s), 1 without golden file"));
}

#[test]
fn test_diff_identical_files_exit_zero() {
    let temp_dir = fixture_tree();
    let output = golden(&["diff", "fixtures/a.txt", "fixtures/a.txt.golden"], &temp_dir);

    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_diff_different_files_exit_one() {
    let temp_dir = fixture_tree();
    let output = golden(&["diff", "fixtures/a.txt", "fixtures/b.txt"], &temp_dir);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout,
        "Bytes/Lines: +0/+0\n--- Expected\n+++ Actual\n@@ -1 +1 @@\n-a\n+b\n"
    );
}

#[test]
fn test_diff_missing_file_is_error() {
    let temp_dir = fixture_tree();
    let output = golden(&["diff", "fixtures/a.txt", "fixtures/nope.txt"], &temp_dir);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read"));
}

#[test]
fn test_orphans() {
    let temp_dir = fixture_tree();
    let output = golden(&["orphans", "fixtures"], &temp_dir);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("gone.txt.golden"));
    assert!(!stdout.contains("a.txt.golden"));

    fs::remove_file(temp_dir.path().join("fixtures/gone.txt.golden")).unwrap();
    let output = golden(&["orphans", "fixtures"], &temp_dir);
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_config_file_extension() {
    let temp_dir = fixture_tree();
    fs::write(temp_dir.path().join("golden.toml"), "extension = \".txt\"\n").unwrap();

    let output = golden(&["--config", "golden.toml", "list", "fixtures"], &temp_dir);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("a.txt.golden"));
    assert!(stdout.contains("gone.txt.golden"));
}

#[test]
fn test_environment_overrides_are_applied() {
    let temp_dir = fixture_tree();

    let output = command(&temp_dir)
        .env("GOLDEN_CHANNEL_SIZE", "0")
        .args(["list", "fixtures"])
        .output()
        .expect("Failed to execute CLI");
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("channel_size"));

    let output = command(&temp_dir)
        .env("GOLDEN_EXTENSION", ".txt")
        .args(["list", "fixtures"])
        .output()
        .expect("Failed to execute CLI");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("gone.txt.golden"));
}
