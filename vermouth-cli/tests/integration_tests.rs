//! Integration tests for the Vermouth CLI
//!
//! Tests end-to-end command behavior using the CLI binary.
//! Uses tempfile for isolated working directories.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

/// Get the path to the vermouth binary (built by cargo)
fn vermouth_binary() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_vermouth"));
    cmd.env_remove("RUST_LOG").env_remove("GOPATH");
    cmd
}

/// Run vermouth with the given args in the specified directory
fn run_vermouth(dir: &Path, args: &[&str]) -> Output {
    vermouth_binary()
        .current_dir(dir)
        .args(args)
        .output()
        .expect("Failed to execute vermouth command")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Fixture package shipped with vermouth-core
fn fixture(version: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../vermouth-core/tests/fixtures")
        .join(version)
        .to_string_lossy()
        .to_string()
}

// ============================================================================
// diff
// ============================================================================

#[test]
fn test_diff_prints_report() {
    let dir = TempDir::new().unwrap();
    let output = run_vermouth(dir.path(), &["diff", &fixture("v1"), &fixture("v2")]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.starts_with("The New API is NOT backward compatible.\n\nStructs:\n"));
    assert!(text.contains("Deprecated: OldEntry\n"));
    assert!(text.contains("\tType Changes:\n\t\tId: string -> int\n"));
    assert!(text.contains(
        "\t\tOldApi(name string, id string) (session string)\n\t\t-> OldApi(name string, id int) (session string)\n"
    ));
    assert!(text.ends_with("New:\n"));
}

#[test]
fn test_diff_check_exit_codes() {
    let dir = TempDir::new().unwrap();

    let breaking = run_vermouth(
        dir.path(),
        &["diff", &fixture("v1"), &fixture("v2"), "--check"],
    );
    assert_eq!(breaking.status.code(), Some(2));
    assert!(stdout(&breaking).contains("NOT backward compatible"));

    let same = run_vermouth(
        dir.path(),
        &["diff", &fixture("v1"), &fixture("v1"), "--check"],
    );
    assert_eq!(same.status.code(), Some(0));
    assert!(stdout(&same).starts_with("The New API is backward compatible.\n"));
}

#[test]
fn test_diff_json_format() {
    let dir = TempDir::new().unwrap();
    let output = run_vermouth(
        dir.path(),
        &["diff", &fixture("v1"), &fixture("v2"), "--format", "json"],
    );

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["compatible"], false);
    assert_eq!(value["changes"]["new_structs"][0]["name"], "EntryItem");
}

#[test]
fn test_diff_output_file() {
    let dir = TempDir::new().unwrap();
    let report = dir.path().join("report.txt");
    let output = run_vermouth(
        dir.path(),
        &[
            "diff",
            &fixture("v1"),
            &fixture("v2"),
            "-o",
            report.to_str().unwrap(),
        ],
    );

    assert!(output.status.success());
    assert!(stdout(&output).is_empty());
    let written = fs::read_to_string(&report).unwrap();
    assert!(written.starts_with("The New API is NOT backward compatible.\n"));
    assert!(stderr(&output).contains("Report written to"));
}

#[test]
fn test_diff_missing_package_fails() {
    let dir = TempDir::new().unwrap();
    let output = run_vermouth(dir.path(), &["diff", &fixture("v1"), "no/such/package"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("Failed to compare"));
}

#[test]
fn test_diff_syntax_error_fails() {
    let dir = TempDir::new().unwrap();
    let broken = dir.path().join("broken");
    fs::create_dir(&broken).unwrap();
    fs::write(broken.join("api.go"), "package api\n\ntype Entry struct {\n").unwrap();

    let output = run_vermouth(
        dir.path(),
        &["diff", &fixture("v1"), broken.to_str().unwrap()],
    );

    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("api.go"));
}

#[test]
fn test_diff_gopath_resolution() {
    let dir = TempDir::new().unwrap();
    for version in ["v1", "v2"] {
        let pkg = dir.path().join("gopath/src/example.com/testapis").join(version);
        fs::create_dir_all(&pkg).unwrap();
        fs::copy(
            Path::new(&fixture(version)).join("api.go"),
            pkg.join("api.go"),
        )
        .unwrap();
    }

    let output = vermouth_binary()
        .current_dir(dir.path())
        .env("GOPATH", dir.path().join("gopath"))
        .args(["diff", "example.com/testapis/v1", "example.com/testapis/v2"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("New: EntryItem\n"));
}

#[test]
fn test_config_sets_default_format() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".vermouth.toml"), "[output]\nformat = \"json\"\n").unwrap();

    let output = run_vermouth(dir.path(), &["diff", &fixture("v1"), &fixture("v2")]);
    assert!(output.status.success());
    assert!(serde_json::from_str::<serde_json::Value>(&stdout(&output)).is_ok());

    // Flags win over configuration
    let output = run_vermouth(
        dir.path(),
        &["diff", &fixture("v1"), &fixture("v2"), "--format", "text"],
    );
    assert!(stdout(&output).starts_with("The New API"));
}

// ============================================================================
// inspect
// ============================================================================

#[test]
fn test_inspect_text() {
    let dir = TempDir::new().unwrap();
    let output = run_vermouth(dir.path(), &["inspect", &fixture("v2")]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("(3 structs, 1 interfaces)"));
    assert!(text.contains("struct Entry\n  Name string\n  Id int\n  NewField string\n"));
    assert!(text.contains("  NewApi(id int) (session string)\n"));
}

#[test]
fn test_inspect_json_round_trips_into_diff() {
    let dir = TempDir::new().unwrap();
    let output = run_vermouth(dir.path(), &["inspect", &fixture("v1"), "--format", "json"]);
    assert!(output.status.success());

    let table = dir.path().join("v1.json");
    fs::write(&table, stdout(&output)).unwrap();

    let output = run_vermouth(
        dir.path(),
        &["diff", table.to_str().unwrap(), &fixture("v1"), "--check"],
    );
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_no_command_prints_help() {
    let dir = TempDir::new().unwrap();
    let output = run_vermouth(dir.path(), &[]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("Usage"));
}
