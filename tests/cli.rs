//! Integration tests for top-level CLI behavior.

use std::path::Path;
use std::process::Command;

/// Runs the binary inside `dir` with a scrubbed environment so no `.env`
/// file or ambient credentials leak into the test.
fn run_cadence(dir: &Path, args: &[&str]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_cadence");
    Command::new(bin)
        .args(args)
        .current_dir(dir)
        .env_remove("HABITICA_USER_ID")
        .env_remove("HABITICA_API_TOKEN")
        .env_remove("CADENCE_API_URL")
        .env_remove("CADENCE_HOME")
        .env_remove("CADENCE_SCHEDULE")
        .env_remove("CADENCE_LEDGER")
        .env_remove("CADENCE_RECORD")
        .env("CADENCE_LOG", "cadence=warn")
        .output()
        .expect("failed to run cadence binary")
}

fn write_schedule(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("schedule.txt");
    std::fs::write(
        &path,
        "# chores\nEmpty trashcan, 3, week\nWater the plants, 5, month\nbroken line\n",
    )
    .unwrap();
    path
}

#[test]
fn definitions_lists_parsed_lines_and_skips_broken_ones() {
    let dir = tempfile::tempdir().unwrap();
    let schedule = write_schedule(dir.path());

    let output =
        run_cadence(dir.path(), &["definitions", "--schedule", schedule.to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(output.status.success(), "stderr: {stderr}");
    assert!(stdout.contains("Empty trashcan / 3 times week"));
    assert!(stdout.contains("Water the plants / 5 times month"));
    assert!(!stdout.contains("broken line"));
    assert!(stderr.contains("skipping schedule line"));
}

#[test]
fn definitions_reads_schedule_from_cadence_home() {
    let dir = tempfile::tempdir().unwrap();
    write_schedule(dir.path());

    let output = Command::new(env!("CARGO_BIN_EXE_cadence"))
        .arg("definitions")
        .current_dir(dir.path())
        .env_remove("CADENCE_SCHEDULE")
        .env("CADENCE_HOME", dir.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Empty trashcan"));
}

#[test]
fn status_works_without_credentials() {
    let dir = tempfile::tempdir().unwrap();
    let schedule = write_schedule(dir.path());
    let ledger = dir.path().join("ledger.json");

    let output = run_cadence(
        dir.path(),
        &[
            "status",
            "--schedule",
            schedule.to_str().unwrap(),
            "--ledger",
            ledger.to_str().unwrap(),
        ],
    );
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("KEY"));
    assert!(stdout.contains("0/3"));
    assert!(stdout.contains("never"));
    assert!(!ledger.exists());
}

#[test]
fn run_without_credentials_fails_before_any_work() {
    let dir = tempfile::tempdir().unwrap();
    let schedule = write_schedule(dir.path());
    let ledger = dir.path().join("ledger.json");

    let output = run_cadence(
        dir.path(),
        &["run", "--schedule", schedule.to_str().unwrap(), "--ledger", ledger.to_str().unwrap()],
    );
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("HABITICA_USER_ID"));
    assert!(!ledger.exists());
    assert!(!dir.path().join("ledger.json.lock").exists());
}

#[test]
fn invalid_lease_ttl_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_cadence"))
        .arg("definitions")
        .current_dir(dir.path())
        .env("CADENCE_LEASE_TTL_SECS", "soon")
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("CADENCE_LEASE_TTL_SECS"));
}

#[test]
fn unknown_subcommand_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_cadence(dir.path(), &["frobnicate"]);
    assert!(!output.status.success());
}

#[test]
fn help_lists_commands() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_cadence(dir.path(), &["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("run"));
    assert!(stdout.contains("status"));
    assert!(stdout.contains("definitions"));
}
