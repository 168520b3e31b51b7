//! Headless mode process-level integration harness.
//!
//! # What this covers
//!
//! This harness runs `arqlog` as a compiled binary via
//! [`std::process::Command`] and checks what a user or a CI script would
//! observe.
//!
//! - **Exit codes**: success = 0; no names = 2 (scenario E); validation
//!   failure = 3; missing log file or bad config = 1.
//! - **Summary output**: one line per named log set, in argument order.
//! - **`--print-entries`**: every extracted pair is printed before the
//!   summary.
//! - **`--export`**: the JSON file is written even in headless mode.
//! - **`--config`**: a user file can move the log directory and prefixes.
//!
//! # What this does NOT cover
//!
//! - TUI rendering (that requires a real terminal; see the widget tests in
//!   `arqlog-tui`).
//!
//! # Running
//!
//! ```sh
//! cargo test --test headless_harness
//! ```

mod common;
use common::*;

use std::{path::Path, process::Command};

use pretty_assertions::assert_eq;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `arqlog` with a private config home so a developer's own config file
/// never leaks into the run.
fn arqlog(config_home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_arqlog"));
    cmd.env("XDG_CONFIG_HOME", config_home).env_remove("RUST_LOG");
    cmd
}

fn stdout_lines(out: &std::process::Output) -> Vec<String> {
    String::from_utf8_lossy(&out.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Exit codes
// ---------------------------------------------------------------------------

#[test]
fn no_names_exits_two() {
    let home = tempfile::tempdir().unwrap();
    let out = arqlog(home.path()).arg("--headless").output().unwrap();

    assert_eq!(out.status.code(), Some(2));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("no log set names"), "stderr: {stderr}");
}

#[test]
fn valid_set_exits_zero_with_summary() {
    let home = tempfile::tempdir().unwrap();
    let logs = tempfile::tempdir().unwrap();
    write_log_set(logs.path(), "run1", CORPUS_SERVER, CORPUS_CLIENT).unwrap();

    let out = arqlog(home.path())
        .arg("--headless")
        .arg("--logs-dir")
        .arg(logs.path())
        .arg("run1")
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(0), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(
        stdout_lines(&out),
        vec!["run1: 3 packets, delay min 10.000 ms, mean 25.761 ms, max 40.782 ms"]
    );
}

#[test]
fn several_sets_are_summarised_in_order() {
    let home = tempfile::tempdir().unwrap();
    let logs = tempfile::tempdir().unwrap();
    let (server, client) = corpus_run(4);
    write_log_set(logs.path(), "b", &server, &client).unwrap();
    write_log_set(logs.path(), "a", CORPUS_SERVER, CORPUS_CLIENT).unwrap();

    let out = arqlog(home.path())
        .args(["--headless", "--logs-dir"])
        .arg(logs.path())
        .args(["b", "a"])
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(0));
    let lines = stdout_lines(&out);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("b: 4 packets"), "{lines:?}");
    assert!(lines[1].starts_with("a: 3 packets"), "{lines:?}");
}

#[test]
fn validation_failure_exits_three() {
    let home = tempfile::tempdir().unwrap();
    let logs = tempfile::tempdir().unwrap();
    write_log_set(logs.path(), "short", CORPUS_SERVER, &CORPUS_CLIENT[..5]).unwrap();

    let out = arqlog(home.path())
        .args(["--headless", "--logs-dir"])
        .arg(logs.path())
        .arg("short")
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(3));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("short"), "stderr: {stderr}");
    assert_eq!(
        stderr
            .matches("server logged 3 packets but client logged 2")
            .count(),
        1,
        "stderr: {stderr}"
    );
}

#[test]
fn missing_log_file_exits_one() {
    let home = tempfile::tempdir().unwrap();
    let logs = tempfile::tempdir().unwrap();

    let out = arqlog(home.path())
        .args(["--headless", "--logs-dir"])
        .arg(logs.path())
        .arg("ghost")
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("server_ghost"), "stderr: {stderr}");
    assert_eq!(stderr.matches("os error").count(), 1, "stderr: {stderr}");
}

#[test]
fn missing_explicit_config_exits_one() {
    let home = tempfile::tempdir().unwrap();
    let out = arqlog(home.path())
        .args(["--headless", "--config"])
        .arg(home.path().join("absent.toml"))
        .arg("run1")
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(1));
}

// ---------------------------------------------------------------------------
// Flags
// ---------------------------------------------------------------------------

#[test]
fn print_entries_lists_both_sides() {
    let home = tempfile::tempdir().unwrap();
    let logs = tempfile::tempdir().unwrap();
    write_log_set(
        logs.path(),
        "one",
        &[SCENARIO_A_SERVER],
        &[SCENARIO_A_CLIENT],
    )
    .unwrap();

    let out = arqlog(home.path())
        .args(["--headless", "--print-entries", "--logs-dir"])
        .arg(logs.path())
        .arg("one")
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(0));
    let lines = stdout_lines(&out);
    assert_eq!(
        &lines[..4],
        &[
            "# one server",
            "SN: 2, Timestamp: 2024-11-27 19:16:12.309514278",
            "# one client",
            "SN: 2, Timestamp: 2024-11-27 19:16:12.350295886",
        ]
    );
    assert!(lines[4].starts_with("one: 1 packets"), "{lines:?}");
}

#[test]
fn export_writes_json() {
    let home = tempfile::tempdir().unwrap();
    let logs = tempfile::tempdir().unwrap();
    write_log_set(logs.path(), "run1", CORPUS_SERVER, CORPUS_CLIENT).unwrap();
    let json = logs.path().join("out.json");

    let out = arqlog(home.path())
        .args(["--headless", "--logs-dir"])
        .arg(logs.path())
        .arg("--export")
        .arg(&json)
        .arg("run1")
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(0));
    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(doc["series"][0]["label"], "run1");
    assert_eq!(doc["series"][0]["points"].as_array().unwrap().len(), 3);
}

#[test]
fn config_file_moves_logs_and_prefixes() {
    let home = tempfile::tempdir().unwrap();
    let logs = tempfile::tempdir().unwrap();
    std::fs::write(
        logs.path().join("srv-x.log"),
        CORPUS_SERVER.join("\n"),
    )
    .unwrap();
    std::fs::write(
        logs.path().join("cli-x.log"),
        CORPUS_CLIENT.join("\n"),
    )
    .unwrap();

    let config = home.path().join("arqlog.toml");
    std::fs::write(
        &config,
        format!(
            "[logs]\ndir = {:?}\nserver_prefix = \"srv-\"\nclient_prefix = \"cli-\"\n",
            logs.path().display().to_string()
        ),
    )
    .unwrap();

    let out = arqlog(home.path())
        .args(["--headless", "--config"])
        .arg(&config)
        .arg("x.log")
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(0), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(stdout_lines(&out)[0].starts_with("x.log: 3 packets"));
}
