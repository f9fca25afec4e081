//! Integration tests for the promplot binary.
//!
//! These drive the compiled binary over piped stdin, which selects the
//! plain line prompt; none of them ever reaches the TUI, so they are safe
//! to run without a terminal.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn exit_at_the_prompt_terminates_cleanly() {
    Command::cargo_bin("promplot")
        .unwrap()
        .write_stdin("exit\n")
        .assert()
        .success();
}

#[test]
fn end_of_input_terminates_cleanly() {
    Command::cargo_bin("promplot")
        .unwrap()
        .write_stdin("")
        .assert()
        .success();
}

#[test]
fn blank_lines_are_skipped() {
    Command::cargo_bin("promplot")
        .unwrap()
        .write_stdin("\n   \nexit\n")
        .assert()
        .success();
}

#[test]
fn rejects_an_unparseable_prometheus_address() {
    Command::cargo_bin("promplot")
        .unwrap()
        .args(["--prom", "not a url"])
        .write_stdin("exit\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Prometheus address"));
}

#[test]
fn help_mentions_the_prometheus_flag() {
    Command::cargo_bin("promplot")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--prom"));
}

#[test]
fn version_is_reported() {
    Command::cargo_bin("promplot")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
