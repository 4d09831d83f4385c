//! Cross-cutting CLI tests (help, version, error handling)

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help() {
    cargo_bin_cmd!("markpipe")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Markpipe parses Markdown"));
}

#[test]
fn test_version() {
    cargo_bin_cmd!("markpipe")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_subcommand() {
    cargo_bin_cmd!("markpipe")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_invalid_subcommand() {
    cargo_bin_cmd!("markpipe")
        .arg("invalid")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_render_help() {
    cargo_bin_cmd!("markpipe")
        .args(["render", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--no-sanitize"));
}

#[test]
fn test_plugins_lists_builtins() {
    cargo_bin_cmd!("markpipe")
        .arg("plugins")
        .assert()
        .success()
        .stdout(predicate::str::contains("table"))
        .stdout(predicate::str::contains("taskList"))
        .stdout(predicate::str::contains("tableOfContents"))
        .stdout(predicate::str::contains("footnote"))
        .stdout(predicate::str::contains("AFTER_PARSE"));
}

#[test]
fn test_missing_input_file() {
    cargo_bin_cmd!("markpipe")
        .args(["render", "does-not-exist.md"])
        .assert()
        .failure();
}
