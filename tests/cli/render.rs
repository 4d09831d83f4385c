//! Render subcommand tests

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_render_stdin_to_html() {
    cargo_bin_cmd!("markpipe")
        .arg("render")
        .write_stdin("# Hello\n\nSome *text*.")
        .assert()
        .success()
        .stdout(predicate::str::contains("<h1 id=\"hello\">Hello</h1>"))
        .stdout(predicate::str::contains("<em>text</em>"));
}

#[test]
fn test_render_text_format() {
    cargo_bin_cmd!("markpipe")
        .args(["render", "--format", "text"])
        .write_stdin("# Hello\n\nworld")
        .assert()
        .success()
        .stdout("Hello world\n");
}

#[test]
fn test_render_tree_format_is_json() {
    let output = cargo_bin_cmd!("markpipe")
        .args(["render", "--format", "tree"])
        .write_stdin("---")
        .output()
        .unwrap();
    assert!(output.status.success());

    let tree: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(tree["kind"], "fragment");
    assert_eq!(tree["value"][0]["value"]["tag"], "hr");
}

#[test]
fn test_render_no_sanitize() {
    cargo_bin_cmd!("markpipe")
        .args(["render", "--no-sanitize"])
        .write_stdin("a <b>c</b>")
        .assert()
        .success()
        .stdout(predicate::str::contains("<p>a <b>c</b></p>"));
}

#[test]
fn test_render_empty_link_target() {
    cargo_bin_cmd!("markpipe")
        .args(["render", "--link-target", ""])
        .write_stdin("[x](https://example.com)")
        .assert()
        .success()
        .stdout(predicate::str::contains("<a href=\"https://example.com\">x</a>"));
}

#[test]
fn test_render_uses_config_next_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("doc.md");
    fs::write(&test_file, "# Title\n\nbody").unwrap();
    fs::write(temp_dir.path().join(".markpipe.toml"), "format = \"text\"\n").unwrap();

    cargo_bin_cmd!("markpipe")
        .args(["render", test_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout("Title body\n");
}

#[test]
fn test_render_explicit_config_with_toggles() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("custom.toml");
    fs::write(&config_file, "[plugins]\ntable = false\n").unwrap();

    cargo_bin_cmd!("markpipe")
        .args(["render", "--config", config_file.to_str().unwrap()])
        .write_stdin("|a|\n|-|")
        .assert()
        .success()
        .stdout(predicate::str::contains("<table>").not());
}

#[test]
fn test_render_invalid_config_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("bad.toml");
    fs::write(&config_file, "format = [").unwrap();

    cargo_bin_cmd!("markpipe")
        .args(["render", "--config", config_file.to_str().unwrap()])
        .write_stdin("x")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
}
