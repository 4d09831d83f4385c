//! Parse and tokens subcommand tests

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_parse_stdin() {
    cargo_bin_cmd!("markpipe")
        .arg("parse")
        .write_stdin("# Heading\n\nParagraph.")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"DOCUMENT\""))
        .stdout(predicate::str::contains("\"HEADING\""));
}

#[test]
fn test_parse_output_is_json() {
    let output = cargo_bin_cmd!("markpipe")
        .arg("parse")
        .write_stdin("- [x] done")
        .output()
        .unwrap();
    assert!(output.status.success());

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["type"], "DOCUMENT");
    assert_eq!(doc["children"][0]["type"], "LIST");
    assert_eq!(doc["children"][0]["children"][0]["attrs"]["checked"], true);
}

#[test]
fn test_parse_complex_document() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("test.md");
    fs::write(
        &test_file,
        "# Heading\n\n## Subheading\n\n- Item 1\n- Item 2\n\n| A | B |\n|---|---|\n| 1 | 2 |",
    )
    .unwrap();

    cargo_bin_cmd!("markpipe")
        .args(["parse", test_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("HEADING"))
        .stdout(predicate::str::contains("LIST"))
        .stdout(predicate::str::contains("TABLE_CELL"));
}

#[test]
fn test_parse_without_plugins() {
    cargo_bin_cmd!("markpipe")
        .args(["parse", "--no-plugins"])
        .write_stdin("| A |\n|---|")
        .assert()
        .success()
        .stdout(predicate::str::contains("TABLE").not());
}

#[test]
fn test_parse_tokenized_mode() {
    cargo_bin_cmd!("markpipe")
        .args(["parse", "--mode", "tokenized"])
        .write_stdin("```rust\nlet x = 1;\n```")
        .assert()
        .success()
        .stdout(predicate::str::contains("CODE_BLOCK"))
        .stdout(predicate::str::contains("let x = 1;"));
}

#[test]
fn test_parse_handles_unterminated_syntax() {
    cargo_bin_cmd!("markpipe")
        .arg("parse")
        .write_stdin("```\nnever closed\n**bold\n[link](")
        .assert()
        .success();
}

#[test]
fn test_tokens_stdin() {
    cargo_bin_cmd!("markpipe")
        .arg("tokens")
        .write_stdin("# Title\ntext")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"heading\""))
        .stdout(predicate::str::contains("\"newline\""));
}

#[test]
fn test_outline_lists_headings_and_links() {
    let output = cargo_bin_cmd!("markpipe")
        .arg("outline")
        .write_stdin("# Intro\n\nSee [docs](https://x.com \"Docs\").\n\n## Next Steps")
        .output()
        .unwrap();
    assert!(output.status.success());

    let outline: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(outline["headings"][0]["id"], "intro");
    assert_eq!(outline["headings"][1]["id"], "next-steps");
    assert_eq!(outline["headings"][1]["level"], 2);
    assert_eq!(outline["links"][0]["url"], "https://x.com");
    assert_eq!(outline["links"][0]["title"], "Docs");
    assert_eq!(outline["reading_minutes"], 1);
}
