//! Integration tests for the `velo-json` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise every subcommand
//! through the actual binary, covering stdin and file input, parse failures,
//! and the global parse options.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn velo() -> Command {
    Command::cargo_bin("velo-json").unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// check
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn check_stdin_object() {
    velo()
        .arg("check")
        .write_stdin(r#"{"a": 1}"#)
        .assert()
        .success()
        .stdout("ok: object\n");
}

#[test]
fn check_file_with_comments() {
    velo()
        .args(["check", "-i", &fixture("update.json")])
        .assert()
        .success()
        .stdout("ok: object\n");
}

#[test]
fn check_reports_line_and_column() {
    velo()
        .args(["check", "-i", &fixture("invalid.json")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2, column 11"))
        .stderr(predicate::str::contains("unexpected comma in array"));
}

#[test]
fn check_missing_file_fails() {
    velo()
        .args(["check", "-i", "/nonexistent/velo.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn strict_rejects_trailing_content() {
    velo()
        .arg("check")
        .write_stdin("[1] trailing")
        .assert()
        .success();

    velo()
        .args(["--strict", "check"])
        .write_stdin("[1] trailing")
        .assert()
        .failure()
        .stderr(predicate::str::contains("trailing characters"));
}

#[test]
fn strict_rejects_broken_trailing_comment() {
    velo()
        .args(["--strict", "check"])
        .write_stdin("[1] /* never closed")
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 1, column 5"))
        .stderr(predicate::str::contains("trailing characters"));

    velo()
        .args(["--strict", "check"])
        .write_stdin("[1] // closed by end of input")
        .assert()
        .success();
}

#[test]
fn max_depth_is_applied() {
    velo()
        .args(["--max-depth", "2", "check"])
        .write_stdin("[[1]]")
        .assert()
        .success();

    velo()
        .args(["check", "--max-depth", "2"])
        .write_stdin("[[[1]]]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("too deeply nested"));
}

// ─────────────────────────────────────────────────────────────────────────────
// tree
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn tree_outline_sorts_keys() {
    velo()
        .arg("tree")
        .write_stdin(r#"{"b": [1, "x"], "a": null, "c": {"d": true}}"#)
        .assert()
        .success()
        .stdout(concat!(
            "object (3)\n",
            "  \"a\": null\n",
            "  \"b\": array (2)\n",
            "    - number 1\n",
            "    - string \"x\"\n",
            "  \"c\": object (1)\n",
            "    \"d\": bool true\n",
        ));
}

#[test]
fn tree_scalar_root() {
    velo()
        .arg("tree")
        .write_stdin("/* pi-ish */ 3.5")
        .assert()
        .success()
        .stdout("number 3.5\n");
}

// ─────────────────────────────────────────────────────────────────────────────
// update-info / asset
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn update_info_text() {
    velo()
        .args(["update-info", "-i", &fixture("update.json")])
        .assert()
        .success()
        .stdout(predicate::str::contains("Downgrade:  false"))
        .stdout(predicate::str::contains("Package:    MyApp"))
        .stdout(predicate::str::contains("Version:    1.2.3"))
        .stdout(predicate::str::contains("Type:       Full"))
        .stdout(predicate::str::contains("Size:       1048576 bytes"));
}

#[test]
fn update_info_json_output() {
    let output = velo()
        .args(["update-info", "--json", "-i", &fixture("update.json")])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["IsDowngrade"], false);
    assert_eq!(value["TargetFullRelease"]["Id"], "MyApp");
    assert_eq!(value["TargetFullRelease"]["Size"], 1048576);
    assert_eq!(value["TargetFullRelease"]["Markdown"], "# Changes\n- faster");
}

#[test]
fn update_info_without_target() {
    velo()
        .arg("update-info")
        .write_stdin(r#"{"IsDowngrade": true}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("Downgrade:  true"))
        .stdout(predicate::str::contains("No target release"));
}

#[test]
fn update_info_type_mismatch_fails() {
    velo()
        .arg("update-info")
        .write_stdin(r#"{"IsDowngrade": "no"}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to decode update manifest"))
        .stderr(predicate::str::contains("expected bool, found string"));
}

#[test]
fn asset_text() {
    velo()
        .arg("asset")
        .write_stdin(r#"{"id": "Tool", "version": "0.9.0", "type": "delta", "size": 10}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("Package:    Tool"))
        .stdout(predicate::str::contains("Type:       Delta"))
        .stdout(predicate::str::contains("Size:       10 bytes"));
}

#[test]
fn asset_text_lists_every_field() {
    velo()
        .arg("asset")
        .write_stdin(
            r#"{"id": "Tool", "version": "1.0.0", "type": "full", "filename": "Tool-full.nupkg",
                "sha1": "abc", "size": 7, "markdown": "fixé"}"#,
        )
        .assert()
        .success()
        .stdout(concat!(
            "Package:    Tool\n",
            "Version:    1.0.0\n",
            "Type:       Full\n",
            "File:       Tool-full.nupkg\n",
            "SHA1:       abc\n",
            "Size:       7 bytes\n",
            "Notes:      4 chars of markdown\n",
        ));
}

// ─────────────────────────────────────────────────────────────────────────────
// progress
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn progress_lines() {
    velo()
        .args(["progress", "-i", &fixture("progress.ndjson")])
        .assert()
        .success()
        .stdout(concat!(
            " 12% MyApp-1.2.3-full.nupkg\n",
            " 57% MyApp-1.2.3-full.nupkg\n",
            "100% MyApp-1.2.3-full.nupkg (complete)\n",
        ));
}

#[test]
fn progress_error_event() {
    velo()
        .arg("progress")
        .write_stdin("{\"File\": \"a\", \"Progress\": 3, \"Error\": \"network down\"}\n")
        .assert()
        .success()
        .stdout("  3% a error: network down\n");
}

#[test]
fn progress_bad_line_names_line_number() {
    velo()
        .arg("progress")
        .write_stdin("{\"Progress\": 1}\n{\"Progress\": 2\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid progress event on line 2"));
}

#[test]
fn no_subcommand_shows_usage() {
    velo()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
