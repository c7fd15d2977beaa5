//! E2E tests: exit codes and output contract of the `instance-catalog` binary.
//!
//! No scenario here touches the real network. Onion rows either run with
//! Tor disabled or go through a local mock server standing in for the proxy.
//! Failing rows use plain-http clearnet URLs, which are rejected before any
//! request is made.

#![allow(deprecated)]

mod support;

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use support::socket_guard::start_mock_server_or_skip;
use tempfile::TempDir;
use wiremock::matchers::method;
use wiremock::{Mock, ResponseTemplate};

fn catalog_cmd() -> Command {
    let mut cmd = Command::cargo_bin("instance-catalog").unwrap();
    cmd.env_remove("RUST_LOG").arg("-q");
    cmd
}

fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_binary_help_lists_options() {
    Command::cargo_bin("instance-catalog")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--import"))
        .stdout(predicate::str::contains("--no-tor"))
        .stdout(predicate::str::contains("--fail-fast"))
        .stdout(predicate::str::contains("--input"))
        .stdout(predicate::str::contains("--output"));
}

#[test]
fn test_binary_field_count_mismatch_exits_two_without_output() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "instances.csv", "http://abc.onion,DE,false\nhttps://a.example,US\n");
    let output = dir.path().join("instances.json");

    let assert = catalog_cmd()
        .arg("-T")
        .arg("-I")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .failure();
    assert_eq!(assert.get_output().status.code(), Some(2));
    assert!(!output.exists(), "no document may be written on a parse failure");
}

#[test]
fn test_binary_unterminated_quote_exits_two() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "instances.csv", "\"https://a.example,US,false\n");

    let assert = catalog_cmd().arg("-T").arg("-I").arg(&input).assert().failure();
    assert_eq!(assert.get_output().status.code(), Some(2));
}

#[test]
fn test_binary_onion_skipped_is_success() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "instances.csv", "http://abc.onion,DE,false,\n");
    let output = dir.path().join("instances.json");

    catalog_cmd()
        .arg("--no-tor")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let document = read_json(&output);
    assert_eq!(document["instances"], serde_json::json!([]));
    let updated = document["updated"].as_str().unwrap();
    assert!(
        chrono::NaiveDate::parse_from_str(updated, "%Y-%m-%d").is_ok(),
        "updated must be YYYY-MM-DD, got {updated}"
    );
}

#[test]
fn test_binary_reads_stdin_and_writes_stdout() {
    let output = catalog_cmd()
        .arg("-T")
        .write_stdin("http://abc.onion,DE,false\n")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let document: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert!(document["instances"].as_array().unwrap().is_empty());
}

#[test]
fn test_binary_failed_row_exits_one_but_writes_output() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "instances.csv", "http://plain.example,US,false\n");
    let output = dir.path().join("instances.json");

    let assert = catalog_cmd()
        .arg("-T")
        .arg("-I")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .failure();
    assert_eq!(assert.get_output().status.code(), Some(1));
    assert!(output.exists(), "output is still written when rows fail");
}

#[test]
fn test_binary_fail_fast_exits_one_without_output() {
    let dir = TempDir::new().unwrap();
    let input = write(
        &dir,
        "instances.csv",
        "http://plain.example,US,false\nhttp://abc.onion,DE,false\n",
    );
    let output = dir.path().join("instances.json");

    let assert = catalog_cmd()
        .arg("-T")
        .arg("-f")
        .arg("-I")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .failure();
    assert_eq!(assert.get_output().status.code(), Some(1));
    assert!(!output.exists(), "fail-fast aborts before writing output");
}

#[test]
fn test_binary_import_appends_onion_entries() {
    let dir = TempDir::new().unwrap();
    let prior = write(
        &dir,
        "prior.json",
        r#"{"updated":"2023-01-01","instances":[
            {"url":"https://old.example","country":"US","version":"v0.1.0"},
            {"onion":"http://old.onion","country":"FI","version":"v0.2.0","description":"kept"}
        ]}"#,
    );
    let input = write(&dir, "instances.csv", "http://abc.onion,DE,false\n");
    let output = dir.path().join("instances.json");

    catalog_cmd()
        .arg("--import")
        .arg(&prior)
        .arg("-I")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let document = read_json(&output);
    assert_eq!(
        document["instances"],
        serde_json::json!([
            {"onion":"http://old.onion","country":"FI","version":"v0.2.0","description":"kept"}
        ])
    );
}

#[test]
fn test_binary_import_same_as_input_exits_two() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "instances.json", r#"{"instances":[]}"#);

    let assert = catalog_cmd()
        .arg("-i")
        .arg(&path)
        .arg("-I")
        .arg(&path)
        .assert()
        .failure();
    assert_eq!(assert.get_output().status.code(), Some(2));
}

#[test]
fn test_binary_malformed_import_exits_two() {
    let dir = TempDir::new().unwrap();
    let prior = write(&dir, "prior.json", "{\"instances\": [");
    let input = write(&dir, "instances.csv", "http://abc.onion,DE,false\n");

    let assert = catalog_cmd()
        .arg("-i")
        .arg(&prior)
        .arg("-I")
        .arg(&input)
        .assert()
        .failure();
    assert_eq!(assert.get_output().status.code(), Some(2));
}

#[test]
fn test_binary_missing_input_file_exits_two() {
    let dir = TempDir::new().unwrap();
    let assert = catalog_cmd()
        .arg("-T")
        .arg("-I")
        .arg(dir.path().join("missing.csv"))
        .assert()
        .failure();
    assert_eq!(assert.get_output().status.code(), Some(2));
}

#[test]
fn test_binary_unwritable_output_exits_one() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "instances.csv", "http://abc.onion,DE,false\n");

    let assert = catalog_cmd()
        .arg("-T")
        .arg("-I")
        .arg(&input)
        .arg("-o")
        .arg(dir.path().join("no-such-dir").join("out.json"))
        .assert()
        .failure();
    assert_eq!(assert.get_output().status.code(), Some(1));
}

#[test]
fn test_binary_quoted_description_across_lines() {
    let dir = TempDir::new().unwrap();
    let input = write(
        &dir,
        "instances.csv",
        "http://abc.onion,DE,false,\"first\nsecond\"\nhttp://def.onion,FI,false\n",
    );
    let output = dir.path().join("instances.json");

    catalog_cmd()
        .arg("-T")
        .arg("-I")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();
    assert_eq!(read_json(&output)["instances"], serde_json::json!([]));
}

#[tokio::test]
async fn test_binary_ok_row_writes_entry() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    // Stands in for Tor: answers the liveness check and the proxied GET
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"<span id="version">v1.2.3</span>"#),
        )
        .mount(&mock_server)
        .await;

    let assert = catalog_cmd()
        .arg("--tor-proxy")
        .arg(mock_server.uri())
        .write_stdin("http://abc.onion,DE,true,Hi\n")
        .assert()
        .success();
    assert_eq!(assert.get_output().status.code(), Some(0));

    let document: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(
        document["instances"],
        serde_json::json!([
            {"onion":"http://abc.onion","country":"DE","version":"v1.2.3","cloudflare":true,"description":"Hi"}
        ])
    );
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(
        stdout.contains(r#""onion": "http://abc.onion",
      "country": "DE""#),
        "entry keys keep their order: {stdout}"
    );
}
