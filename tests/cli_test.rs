//! CLI smoke tests for the contactapi binary.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn version_prints_package_version() {
    Command::cargo_bin("contactapi")
        .unwrap()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn validate_reports_warnings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{"server": {"port": 9090, "public_url": "contacts.example.com"}}"#,
    )
    .unwrap();

    Command::cargo_bin("contactapi")
        .unwrap()
        .arg("validate")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("9090"))
        .stdout(predicate::str::contains("scheme"));
}

#[test]
fn validate_rejects_malformed_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{not json").unwrap();

    Command::cargo_bin("contactapi")
        .unwrap()
        .args(["--config", path.to_str().unwrap(), "validate"])
        .assert()
        .failure();
}

#[test]
fn validate_without_file_uses_defaults() {
    Command::cargo_bin("contactapi")
        .unwrap()
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.0.0.0:8080"));
}
