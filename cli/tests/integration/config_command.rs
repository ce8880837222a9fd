//! Integration tests for `mqw-provision config`.
//!
//! Every test points `MQW_PROVISION_CONFIG` at a temp file so the user's
//! real configuration is never read.

#![allow(clippy::expect_used)]

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const MINIMAL: &str = "\
gerrit:
  host: review.example.org
admin:
  username: batch-admin
  key_path: /k/admin
worker:
  username: mqwreview
  full_name: MQ Worker
  email: mq@example.org
  key_path: /k/worker
";

fn mqw() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("mqw-provision"));
    cmd.env("NO_COLOR", "1");
    cmd
}

fn write_config(content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, content).expect("write config");
    (dir, path)
}

#[test]
fn test_config_help_lists_subcommands() {
    mqw()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("path"));
}

#[test]
fn test_config_path_uses_env_var_without_file() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("not-yet.yaml");
    mqw()
        .args(["config", "path"])
        .env("MQW_PROVISION_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("not-yet.yaml"));
}

#[test]
fn test_config_validate_accepts_minimal_config() {
    let (_dir, path) = write_config(MINIMAL);
    mqw()
        .args(["config", "validate"])
        .env("MQW_PROVISION_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid"));
}

#[test]
fn test_config_validate_rejects_bad_username() {
    let (_dir, path) = write_config(&MINIMAL.replace("username: mqwreview", "username: 'mq review'"));
    mqw()
        .args(["config", "validate"])
        .env("MQW_PROVISION_CONFIG", &path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("worker.username"));
}

#[test]
fn test_config_validate_rejects_option_shaped_host() {
    let (_dir, path) = write_config(&MINIMAL.replace(
        "host: review.example.org",
        "host: '-oProxyCommand=touch /tmp/pwned'",
    ));
    mqw()
        .args(["config", "validate"])
        .env("MQW_PROVISION_CONFIG", &path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("gerrit.host"));
}

#[test]
fn test_config_show_fills_in_defaults() {
    let (_dir, path) = write_config(MINIMAL);
    mqw()
        .args(["config", "show"])
        .env("MQW_PROVISION_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("port: 29418"))
        .stdout(predicate::str::contains("Non-Interactive Users"))
        .stdout(predicate::str::contains("connect_timeout_secs: 10"));
}

#[test]
fn test_config_show_json() {
    let (_dir, path) = write_config(MINIMAL);
    let output = mqw()
        .args(["config", "show", "--json"])
        .arg("--config")
        .arg(&path)
        .output()
        .expect("run");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["gerrit"]["port"], 29418);
    assert_eq!(value["worker"]["username"], "mqwreview");
}
