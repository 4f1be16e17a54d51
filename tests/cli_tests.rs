//! CLI surface tests.
//!
//! These run the binary without a database: help/version output, argument
//! validation, and the error shape for an unknown service. Anything needing
//! live Postgres lives in the smoke suites instead.

use assert_cmd::Command;
use predicates::prelude::*;

fn medops_command() -> Command {
    Command::cargo_bin("medops").unwrap()
}

#[test]
fn test_help_lists_subcommands() {
    medops_command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("migrate"))
        .stdout(predicate::str::contains("seed"))
        .stdout(predicate::str::contains("smoke"));
}

#[test]
fn test_long_help_names_all_services() {
    let assert = medops_command().arg("help").assert().success();
    let output = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    for service in ["hms", "crm", "onboarding", "partners", "analytics", "occ"] {
        assert!(output.contains(service), "help missing service {}", service);
    }
}

#[test]
fn test_version_flag() {
    medops_command()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("medops"));
}

#[test]
fn test_serve_rejects_unknown_service() {
    medops_command()
        .arg("serve")
        .arg("billing")
        .assert()
        .failure()
        .stderr(predicate::str::contains("INVALID_INPUT"))
        .stderr(predicate::str::contains("Unknown service"));
}

#[test]
fn test_smoke_rejects_unknown_suite() {
    medops_command()
        .arg("smoke")
        .arg("nonsense")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown service"));
}

#[test]
fn test_serve_requires_service_argument() {
    medops_command().arg("serve").assert().failure();
}

#[test]
fn test_no_subcommand_shows_usage() {
    medops_command()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
