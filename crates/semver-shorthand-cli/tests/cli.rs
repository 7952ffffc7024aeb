use std::process::Command;

use assert_cmd::prelude::*;
use indoc::indoc;
use predicates::prelude::*;

const BIN_NAME: &str = "semver-shorthand";

/// The binary with a clean environment, so that the caller's settings don't leak into the
/// assertions.
fn command() -> Command {
    let mut command = Command::cargo_bin(BIN_NAME).unwrap();
    command
        .env_remove("SEMVER_SHORTHAND_OUTPUT_FORMAT")
        .env_remove("RUST_LOG")
        .env_remove("CLICOLOR_FORCE")
        .env("NO_COLOR", "1");
    command
}

#[test]
fn check_contained() {
    command()
        .args(["check", "1.x", "1.2.3", "1.0.0"])
        .assert()
        .success()
        .stdout(indoc! {"
            ✓ `1.2.3` satisfies `1.x`
            ✓ `1.0.0` satisfies `1.x`
        "});
}

#[test]
fn check_not_contained() {
    command()
        .args(["check", "~1.0.3", "1.0.9", "1.1.0"])
        .assert()
        .code(1)
        .stdout(indoc! {"
            ✓ `1.0.9` satisfies `~1.0.3`
            ✗ `1.1.0` does not satisfy `~1.0.3`
        "});
}

#[test]
fn check_epoch() {
    command()
        .args(["check", "2!^1.0.4", "2!1.0.9"])
        .assert()
        .success();
    command()
        .args(["check", "2!^1.0.4", "1.0.4"])
        .assert()
        .code(1);
}

#[test]
fn check_quiet() {
    command()
        .args(["check", "--quiet", "1.x", "2.0.0"])
        .assert()
        .code(1)
        .stdout("");
}

#[test]
fn check_json() {
    let output = command()
        .args(["--output-format", "json", "check", "^1.2, !=1.4.0", "1.3.0", "1.4.0"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        report,
        serde_json::json!({
            "range": "^1.2, !=1.4.0",
            "canonical": ">=1.2.0, !=1.4.0, <2.0.0",
            "results": [
                { "version": "1.3.0", "contained": true },
                { "version": "1.4.0", "contained": false },
            ]
        })
    );
}

#[test]
fn invalid_range() {
    command()
        .args(["check", "x.0.4", "1.0.0"])
        .assert()
        .code(2)
        .stdout("")
        .stderr(predicate::str::contains("error: Invalid range: `x.0.4`"))
        .stderr(predicate::str::contains(
            "Only trailing release components can be placeholders",
        ));
}

#[test]
fn invalid_version() {
    command()
        .args(["check", "1.x", "1.2.3", "french toast"])
        .assert()
        .code(2)
        .stdout("")
        .stderr(predicate::str::contains(
            "error: Invalid version: `french toast`",
        ));
}

#[test]
fn canonical() {
    command()
        .args(["canonical", "1.x", "1.0", "~1.0.4", "1!1", "x", "1.0.4.dev1"])
        .assert()
        .success()
        .stdout(indoc! {"
            ^1.0.0
            ~1.0.0
            ~1.0.4
            1!^1.0.0
            *
            1.0.4.dev1
        "});
}

#[test]
fn canonical_json_from_env() {
    command()
        .env("SEMVER_SHORTHAND_OUTPUT_FORMAT", "json")
        .args(["canonical", "1.x"])
        .assert()
        .success()
        .stdout(indoc! {r#"
            [
              {
                "range": "1.x",
                "canonical": "^1.0.0"
              }
            ]
        "#});
}

#[test]
fn explain() {
    command()
        .args(["explain", "^0.2.3"])
        .assert()
        .success()
        .stdout(indoc! {"
            canonical: ^0.2.3
            requires: >=0.2.3
            requires: <0.3.0
        "});
}

#[test]
fn explain_wildcard() {
    command()
        .args(["explain", "*"])
        .assert()
        .success()
        .stdout(indoc! {"
            canonical: *
            matches: any version
        "});
}

#[test]
fn explain_json() {
    command()
        .args(["explain", "--output-format", "json", "1.0.x"])
        .assert()
        .success()
        .stdout(indoc! {r#"
            {
              "range": "1.0.x",
              "canonical": "~1.0.0",
              "comparators": [
                ">=1.0.0",
                "<1.1.0"
              ]
            }
        "#});
}

#[test]
fn verbose_logs_to_stderr() {
    command()
        .args(["--verbose", "check", "1.x", "1.2.3"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Compiling range clause"));
}
