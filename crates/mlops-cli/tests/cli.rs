//! Binary-level argument handling; nothing here reaches AWS.

use assert_cmd::Command;
use predicates::prelude::*;

fn mlops() -> Command {
    Command::cargo_bin("mlops").unwrap()
}

#[test]
fn help_lists_every_operation() {
    mlops()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("train")
                .and(predicate::str::contains("watch"))
                .and(predicate::str::contains("deploy-endpoint"))
                .and(predicate::str::contains("update-endpoint"))
                .and(predicate::str::contains("transform"))
                .and(predicate::str::contains("test-endpoint")),
        );
}

#[test]
fn missing_subcommand_is_a_usage_error() {
    mlops().assert().failure().code(2);
}

#[test]
fn zero_attempts_is_a_usage_error() {
    mlops()
        .args(["--max-attempts", "0", "watch", "job-1"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("max-attempts"));
}

#[test]
fn deploy_requires_model_name() {
    mlops()
        .arg("deploy-endpoint")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("MODEL_NAME"));
}
