// tests/integration_test.rs
use assert_cmd::Command;
use predicates::prelude::*;

fn pypublish() -> Command {
    let mut cmd = Command::cargo_bin("pypublish").unwrap();
    cmd.env_remove("PYPUBLISH_REMOTE")
        .env_remove("PYPUBLISH_DIST_DIR")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_pypublish_help() {
    pypublish()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Publish or delete package versions"))
        .stdout(predicate::str::contains("--tag-only"))
        .stdout(predicate::str::contains("Examples:"));
}

#[test]
fn test_pypublish_version() {
    pypublish()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_version_prints_help_and_exits_2() {
    let dir = tempfile::tempdir().unwrap();
    pypublish()
        .current_dir(dir.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("version is required"))
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_delete_tag_without_version_exits_2() {
    let dir = tempfile::tempdir().unwrap();
    pypublish()
        .current_dir(dir.path())
        .arg("--delete-tag")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--delete-tag"));
}

#[test]
fn test_invalid_version_exits_2() {
    let dir = tempfile::tempdir().unwrap();
    pypublish()
        .current_dir(dir.path())
        .arg("1.0;rm")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not a usable version"));
}

#[test]
fn test_unknown_flag_exits_2() {
    pypublish().args(["1.0.0", "--bogus"]).assert().code(2);
}

#[test]
fn test_missing_project_dir_fails() {
    let dir = tempfile::tempdir().unwrap();
    pypublish()
        .current_dir(dir.path())
        .args(["1.0.0", "-C", "does-not-exist"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_tag_only_outside_repository_fails_precondition() {
    let dir = tempfile::tempdir().unwrap();
    pypublish()
        .current_dir(dir.path())
        .args(["1.0.0", "--tag-only"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Step 'create-tag' failed"))
        .stderr(predicate::str::contains("no git repository found"));
}
