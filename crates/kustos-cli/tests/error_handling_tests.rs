//! Tests for error handling and suggestions.

use assert_cmd::Command;
use predicates::prelude::*;

const SPECIFIER: &str = "github.com/owner/repo/manifests?ref=v1";

#[test]
fn test_conflict_suggests_deleting_first() {
    let repo = tempfile::tempdir().unwrap();

    Command::cargo_bin("kustos")
        .unwrap()
        .arg("--repo")
        .arg(repo.path())
        .args(["app", "create", "billing", SPECIFIER, "--project", "prod"])
        .assert()
        .success();

    Command::cargo_bin("kustos")
        .unwrap()
        .arg("--repo")
        .arg(repo.path())
        .args(["app", "create", "billing", SPECIFIER, "--project", "prod"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Suggestions:"))
        .stderr(predicate::str::contains("Delete it first"))
        .stderr(predicate::str::contains("kustos app delete"));
}

#[test]
fn test_repo_not_found_suggests_the_flag() {
    Command::cargo_bin("kustos")
        .unwrap()
        .env_remove("KUSTOS_REPO")
        .arg("--repo")
        .arg("/definitely/not/a/checkout")
        .args(["app", "list"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Repository not found"))
        .stderr(predicate::str::contains("Pass the checkout path"))
        .stderr(predicate::str::contains("KUSTOS_REPO"));
}

#[test]
fn test_cancelled_delete_exits_with_user_error() {
    let repo = tempfile::tempdir().unwrap();

    Command::cargo_bin("kustos")
        .unwrap()
        .arg("--repo")
        .arg(repo.path())
        .args(["app", "delete", "billing", "--project", "prod"])
        .write_stdin("n\n")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Operation cancelled"))
        .stderr(predicate::str::contains("No changes were made"));
}

#[test]
fn test_empty_project_name_is_rejected() {
    let repo = tempfile::tempdir().unwrap();

    Command::cargo_bin("kustos")
        .unwrap()
        .arg("--repo")
        .arg(repo.path())
        .args(["app", "create", "billing", SPECIFIER, "--project", ""])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("project name may not be empty"));
}

#[test]
fn test_remote_source_cannot_be_installed_flat() {
    let repo = tempfile::tempdir().unwrap();

    Command::cargo_bin("kustos")
        .unwrap()
        .arg("--repo")
        .arg(repo.path())
        .args([
            "app",
            "create",
            "billing",
            "https://github.com/owner/repo/manifests",
            "--project",
            "prod",
            "--installation-mode",
            "flat",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cannot be flattened"));
}

#[test]
fn test_verbose_failure_shows_the_error_chain() {
    let repo = tempfile::tempdir().unwrap();

    Command::cargo_bin("kustos")
        .unwrap()
        .arg("--repo")
        .arg(repo.path())
        .args(["app", "create", "billing", SPECIFIER, "--project", "prod"])
        .assert()
        .success();

    Command::cargo_bin("kustos")
        .unwrap()
        .arg("-v")
        .arg("--repo")
        .arg(repo.path())
        .args(["app", "create", "billing", SPECIFIER, "--project", "prod"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Caused by:"));
}
