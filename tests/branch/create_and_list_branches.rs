use crate::common::command::{init_repository_dir, repository_dir, run_rowbit_command, stdout_of};
use assert_fs::TempDir;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn list_branches_marks_the_current_one(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_rowbit_command(dir, &["branch", "create", "feature"])
        .assert()
        .success();
    run_rowbit_command(dir, &["branch", "create", "archive", "HEAD"])
        .assert()
        .success();

    assert_eq!(
        stdout_of(dir, &["branch", "list"]),
        "  archive\n  feature\n* main\n"
    );
}

#[rstest]
fn create_branch_requires_a_commit(repository_dir: TempDir) {
    run_rowbit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_rowbit_command(repository_dir.path(), &["branch", "create", "feature"])
        .assert()
        .failure();
}

#[rstest]
#[case("has space")]
#[case("double..dot")]
#[case("ends.lock")]
#[case("tilde~1")]
fn create_branch_rejects_invalid_names(init_repository_dir: TempDir, #[case] name: &str) {
    run_rowbit_command(
        init_repository_dir.path(),
        &["branch", "create", name],
    )
    .assert()
    .failure()
    .stderr(predicate::str::is_empty().not());
}
