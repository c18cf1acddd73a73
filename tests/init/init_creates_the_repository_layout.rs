use crate::common::command::{repository_dir, run_rowbit_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn init_creates_the_repository_layout(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_rowbit_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Initialized empty rowbit repository in",
        ));

    let rowbit_dir = repository_dir.path().join(".rowbit");
    assert!(rowbit_dir.join("objects").is_dir());
    assert!(rowbit_dir.join("refs").join("heads").is_dir());
    assert!(rowbit_dir.join("refs").join("remotes").is_dir());
    assert_eq!(
        std::fs::read_to_string(rowbit_dir.join("HEAD"))?.trim(),
        "ref: refs/heads/main"
    );

    Ok(())
}

#[rstest]
fn init_is_idempotent(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_rowbit_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    run_rowbit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_rowbit_command(repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No commits yet"));

    Ok(())
}
