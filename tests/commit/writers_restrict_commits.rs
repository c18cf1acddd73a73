use crate::common::command::{get_head_commit_id, init_repository_dir, rowbit_commit};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::io::Write;

fn restrict_main_to(dir: &std::path::Path, writers: &str) -> std::io::Result<()> {
    let mut config = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(".rowbit").join("config"))?;
    writeln!(config, "[branch \"main\"]\n\twriters = {writers}")
}

#[rstest]
fn commit_by_a_non_writer_is_denied(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    restrict_main_to(dir, "alice, bob")?;
    let head = get_head_commit_id(dir);

    rowbit_commit(dir, &["--allow-empty", "-m", "Sneaky"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "user 'tester' does not have write permission on branch 'main'",
        ));

    assert_eq!(get_head_commit_id(dir), head);

    Ok(())
}

#[rstest]
fn commit_by_a_listed_writer_succeeds(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    restrict_main_to(dir, "alice, tester")?;

    rowbit_commit(dir, &["--allow-empty", "-m", "Allowed"])
        .assert()
        .success();

    Ok(())
}
