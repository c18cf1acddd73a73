use crate::common::command::{init_repository_dir, run_rowbit_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn set_upstream_records_the_tracking_branch(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_rowbit_command(dir, &["remote", "add", "origin", "../upstream"])
        .assert()
        .success();

    run_rowbit_command(dir, &["branch", "set-upstream", "main", "origin/main"])
        .assert()
        .success()
        .stdout("branch 'main' set up to track 'origin/main'.\n");

    let config = std::fs::read_to_string(dir.join(".rowbit").join("config"))?;
    assert!(config.contains("[branch \"main\"]"));
    assert!(config.contains("remote = origin"));
    assert!(config.contains("merge = refs/heads/main"));

    Ok(())
}

#[rstest]
fn set_upstream_requires_a_known_remote(init_repository_dir: TempDir) {
    run_rowbit_command(
        init_repository_dir.path(),
        &["branch", "set-upstream", "main", "origin/main"],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("remote 'origin' does not exist"));
}

#[rstest]
fn adding_a_remote_twice_fails(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_rowbit_command(dir, &["remote", "add", "origin", "../upstream"])
        .assert()
        .success();

    run_rowbit_command(dir, &["remote", "add", "origin", "../elsewhere"])
        .assert()
        .failure();
}
