use crate::common::command::{
    commit_table, init_repository_dir, repository_dir, run_rowbit_command, stdout_of,
};
use crate::common::file::TableSpec;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn print_history_newest_first(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    let second = commit_table(
        dir,
        &TableSpec::new("people".into(), "id,name\n1,ada".into()),
        "Trim people",
    );

    let log = stdout_of(dir, &["log"]);
    let messages = log
        .lines()
        .filter(|line| line.starts_with("    "))
        .map(str::trim)
        .collect::<Vec<_>>();

    assert!(log.starts_with(&format!("commit {second}\n")));
    assert_eq!(messages, vec!["Trim people", "Initial commit"]);
}

#[rstest]
fn log_from_a_revision(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    commit_table(
        dir,
        &TableSpec::new("people".into(), "id,name\n1,ada".into()),
        "Trim people",
    );

    let log = stdout_of(dir, &["log", "HEAD~1"]);

    assert_eq!(log.matches("commit ").count(), 1);
    assert!(log.contains("    Initial commit"));
}

#[rstest]
fn log_on_an_unborn_branch_fails(repository_dir: TempDir) {
    run_rowbit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_rowbit_command(repository_dir.path(), &["log"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "your current branch 'main' does not have any commits yet",
        ));
}
