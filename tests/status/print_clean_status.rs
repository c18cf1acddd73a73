use crate::common::command::{init_repository_dir, repository_dir, run_rowbit_command, stdout_of};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn print_no_commits_yet_on_an_unborn_branch(repository_dir: TempDir) {
    run_rowbit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    let expected_output = "On branch main\n\nNo commits yet\nnothing to commit, working tree clean\n";

    assert_eq!(stdout_of(repository_dir.path(), &["status"]), expected_output);
}

#[rstest]
fn print_clean_status_after_a_commit(init_repository_dir: TempDir) {
    let expected_output = "On branch main\nnothing to commit, working tree clean\n";

    assert_eq!(
        stdout_of(init_repository_dir.path(), &["status"]),
        expected_output
    );
}

#[rstest]
fn omit_tracking_line_without_upstream(init_repository_dir: TempDir) {
    let status = stdout_of(init_repository_dir.path(), &["status"]);

    assert!(!status.contains("Your branch"));
}
