use crate::common::command::{
    commit_table, run_rowbit_command, stdout_of, tracking_repository_dir,
};
use crate::common::file::TableSpec;
use assert_fs::TempDir;
use rstest::rstest;
use std::path::Path;

fn people_version(rows: usize) -> TableSpec {
    let body = (1..=rows)
        .map(|id| format!("{id},person{id}"))
        .collect::<Vec<_>>()
        .join("\n");
    TableSpec::new("people".into(), format!("id,name\n{body}"))
}

fn update_ref(dir: &Path, reference: &str, revision: &str) {
    run_rowbit_command(dir, &["update-ref", reference, revision])
        .assert()
        .success();
}

#[rstest]
fn report_up_to_date_with_upstream(tracking_repository_dir: TempDir) {
    let status = stdout_of(tracking_repository_dir.path(), &["status"]);

    assert!(status.contains("Your branch is up to date with 'origin/main'.\n"));
}

#[rstest]
fn report_commits_ahead_of_upstream(tracking_repository_dir: TempDir) {
    let dir = tracking_repository_dir.path();
    commit_table(dir, &people_version(3), "Third person");
    commit_table(dir, &people_version(4), "Fourth person");

    let status = stdout_of(dir, &["status"]);

    assert!(status.contains("Your branch is ahead of 'origin/main' by 2 commits."));
}

#[rstest]
fn report_commits_behind_upstream(tracking_repository_dir: TempDir) {
    let dir = tracking_repository_dir.path();
    commit_table(dir, &people_version(3), "Third person");
    update_ref(dir, "refs/remotes/origin/main", "HEAD");
    update_ref(dir, "refs/heads/main", "HEAD~1");

    let status = stdout_of(dir, &["status"]);

    assert!(status.contains(
        "Your branch is behind 'origin/main' by 1 commit, and can be fast-forwarded."
    ));
}

#[rstest]
fn report_diverged_branches(tracking_repository_dir: TempDir) {
    let dir = tracking_repository_dir.path();
    commit_table(dir, &people_version(3), "Third person");
    commit_table(dir, &people_version(4), "Fourth person");
    update_ref(dir, "refs/remotes/origin/main", "HEAD");
    update_ref(dir, "refs/heads/main", "HEAD~2");
    commit_table(dir, &people_version(5), "Fifth person");

    let status = stdout_of(dir, &["status"]);

    assert!(status.contains(
        "Your branch and 'origin/main' have diverged,\nand have 1 and 2 different commits each, respectively."
    ));
}

#[rstest]
fn skip_tracking_line_when_tracking_ref_is_missing(tracking_repository_dir: TempDir) {
    let dir = tracking_repository_dir.path();
    std::fs::remove_file(
        dir.join(".rowbit")
            .join("refs")
            .join("remotes")
            .join("origin")
            .join("main"),
    )
    .expect("tracking ref exists");

    let status = stdout_of(dir, &["status"]);

    assert!(status.starts_with("On branch main\n"));
    assert!(!status.contains("Your branch"));
}
