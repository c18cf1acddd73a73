use crate::common::command::{
    commit_table, get_head_commit_id, init_repository_dir, rowbit_commit, stdout_of,
    tracking_repository_dir,
};
use crate::common::file::TableSpec;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::{assert_eq, assert_ne};
use rstest::rstest;

#[rstest]
fn amend_reuses_the_previous_message(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    commit_table(
        dir,
        &TableSpec::new("people".into(), "id,name\n1,ada".into()),
        "Trim people",
    );
    let before = get_head_commit_id(dir);

    rowbit_commit(dir, &["--amend", "--date", "2030-01-02T03:04:05+00:00"])
        .assert()
        .success();

    let log = stdout_of(dir, &["log"]);
    assert_ne!(get_head_commit_id(dir), before);
    assert_eq!(log.matches("commit ").count(), 2);
    assert!(log.contains("    Trim people"));
    assert!(log.contains("Date:   Wed Jan 2 03:04:05 2030 +0000"));
    assert!(log.contains("    Initial commit"));
}

#[rstest]
fn amend_replaces_the_message(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    rowbit_commit(dir, &["--amend", "-m", "Seed people"])
        .assert()
        .success();

    let log = stdout_of(dir, &["log"]);
    assert_eq!(log.matches("commit ").count(), 1);
    assert!(log.contains("    Seed people"));
    assert!(!log.contains("Initial commit"));
}

#[rstest]
fn amend_of_a_published_commit_needs_force(tracking_repository_dir: TempDir) {
    let dir = tracking_repository_dir.path();
    let published = get_head_commit_id(dir);

    rowbit_commit(dir, &["--amend", "-m", "Rewrite"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("use --force"));
    assert_eq!(get_head_commit_id(dir), published);

    rowbit_commit(dir, &["--amend", "--force", "-m", "Rewrite"])
        .assert()
        .success();
    assert_ne!(get_head_commit_id(dir), published);
}
