use crate::common::command::{
    get_head_commit_id, init_repository_dir, rowbit_commit, stdout_of,
};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::{assert_eq, assert_ne};
use rstest::rstest;

#[rstest]
fn commit_without_changes_fails(init_repository_dir: TempDir) {
    rowbit_commit(init_repository_dir.path(), &["-m", "Again"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to commit"));
}

#[rstest]
fn skip_empty_prints_nothing_and_keeps_head(init_repository_dir: TempDir) {
    let head = get_head_commit_id(init_repository_dir.path());

    rowbit_commit(init_repository_dir.path(), &["-m", "Again", "--skip-empty"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(get_head_commit_id(init_repository_dir.path()), head);
}

#[rstest]
fn skip_empty_wins_over_allow_empty(init_repository_dir: TempDir) {
    let head = get_head_commit_id(init_repository_dir.path());

    rowbit_commit(
        init_repository_dir.path(),
        &["-m", "Again", "--skip-empty", "--allow-empty"],
    )
    .assert()
    .success()
    .stdout("");

    assert_eq!(get_head_commit_id(init_repository_dir.path()), head);
}

#[rstest]
fn allow_empty_records_a_commit(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let head = get_head_commit_id(init_repository_dir.path());

    rowbit_commit(init_repository_dir.path(), &["-m", "Checkpoint", "--allow-empty"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^[0-9a-v]{32}\n$")?);

    assert_ne!(get_head_commit_id(init_repository_dir.path()), head);
    let log = stdout_of(init_repository_dir.path(), &["log"]);
    assert_eq!(log.matches("commit ").count(), 2);

    Ok(())
}
