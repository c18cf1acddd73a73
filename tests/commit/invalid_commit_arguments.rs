use crate::common::command::{init_repository_dir, rowbit_commit};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn commit_without_message_fails(init_repository_dir: TempDir) {
    rowbit_commit(init_repository_dir.path(), &["--allow-empty"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Must provide commit message."));
}

#[rstest]
fn stage_flags_conflict(init_repository_dir: TempDir) {
    rowbit_commit(init_repository_dir.path(), &["-a", "-A", "-m", "Both"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[rstest]
#[case("--author", "no email here")]
#[case("--date", "yesterday-ish")]
fn malformed_overrides_are_rejected(
    init_repository_dir: TempDir,
    #[case] flag: &str,
    #[case] value: &str,
) {
    rowbit_commit(
        init_repository_dir.path(),
        &["--allow-empty", "-m", "Bad", flag, value],
    )
    .assert()
    .failure();
}
