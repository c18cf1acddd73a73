use crate::common::command::{get_head_commit_id, init_repository_dir, run_rowbit_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case("commit")]
#[case("commit_hash_out")]
fn call_prints_the_hash_row(
    init_repository_dir: TempDir,
    #[case] procedure: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    let output = run_rowbit_command(
        dir,
        &["call", procedure, "--allow-empty", "-m", "From a procedure"],
    )
    .assert()
    .success()
    .stdout(predicate::str::is_match(r"^[0-9a-v]{32}\n$")?)
    .get_output()
    .stdout
    .clone();

    assert_eq!(
        get_head_commit_id(dir),
        Some(String::from_utf8(output)?.trim().to_string())
    );

    Ok(())
}

#[rstest]
fn call_with_skip_empty_returns_no_rows(init_repository_dir: TempDir) {
    run_rowbit_command(
        init_repository_dir.path(),
        &["call", "commit", "--skip-empty", "-m", "Nothing"],
    )
    .assert()
    .success()
    .stdout("");
}

#[rstest]
fn call_rejects_conflicting_stage_flags(init_repository_dir: TempDir) {
    run_rowbit_command(
        init_repository_dir.path(),
        &["call", "commit", "-a", "-A", "-m", "Both"],
    )
    .assert()
    .failure();
}

#[rstest]
fn call_unknown_procedure_fails(init_repository_dir: TempDir) {
    run_rowbit_command(init_repository_dir.path(), &["call", "merge", "main"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown procedure 'merge'"));
}
