use crate::common::command::{
    get_head_commit_id, import_table, repository_dir, rowbit_commit, run_rowbit_command,
    stdout_of,
};
use crate::common::file::generate_people_table;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn commit_prints_the_new_hash(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_rowbit_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    import_table(repository_dir.path(), &generate_people_table("people"));
    run_rowbit_command(repository_dir.path(), &["add", "people"])
        .assert()
        .success();

    let output = rowbit_commit(repository_dir.path(), &["-m", "Add people"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^[0-9a-v]{32}\n$")?)
        .get_output()
        .stdout
        .clone();
    let hash = String::from_utf8(output)?.trim().to_string();

    assert_eq!(get_head_commit_id(repository_dir.path()), Some(hash));

    Ok(())
}

#[rstest]
fn commit_records_author_and_date_overrides(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_rowbit_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    import_table(repository_dir.path(), &generate_people_table("people"));

    rowbit_commit(
        repository_dir.path(),
        &[
            "-A",
            "-m",
            "Backdated import",
            "--author",
            "Ada Lovelace <ada@example.com>",
            "--date",
            "2024-02-03T04:05:06+02:00",
        ],
    )
    .assert()
    .success();

    let log = stdout_of(repository_dir.path(), &["log"]);
    assert!(log.contains("Author: Ada Lovelace <ada@example.com>"));
    assert!(log.contains("Date:   Sat Feb 3 04:05:06 2024 +0200"));
    assert!(log.contains("    Backdated import"));

    Ok(())
}

#[rstest]
fn commit_defaults_author_to_session_user(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_rowbit_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    import_table(repository_dir.path(), &generate_people_table("people"));
    rowbit_commit(repository_dir.path(), &["-A", "-m", "Import"])
        .assert()
        .success();

    let log = stdout_of(repository_dir.path(), &["log"]);
    assert!(log.contains("Author: tester <tester@localhost>"));

    Ok(())
}
