use crate::common::command::{import_table, init_repository_dir, run_rowbit_command, stdout_of};
use crate::common::file::TableSpec;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn report_staged_unstaged_and_untracked_tables(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    import_table(
        dir,
        &TableSpec::new("orders".into(), "id,total\n1,9.99".into()),
    );
    run_rowbit_command(dir, &["add", "orders"])
        .assert()
        .success();
    import_table(
        dir,
        &TableSpec::new("people".into(), "id,name\n1,ada".into()),
    );
    import_table(dir, &TableSpec::new("pets".into(), "id,kind\n1,cat".into()));

    let expected_output = "On branch main

Changes to be committed:
\tnew table:  orders

Changes not staged for commit:
  (use \"rowbit add <table>\" to update what will be committed)
\tmodified:   people

Untracked tables:
  (use \"rowbit add <table>\" to include in what will be committed)
\tpets
";

    assert_eq!(stdout_of(dir, &["status"]), expected_output);
}

#[rstest]
fn report_dropped_tables_as_deleted(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_rowbit_command(dir, &["table", "drop", "people"])
        .assert()
        .success();

    let expected_output = "On branch main

Changes not staged for commit:
  (use \"rowbit add <table>\" to update what will be committed)
\tdeleted:    people

no changes added to commit (use \"rowbit add\" and/or \"rowbit commit -a\")
";

    assert_eq!(stdout_of(dir, &["status"]), expected_output);
}

#[rstest]
fn report_staged_deletion_after_add(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    run_rowbit_command(dir, &["table", "drop", "people"])
        .assert()
        .success();
    run_rowbit_command(dir, &["add", "."]).assert().success();

    let status = stdout_of(dir, &["status"]);

    assert!(status.contains("Changes to be committed:\n\tdeleted:    people\n"));
    assert!(!status.contains("Changes not staged"));
}
