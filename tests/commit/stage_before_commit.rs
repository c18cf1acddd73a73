use crate::common::command::{import_table, init_repository_dir, rowbit_commit, stdout_of};
use crate::common::file::TableSpec;
use assert_fs::TempDir;
use rstest::rstest;

fn change_people_and_add_pets(dir: &std::path::Path) {
    import_table(
        dir,
        &TableSpec::new("people".into(), "id,name\n1,ada\n2,grace\n3,alan".into()),
    );
    import_table(
        dir,
        &TableSpec::new("pets".into(), "id,kind\n1,cat".into()),
    );
}

#[rstest]
fn stage_modified_leaves_new_tables_untracked(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    change_people_and_add_pets(dir);

    rowbit_commit(dir, &["-a", "-m", "Add alan"])
        .assert()
        .success();

    let status = stdout_of(dir, &["status"]);
    assert!(status.contains("Untracked tables:"));
    assert!(status.contains("\tpets\n"));
    assert!(!status.contains("modified:"));
}

#[rstest]
fn stage_all_includes_new_tables(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();
    change_people_and_add_pets(dir);

    rowbit_commit(dir, &["-A", "-m", "Add alan and pets"])
        .assert()
        .success();

    let status = stdout_of(dir, &["status"]);
    assert!(status.contains("nothing to commit, working tree clean"));
}
