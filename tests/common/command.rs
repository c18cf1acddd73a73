use crate::common::file::{TableSpec, write_table_file};
use crate::common::redirect_temp_dir;
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

pub const TEST_USER: &str = "tester";

#[fixture]
pub fn repository_dir() -> TempDir {
    redirect_temp_dir();
    TempDir::new().expect("Failed to create temp dir")
}

/// A repository with one commit holding a `people` table
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_rowbit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    import_table(
        repository_dir.path(),
        &TableSpec::new("people".into(), "id,name\n1,ada\n2,grace".into()),
    );
    run_rowbit_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();
    rowbit_commit(repository_dir.path(), &["-m", "Initial commit"])
        .assert()
        .success();

    repository_dir
}

/// `init_repository_dir` with `origin/main` configured as upstream of `main`
/// and the tracking ref at the initial commit
#[fixture]
pub fn tracking_repository_dir(init_repository_dir: TempDir) -> TempDir {
    let dir = init_repository_dir.path();
    run_rowbit_command(dir, &["remote", "add", "origin", "file:///srv/people"])
        .assert()
        .success();
    run_rowbit_command(dir, &["branch", "set-upstream", "main", "origin/main"])
        .assert()
        .success();
    run_rowbit_command(dir, &["update-ref", "refs/remotes/origin/main", "HEAD"])
        .assert()
        .success();

    init_repository_dir
}

pub fn run_rowbit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("rowbit").expect("Failed to find rowbit binary");
    cmd.envs(vec![
        ("NO_COLOR", "1"),
        ("ROWBIT_USER", TEST_USER),
        ("ROWBIT_CLIENT_ADDRESS", "localhost"),
    ]);
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn rowbit_commit(dir: &Path, args: &[&str]) -> Command {
    let mut full_args = vec!["commit"];
    full_args.extend_from_slice(args);
    run_rowbit_command(dir, &full_args)
}

pub fn import_table(dir: &Path, table: &TableSpec) {
    let path = write_table_file(dir, table);
    run_rowbit_command(
        dir,
        &["table", "import", &table.name, &path.to_string_lossy()],
    )
    .assert()
    .success();
}

/// Import, stage and commit a new version of a table; returns the printed hash
pub fn commit_table(dir: &Path, table: &TableSpec, message: &str) -> String {
    import_table(dir, table);
    let output = rowbit_commit(dir, &["-A", "-m", message])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    String::from_utf8(output)
        .expect("commit output is not utf-8")
        .trim()
        .to_string()
}

/// Commit id HEAD points at, read straight from `.rowbit`
pub fn get_head_commit_id(dir: &Path) -> Option<String> {
    let head = std::fs::read_to_string(dir.join(".rowbit").join("HEAD")).ok()?;

    match head.trim().strip_prefix("ref: ") {
        Some(ref_path) => std::fs::read_to_string(dir.join(".rowbit").join(ref_path))
            .ok()
            .map(|oid| oid.trim().to_string())
            .filter(|oid| !oid.is_empty()),
        None => Some(head.trim().to_string()),
    }
}

pub fn stdout_of(dir: &Path, args: &[&str]) -> String {
    let output = run_rowbit_command(dir, args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    String::from_utf8(output).expect("output is not utf-8")
}
