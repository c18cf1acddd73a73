use crate::areas::repository::Repository;
use crate::artifacts::commit::builder::CommitOutcome;
use crate::artifacts::commit::policy::CommitArgs;
use crate::artifacts::session::Session;
use crate::commands::procedures::Row;

pub async fn commit(
    repository: &Repository,
    session: &Session,
    args: &[String],
) -> anyhow::Result<Vec<Row>> {
    let args = CommitArgs::try_parse_args(args)?;

    match repository.build_and_write_commit(session, &args).await? {
        CommitOutcome::Created(oid) => Ok(vec![vec![oid.to_string()]]),
        CommitOutcome::Skipped => Ok(Vec::new()),
    }
}

pub async fn commit_hash_out(
    repository: &Repository,
    session: &Session,
    out: &mut String,
    args: &[String],
) -> anyhow::Result<Vec<Row>> {
    let args = CommitArgs::try_parse_args(args)?;

    match repository.build_and_write_commit(session, &args).await? {
        CommitOutcome::Created(oid) => {
            *out = oid.to_string();
            Ok(vec![vec![oid.to_string()]])
        }
        CommitOutcome::Skipped => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::areas::transaction::TransactionMode;
    use crate::artifacts::branch::branch_name::BranchName;
    use crate::artifacts::core::errors::RepoError;
    use crate::artifacts::core::repo_error;
    use crate::artifacts::objects::table::Table;
    use assert_fs::TempDir;
    use chrono::DateTime;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    struct Fixture {
        _dir: TempDir,
        repository: Repository,
        session: Session,
    }

    #[fixture]
    fn fixture() -> Fixture {
        let dir = TempDir::new().unwrap();
        let repository =
            Repository::new(&dir.path().to_string_lossy(), Box::new(std::io::sink())).unwrap();
        repository.init_layout().unwrap();
        let session = Session::new(
            "bob".into(),
            "10.0.0.2".into(),
            DateTime::parse_from_rfc3339("2024-06-01T08:00:00+00:00").unwrap(),
        );
        Fixture {
            _dir: dir,
            repository,
            session,
        }
    }

    fn args(args: &[&str]) -> Vec<String> {
        args.iter().map(|arg| arg.to_string()).collect()
    }

    async fn import(repository: &Repository, name: &str, csv: &str) {
        let main = BranchName::try_parse("main".into()).unwrap();
        let transaction = repository
            .begin_transaction(&main, TransactionMode::Write)
            .await
            .unwrap();
        let table = repository
            .database()
            .store(&Table::from_csv(csv).unwrap())
            .unwrap();
        let roots = transaction
            .working_sets()
            .edit_working(repository.database(), transaction.get_roots().unwrap(), |root| {
                root.with_table(name, table)
            })
            .unwrap();
        transaction.save_roots(&roots).unwrap();
    }

    #[rstest]
    #[tokio::test]
    async fn test_commit_returns_hash_row(fixture: Fixture) {
        import(&fixture.repository, "people", "id\n1").await;

        let rows = commit(&fixture.repository, &fixture.session, &args(&["-A", "-m", "init"]))
            .await
            .unwrap();

        let head = fixture.repository.refs().read_head().unwrap().unwrap();
        assert_eq!(rows, vec![vec![head.to_string()]]);
        assert_eq!(rows[0][0].len(), 32);
    }

    #[rstest]
    #[tokio::test]
    async fn test_hash_out_is_set_on_commit(fixture: Fixture) {
        import(&fixture.repository, "people", "id\n1").await;
        let mut out = String::new();

        let rows = commit_hash_out(
            &fixture.repository,
            &fixture.session,
            &mut out,
            &args(&["-A", "-m", "init"]),
        )
        .await
        .unwrap();

        assert_eq!(rows, vec![vec![out.clone()]]);
        assert_eq!(
            Some(out),
            fixture
                .repository
                .refs()
                .read_head()
                .unwrap()
                .map(|oid| oid.to_string())
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_skipped_commit_leaves_out_untouched(fixture: Fixture) {
        let mut out = "previous".to_string();

        let rows = commit_hash_out(
            &fixture.repository,
            &fixture.session,
            &mut out,
            &args(&["-m", "nothing", "--skip-empty"]),
        )
        .await
        .unwrap();

        assert!(rows.is_empty());
        assert_eq!(out, "previous");
        assert_eq!(fixture.repository.refs().read_head().unwrap(), None);
    }

    #[rstest]
    #[tokio::test]
    async fn test_conflicting_staging_flags_are_rejected(fixture: Fixture) {
        let error = commit(
            &fixture.repository,
            &fixture.session,
            &args(&["-a", "-A", "-m", "x"]),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            repo_error(&error),
            Some(RepoError::InvalidArgument(_))
        ));
    }
}
