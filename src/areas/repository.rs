use crate::areas::config::Config;
use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::areas::working_set::WorkingSets;
use crate::artifacts::core::errors::RepoError;
use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

/// Name of the repository metadata directory
pub const ROWBIT_DIR: &str = ".rowbit";

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    refs: Refs,
    working_sets: Arc<Mutex<WorkingSets>>,
}

impl Repository {
    /// Repository rooted at `path`, which is created if missing
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path);
        if !path.exists() {
            std::fs::create_dir_all(path)
                .with_context(|| format!("unable to create {}", path.display()))?;
        }
        let path = path.canonicalize()?;

        let rowbit_path = path.join(ROWBIT_DIR);
        let database = Database::new(rowbit_path.join("objects").into_boxed_path());
        let refs = Refs::new(rowbit_path.clone().into_boxed_path());
        let working_sets = WorkingSets::new(rowbit_path.join("working").into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            database,
            refs,
            working_sets: Arc::new(Mutex::new(working_sets)),
        })
    }

    /// Open the repository containing `path` (searching parent directories)
    pub fn open(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let start = Path::new(path)
            .canonicalize()
            .with_context(|| format!("unable to resolve {path}"))?;
        let root = start
            .ancestors()
            .find(|candidate| candidate.join(ROWBIT_DIR).is_dir())
            .ok_or(RepoError::NotARepository)?;

        Self::new(&root.to_string_lossy(), writer)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn rowbit_path(&self) -> PathBuf {
        self.path.join(ROWBIT_DIR)
    }

    pub fn config_path(&self) -> PathBuf {
        self.rowbit_path().join("config")
    }

    pub fn lock_path(&self) -> PathBuf {
        self.rowbit_path().join("LOCK")
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn working_sets(&self) -> &Arc<Mutex<WorkingSets>> {
        &self.working_sets
    }

    pub fn config(&self) -> anyhow::Result<Config> {
        Config::load(&self.config_path())
    }

    pub fn save_config(&self, config: &Config) -> anyhow::Result<()> {
        config.save(&self.config_path())
    }

    /// Loader for graph walks that stops with `Cancelled` once `cancel` fires
    pub fn commit_loader<'a>(
        &'a self,
        cancel: &'a CancellationToken,
    ) -> impl Fn(&ObjectId) -> anyhow::Result<SlimCommit> + 'a {
        move |oid| {
            if cancel.is_cancelled() {
                return Err(RepoError::Cancelled.into());
            }
            self.database.slim_commit(oid)
        }
    }
}
