//! Per-branch working sets
//!
//! Each branch has a working set file at `.rowbit/working/<branch>`:
//!
//! ```text
//! working <root-id>
//! staged <root-id>
//! ```
//!
//! A branch without a working set file is clean: both roots equal the root of
//! its head commit (the empty root for an unborn branch). Files are replaced
//! through a temp file and a rename, so readers see either the old or the new
//! pair of roots.

use crate::areas::database::Database;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::root_tree::RootTree;
use anyhow::Context;
use std::io::Write;
use std::path::{Path, PathBuf};

/// The three root snapshots of a branch: uncommitted, staged and committed.
///
/// Staging produces a new value; roots are never edited in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingRoots {
    pub working: ObjectId,
    pub staged: ObjectId,
    pub head: ObjectId,
}

impl WorkingRoots {
    pub fn with_working(self, working: ObjectId) -> Self {
        WorkingRoots { working, ..self }
    }

    pub fn with_staged(self, staged: ObjectId) -> Self {
        WorkingRoots { staged, ..self }
    }
}

#[derive(Debug)]
pub struct WorkingSets {
    path: Box<Path>,
}

impl WorkingSets {
    pub fn new(path: Box<Path>) -> Self {
        WorkingSets { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the roots of a branch whose head commit has root `head_root`
    pub fn get_roots(
        &self,
        database: &Database,
        branch: &BranchName,
        head_root: ObjectId,
    ) -> anyhow::Result<WorkingRoots> {
        let path = self.path.join(branch.as_ref());
        if !path.exists() {
            return Ok(WorkingRoots {
                working: head_root.clone(),
                staged: head_root.clone(),
                head: head_root,
            });
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read working set of branch {branch}"))?;

        let mut working = None;
        let mut staged = None;
        for line in content.lines() {
            match line.split_once(' ') {
                Some(("working", oid)) => working = Some(ObjectId::try_parse(oid.to_string())?),
                Some(("staged", oid)) => staged = Some(ObjectId::try_parse(oid.to_string())?),
                _ => anyhow::bail!("corrupt working set of branch {}: '{}'", branch, line),
            }
        }

        let roots = WorkingRoots {
            working: working
                .with_context(|| format!("working set of branch {branch} has no working root"))?,
            staged: staged
                .with_context(|| format!("working set of branch {branch} has no staged root"))?,
            head: head_root,
        };
        for oid in [&roots.working, &roots.staged] {
            if !database.contains(oid) {
                anyhow::bail!("working set of branch {} points at missing root {}", branch, oid);
            }
        }

        Ok(roots)
    }

    /// staged := working, tracking new, modified and deleted tables
    pub fn stage_all_tables(&self, roots: WorkingRoots) -> WorkingRoots {
        tracing::debug!(root = %roots.working, "staging all tables");
        let working = roots.working.clone();
        roots.with_staged(working)
    }

    /// Refresh the staged tables from the working root: modified tables take
    /// their working version, deleted tables are unstaged. Tables that only
    /// exist in the working root stay untracked.
    pub fn stage_modified_and_deleted_tables(
        &self,
        database: &Database,
        roots: WorkingRoots,
    ) -> anyhow::Result<WorkingRoots> {
        let working = database.load_root(&roots.working)?;
        let mut staged = database.load_root(&roots.staged)?;

        let tracked = staged.tables().keys().cloned().collect::<Vec<_>>();
        for name in tracked {
            staged = match working.table(&name) {
                Some(oid) => staged.with_table(&name, oid.clone())?,
                None => staged.without_table(&name),
            };
        }

        let staged = database.store(&staged)?;
        tracing::debug!(root = %staged, "staged modified and deleted tables");
        Ok(roots.with_staged(staged))
    }

    /// Stage the working version of the named tables (removing the ones the
    /// working root no longer has)
    pub fn stage_tables(
        &self,
        database: &Database,
        roots: WorkingRoots,
        names: &[String],
    ) -> anyhow::Result<WorkingRoots> {
        let working = database.load_root(&roots.working)?;
        let mut staged = database.load_root(&roots.staged)?;

        for name in names {
            staged = match working.table(name) {
                Some(oid) => staged.with_table(name, oid.clone())?,
                None if staged.contains(name) => staged.without_table(name),
                None => anyhow::bail!("table '{}' did not match any tables", name),
            };
        }

        Ok(roots.with_staged(database.store(&staged)?))
    }

    /// Replace the working root through `edit`
    pub fn edit_working(
        &self,
        database: &Database,
        roots: WorkingRoots,
        edit: impl FnOnce(RootTree) -> anyhow::Result<RootTree>,
    ) -> anyhow::Result<WorkingRoots> {
        let working = edit(database.load_root(&roots.working)?)?;
        Ok(roots.with_working(database.store(&working)?))
    }

    /// Persist the working and staged roots of a branch
    pub fn persist(&self, branch: &BranchName, roots: &WorkingRoots) -> anyhow::Result<()> {
        self.prepare(branch, roots)?.apply()
    }

    /// Write the roots of a branch to a temp file next to its working set.
    ///
    /// Nothing is visible to readers until [`PreparedWorkingSet::apply`].
    pub fn prepare(
        &self,
        branch: &BranchName,
        roots: &WorkingRoots,
    ) -> anyhow::Result<PreparedWorkingSet> {
        let path = self.path.join(branch.as_ref());
        let parent = path
            .parent()
            .with_context(|| format!("invalid working set path {}", path.display()))?;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("unable to create {}", parent.display()))?;

        let prepared = PreparedWorkingSet {
            temp_path: parent.join(Database::generate_temp_name()),
            path,
            branch: branch.clone(),
            roots: roots.clone(),
            applied: false,
        };
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&prepared.temp_path)
            .with_context(|| format!("unable to open {}", prepared.temp_path.display()))?;
        write!(file, "working {}\nstaged {}\n", roots.working, roots.staged)?;
        file.sync_all()?;

        Ok(prepared)
    }
}

/// A working set written to a temp file but not yet moved into place.
///
/// Dropping it without applying removes the temp file.
#[derive(Debug)]
#[must_use]
pub struct PreparedWorkingSet {
    temp_path: PathBuf,
    path: PathBuf,
    branch: BranchName,
    roots: WorkingRoots,
    applied: bool,
}

impl PreparedWorkingSet {
    pub fn apply(mut self) -> anyhow::Result<()> {
        std::fs::rename(&self.temp_path, &self.path)
            .with_context(|| format!("unable to write working set of branch {}", self.branch))?;
        self.applied = true;
        tracing::debug!(branch = %self.branch, working = %self.roots.working, staged = %self.roots.staged, "persisted working set");

        Ok(())
    }
}

impl Drop for PreparedWorkingSet {
    fn drop(&mut self) {
        if !self.applied {
            let _ = std::fs::remove_file(&self.temp_path);
        }
    }
}
