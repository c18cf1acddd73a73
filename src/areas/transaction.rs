//! Repository transactions
//!
//! A transaction pins one branch for the duration of a read or a write. It
//! holds the in-process working-set mutex and a file lock on `.rowbit/LOCK`
//! (shared for readers, exclusive for writers), so a reader observes either
//! the state before a commit or the state after it.

use crate::areas::repository::Repository;
use crate::areas::working_set::{WorkingRoots, WorkingSets};
use crate::artifacts::branch::branch_name::{BranchName, SymRefName};
use crate::artifacts::commit::pending::PendingCommit;
use crate::artifacts::commit::policy::{CommitPolicy, EmptyCommitBehavior};
use crate::artifacts::core::errors::RepoError;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use file_guard::{FileGuard, Lock};
use std::fs::File;
use tokio::sync::MutexGuard;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionMode {
    Read,
    Write,
}

pub struct Transaction<'r> {
    repository: &'r Repository,
    working_sets: MutexGuard<'r, WorkingSets>,
    _lock: FileGuard<Box<File>>,
    mode: TransactionMode,
    branch: BranchName,
    expected_head: Option<ObjectId>,
}

impl Repository {
    /// Start a transaction on `branch`, waiting for concurrent writers
    pub async fn begin_transaction(
        &self,
        branch: &BranchName,
        mode: TransactionMode,
    ) -> anyhow::Result<Transaction<'_>> {
        let working_sets = self.working_sets().lock().await;

        let lock_path = self.lock_path();
        let file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("unable to open lock file {}", lock_path.display()))?;
        let lock_kind = match mode {
            TransactionMode::Read => Lock::Shared,
            TransactionMode::Write => Lock::Exclusive,
        };
        let lock = file_guard::lock(Box::new(file), lock_kind, 0, 1)
            .with_context(|| format!("unable to lock {}", lock_path.display()))?;

        let expected_head = self
            .refs()
            .read_branch(branch)
            .with_context(|| format!("failed to read head of branch {branch}"))?;
        tracing::debug!(%branch, ?mode, head = ?expected_head.as_ref().map(ObjectId::to_short_oid), "began transaction");

        Ok(Transaction {
            repository: self,
            working_sets,
            _lock: lock,
            mode,
            branch: branch.clone(),
            expected_head,
        })
    }
}

impl<'r> Transaction<'r> {
    pub fn branch(&self) -> &BranchName {
        &self.branch
    }

    /// Branch tip observed when the transaction began
    pub fn head(&self) -> Option<&ObjectId> {
        self.expected_head.as_ref()
    }

    pub fn working_sets(&self) -> &WorkingSets {
        &self.working_sets
    }

    pub fn get_roots(&self) -> anyhow::Result<WorkingRoots> {
        let database = self.repository.database();
        let head_root = match &self.expected_head {
            Some(head) => database.load_commit(head)?.root_oid().clone(),
            None => database.empty_root()?,
        };

        self.working_sets
            .get_roots(database, &self.branch, head_root)
            .with_context(|| format!("failed to load working set of branch {}", self.branch))
    }

    /// Message of the branch tip, for amending without a new message
    pub fn head_message(&self) -> anyhow::Result<String> {
        let head = self.expected_head.as_ref().ok_or_else(|| {
            RepoError::invalid_argument(format!(
                "cannot amend: branch '{}' has no commits yet",
                self.branch
            ))
        })?;

        Ok(self
            .repository
            .database()
            .load_commit(head)?
            .message()
            .to_string())
    }

    /// Compute the commit `policy` would produce from `roots`.
    ///
    /// Returns `None` when the staged root equals the parent root and the
    /// policy does not allow an empty commit.
    pub fn new_pending_commit(
        &self,
        policy: &CommitPolicy,
        roots: WorkingRoots,
    ) -> anyhow::Result<Option<PendingCommit>> {
        let database = self.repository.database();

        let (parents, parent_root) = if policy.amend {
            let head = self.expected_head.as_ref().ok_or_else(|| {
                RepoError::invalid_argument(format!(
                    "cannot amend: branch '{}' has no commits yet",
                    self.branch
                ))
            })?;
            if !policy.force {
                self.ensure_unpublished(head)?;
            }

            let head_commit = database.load_commit(head)?;
            let parent_root = match head_commit.parent() {
                Some(parent) => database.load_commit(parent)?.root_oid().clone(),
                None => database.empty_root()?,
            };
            (head_commit.parents().to_vec(), parent_root)
        } else {
            (
                self.expected_head.iter().cloned().collect::<Vec<_>>(),
                roots.head.clone(),
            )
        };

        if roots.staged == parent_root {
            match policy.empty_commit_behavior() {
                EmptyCommitBehavior::Allow => {
                    tracing::debug!(branch = %self.branch, "recording an empty commit");
                }
                EmptyCommitBehavior::Skip | EmptyCommitBehavior::Reject => {
                    tracing::debug!(branch = %self.branch, "staged root equals parent root");
                    return Ok(None);
                }
            }
        }

        let message = policy
            .message
            .clone()
            .ok_or(RepoError::MissingCommitMessage)?;

        let mut height = 0;
        for parent in &parents {
            height = height.max(database.load_commit(parent)?.height());
        }

        Ok(Some(PendingCommit {
            branch: self.branch.clone(),
            expected_head: self.expected_head.clone(),
            parents,
            height: height + 1,
            author: Author::new(
                policy.author_name.clone(),
                policy.author_email.clone(),
                policy.date,
            ),
            message,
            roots,
        }))
    }

    /// Store the commit, move the branch from the expected tip to it and
    /// persist the staged snapshot
    pub fn write_commit(&mut self, pending: PendingCommit) -> anyhow::Result<(ObjectId, Commit)> {
        self.ensure_writable()?;
        if pending.branch != self.branch {
            anyhow::bail!(
                "pending commit for branch {} cannot be written on {}",
                pending.branch,
                self.branch
            );
        }

        let (commit, branch, expected_head, roots) = pending.into_commit();
        let database = self.repository.database();
        let oid = database
            .store(&commit)
            .context("failed to store commit object")?;

        let roots = WorkingRoots {
            head: roots.staged.clone(),
            ..roots
        };
        let prepared = self.working_sets.prepare(&branch, &roots)?;

        let reference = SymRefName::for_branch(&branch);
        self.repository
            .refs()
            .compare_and_swap(&reference, expected_head.as_ref(), &oid)
            .with_context(|| format!("failed to move branch {branch} to {oid}"))?;

        if let Err(error) = prepared.apply() {
            self.restore_ref(&reference, expected_head.as_ref(), &oid);
            return Err(error);
        }
        self.expected_head = Some(oid.clone());

        tracing::info!(%branch, commit = %oid, parents = commit.parents().len(), "wrote commit");
        Ok((oid, commit))
    }

    /// Persist new working/staged roots for the branch
    pub fn save_roots(&self, roots: &WorkingRoots) -> anyhow::Result<()> {
        self.ensure_writable()?;
        self.working_sets.persist(&self.branch, roots)
    }

    /// Move `reference` back from `written` after the working set could not be saved
    fn restore_ref(&self, reference: &SymRefName, previous: Option<&ObjectId>, written: &ObjectId) {
        let refs = self.repository.refs();
        let restored = match previous {
            Some(previous) => refs.compare_and_swap(reference, Some(written), previous),
            None => refs.compare_and_delete(reference, written),
        };
        if let Err(error) = restored {
            tracing::error!(%reference, commit = %written, "unable to restore ref: {error:#}");
        }
    }

    fn ensure_writable(&self) -> anyhow::Result<()> {
        if self.mode == TransactionMode::Write {
            Ok(())
        } else {
            anyhow::bail!("transaction on branch {} is read-only", self.branch)
        }
    }

    /// Amending `head` is rejected once the remote-tracking branch contains it
    fn ensure_unpublished(&self, head: &ObjectId) -> anyhow::Result<()> {
        let Some(tracking_ref) = self.repository.upstream_ref(&self.branch)? else {
            return Ok(());
        };
        let Some(upstream) = self.repository.refs().read_ref(&tracking_ref)? else {
            return Ok(());
        };

        let published = upstream == *head
            || self
                .repository
                .best_common_ancestor(head, &upstream, &CancellationToken::new())?
                .as_ref()
                == Some(head);
        if published {
            tracing::warn!(branch = %self.branch, commit = %head, upstream = %tracking_ref, "refusing to amend published commit");
            return Err(RepoError::NonFastForward(head.to_string()).into());
        }

        Ok(())
    }
}
