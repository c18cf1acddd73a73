use crate::areas::repository::Repository;
use crate::areas::transaction::TransactionMode;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::diff::root_diff::{TableChangeType, diff_roots};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::divergence::Divergence;
use anyhow::Context;
use std::collections::{BTreeMap, BTreeSet};
use tokio_util::sync::CancellationToken;

pub type ChangeSet = BTreeMap<String, TableChangeType>;

/// Remote-tracking branch and how far the local branch is from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingInfo {
    /// Short form, e.g. `origin/main`
    pub upstream: String,
    pub divergence: Divergence,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub branch: BranchName,
    pub head: Option<ObjectId>,
    pub tracking: Option<TrackingInfo>,
    /// head -> staged
    pub staged: ChangeSet,
    /// staged -> working, tracked tables only
    pub unstaged: ChangeSet,
    /// tables only present in the working root
    pub untracked: BTreeSet<String>,
}

impl StatusInfo {
    pub fn is_clean(&self) -> bool {
        self.staged.is_empty() && self.unstaged.is_empty() && self.untracked.is_empty()
    }
}

impl Repository {
    /// Snapshot of the current branch, taken under a read transaction
    pub async fn status_info(&self, cancel: &CancellationToken) -> anyhow::Result<StatusInfo> {
        let branch = self
            .refs()
            .current_branch()
            .context("cannot report status on a detached HEAD")?;

        let transaction = self.begin_transaction(&branch, TransactionMode::Read).await?;
        let roots = transaction.get_roots()?;
        let head = transaction.head().cloned();

        let database = self.database();
        let head_root = database.load_root(&roots.head)?;
        let staged_root = database.load_root(&roots.staged)?;
        let working_root = database.load_root(&roots.working)?;

        let staged = diff_roots(&head_root, &staged_root);
        let mut unstaged = ChangeSet::new();
        let mut untracked = BTreeSet::new();
        for (name, change) in diff_roots(&staged_root, &working_root) {
            match change {
                TableChangeType::Added(_) => {
                    untracked.insert(name);
                }
                change => {
                    unstaged.insert(name, change);
                }
            }
        }

        let tracking = match &head {
            Some(head) => {
                let upstream = self.upstream_ref(&branch)?;
                let divergence = self.compute_ahead_behind(head, &branch, cancel)?;
                upstream.zip(divergence).map(|(upstream, divergence)| TrackingInfo {
                    upstream: upstream.short_name().to_string(),
                    divergence,
                })
            }
            None => None,
        };

        Ok(StatusInfo {
            branch,
            head,
            tracking,
            staged,
            unstaged,
            untracked,
        })
    }
}
