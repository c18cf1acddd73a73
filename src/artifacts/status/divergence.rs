//! Ahead/behind counts between a branch and its remote-tracking branch
//!
//! The counts are taken relative to the best common ancestor of both heads:
//! `ahead` is the number of commits a topological walk from the local head
//! yields before reaching the ancestor, `behind` the same from the upstream
//! head.

use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::{BranchName, SymRefName};
use crate::artifacts::core::errors::RepoError;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::merge::bca_finder::BCAFinder;
use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Divergence {
    pub ahead: usize,
    pub behind: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DivergenceKind {
    UpToDate,
    Ahead,
    Behind,
    Diverged,
}

impl Divergence {
    pub fn new(ahead: usize, behind: usize) -> Self {
        Divergence { ahead, behind }
    }

    pub fn kind(&self) -> DivergenceKind {
        match (self.ahead, self.behind) {
            (0, 0) => DivergenceKind::UpToDate,
            (_, 0) => DivergenceKind::Ahead,
            (0, _) => DivergenceKind::Behind,
            _ => DivergenceKind::Diverged,
        }
    }

    /// The same divergence seen from the other side
    pub fn swapped(&self) -> Self {
        Divergence::new(self.behind, self.ahead)
    }
}

/// Count the commits a topological walk from `start` yields before `ancestor`
pub fn count_commits_in_range<F>(
    commit_loader: F,
    start: &ObjectId,
    ancestor: &ObjectId,
) -> anyhow::Result<usize>
where
    F: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    let mut count = 0;
    for commit in RevList::new(commit_loader, [start.clone()]) {
        if commit?.oid == *ancestor {
            return Ok(count);
        }
        count += 1;
    }

    Err(RepoError::AncestryInconsistency {
        start: start.to_string(),
        ancestor: ancestor.to_string(),
    }
    .into())
}

/// Ahead/behind of `local` relative to `upstream`
pub fn ahead_behind<F>(
    commit_loader: F,
    local: &ObjectId,
    upstream: &ObjectId,
) -> anyhow::Result<Divergence>
where
    F: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    if local == upstream {
        return Ok(Divergence::default());
    }

    let ancestor = BCAFinder::new(&commit_loader)
        .find_best_common_ancestor(local, upstream)?
        .ok_or_else(|| RepoError::NoCommonAncestor(local.to_string(), upstream.to_string()))?;

    let behind = count_commits_in_range(&commit_loader, upstream, &ancestor)?;
    let ahead = count_commits_in_range(&commit_loader, local, &ancestor)?;
    tracing::debug!(%local, %upstream, %ancestor, ahead, behind, "computed divergence");

    Ok(Divergence::new(ahead, behind))
}

impl Repository {
    /// Remote-tracking ref of the branch's configured upstream, if any
    pub fn upstream_ref(&self, branch: &BranchName) -> anyhow::Result<Option<SymRefName>> {
        let config = self.config()?;
        let Some(upstream) = config.upstream(branch) else {
            return Ok(None);
        };
        let Some(remote) = config.remote(&upstream.remote)? else {
            tracing::warn!(%branch, remote = %upstream.remote, "upstream remote is not configured");
            return Ok(None);
        };

        remote.tracking_ref(&upstream.merge).map(Some)
    }

    pub fn best_common_ancestor(
        &self,
        first: &ObjectId,
        second: &ObjectId,
        cancel: &CancellationToken,
    ) -> anyhow::Result<Option<ObjectId>> {
        BCAFinder::new(self.commit_loader(cancel)).find_best_common_ancestor(first, second)
    }

    /// Divergence of `local_head` from the upstream of `branch`.
    ///
    /// `None` when the branch has no usable upstream: nothing configured, an
    /// unknown remote, or a tracking ref that has not been fetched yet.
    pub fn compute_ahead_behind(
        &self,
        local_head: &ObjectId,
        branch: &BranchName,
        cancel: &CancellationToken,
    ) -> anyhow::Result<Option<Divergence>> {
        let Some(tracking_ref) = self.upstream_ref(branch)? else {
            return Ok(None);
        };
        let Some(upstream_head) = self.refs().read_ref(&tracking_ref)? else {
            tracing::warn!(%branch, upstream = %tracking_ref, "remote-tracking ref does not exist");
            return Ok(None);
        };

        ahead_behind(self.commit_loader(cancel), local_head, &upstream_head).map(Some)
    }
}
