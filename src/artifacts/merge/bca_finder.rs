//! Best common ancestor finder
//!
//! Finds the best common ancestor of two commits in the commit DAG. Used by
//! the divergence calculator to decide where the local and upstream histories
//! split.
//!
//! ## Algorithm Overview
//!
//! ### Phase 1: Find All Common Ancestors
//!
//! A bidirectional walk explores the history of both commits at once:
//! - Commits are popped from a max-heap ordered by height, then timestamp,
//!   then id, so a commit is always processed before any of its ancestors
//! - Each commit is marked as visited from the source side, the target side,
//!   or both
//! - A commit visited from both sides is a common ancestor
//! - Ancestors of a common ancestor are marked STALE to prune the search
//!
//! ### Phase 2: Filter to Best Common Ancestors
//!
//! > A best common ancestor of commits X and Y is any common ancestor of X and Y
//! > that is not an ancestor of any other common ancestor.
//!
//! Every common ancestor that is reachable from another one is dropped. When
//! several best common ancestors remain (criss-cross merges), the highest one
//! in commit order is returned so the result is deterministic.
//!
//! ## Loading Commits
//!
//! The finder is storage-agnostic: it takes a fallible loader returning a
//! [`SlimCommit`] for an id. Loader errors (missing objects, cancellation)
//! abort the search and are returned to the caller unchanged.
//!
//! ```rust,ignore
//! let finder = BCAFinder::new(|oid| database.slim_commit(oid));
//! let ancestor = finder.find_best_common_ancestor(&local, &upstream)?;
//! ```
//!
//! ## Debug Logging
//!
//! Visit states and the redundancy filter are logged with `tracing` at debug
//! level under the `rowbit::merge` target. The `debug_merge` feature turns
//! that target on by default.

use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::fmt;

const LOG_TARGET: &str = "rowbit::merge";

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    struct VisitState: u8 {
        const NONE = 0b00;
        const VISITED_FROM_SOURCE = 0b01;
        const VISITED_FROM_TARGET = 0b10;
        const VISITED_FROM_BOTH = Self::VISITED_FROM_SOURCE.bits() | Self::VISITED_FROM_TARGET.bits();
        const STALE = 0b100;
        const RESULT = 0b1000;
    }
}

impl fmt::Debug for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::new();
        if self.contains(VisitState::VISITED_FROM_SOURCE) {
            flags.push("SOURCE");
        }
        if self.contains(VisitState::VISITED_FROM_TARGET) {
            flags.push("TARGET");
        }
        if self.contains(VisitState::STALE) {
            flags.push("STALE");
        }
        if self.contains(VisitState::RESULT) {
            flags.push("RESULT");
        }
        if flags.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", flags.join("|"))
        }
    }
}

impl fmt::Display for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

fn join_oids<'a>(oids: impl IntoIterator<Item = &'a ObjectId>) -> String {
    oids.into_iter()
        .map(ObjectId::to_short_oid)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone)]
struct CommonAncestorsFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    commit_loader: CommitLoaderFn,
}

impl<CommitLoaderFn> CommonAncestorsFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    fn new(commit_loader: CommitLoaderFn) -> Self {
        Self { commit_loader }
    }

    /// Walk both histories and return the commits marked as common ancestors
    /// that are not ancestors of another common ancestor found on the way.
    fn find_common_ancestors(
        &self,
        source_commit_id: &ObjectId,
        target_commit_ids: HashSet<&ObjectId>,
    ) -> anyhow::Result<HashMap<ObjectId, VisitState>> {
        if target_commit_ids.contains(source_commit_id) {
            return Ok(HashMap::from([(
                source_commit_id.clone(),
                VisitState::RESULT | VisitState::VISITED_FROM_BOTH,
            )]));
        }

        let mut ancestors_states = HashMap::<ObjectId, VisitState>::new();
        let mut priority_queue = BinaryHeap::new();

        let source_commit = (self.commit_loader)(source_commit_id)?;
        ancestors_states.insert(source_commit.oid.clone(), VisitState::VISITED_FROM_SOURCE);
        priority_queue.push(source_commit);

        for &target_commit_id in target_commit_ids.iter() {
            ancestors_states.insert(target_commit_id.clone(), VisitState::VISITED_FROM_TARGET);
            priority_queue.push((self.commit_loader)(target_commit_id)?);
        }

        while let Some(current_commit) = priority_queue.pop() {
            let commit_id = &current_commit.oid;
            let current_state = ancestors_states
                .get(commit_id)
                .copied()
                .unwrap_or(VisitState::NONE);

            tracing::debug!(target: LOG_TARGET, commit = %commit_id, state = %current_state, "processing");

            if current_state.contains(VisitState::STALE) {
                continue;
            }

            let is_common_ancestor = current_state.contains(VisitState::VISITED_FROM_BOTH);
            if is_common_ancestor {
                ancestors_states
                    .entry(commit_id.clone())
                    .and_modify(|state| *state |= VisitState::RESULT);
            }

            for parent_id in &current_commit.parents {
                let parent_state = ancestors_states
                    .get(parent_id)
                    .copied()
                    .unwrap_or(VisitState::NONE);

                let mut new_state = parent_state | current_state;
                if is_common_ancestor {
                    new_state |= VisitState::STALE;
                }

                if new_state != parent_state {
                    ancestors_states.insert(parent_id.clone(), new_state);
                    priority_queue.push((self.commit_loader)(parent_id)?);
                }
            }
        }

        tracing::debug!(
            target: LOG_TARGET,
            states = %ancestors_states
                .iter()
                .map(|(oid, state)| format!("{}: {}", oid.to_short_oid(), state))
                .collect::<Vec<_>>()
                .join(", "),
            "final ancestor states"
        );

        Ok(ancestors_states
            .into_iter()
            .filter(|(_, state)| {
                !state.contains(VisitState::STALE) && state.contains(VisitState::RESULT)
            })
            .collect())
    }
}

/// Best common ancestor finder over a fallible commit loader
pub struct BCAFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    inner: CommonAncestorsFinder<CommitLoaderFn>,
}

impl<CommitLoaderFn> BCAFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self {
            inner: CommonAncestorsFinder::new(commit_loader),
        }
    }

    /// Find the best common ancestor of two commits
    ///
    /// Returns `Ok(None)` when the histories share no commit (e.g. two
    /// unrelated root commits).
    ///
    /// ```rust,ignore
    /// //     A
    /// //    / \
    /// //   B   C
    /// let bca = finder.find_best_common_ancestor(&b, &c)?;
    /// assert_eq!(bca, Some(a));
    /// ```
    pub fn find_best_common_ancestor(
        &self,
        source_commit_id: &ObjectId,
        target_commit_id: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let target_commit_ids = HashSet::from([target_commit_id]);
        let common_ancestors = self
            .inner
            .find_common_ancestors(source_commit_id, target_commit_ids)?
            .into_keys()
            .collect::<HashSet<_>>();

        if common_ancestors.is_empty() {
            tracing::debug!(
                target: LOG_TARGET,
                source = %source_commit_id,
                target_commit = %target_commit_id,
                "no common ancestor"
            );
            return Ok(None);
        }

        tracing::debug!(target: LOG_TARGET, ancestors = %join_oids(&common_ancestors), "found common ancestors");

        let mut redundant_ancestors = HashSet::<ObjectId>::new();
        for commit in &common_ancestors {
            if redundant_ancestors.contains(commit) {
                continue;
            }

            let others = common_ancestors
                .iter()
                .filter(|other| *other != commit && !redundant_ancestors.contains(*other))
                .collect::<HashSet<_>>();
            if others.is_empty() {
                continue;
            }
            let common_states = self.inner.find_common_ancestors(commit, others.clone())?;

            if common_states
                .get(commit)
                .unwrap_or(&VisitState::NONE)
                .contains(VisitState::VISITED_FROM_TARGET)
            {
                redundant_ancestors.insert(commit.clone());
            }

            for other in others {
                if common_states
                    .get(other)
                    .unwrap_or(&VisitState::NONE)
                    .contains(VisitState::VISITED_FROM_SOURCE)
                {
                    redundant_ancestors.insert(other.clone());
                }
            }
        }

        tracing::debug!(target: LOG_TARGET, redundant = %join_oids(&redundant_ancestors), "redundant ancestors");

        let mut best_common_ancestors = Vec::new();
        for oid in common_ancestors
            .into_iter()
            .filter(|commit| !redundant_ancestors.contains(commit))
        {
            best_common_ancestors.push((self.inner.commit_loader)(&oid)?);
        }

        let best = best_common_ancestors.into_iter().max().map(|slim| slim.oid);
        tracing::debug!(
            target: LOG_TARGET,
            best = %best.as_ref().map(ObjectId::to_short_oid).unwrap_or_default(),
            "best common ancestor"
        );

        Ok(best)
    }
}
