use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{BinaryHeap, HashSet};

/// Lazy topological walk over the ancestry of a set of commits.
///
/// Commits are yielded highest first (height, then timestamp, then id), so
/// every commit comes out before all of its ancestors and each commit is
/// yielded once. The walk is finite and forward-only; a loader error is
/// yielded once and ends the walk.
pub struct RevList<F> {
    commit_loader: F,
    queue: BinaryHeap<SlimCommit>,
    seen: HashSet<ObjectId>,
    pending: Vec<ObjectId>,
    failed: bool,
}

impl<F> RevList<F>
where
    F: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    pub fn new(commit_loader: F, starts: impl IntoIterator<Item = ObjectId>) -> Self {
        let mut rev_list = RevList {
            commit_loader,
            queue: BinaryHeap::new(),
            seen: HashSet::new(),
            pending: Vec::new(),
            failed: false,
        };
        for start in starts {
            if rev_list.seen.insert(start.clone()) {
                rev_list.pending.push(start);
            }
        }
        rev_list
    }

    /// Load queued-but-unloaded commits into the heap
    fn fill(&mut self) -> anyhow::Result<()> {
        while let Some(oid) = self.pending.pop() {
            let commit = (self.commit_loader)(&oid)?;
            self.queue.push(commit);
        }
        Ok(())
    }
}

impl<F> Iterator for RevList<F>
where
    F: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    type Item = anyhow::Result<SlimCommit>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        if let Err(error) = self.fill() {
            self.failed = true;
            return Some(Err(error));
        }

        let commit = self.queue.pop()?;
        for parent in &commit.parents {
            if self.seen.insert(parent.clone()) {
                self.pending.push(parent.clone());
            }
        }

        Some(Ok(commit))
    }
}
