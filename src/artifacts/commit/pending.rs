use crate::areas::working_set::WorkingRoots;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::object_id::ObjectId;

/// A commit that has been computed but not written yet
///
/// Produced by `Transaction::new_pending_commit` and consumed exactly once by
/// `Transaction::write_commit`.
#[derive(Debug, PartialEq, Eq)]
pub struct PendingCommit {
    pub(crate) branch: BranchName,
    /// Branch tip the commit was computed against
    pub(crate) expected_head: Option<ObjectId>,
    pub(crate) parents: Vec<ObjectId>,
    pub(crate) height: u64,
    pub(crate) author: Author,
    pub(crate) message: String,
    /// Roots after staging; `roots.staged` becomes the commit root
    pub(crate) roots: WorkingRoots,
}

impl PendingCommit {
    pub fn branch(&self) -> &BranchName {
        &self.branch
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn root(&self) -> &ObjectId {
        &self.roots.staged
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn into_commit(self) -> (Commit, BranchName, Option<ObjectId>, WorkingRoots) {
        let commit = Commit::new(
            self.parents,
            self.roots.staged.clone(),
            self.height,
            self.author,
            self.message,
        );
        (commit, self.branch, self.expected_head, self.roots)
    }
}
