use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::root_tree::RootTree;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableChangeType {
    Added(ObjectId),
    Deleted(ObjectId),
    Modified { old: ObjectId, new: ObjectId },
}

impl TableChangeType {
    pub fn from_entries(old: Option<&ObjectId>, new: Option<&ObjectId>) -> Option<Self> {
        match (old, new) {
            (None, Some(new)) => Some(TableChangeType::Added(new.clone())),
            (Some(old), None) => Some(TableChangeType::Deleted(old.clone())),
            (Some(old), Some(new)) if old != new => Some(TableChangeType::Modified {
                old: old.clone(),
                new: new.clone(),
            }),
            _ => None,
        }
    }

    /// Label used by `status`
    pub fn label(&self) -> &'static str {
        match self {
            TableChangeType::Added(_) => "new table:",
            TableChangeType::Deleted(_) => "deleted:",
            TableChangeType::Modified { .. } => "modified:",
        }
    }
}

/// Table-level changes from `old` to `new`, in table name order
pub fn diff_roots(old: &RootTree, new: &RootTree) -> BTreeMap<String, TableChangeType> {
    old.tables()
        .keys()
        .chain(new.tables().keys())
        .filter_map(|name| {
            TableChangeType::from_entries(old.table(name), new.table(name))
                .map(|change| (name.clone(), change))
        })
        .collect()
}
