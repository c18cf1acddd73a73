//! References (branches, remote-tracking branches, HEAD)
//!
//! References are human-readable names pointing to commits:
//! - Direct: containing a commit id
//! - Symbolic: pointing to another reference (e.g., HEAD -> refs/heads/main)
//!
//! ## Reference Types
//!
//! - HEAD: the currently checked-out branch
//! - Branches: refs/heads/* pointing to branch tip commits
//! - Remote-tracking branches: refs/remotes/<remote>/* recording the last
//!   known tip of a branch on a remote
//!
//! ## File Format
//!
//! References are stored as text files containing either:
//! - A 32-character object id (direct reference)
//! - `ref: <path>` for symbolic references

use crate::artifacts::branch::branch_name::{BranchName, SymRefName};
use crate::artifacts::branch::{HEADS_PREFIX, REMOTES_PREFIX};
use crate::artifacts::core::errors::RepoError;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::{Read, Seek, SeekFrom, Write};
use std::ops::DerefMut;
use std::path::Path;
use walkdir::WalkDir;

/// References manager
///
/// Handles reading and writing references. Writes take an exclusive lock on
/// the reference file.
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the repository directory (typically `.rowbit`)
    path: Box<Path>,
}

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

#[derive(Debug, Clone)]
enum SymRefOrOid {
    SymRef { sym_ref_name: SymRefName },
    Oid(ObjectId),
}

impl SymRefOrOid {
    fn parse(content: &str) -> anyhow::Result<Option<SymRefOrOid>> {
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        let symref_match = regex::Regex::new(SYMREF_REGEX)?.captures(content);
        if let Some(symref_match) = symref_match {
            Ok(Some(SymRefOrOid::SymRef {
                sym_ref_name: SymRefName::new(symref_match[1].to_string()),
            }))
        } else {
            Ok(Some(SymRefOrOid::Oid(ObjectId::try_parse(
                content.to_string(),
            )?)))
        }
    }

    fn read_symref_or_oid(path: &Path) -> anyhow::Result<Option<SymRefOrOid>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read ref file at {:?}", path))?;
        Self::parse(&content)
    }
}

impl Refs {
    /// Get the ref HEAD finally points at, following symbolic refs
    pub fn current_ref(&self, source: Option<SymRefName>) -> anyhow::Result<SymRefName> {
        let source = source.unwrap_or_else(|| SymRefName::new(HEAD_REF_NAME.to_string()));

        let ref_content =
            SymRefOrOid::read_symref_or_oid(self.path.join(source.as_ref_path()).as_path())?;

        match ref_content {
            Some(SymRefOrOid::SymRef { sym_ref_name }) => self.current_ref(Some(sym_ref_name)),
            Some(_) | None => Ok(source),
        }
    }

    /// The checked-out branch; fails on a detached HEAD
    pub fn current_branch(&self) -> anyhow::Result<BranchName> {
        let current_ref = self.current_ref(None)?;

        current_ref
            .local_branch()
            .ok_or_else(|| anyhow::anyhow!("HEAD is detached at {}", current_ref))
    }

    /// Read the object id a ref points to, following symbolic refs
    pub fn read_ref(&self, sym_ref_name: &SymRefName) -> anyhow::Result<Option<ObjectId>> {
        self.read_symref(&self.path.join(sym_ref_name.as_ref_path()))
    }

    pub fn read_branch(&self, branch: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        self.read_ref(&SymRefName::for_branch(branch))
    }

    pub fn read_head(&self) -> anyhow::Result<Option<ObjectId>> {
        self.read_symref(&self.head_path())
    }

    /// Find the ref a short name refers to: `HEAD` as-is, anything else
    /// under `refs/`, `refs/heads/` and `refs/remotes/`, in that order
    pub fn find_ref(&self, name: &str) -> Option<SymRefName> {
        if name == HEAD_REF_NAME {
            return Some(SymRefName::new(HEAD_REF_NAME.to_string()));
        }

        ["refs/", HEADS_PREFIX, REMOTES_PREFIX]
            .iter()
            .map(|prefix| format!("{prefix}{name}"))
            .find(|candidate| self.path.join(candidate).is_file())
            .map(SymRefName::new)
    }

    fn read_symref(&self, path: &Path) -> anyhow::Result<Option<ObjectId>> {
        let ref_content = SymRefOrOid::read_symref_or_oid(path)?;

        match ref_content {
            Some(SymRefOrOid::SymRef { sym_ref_name }) => {
                self.read_symref(self.path.join(sym_ref_name.as_ref_path()).as_path())
            }
            Some(SymRefOrOid::Oid(oid)) => Ok(Some(oid)),
            None => Ok(None),
        }
    }

    /// Point `sym_ref_name` at `new_oid` only if it still points at `expected`
    /// (`None` meaning the ref does not exist yet).
    ///
    /// The read and the write happen under one exclusive lock on the ref file.
    pub fn compare_and_swap(
        &self,
        sym_ref_name: &SymRefName,
        expected: Option<&ObjectId>,
        new_oid: &ObjectId,
    ) -> anyhow::Result<()> {
        let path = self.path.join(sym_ref_name.as_ref_path());
        let conflict = |actual: Option<&ObjectId>| {
            let describe = |oid: Option<&ObjectId>| {
                oid.map(ObjectId::to_string)
                    .unwrap_or_else(|| "(none)".to_string())
            };
            anyhow::Error::from(RepoError::Conflict {
                branch: sym_ref_name.short_name().to_string(),
                expected: describe(expected),
                actual: describe(actual),
            })
        };

        // Only an unborn ref may be created here
        if expected.is_none() {
            std::fs::create_dir_all(path.parent().with_context(|| {
                format!("failed to create parent directories for ref file at {:?}", path)
            })?)?;
        } else if !path.exists() {
            return Err(conflict(None));
        }

        let mut ref_file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(expected.is_none())
            .truncate(false)
            .open(&path)
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;

        let mut content = String::new();
        lock.deref_mut().read_to_string(&mut content)?;
        let actual = match SymRefOrOid::parse(&content)? {
            Some(SymRefOrOid::Oid(oid)) => Some(oid),
            Some(SymRefOrOid::SymRef { sym_ref_name }) => {
                anyhow::bail!("{} is a symbolic ref to {}", path.display(), sym_ref_name)
            }
            None => None,
        };

        if actual.as_ref() != expected {
            return Err(conflict(actual.as_ref()));
        }

        lock.deref_mut().set_len(0)?;
        lock.deref_mut().seek(SeekFrom::Start(0))?;
        lock.deref_mut().write_all(new_oid.as_ref().as_bytes())?;
        tracing::debug!(reference = %sym_ref_name, oid = %new_oid, "updated ref");

        Ok(())
    }

    /// Remove `sym_ref_name` only if it still points at `expected`
    pub fn compare_and_delete(
        &self,
        sym_ref_name: &SymRefName,
        expected: &ObjectId,
    ) -> anyhow::Result<()> {
        let path = self.path.join(sym_ref_name.as_ref_path());
        let mut ref_file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .open(&path)
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;

        let mut content = String::new();
        lock.deref_mut().read_to_string(&mut content)?;
        let actual = match SymRefOrOid::parse(&content)? {
            Some(SymRefOrOid::Oid(oid)) => Some(oid),
            _ => None,
        };
        if actual.as_ref() != Some(expected) {
            return Err(RepoError::Conflict {
                branch: sym_ref_name.short_name().to_string(),
                expected: expected.to_string(),
                actual: actual
                    .map(|oid| oid.to_string())
                    .unwrap_or_else(|| "(none)".to_string()),
            }
            .into());
        }

        std::fs::remove_file(&path)
            .with_context(|| format!("failed to remove ref file at {:?}", path))?;
        tracing::debug!(reference = %sym_ref_name, "deleted ref");

        Ok(())
    }

    /// Unconditionally point a ref at an object
    pub fn update_ref(&self, sym_ref_name: &SymRefName, oid: &ObjectId) -> anyhow::Result<()> {
        let path = self.path.join(sym_ref_name.as_ref_path()).into_boxed_path();
        self.update_ref_file(path, oid.to_string())
    }

    pub fn set_head(&self, branch: &BranchName) -> anyhow::Result<()> {
        self.update_ref_file(self.head_path(), format!("ref: {HEADS_PREFIX}{branch}"))
    }

    pub fn update_ref_file(&self, path: Box<Path>, raw_ref: String) -> anyhow::Result<()> {
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }

    pub fn create_branch(&self, name: &BranchName, source_oid: &ObjectId) -> anyhow::Result<()> {
        let branch_ref = SymRefName::for_branch(name);

        if self.path.join(branch_ref.as_ref_path()).exists() {
            anyhow::bail!("branch {} already exists", name);
        }

        self.update_ref(&branch_ref, source_oid)
    }

    pub fn list_branches(&self) -> anyhow::Result<Vec<SymRefName>> {
        self.list_refs(self.heads_path().as_ref())
    }

    pub fn list_remote_branches(&self) -> anyhow::Result<Vec<SymRefName>> {
        self.list_refs(self.remotes_path().as_ref())
    }

    fn list_refs(&self, path: &Path) -> anyhow::Result<Vec<SymRefName>> {
        let mut refs = WalkDir::new(path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                if entry.path().is_file() {
                    let relative_path = entry.path().strip_prefix(self.path.as_ref()).ok()?;
                    Some(SymRefName::new(
                        relative_path.to_string_lossy().replace('\\', "/"),
                    ))
                } else {
                    None
                }
            })
            .collect::<Vec<_>>();
        refs.sort();

        Ok(refs)
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }

    pub fn remotes_path(&self) -> Box<Path> {
        self.refs_path().join("remotes").into_boxed_path()
    }
}
