use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::{ANCESTOR_REGEX, PARENT_REGEX, REF_ALIASES};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;

/// A revision expression naming a commit.
///
/// Supported forms:
/// - Ref names: `main`, `feature/x`, `HEAD`, `origin/main`, `refs/remotes/origin/main`
/// - Aliases: `@` (resolves to `HEAD`)
/// - Full object ids (32 characters), used only when no ref has that name
/// - Parent notation: `<revision>^`
/// - Ancestor notation: `<revision>~<n>`
///
/// ```ignore
/// let rev = Revision::try_parse("origin/main~2")?;
/// let oid = rev.resolve(&repository)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revision {
    /// A ref name, or an object id resolved once no ref matches
    Ref(BranchName),
    /// The Nth first-parent ancestor of a revision (e.g. HEAD~3)
    Ancestor(Box<Revision>, usize),
    /// The first parent of a revision (e.g. HEAD^)
    Parent(Box<Revision>),
}

impl Revision {
    /// Resolve to a commit id; `None` means the ref exists but is unborn, or
    /// the walk ran past a root commit.
    pub fn resolve(&self, repository: &Repository) -> anyhow::Result<Option<ObjectId>> {
        match self {
            Revision::Ref(name) => {
                let name = name.as_ref();

                if let Some(sym_ref_name) = repository.refs().find_ref(name) {
                    return repository.refs().read_ref(&sym_ref_name);
                }

                if ObjectId::looks_like_oid(name) {
                    let oid = ObjectId::try_parse(name.to_string())?;
                    Self::validate_oid_is_commit(&oid, repository)?;
                    return Ok(Some(oid));
                }

                anyhow::bail!(
                    "ambiguous argument '{}': unknown revision or ref not found",
                    name
                )
            }
            Revision::Parent(base_revision) => {
                Self::resolve_commit_parent(base_revision.resolve(repository)?, repository)
            }
            Revision::Ancestor(base_revision, generations) => {
                let mut oid = base_revision.resolve(repository)?;
                for _ in 0..*generations {
                    oid = Self::resolve_commit_parent(oid, repository)?;
                }

                Ok(oid)
            }
        }
    }

    /// Resolve and require a commit
    pub fn resolve_commit(&self, repository: &Repository) -> anyhow::Result<ObjectId> {
        self.resolve(repository)?
            .ok_or_else(|| anyhow::anyhow!("revision {} does not point to a commit", self))
    }

    fn resolve_commit_parent(
        oid: Option<ObjectId>,
        repository: &Repository,
    ) -> anyhow::Result<Option<ObjectId>> {
        match oid {
            Some(oid) => Ok(repository.database().load_commit(&oid)?.parent().cloned()),
            None => Ok(None),
        }
    }

    fn validate_oid_is_commit(oid: &ObjectId, repository: &Repository) -> anyhow::Result<()> {
        let obj_type = repository
            .database()
            .get_object_type(oid)
            .with_context(|| format!("object {} not found", oid))?;

        if obj_type != ObjectType::Commit {
            anyhow::bail!(
                "object {} is a {}, not a commit",
                oid.to_short_oid(),
                obj_type
            );
        }

        Ok(())
    }

    pub fn try_parse(revision: &str) -> anyhow::Result<Revision> {
        let parent_re = regex::Regex::new(PARENT_REGEX)
            .with_context(|| format!("invalid parent regex: {PARENT_REGEX}"))?;
        let ancestor_re = regex::Regex::new(ANCESTOR_REGEX)
            .with_context(|| format!("invalid ancestor regex: {ANCESTOR_REGEX}"))?;

        if let Some(caps) = parent_re.captures(revision) {
            let base_revision = Self::try_parse(&caps[1])?;
            Ok(Revision::Parent(Box::new(base_revision)))
        } else if let Some(caps) = ancestor_re.captures(revision) {
            let generations: usize = caps[2]
                .parse()
                .with_context(|| format!("failed to parse generations in revision: {revision}"))?;
            let base_revision = Self::try_parse(&caps[1])?;

            Ok(Revision::Ancestor(Box::new(base_revision), generations))
        } else {
            let resolved_name = *REF_ALIASES.get(revision).unwrap_or(&revision);
            let branch_name = BranchName::try_parse(resolved_name.to_string())?;
            Ok(Revision::Ref(branch_name))
        }
    }
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Revision::Ref(name) => write!(f, "{name}"),
            Revision::Parent(base) => write!(f, "{base}^"),
            Revision::Ancestor(base, generations) => write!(f, "{base}~{generations}"),
        }
    }
}
