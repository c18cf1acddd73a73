use crate::artifacts::branch::{HEADS_PREFIX, INVALID_BRANCH_NAME_REGEX, REMOTES_PREFIX};
use anyhow::Context;

/// Full path of a ref relative to the repository directory,
/// e.g. `HEAD`, `refs/heads/main` or `refs/remotes/origin/main`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct SymRefName(String);

impl SymRefName {
    pub fn new(path: String) -> Self {
        SymRefName(path)
    }

    pub fn for_branch(branch: &BranchName) -> Self {
        SymRefName(format!("{HEADS_PREFIX}{branch}"))
    }

    pub fn for_remote_branch(remote: &str, branch: &BranchName) -> Self {
        SymRefName(format!("{REMOTES_PREFIX}{remote}/{branch}"))
    }

    pub fn is_detached_head(&self) -> bool {
        self.0.starts_with("HEAD")
    }

    pub fn as_ref_path(&self) -> &str {
        &self.0
    }

    /// The local branch this ref names, if it is a `refs/heads/` ref
    pub fn local_branch(&self) -> Option<BranchName> {
        self.0
            .strip_prefix(HEADS_PREFIX)
            .and_then(|name| BranchName::try_parse(name.to_string()).ok())
    }

    /// Short display form: `main` for local branches, `origin/main` for
    /// remote-tracking refs, the full path otherwise
    pub fn short_name(&self) -> &str {
        self.0
            .strip_prefix(HEADS_PREFIX)
            .or_else(|| self.0.strip_prefix(REMOTES_PREFIX))
            .unwrap_or(&self.0)
    }
}

impl std::fmt::Display for SymRefName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: String) -> anyhow::Result<Self> {
        if name.is_empty() {
            anyhow::bail!("branch name cannot be empty");
        }

        let re = regex::Regex::new(INVALID_BRANCH_NAME_REGEX)
            .with_context(|| format!("invalid branch name regex: {INVALID_BRANCH_NAME_REGEX}"))?;

        if re.is_match(&name) {
            anyhow::bail!("invalid branch name: {}", name);
        } else {
            Ok(Self(name))
        }
    }

    pub fn try_parse_sym_ref_name(sym_ref_name: &SymRefName) -> anyhow::Result<Self> {
        if !sym_ref_name.0.starts_with(HEADS_PREFIX) && !sym_ref_name.0.starts_with("HEAD") {
            anyhow::bail!(
                "symbolic ref name must start with '{}' or 'HEAD', got '{}'",
                HEADS_PREFIX,
                sym_ref_name.0
            );
        }

        let sym_ref_name = sym_ref_name.0.trim_start_matches(HEADS_PREFIX);
        Self::try_parse(sym_ref_name.to_string())
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
