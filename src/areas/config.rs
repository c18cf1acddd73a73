//! Repository configuration (`.rowbit/config`)
//!
//! Git-style INI:
//!
//! ```text
//! [remote "origin"]
//!     url = ../upstream
//!     fetch = refs/heads/*:refs/remotes/origin/*
//! [branch "main"]
//!     remote = origin
//!     merge = refs/heads/main
//!     writers = alice, bob
//! ```
//!
//! `writers` restricts who may commit to a branch; without it anyone may.

use crate::artifacts::branch::branch_name::{BranchName, SymRefName};
use crate::artifacts::branch::HEADS_PREFIX;
use anyhow::Context;
use std::path::Path;

const SECTION_REGEX: &str = r#"^\[\s*([A-Za-z0-9_\-]+)(?:\s+"([^"]*)")?\s*\]$"#;
const ENTRY_REGEX: &str = r"^([A-Za-z0-9_\-]+)\s*=\s*(.*)$";

#[derive(Debug, Clone, PartialEq, Eq)]
struct Section {
    name: String,
    subsection: Option<String>,
    entries: Vec<(String, String)>,
}

impl Section {
    fn matches(&self, name: &str, subsection: Option<&str>) -> bool {
        self.name == name && self.subsection.as_deref() == subsection
    }
}

/// Mapping from remote refs to local remote-tracking refs,
/// e.g. `refs/heads/*:refs/remotes/origin/*`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefSpec {
    force: bool,
    source: String,
    destination: String,
}

impl RefSpec {
    pub fn try_parse(spec: &str) -> anyhow::Result<Self> {
        let (force, spec) = match spec.strip_prefix('+') {
            Some(rest) => (true, rest),
            None => (false, spec),
        };
        let (source, destination) = spec
            .split_once(':')
            .with_context(|| format!("invalid refspec '{spec}': missing ':'"))?;

        if source.matches('*').count() != destination.matches('*').count()
            || source.matches('*').count() > 1
        {
            anyhow::bail!("invalid refspec '{spec}': mismatched wildcards");
        }

        Ok(RefSpec {
            force,
            source: source.to_string(),
            destination: destination.to_string(),
        })
    }

    pub fn default_for_remote(remote: &str) -> Self {
        RefSpec {
            force: false,
            source: format!("{HEADS_PREFIX}*"),
            destination: format!("refs/remotes/{remote}/*"),
        }
    }

    /// Map a remote ref through this spec to its local tracking ref
    pub fn destination_for(&self, remote_ref: &str) -> Option<String> {
        match self.source.split_once('*') {
            Some((prefix, suffix)) => {
                let matched = remote_ref.strip_prefix(prefix)?.strip_suffix(suffix)?;
                Some(self.destination.replacen('*', matched, 1))
            }
            None => (self.source == remote_ref).then(|| self.destination.clone()),
        }
    }
}

impl std::fmt::Display for RefSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let force = if self.force { "+" } else { "" };
        write!(f, "{}{}:{}", force, self.source, self.destination)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remote {
    pub name: String,
    pub url: String,
    pub fetch_specs: Vec<RefSpec>,
}

impl Remote {
    /// Local remote-tracking ref for a ref on this remote
    pub fn tracking_ref(&self, merge_ref: &str) -> anyhow::Result<SymRefName> {
        self.fetch_specs
            .iter()
            .find_map(|spec| spec.destination_for(merge_ref))
            .map(SymRefName::new)
            .with_context(|| {
                format!(
                    "no fetch refspec of remote '{}' maps {}",
                    self.name, merge_ref
                )
            })
    }
}

/// Upstream of a local branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamInfo {
    pub remote: String,
    pub merge: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    sections: Vec<Section>,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid config at {}", path.display()))
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let section_re = regex::Regex::new(SECTION_REGEX)?;
        let entry_re = regex::Regex::new(ENTRY_REGEX)?;
        let mut sections: Vec<Section> = Vec::new();

        for (number, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(caps) = section_re.captures(line) {
                sections.push(Section {
                    name: caps[1].to_lowercase(),
                    subsection: caps.get(2).map(|m| m.as_str().to_string()),
                    entries: Vec::new(),
                });
            } else if let Some(caps) = entry_re.captures(line) {
                let section = sections
                    .last_mut()
                    .with_context(|| format!("line {}: entry outside of a section", number + 1))?;
                section
                    .entries
                    .push((caps[1].to_lowercase(), caps[2].trim().to_string()));
            } else {
                anyhow::bail!("line {}: cannot parse '{}'", number + 1, line);
            }
        }

        Ok(Config { sections })
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        std::fs::write(path, self.render())
            .with_context(|| format!("failed to write config at {}", path.display()))
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for section in &self.sections {
            match &section.subsection {
                Some(sub) => out.push_str(&format!("[{} \"{}\"]\n", section.name, sub)),
                None => out.push_str(&format!("[{}]\n", section.name)),
            }
            for (key, value) in &section.entries {
                out.push_str(&format!("\t{key} = {value}\n"));
            }
        }
        out
    }

    /// Last value of a key, as git does
    pub fn get(&self, name: &str, subsection: Option<&str>, key: &str) -> Option<&str> {
        self.get_all(name, subsection, key).last().copied()
    }

    pub fn get_all(&self, name: &str, subsection: Option<&str>, key: &str) -> Vec<&str> {
        self.sections
            .iter()
            .filter(|section| section.matches(name, subsection))
            .flat_map(|section| section.entries.iter())
            .filter(|(entry_key, _)| entry_key == key)
            .map(|(_, value)| value.as_str())
            .collect()
    }

    /// Replace every value of a key with a single new value
    pub fn set(&mut self, name: &str, subsection: Option<&str>, key: &str, value: &str) {
        for section in self
            .sections
            .iter_mut()
            .filter(|section| section.matches(name, subsection))
        {
            section.entries.retain(|(entry_key, _)| entry_key != key);
        }

        match self
            .sections
            .iter_mut()
            .find(|section| section.matches(name, subsection))
        {
            Some(section) => section.entries.push((key.to_string(), value.to_string())),
            None => self.sections.push(Section {
                name: name.to_string(),
                subsection: subsection.map(str::to_string),
                entries: vec![(key.to_string(), value.to_string())],
            }),
        }
    }

    pub fn remote(&self, name: &str) -> anyhow::Result<Option<Remote>> {
        let Some(url) = self.get("remote", Some(name), "url") else {
            return Ok(None);
        };

        let mut fetch_specs = self
            .get_all("remote", Some(name), "fetch")
            .into_iter()
            .map(RefSpec::try_parse)
            .collect::<anyhow::Result<Vec<_>>>()
            .with_context(|| format!("invalid fetch refspec for remote '{name}'"))?;
        if fetch_specs.is_empty() {
            fetch_specs.push(RefSpec::default_for_remote(name));
        }

        Ok(Some(Remote {
            name: name.to_string(),
            url: url.to_string(),
            fetch_specs,
        }))
    }

    pub fn add_remote(&mut self, name: &str, url: &str) -> anyhow::Result<()> {
        if self.get("remote", Some(name), "url").is_some() {
            anyhow::bail!("remote {} already exists", name);
        }

        self.set("remote", Some(name), "url", url);
        self.set(
            "remote",
            Some(name),
            "fetch",
            &RefSpec::default_for_remote(name).to_string(),
        );
        Ok(())
    }

    pub fn upstream(&self, branch: &BranchName) -> Option<UpstreamInfo> {
        let remote = self.get("branch", Some(branch.as_ref()), "remote")?;
        let merge = self.get("branch", Some(branch.as_ref()), "merge")?;

        Some(UpstreamInfo {
            remote: remote.to_string(),
            merge: merge.to_string(),
        })
    }

    pub fn set_upstream(&mut self, branch: &BranchName, remote: &str, remote_branch: &BranchName) {
        let merge = SymRefName::for_branch(remote_branch);
        self.set("branch", Some(branch.as_ref()), "remote", remote);
        self.set("branch", Some(branch.as_ref()), "merge", merge.as_ref_path());
    }

    /// Users allowed to write to a branch; `None` means unrestricted
    pub fn writers(&self, branch: &BranchName) -> Option<Vec<String>> {
        self.get("branch", Some(branch.as_ref()), "writers")
            .map(|writers| {
                writers
                    .split(',')
                    .map(str::trim)
                    .filter(|writer| !writer.is_empty())
                    .map(str::to_string)
                    .collect()
            })
    }
}
