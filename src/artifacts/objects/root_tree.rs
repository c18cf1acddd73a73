//! Root object
//!
//! A root is the snapshot of every table in a repository state: a sorted
//! mapping from table name to table object id. Working, staged and committed
//! states are all represented by roots.
//!
//! ## Format
//!
//! On disk: `root <size>\0<entries>`, one `<table-oid> <table-name>\n` line per
//! table in name order. The empty root has an empty body.

use crate::artifacts::objects::object::{Object, Packable, Unpackable, with_header};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::BufRead;

const TABLE_NAME_REGEX: &str = r"^[A-Za-z_][A-Za-z0-9_\-]*$";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RootTree {
    tables: BTreeMap<String, ObjectId>,
}

impl RootTree {
    pub fn empty() -> Self {
        RootTree::default()
    }

    pub fn validate_table_name(name: &str) -> anyhow::Result<()> {
        let re = regex::Regex::new(TABLE_NAME_REGEX)
            .with_context(|| format!("invalid table name regex: {TABLE_NAME_REGEX}"))?;

        if re.is_match(name) {
            Ok(())
        } else {
            anyhow::bail!("invalid table name: '{}'", name)
        }
    }

    pub fn tables(&self) -> &BTreeMap<String, ObjectId> {
        &self.tables
    }

    pub fn table(&self, name: &str) -> Option<&ObjectId> {
        self.tables.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn with_table(mut self, name: &str, oid: ObjectId) -> anyhow::Result<Self> {
        Self::validate_table_name(name)?;
        self.tables.insert(name.to_string(), oid);
        Ok(self)
    }

    pub fn without_table(mut self, name: &str) -> Self {
        self.tables.remove(name);
        self
    }
}

impl Packable for RootTree {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let body = self
            .tables
            .iter()
            .map(|(name, oid)| format!("{oid} {name}\n"))
            .collect::<String>();

        with_header(self.object_type(), body.as_bytes())
    }
}

impl Unpackable for RootTree {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let mut tables = BTreeMap::new();

        for line in reader.lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }

            let (oid, name) = line
                .split_once(' ')
                .with_context(|| format!("Invalid root entry: {line}"))?;
            tables.insert(name.to_string(), ObjectId::try_parse(oid.to_string())?);
        }

        Ok(RootTree { tables })
    }
}

impl Object for RootTree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Root
    }

    fn display(&self) -> String {
        self.tables
            .iter()
            .map(|(name, oid)| format!("{oid} {name}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
