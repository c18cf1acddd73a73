//! Table object
//!
//! A table is an ordered list of column names plus rows of string cells.
//!
//! ## Format
//!
//! On disk: `table <size>\0<body>` where the body is
//! ```text
//! u32 column-count, (u32 len, bytes)*   column names
//! u32 row-count,    (u32 len, bytes)*   cells, row-major
//! ```
//! All integers are big-endian.

use crate::artifacts::objects::object::{Object, Packable, Unpackable, with_header};
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use std::io::{BufRead, Read};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> anyhow::Result<Self> {
        if columns.is_empty() {
            anyhow::bail!("a table needs at least one column");
        }
        if let Some(index) = rows.iter().position(|row| row.len() != columns.len()) {
            anyhow::bail!(
                "row {} has {} cells, expected {}",
                index + 1,
                rows[index].len(),
                columns.len()
            );
        }

        Ok(Table { columns, rows })
    }

    /// Parse comma separated text: the first non-blank line holds the column
    /// names, every following non-blank line is a row.
    pub fn from_csv(content: &str) -> anyhow::Result<Self> {
        let mut lines = content.lines().filter(|line| !line.trim().is_empty());
        let header = lines.next().context("table file has no header line")?;
        let split = |line: &str| {
            line.split(',')
                .map(|cell| cell.trim().to_string())
                .collect::<Vec<_>>()
        };

        let columns = split(header);
        let rows = lines.map(split).collect::<Vec<_>>();

        Table::new(columns, rows)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    fn write_string(buffer: &mut Vec<u8>, value: &str) -> anyhow::Result<()> {
        buffer.write_u32::<BigEndian>(u32::try_from(value.len())?)?;
        buffer.extend_from_slice(value.as_bytes());
        Ok(())
    }

    fn read_string(reader: &mut impl Read) -> anyhow::Result<String> {
        let len = reader.read_u32::<BigEndian>()? as usize;
        let mut bytes = vec![0; len];
        reader.read_exact(&mut bytes)?;
        Ok(String::from_utf8(bytes)?)
    }
}

impl Packable for Table {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut body = Vec::new();

        body.write_u32::<BigEndian>(u32::try_from(self.columns.len())?)?;
        for column in &self.columns {
            Self::write_string(&mut body, column)?;
        }

        body.write_u32::<BigEndian>(u32::try_from(self.rows.len())?)?;
        for cell in self.rows.iter().flatten() {
            Self::write_string(&mut body, cell)?;
        }

        with_header(self.object_type(), &body)
    }
}

impl Unpackable for Table {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let column_count = reader
            .read_u32::<BigEndian>()
            .context("Invalid table object: missing column count")?;
        let columns = (0..column_count)
            .map(|_| Self::read_string(&mut reader))
            .collect::<anyhow::Result<Vec<_>>>()?;

        let row_count = reader
            .read_u32::<BigEndian>()
            .context("Invalid table object: missing row count")?;
        let rows = (0..row_count)
            .map(|_| {
                columns
                    .iter()
                    .map(|_| Self::read_string(&mut reader))
                    .collect::<anyhow::Result<Vec<_>>>()
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Table::new(columns, rows)
    }
}

impl Object for Table {
    fn object_type(&self) -> ObjectType {
        ObjectType::Table
    }

    fn display(&self) -> String {
        std::iter::once(self.columns.join(","))
            .chain(self.rows.iter().map(|row| row.join(",")))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
