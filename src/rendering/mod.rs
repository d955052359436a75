//! Result presentation.
//!
//! Query results become [`Table`]s with human-readable column labels;
//! anything that is not a table is a plain notice. A reply is a sequence of
//! [`Block`]s rendered one after another.

mod table;

pub use table::{Table, format_cell};

use std::fmt;

/// One unit of output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// A result table.
    Table(Table),
    /// An explanatory line, e.g. for an empty result.
    Notice(String),
}

impl Block {
    /// Creates a notice.
    pub fn notice(text: impl Into<String>) -> Self {
        Self::Notice(text.into())
    }

    /// The table, if this block is one.
    #[must_use]
    pub const fn as_table(&self) -> Option<&Table> {
        match self {
            Self::Table(table) => Some(table),
            Self::Notice(_) => None,
        }
    }

    /// The notice text, if this block is one.
    #[must_use]
    pub fn as_notice(&self) -> Option<&str> {
        match self {
            Self::Notice(text) => Some(text),
            Self::Table(_) => None,
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table(table) => table.fmt(f),
            Self::Notice(text) => f.write_str(text),
        }
    }
}

impl From<Table> for Block {
    fn from(table: Table) -> Self {
        Self::Table(table)
    }
}
