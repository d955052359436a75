//! Fixed-column result tables.

use crate::storage::Row;
use crate::{Error, Result};
use serde_json::Value;
use std::fmt;

/// A titled result set with human-readable column labels.
///
/// ```rust
/// use hoopgraph::Table;
///
/// let table = Table::new("Tallest Player", &["Name", "Height"])
///     .with_row(vec!["Tacko Fall".to_string(), "7-6".to_string()]);
/// let text = table.to_string();
/// assert!(text.contains("Tacko Fall"));
/// assert!(text.ends_with("1 row"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    title: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates an empty table.
    #[must_use]
    pub fn new(title: impl Into<String>, headers: &[&str]) -> Self {
        Self {
            title: title.into(),
            headers: headers.iter().map(ToString::to_string).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row of already-formatted cells.
    #[must_use]
    pub fn with_row(mut self, cells: Vec<String>) -> Self {
        self.rows.push(cells);
        self
    }

    /// Builds a table from query rows, renaming `(column, label)` pairs.
    ///
    /// # Errors
    ///
    /// Returns an error if a row lacks one of the columns.
    pub fn from_rows(
        title: impl Into<String>,
        rows: &[Row],
        columns: &[(&str, &str)],
    ) -> Result<Self> {
        let labels: Vec<&str> = columns.iter().map(|(_, label)| *label).collect();
        let mut table = Self::new(title, &labels);

        for row in rows {
            let cells = columns
                .iter()
                .map(|(column, _)| {
                    row.get(*column).map(format_cell).ok_or_else(|| {
                        Error::operation("render_table", format!("missing column '{column}'"))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            table.rows.push(cells);
        }

        Ok(table)
    }

    /// The title line.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Column labels.
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Formatted cells, row by row.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Cells of the column labelled `header`.
    #[must_use]
    pub fn column(&self, header: &str) -> Vec<&str> {
        let Some(index) = self.headers.iter().position(|h| h == header) else {
            return Vec::new();
        };
        self.rows
            .iter()
            .filter_map(|row| row.get(index).map(String::as_str))
            .collect()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();

        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "=".repeat(self.title.chars().count()))?;
        writeln!(f)?;

        let line = |cells: &[String]| -> String {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, &width)| format!("{cell:<width$}"))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        writeln!(f, "{}", line(&self.headers))?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        writeln!(f, "{}", rule.join("  "))?;
        for row in &self.rows {
            writeln!(f, "{}", line(row))?;
        }
        writeln!(f)?;

        match self.rows.len() {
            1 => write!(f, "1 row"),
            n => write!(f, "{n} rows"),
        }
    }
}

/// Formats one result value for display.
///
/// `null` is `-`; whole floats drop the fraction, other floats keep one
/// decimal place; lists are comma-joined.
#[must_use]
pub fn format_cell(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if n.is_f64() {
                n.as_f64().map_or_else(|| n.to_string(), format_float)
            } else {
                n.to_string()
            }
        },
        Value::Array(items) => items.iter().map(format_cell).collect::<Vec<_>>().join(", "),
        Value::Object(_) => value.to_string(),
    }
}

fn format_float(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}
