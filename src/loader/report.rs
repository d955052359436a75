//! Load summaries.

use crate::io::CsvStats;
use std::fmt;

/// Outcome of loading one CSV file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileReport {
    /// Source file name.
    pub file: &'static str,
    /// Records sent to the store.
    pub read: usize,
    /// Records skipped as malformed.
    pub skipped: usize,
    /// Batches issued.
    pub batches: usize,
}

impl FileReport {
    pub(crate) const fn new(file: &'static str, stats: CsvStats, batches: usize) -> Self {
        Self {
            file,
            read: stats.read,
            skipped: stats.skipped,
            batches,
        }
    }
}

/// Outcome of a full load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Per-file outcomes, in load order.
    pub files: Vec<FileReport>,
}

impl LoadReport {
    /// Total records sent across all files.
    #[must_use]
    pub fn rows_read(&self) -> usize {
        self.files.iter().map(|f| f.read).sum()
    }

    /// Total records skipped across all files.
    #[must_use]
    pub fn rows_skipped(&self) -> usize {
        self.files.iter().map(|f| f.skipped).sum()
    }

    /// Total batches sent across all files.
    #[must_use]
    pub fn batches(&self) -> usize {
        self.files.iter().map(|f| f.batches).sum()
    }

    /// The report for `file`, if it was loaded.
    #[must_use]
    pub fn file(&self, file: &str) -> Option<&FileReport> {
        self.files.iter().find(|f| f.file == file)
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.files.iter().map(|r| r.file.len()).max().unwrap_or(4).max(4);
        writeln!(f, "{:<width$}  {:>8}  {:>8}  {:>8}", "File", "Rows", "Skipped", "Batches")?;
        writeln!(f, "{}", "-".repeat(width + 30))?;
        for file in &self.files {
            writeln!(
                f,
                "{:<width$}  {:>8}  {:>8}  {:>8}",
                file.file, file.read, file.skipped, file.batches
            )?;
        }
        write!(
            f,
            "{} rows loaded, {} skipped",
            self.rows_read(),
            self.rows_skipped()
        )
    }
}
