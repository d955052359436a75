//! CSV source reader.
//!
//! Validates headers up front, then yields typed records in batches.
//! Rows that fail to deserialize are skipped and counted rather than
//! aborting the whole file.

use crate::io::traits::CsvRecord;
use crate::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::marker::PhantomData;
use std::path::Path;

/// Counters for one CSV file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CsvStats {
    /// Records successfully read.
    pub read: usize,
    /// Records skipped as malformed or keyless.
    pub skipped: usize,
}

/// Typed reader over one CSV input.
pub struct CsvSource<T: CsvRecord, R: Read = File> {
    reader: csv::Reader<R>,
    headers: csv::StringRecord,
    stats: CsvStats,
    _record: PhantomData<T>,
}

impl<T: CsvRecord> CsvSource<T, File> {
    /// Opens `T::FILE_NAME` inside `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or lacks a required
    /// column.
    pub fn open(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(T::FILE_NAME);
        let file = File::open(&path).map_err(|e| {
            Error::operation("open_csv", format!("{}: {e}", path.display()))
        })?;
        Self::from_reader(file)
    }
}

impl<T: CsvRecord, R: Read> CsvSource<T, R> {
    /// Wraps an already-open reader.
    ///
    /// # Errors
    ///
    /// Returns an error if the header row cannot be read or lacks a required
    /// column.
    pub fn from_reader(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| Error::operation("read_csv_headers", e))?
            .clone();
        check_headers(T::FILE_NAME, &headers, T::REQUIRED_COLUMNS)?;

        Ok(Self {
            reader: csv_reader,
            headers,
            stats: CsvStats::default(),
            _record: PhantomData,
        })
    }

    /// Reads up to `size` records.
    ///
    /// An empty batch means the file is exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error only when the underlying reader fails; malformed
    /// rows are skipped.
    pub fn next_batch(&mut self, size: usize) -> Result<Vec<T>> {
        let mut batch = Vec::with_capacity(size.min(1024));
        let mut record = csv::StringRecord::new();

        while batch.len() < size {
            let has_record = self
                .reader
                .read_record(&mut record)
                .map_err(|e| Error::operation("read_csv", e))?;
            if !has_record {
                break;
            }

            let line = record.position().map_or(0, csv::Position::line);
            match record.deserialize::<T>(Some(&self.headers)) {
                Ok(row) if row.key().is_some_and(str::is_empty) => {
                    tracing::warn!(file = T::FILE_NAME, line, "Skipping row with blank key");
                    self.stats.skipped += 1;
                },
                Ok(row) => {
                    self.stats.read += 1;
                    batch.push(row);
                },
                Err(e) => {
                    tracing::warn!(file = T::FILE_NAME, line, error = %e, "Skipping malformed row");
                    self.stats.skipped += 1;
                },
            }
        }

        Ok(batch)
    }

    /// Counters so far.
    #[must_use]
    pub const fn stats(&self) -> CsvStats {
        self.stats
    }
}

/// Verifies that every required header is present.
fn check_headers(file: &str, headers: &csv::StringRecord, required: &[&str]) -> Result<()> {
    for column in required {
        if !headers.iter().any(|h| h == *column) {
            return Err(Error::MissingColumn {
                file: file.to_string(),
                column: (*column).to_string(),
            });
        }
    }
    Ok(())
}
