//! CSV input subsystem.
//!
//! The loader reads four CSV files. Each maps to a record type implementing
//! [`CsvRecord`]; [`CsvSource`] checks the header row against the record's
//! required columns and then hands out typed batches.
//!
//! # Example
//!
//! ```rust,ignore
//! use hoopgraph::io::CsvSource;
//! use hoopgraph::models::TeamEra;
//!
//! let mut source = CsvSource::<TeamEra>::open(Path::new("data"))?;
//! loop {
//!     let batch = source.next_batch(500)?;
//!     if batch.is_empty() {
//!         break;
//!     }
//!     // ...
//! }
//! ```

mod csv;
pub mod traits;

pub use self::csv::{CsvSource, CsvStats};
pub use traits::CsvRecord;
