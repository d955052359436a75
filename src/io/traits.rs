//! Core trait for CSV source records.
//!
//! Each input file has one record type. The record knows its file name,
//! the headers it needs, and how to turn itself into query parameters.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// A typed row of one of the CSV inputs.
///
/// # Parameter Mapping
///
/// | Record | File | Parameter keys |
/// |--------|------|----------------|
/// | `PlayerAttributes` | `Player_Attributes.csv` | `playerID`, `firstName`, ... |
/// | `TeamEra` | `Team_History.csv` | `teamID`, `nickname`, `city`, ... |
/// | `TeamAttributes` | `Team_Attributes.csv` | `teamID`, `arena`, `gm`, ... |
/// | `PlayerSeason` | `Player_Bios.csv` | `player`, `team`, `season` |
pub trait CsvRecord: DeserializeOwned {
    /// File name inside the data directory.
    const FILE_NAME: &'static str;

    /// Headers that must be present, matched exactly.
    const REQUIRED_COLUMNS: &'static [&'static str];

    /// The record as a JSON object, keyed by graph property name.
    ///
    /// Blank cells are `null`.
    fn to_params(&self) -> Value;

    /// The value identifying this record, if it has one.
    ///
    /// Records whose key is blank are skipped by the reader.
    fn key(&self) -> Option<&str> {
        None
    }
}
