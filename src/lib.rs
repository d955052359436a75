//! # Hoopgraph
//!
//! Loads basketball players, teams and their history into a Neo4j graph and
//! answers questions about them from an interactive prompt.
//!
//! ## Components
//!
//! - [`storage`]: graph store client ([`GraphStore`], bolt-backed
//!   [`Neo4jStore`], canned [`ScriptedStore`] for tests)
//! - [`loader`]: CSV ingestion into `Player`/`Team` nodes and
//!   `Played_For`/`Used_To_Be` edges
//! - [`intent`]: keyword and name based classification of user input
//! - [`services`]: parameterized Cypher templates per intent
//! - [`rendering`]: fixed-column tables for result sets
//! - [`repl`]: the prompt/response loop tying it together
//!
//! ## Example
//!
//! ```rust,ignore
//! use hoopgraph::{HoopgraphConfig, Neo4jStore, Session};
//!
//! let config = HoopgraphConfig::load_default();
//! let store = Neo4jStore::connect(&config.store)?;
//! let session = Session::open(&store, &config);
//! let answer = session.answer("who has the most points");
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

pub mod config;
pub mod intent;
pub mod io;
pub mod loader;
pub mod models;
pub mod observability;
pub mod rendering;
pub mod repl;
pub mod services;
pub mod storage;

pub use config::{FeatureFlags, HoopgraphConfig, LoaderConfig, StoreConfig};
pub use intent::{Extremum, Intent, IntentResolver, NameCatalog, Stat};
pub use loader::{LoadReport, Loader};
pub use rendering::{Block, Table};
pub use repl::{Reply, Session};
pub use services::QueryService;
pub use storage::{CypherQuery, GraphStore, Neo4jStore, Row, ScriptedStore};

/// Error type for hoopgraph operations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Malformed configuration values, unusable CSV content |
/// | `OperationFailed` | I/O errors, CSV parse errors, Cypher execution errors |
/// | `StoreUnavailable` | A query is issued after the connection could not be established |
/// | `MissingColumn` | A CSV input lacks one of its required headers |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    ///
    /// Raised when:
    /// - A configuration value cannot be interpreted (e.g. unknown log format)
    /// - A batch size of zero is configured
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    ///
    /// Raised when:
    /// - A CSV or configuration file cannot be read
    /// - The graph store rejects or fails to run a query
    /// - A result row cannot be decoded
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// The graph store connection was never established.
    ///
    /// Raised by every query on a [`Neo4jStore`] whose initial connection
    /// attempt failed. The reason recorded at connect time is carried along.
    #[error("graph store unavailable: {0}")]
    StoreUnavailable(String),

    /// A required CSV column is absent.
    ///
    /// Header names are matched exactly, including case.
    #[error("{file} is missing required column '{column}'")]
    MissingColumn {
        /// File name of the CSV source.
        file: String,
        /// The absent header.
        column: String,
    },
}

impl Error {
    /// Builds an [`Error::OperationFailed`] from an operation name and any
    /// displayable cause.
    pub fn operation(operation: &str, cause: impl std::fmt::Display) -> Self {
        Self::OperationFailed {
            operation: operation.to_string(),
            cause: cause.to_string(),
        }
    }
}

/// Result type alias for hoopgraph operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidInput("batch_size must be positive".to_string());
        assert_eq!(err.to_string(), "invalid input: batch_size must be positive");

        let err = Error::operation("read_csv", "unexpected EOF");
        assert_eq!(err.to_string(), "operation 'read_csv' failed: unexpected EOF");

        let err = Error::MissingColumn {
            file: "Team_History.csv".to_string(),
            column: "NICKNAME".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Team_History.csv is missing required column 'NICKNAME'"
        );

        let err = Error::StoreUnavailable("connection refused".to_string());
        assert_eq!(
            err.to_string(),
            "graph store unavailable: connection refused"
        );
    }
}
