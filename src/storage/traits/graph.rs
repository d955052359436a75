//! Graph store trait.
//!
//! # Available Implementations
//!
//! | Store | Use Case |
//! |-------|----------|
//! | `Neo4jStore` | Default; bolt connection to a Neo4j server |
//! | `ScriptedStore` | Testing; canned rows keyed by query fragment |
//!
//! # Error Modes
//!
//! `execute` returns `Err` for any failure. Callers on the interactive path
//! go through [`crate::storage::query_or_report`], which logs the failure and
//! yields no rows so a single bad query never ends the session.

use crate::Result;
use crate::storage::{CypherQuery, Row};

/// Trait for graph stores.
///
/// # Implementor Notes
///
/// - Any per-call session or stream must be released before `execute`
///   returns, on success and on failure alike
/// - Rows carry exactly the columns the query declares
pub trait GraphStore: Send + Sync {
    /// Runs a query against the configured database and collects all rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable or rejects the query.
    fn execute(&self, query: &CypherQuery) -> Result<Vec<Row>>;

    /// Drops and recreates the configured database.
    ///
    /// Destructive; only the loader calls it, and only when asked to.
    ///
    /// # Errors
    ///
    /// Returns an error if the administrative statement fails.
    fn recreate_database(&self) -> Result<()>;

    /// Name of the database queries run against.
    fn database(&self) -> &str;
}
