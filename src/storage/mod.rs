//! Graph store client.
//!
//! Everything that talks to the database goes through [`GraphStore`]. The
//! store is created once per process and passed by reference to the loader
//! and the session; there is no global connection.

pub mod graph;
mod query;
pub mod traits;

pub use graph::{Neo4jStore, ScriptedStore};
pub use query::{CypherQuery, Row, row_str};
pub use traits::GraphStore;

/// Runs `query`, logging a failure and returning no rows in its place.
///
/// The interactive path uses this so one rejected query cannot end the
/// session; callers treat the empty result like any other empty result.
pub fn query_or_report(store: &dyn GraphStore, query: &CypherQuery) -> Vec<Row> {
    match store.execute(query) {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!(error = %e, cypher = query.text(), "Query failed");
            Vec::new()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_or_report_swallows_failure() {
        let store = ScriptedStore::new().fail("Player", "connection reset");
        let rows = query_or_report(&store, &CypherQuery::new("MATCH (p:Player) RETURN p"));
        assert!(rows.is_empty());
    }
}
