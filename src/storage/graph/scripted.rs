//! Scripted graph store for testing.
//!
//! Answers queries from canned responses without a server, and records
//! every query issued so tests can assert on text and parameters.

use crate::storage::{CypherQuery, GraphStore, Row};
use crate::{Error, Result};
use std::sync::Mutex;

#[derive(Debug, Clone)]
enum Response {
    Rows(Vec<Row>),
    Fail(String),
}

#[derive(Debug, Clone)]
struct Rule {
    fragment: String,
    response: Response,
}

/// Graph store that replays canned responses.
///
/// A query is answered by the first rule whose fragment occurs in the query
/// text; unmatched queries return no rows.
///
/// # Example
///
/// ```rust
/// use hoopgraph::{CypherQuery, GraphStore, ScriptedStore};
/// use serde_json::json;
///
/// let store = ScriptedStore::new()
///     .respond("RETURN p.name AS name", vec![json!({ "name": "LeBron James" })]);
/// let rows = store.execute(&CypherQuery::new("MATCH (p:Player) RETURN p.name AS name")).unwrap();
/// assert_eq!(rows.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct ScriptedStore {
    rules: Vec<Rule>,
    issued: Mutex<Vec<CypherQuery>>,
    recreated: Mutex<usize>,
    database: String,
}

impl ScriptedStore {
    /// Creates a store with no rules.
    #[must_use]
    pub fn new() -> Self {
        Self {
            database: "neo4j".to_string(),
            ..Self::default()
        }
    }

    /// Answers queries containing `fragment` with `rows`.
    ///
    /// Each row must be a JSON object; anything else is dropped.
    #[must_use]
    pub fn respond(mut self, fragment: &str, rows: Vec<serde_json::Value>) -> Self {
        let rows = rows
            .into_iter()
            .filter_map(|row| match row {
                serde_json::Value::Object(map) => Some(map),
                _ => None,
            })
            .collect();
        self.rules.push(Rule {
            fragment: fragment.to_string(),
            response: Response::Rows(rows),
        });
        self
    }

    /// Fails queries containing `fragment` with `cause`.
    #[must_use]
    pub fn fail(mut self, fragment: &str, cause: &str) -> Self {
        self.rules.push(Rule {
            fragment: fragment.to_string(),
            response: Response::Fail(cause.to_string()),
        });
        self
    }

    /// Every query issued so far, in order.
    #[must_use]
    pub fn issued(&self) -> Vec<CypherQuery> {
        self.issued.lock().map(|q| q.clone()).unwrap_or_default()
    }

    /// Issued queries whose text contains `fragment`.
    #[must_use]
    pub fn issued_matching(&self, fragment: &str) -> Vec<CypherQuery> {
        self.issued()
            .into_iter()
            .filter(|q| q.text().contains(fragment))
            .collect()
    }

    /// How many times the database was recreated.
    #[must_use]
    pub fn recreate_count(&self) -> usize {
        self.recreated.lock().map(|n| *n).unwrap_or(0)
    }
}

impl GraphStore for ScriptedStore {
    fn execute(&self, query: &CypherQuery) -> Result<Vec<Row>> {
        self.issued
            .lock()
            .map_err(|e| Error::operation("record_query", e))?
            .push(query.clone());

        let Some(rule) = self
            .rules
            .iter()
            .find(|rule| query.text().contains(&rule.fragment))
        else {
            return Ok(Vec::new());
        };

        match &rule.response {
            Response::Rows(rows) => Ok(rows
                .iter()
                .map(|row| project(row, query.columns()))
                .collect()),
            Response::Fail(cause) => Err(Error::operation("execute_query", cause)),
        }
    }

    fn recreate_database(&self) -> Result<()> {
        let mut count = self
            .recreated
            .lock()
            .map_err(|e| Error::operation("recreate_database", e))?;
        *count += 1;
        Ok(())
    }

    fn database(&self) -> &str {
        &self.database
    }
}

/// Shapes a canned row the way the bolt store does: declared columns only,
/// absent ones as `null`. Queries that declare nothing get the row as is.
fn project(row: &Row, columns: &[String]) -> Row {
    if columns.is_empty() {
        return row.clone();
    }
    columns
        .iter()
        .map(|column| {
            (
                column.clone(),
                row.get(column).cloned().unwrap_or(serde_json::Value::Null),
            )
        })
        .collect()
}
