//! Parameterized Cypher queries and result rows.

use serde_json::Value;
use std::collections::BTreeMap;

/// A result row: returned column alias → value.
///
/// Columns a query declares but the store did not return are `null`.
pub type Row = serde_json::Map<String, Value>;

/// A Cypher statement with bound parameters and the aliases it returns.
///
/// Values are never spliced into `text`; they travel as `$name` parameters.
///
/// ```rust
/// use hoopgraph::CypherQuery;
///
/// let query = CypherQuery::new("MATCH (p:Player {name: $name}) RETURN p.playerID AS playerID")
///     .param("name", "LeBron James")
///     .returns(&["playerID"]);
/// assert_eq!(query.columns(), ["playerID"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CypherQuery {
    text: String,
    params: BTreeMap<String, Value>,
    columns: Vec<String>,
}

impl CypherQuery {
    /// Creates a query with no parameters and no returned columns.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            params: BTreeMap::new(),
            columns: Vec::new(),
        }
    }

    /// Binds a parameter.
    #[must_use]
    pub fn param(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.params.insert(name.to_string(), value.into());
        self
    }

    /// Declares the returned column aliases, in display order.
    #[must_use]
    pub fn returns(mut self, columns: &[&str]) -> Self {
        self.columns = columns.iter().map(ToString::to_string).collect();
        self
    }

    /// The statement text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Bound parameters.
    #[must_use]
    pub const fn params(&self) -> &BTreeMap<String, Value> {
        &self.params
    }

    /// A single bound parameter.
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&Value> {
        self.params.get(name)
    }

    /// Returned column aliases.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

/// Reads a column as text, treating `null` and non-strings as absent.
#[must_use]
pub fn row_str<'a>(row: &'a Row, column: &str) -> Option<&'a str> {
    row.get(column).and_then(Value::as_str)
}
