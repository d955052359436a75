//! Bolt-backed graph store.
//!
//! `neo4rs` is async; this store owns a current-thread Tokio runtime and
//! blocks on it for each call, so the rest of the crate stays synchronous.
//! No tasks are spawned.

use crate::config::StoreConfig;
use crate::storage::{CypherQuery, GraphStore, Row};
use crate::{Error, Result};
use neo4rs::{BoltList, BoltMap, BoltNull, BoltString, BoltType, ConfigBuilder, Graph};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::time::{Duration, Instant};

/// Rows pulled per round trip.
const FETCH_SIZE: usize = 500;

/// Graph store backed by a Neo4j server.
///
/// Construct once per process with [`Neo4jStore::connect`] and release with
/// [`Neo4jStore::close`].
pub struct Neo4jStore {
    runtime: tokio::runtime::Runtime,
    /// The pool, or the reason it could not be opened.
    graph: std::result::Result<Graph, String>,
    uri: String,
    user: String,
    password: SecretString,
    database: String,
}

impl std::fmt::Debug for Neo4jStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Neo4jStore")
            .field("uri", &self.uri)
            .field("user", &self.user)
            .field("database", &self.database)
            .field("connected", &self.is_connected())
            .finish_non_exhaustive()
    }
}

impl Neo4jStore {
    /// Opens the connection pool and pings the server.
    ///
    /// A connection failure is logged and remembered rather than returned:
    /// the store is still constructed, and every later call fails with
    /// [`Error::StoreUnavailable`].
    ///
    /// # Errors
    ///
    /// Returns an error only if the internal runtime cannot be built.
    pub fn connect(config: &StoreConfig) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::operation("build_runtime", e))?;

        let password = SecretString::from(config.password.expose_secret().to_owned());
        let graph = runtime
            .block_on(open_graph(
                &config.uri,
                &config.user,
                &password,
                &config.database,
            ))
            .map_err(|e| {
                tracing::error!(uri = %config.uri, error = %e, "Failed to connect to graph store");
                e.to_string()
            });

        if graph.is_ok() {
            tracing::info!(uri = %config.uri, database = %config.database, "Connected to graph store");
        }

        Ok(Self {
            runtime,
            graph,
            uri: config.uri.clone(),
            user: config.user.clone(),
            password,
            database: config.database.clone(),
        })
    }

    /// Whether the initial connection succeeded.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.graph.is_ok()
    }

    /// Closes the pool and shuts the runtime down.
    pub fn close(self) {
        let Self { runtime, graph, .. } = self;
        {
            let _guard = runtime.enter();
            drop(graph);
        }
        runtime.shutdown_timeout(Duration::from_secs(2));
        tracing::debug!("Graph store closed");
    }

    fn graph(&self) -> Result<&Graph> {
        self.graph
            .as_ref()
            .map_err(|reason| Error::StoreUnavailable(reason.clone()))
    }
}

impl GraphStore for Neo4jStore {
    fn execute(&self, query: &CypherQuery) -> Result<Vec<Row>> {
        let graph = self.graph()?;
        tracing::debug!(cypher = query.text(), params = query.params().len(), "Executing query");

        let started = Instant::now();
        metrics::counter!("hoopgraph_queries_total").increment(1);
        let result = self.runtime.block_on(fetch_rows(graph, query));
        metrics::histogram!("hoopgraph_query_duration_seconds")
            .record(started.elapsed().as_secs_f64());

        if result.is_err() {
            metrics::counter!("hoopgraph_query_failures_total").increment(1);
        }
        result
    }

    fn recreate_database(&self) -> Result<()> {
        self.graph()?;
        if !is_valid_database_name(&self.database) {
            return Err(Error::InvalidInput(format!(
                "'{}' is not a valid database name",
                self.database
            )));
        }

        let statement = format!("CREATE OR REPLACE DATABASE `{}` WAIT", self.database);
        self.runtime.block_on(async {
            let admin = open_graph(&self.uri, &self.user, &self.password, "system").await?;
            admin
                .run(neo4rs::query(&statement))
                .await
                .map_err(|e| Error::operation("recreate_database", e))
        })?;

        tracing::info!(database = %self.database, "Recreated database");
        Ok(())
    }

    fn database(&self) -> &str {
        &self.database
    }
}

/// Builds a pool for `database` and forces a handshake.
///
/// `Graph::connect` is lazy, so a `RETURN 1` ping surfaces bad addresses or
/// credentials immediately instead of on the first real query.
async fn open_graph(
    uri: &str,
    user: &str,
    password: &SecretString,
    database: &str,
) -> Result<Graph> {
    let config = ConfigBuilder::default()
        .uri(uri)
        .user(user)
        .password(password.expose_secret())
        .db(database)
        .max_connections(1)
        .fetch_size(FETCH_SIZE)
        .build()
        .map_err(|e| Error::operation("build_store_config", e))?;

    let graph = Graph::connect(config)
        .await
        .map_err(|e| Error::operation("connect_store", e))?;

    graph
        .run(neo4rs::query("RETURN 1"))
        .await
        .map_err(|e| Error::operation("ping_store", e))?;

    Ok(graph)
}

/// Runs one query and drains its stream.
///
/// The stream holds a pooled connection; it is dropped, and the connection
/// returned, when this function exits by either path.
async fn fetch_rows(graph: &Graph, query: &CypherQuery) -> Result<Vec<Row>> {
    let mut stream = graph
        .execute(to_bolt_query(query))
        .await
        .map_err(|e| Error::operation("execute_query", e))?;

    let mut rows = Vec::new();
    while let Some(row) = stream
        .next()
        .await
        .map_err(|e| Error::operation("fetch_row", e))?
    {
        rows.push(decode_row(&row, query.columns()));
    }
    Ok(rows)
}

fn to_bolt_query(query: &CypherQuery) -> neo4rs::Query {
    query
        .params()
        .iter()
        .fold(neo4rs::query(query.text()), |q, (name, value)| {
            q.param(name, to_bolt(value))
        })
}

fn decode_row(row: &neo4rs::Row, columns: &[String]) -> Row {
    columns
        .iter()
        .map(|column| {
            let value = row.get::<Value>(column).unwrap_or(Value::Null);
            (column.clone(), value)
        })
        .collect()
}

/// Converts a JSON parameter into its bolt counterpart.
fn to_bolt(value: &Value) -> BoltType {
    match value {
        Value::Null => BoltType::Null(BoltNull),
        Value::Bool(b) => BoltType::from(*b),
        Value::Number(n) => n.as_i64().map_or_else(
            || BoltType::from(n.as_f64().unwrap_or_default()),
            BoltType::from,
        ),
        Value::String(s) => BoltType::from(s.as_str()),
        Value::Array(items) => {
            BoltType::List(BoltList::from(items.iter().map(to_bolt).collect::<Vec<_>>()))
        },
        Value::Object(map) => {
            let mut bolt = BoltMap::new();
            for (key, item) in map {
                bolt.put(BoltString::from(key.as_str()), to_bolt(item));
            }
            BoltType::Map(bolt)
        },
    }
}

/// Database names accepted by `CREATE DATABASE` without further quoting.
fn is_valid_database_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 63
        && name.starts_with(|c: char| c.is_ascii_alphabetic())
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
}
