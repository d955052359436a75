//! Query services.
//!
//! [`QueryService`] turns a resolved [`Intent`] into the queries it needs,
//! runs them in order and shapes each result set into a [`Block`]. A query
//! that fails or returns nothing yields a notice and the next query still
//! runs.

mod player;
mod team;
pub mod templates;

use crate::intent::{Extremum, Intent, Stat};
use crate::rendering::{Block, Table, format_cell};
use crate::storage::{CypherQuery, GraphStore, Row, query_or_report};

/// Answers questions against a graph store.
pub struct QueryService<'a> {
    store: &'a dyn GraphStore,
}

impl<'a> QueryService<'a> {
    /// Creates a service over `store`.
    #[must_use]
    pub const fn new(store: &'a dyn GraphStore) -> Self {
        Self { store }
    }

    /// Runs the queries behind `intent`.
    ///
    /// Intents that need no data (exit, help, empty, invalid) produce no
    /// blocks.
    #[must_use]
    pub fn answer(&self, intent: &Intent) -> Vec<Block> {
        match intent {
            Intent::Leaderboard(stat) => self.leaderboard(*stat),
            Intent::Extremum(end) => self.extremum(*end),
            Intent::Player { names, .. } => self.player_report(names),
            Intent::Team { names, .. } => self.team_report(names),
            Intent::Empty | Intent::Exit | Intent::Help | Intent::Invalid(_) => Vec::new(),
        }
    }

    /// Top ten players by `stat`.
    #[must_use]
    pub fn leaderboard(&self, stat: Stat) -> Vec<Block> {
        let (_, block) = self.section(
            &templates::leaderboard(stat),
            &format!("{} Leaders", stat.label()),
            &[
                ("name", "Name"),
                ("position", "Position"),
                (stat.property(), stat.label()),
            ],
            &format!("No players have recorded {stat}."),
        );
        vec![block]
    }

    /// The tallest or shortest player.
    #[must_use]
    pub fn extremum(&self, end: Extremum) -> Vec<Block> {
        let title = match end {
            Extremum::Tallest => "Tallest Player",
            Extremum::Shortest => "Shortest Player",
        };
        let (_, block) = self.section(
            &templates::extremum(end),
            title,
            &[("name", "Name"), ("position", "Position"), ("height", "Height")],
            "No player heights are recorded.",
        );
        vec![block]
    }

    /// Runs `query` and shapes its rows as a table, or a notice when there
    /// are none. The raw rows are returned for dependent queries.
    fn section(
        &self,
        query: &CypherQuery,
        title: &str,
        columns: &[(&str, &str)],
        empty: &str,
    ) -> (Vec<Row>, Block) {
        let rows = query_or_report(self.store, query);
        if rows.is_empty() {
            return (rows, Block::notice(empty));
        }
        let block = match Table::from_rows(title, &rows, columns) {
            Ok(table) => Block::Table(table),
            Err(e) => {
                tracing::warn!(error = %e, title, "Could not render result");
                Block::notice(format!("Could not display {title}: {e}"))
            },
        };
        (rows, block)
    }
}

/// Lays one row out vertically as `Field | Value`.
fn record_table(title: &str, row: &Row, columns: &[(&str, &str)]) -> Table {
    columns.iter().fold(
        Table::new(title, &["Field", "Value"]),
        |table, (column, label)| {
            let value = row
                .get(*column)
                .map_or_else(|| "-".to_string(), format_cell);
            table.with_row(vec![(*label).to_string(), value])
        },
    )
}
