//! CSV ingestion into the graph.
//!
//! [`Loader::load_all`] runs three ordered steps, each idempotent:
//!
//! | Step | Source | Effect |
//! |------|--------|--------|
//! | [`Loader::create_players`] | `Player_Attributes.csv` | `Player` nodes keyed by `playerID`, then `name` on all players |
//! | [`Loader::create_teams`] | `Team_History.csv`, `Team_Attributes.csv` | `Team` nodes keyed by (nickname, city, yearFounded), `name`, attributes on active eras |
//! | [`Loader::create_relationships`] | `Player_Bios.csv` | `Played_For` per season, `Used_To_Be` from active to historical eras |
//!
//! Rows are shipped in `UNWIND $rows` batches. Node and edge writes use
//! `MERGE`, so a second load leaves counts unchanged.

mod report;

pub use report::{FileReport, LoadReport};

use crate::config::LoaderConfig;
use crate::io::{CsvRecord, CsvSource};
use crate::models::{PlayerAttributes, PlayerSeason, TeamAttributes, TeamEra};
use crate::storage::{CypherQuery, GraphStore};
use crate::{Error, Result};
use serde_json::Value;
use std::path::Path;
use tracing::instrument;

const SCHEMA: &[&str] = &[
    "CREATE CONSTRAINT player_id IF NOT EXISTS FOR (p:Player) REQUIRE p.playerID IS UNIQUE",
    "CREATE INDEX player_name IF NOT EXISTS FOR (p:Player) ON (p.name)",
    "CREATE INDEX team_name IF NOT EXISTS FOR (t:Team) ON (t.name)",
    "CREATE INDEX team_id IF NOT EXISTS FOR (t:Team) ON (t.teamID)",
];

const UPSERT_PLAYERS: &str = "\
UNWIND $rows AS row
MERGE (p:Player {playerID: row.playerID})
ON CREATE SET p.firstName = row.firstName, p.lastName = row.lastName,
    p.birthDate = row.birthDate, p.school = row.school, p.country = row.country,
    p.height = row.height, p.heightInches = row.heightInches, p.weight = row.weight,
    p.seasonsPlayed = row.seasonsPlayed, p.jerseyNumber = row.jerseyNumber,
    p.position = row.position, p.roundDrafted = row.roundDrafted,
    p.pickDrafted = row.pickDrafted, p.pointsPerGame = row.pointsPerGame,
    p.assistsPerGame = row.assistsPerGame, p.reboundsPerGame = row.reboundsPerGame";

const NAME_PLAYERS: &str = "\
MATCH (p:Player)
SET p.name = trim(coalesce(p.firstName, '') + ' ' + coalesce(p.lastName, ''))";

const UPSERT_TEAMS: &str = "\
UNWIND $rows AS row
MERGE (t:Team {nickname: row.nickname, city: row.city, yearFounded: row.yearFounded})
ON CREATE SET t.teamID = row.teamID, t.yearActiveTill = row.yearActiveTill";

const NAME_TEAMS: &str = "\
MATCH (t:Team)
SET t.name = t.city + ' ' + t.nickname";

const ATTACH_TEAM_ATTRIBUTES: &str = "\
UNWIND $rows AS row
MATCH (t:Team {teamID: row.teamID, yearActiveTill: $activeSeason})
SET t.abbreviation = row.abbreviation, t.arena = row.arena,
    t.arenaCapacity = row.arenaCapacity, t.owner = row.owner, t.gm = row.gm,
    t.coach = row.coach, t.dLeague = row.dLeague";

const UPSERT_PLAYED_FOR: &str = "\
UNWIND $rows AS row
MATCH (p:Player {name: row.player})
MATCH (t:Team {name: row.team})
MERGE (p)-[:Played_For {year: row.season}]->(t)";

const UPSERT_USED_TO_BE: &str = "\
MATCH (active:Team {yearActiveTill: $activeSeason})
MATCH (old:Team {teamID: active.teamID})
WHERE old.name <> active.name
MERGE (active)-[:Used_To_Be]->(old)";

/// Batch loader for the four CSV inputs.
///
/// # Example
///
/// ```rust,ignore
/// use hoopgraph::{Loader, Neo4jStore};
///
/// let store = Neo4jStore::connect(&config.store)?;
/// let report = Loader::new(&store, &config.loader).load_all()?;
/// println!("{report}");
/// ```
pub struct Loader<'a> {
    store: &'a dyn GraphStore,
    config: LoaderConfig,
}

impl<'a> Loader<'a> {
    /// Creates a loader writing to `store`.
    #[must_use]
    pub fn new(store: &'a dyn GraphStore, config: &LoaderConfig) -> Self {
        Self {
            store,
            config: config.clone(),
        }
    }

    /// Overrides the directory the CSV files are read from.
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: impl AsRef<Path>) -> Self {
        self.config.data_dir = data_dir.as_ref().to_path_buf();
        self
    }

    /// Drops and recreates the target database. Destroys all data.
    ///
    /// # Errors
    ///
    /// Returns an error if the store refuses the command.
    #[instrument(skip(self), fields(database = self.store.database()))]
    pub fn recreate_database(&self) -> Result<()> {
        tracing::warn!("Recreating database");
        self.store.recreate_database()
    }

    /// Runs every load step in order.
    ///
    /// # Errors
    ///
    /// Returns an error if a file is missing or malformed at the header
    /// level, or if the store rejects a write. Steps already completed stay
    /// applied.
    #[instrument(skip(self), fields(data_dir = %self.config.data_dir.display()))]
    pub fn load_all(&self) -> Result<LoadReport> {
        if self.config.batch_size == 0 {
            return Err(Error::InvalidInput(
                "loader batch_size must be positive".to_string(),
            ));
        }

        self.ensure_schema()?;

        let mut report = LoadReport::default();
        report.files.push(self.create_players()?);
        report.files.extend(self.create_teams()?);
        report.files.push(self.create_relationships()?);

        tracing::info!(
            rows = report.rows_read(),
            skipped = report.rows_skipped(),
            batches = report.batches(),
            "Load complete"
        );
        Ok(report)
    }

    /// Creates the uniqueness constraint and lookup indexes.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects a schema command.
    pub fn ensure_schema(&self) -> Result<()> {
        for statement in SCHEMA {
            self.store.execute(&CypherQuery::new(*statement))?;
        }
        Ok(())
    }

    /// Upserts `Player` nodes, then derives `name` on every player.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a write fails.
    #[instrument(skip(self))]
    pub fn create_players(&self) -> Result<FileReport> {
        let report = self.upload::<PlayerAttributes>(UPSERT_PLAYERS, &[])?;
        self.store.execute(&CypherQuery::new(NAME_PLAYERS))?;
        Ok(report)
    }

    /// Upserts `Team` nodes, derives `name`, and attaches current attributes
    /// to the active era of each franchise.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or a write fails.
    #[instrument(skip(self))]
    pub fn create_teams(&self) -> Result<[FileReport; 2]> {
        let eras = self.upload::<TeamEra>(UPSERT_TEAMS, &[])?;
        self.store.execute(&CypherQuery::new(NAME_TEAMS))?;

        let active = [("activeSeason", Value::from(self.config.active_season.as_str()))];
        let attributes = self.upload::<TeamAttributes>(ATTACH_TEAM_ATTRIBUTES, &active)?;
        Ok([eras, attributes])
    }

    /// Links players to the teams they played for, and active franchise eras
    /// to their former identities.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a write fails.
    #[instrument(skip(self))]
    pub fn create_relationships(&self) -> Result<FileReport> {
        let report = self.upload::<PlayerSeason>(UPSERT_PLAYED_FOR, &[])?;
        self.store.execute(
            &CypherQuery::new(UPSERT_USED_TO_BE)
                .param("activeSeason", self.config.active_season.as_str()),
        )?;
        Ok(report)
    }

    /// Streams `T`'s file to the store in batches through `cypher`.
    fn upload<T: CsvRecord>(&self, cypher: &str, extra: &[(&str, Value)]) -> Result<FileReport> {
        let mut source = CsvSource::<T>::open(&self.config.data_dir)?;
        let mut batches = 0;

        loop {
            let batch = source.next_batch(self.config.batch_size)?;
            if batch.is_empty() {
                break;
            }

            let rows: Vec<Value> = batch.iter().map(CsvRecord::to_params).collect();
            let mut query = CypherQuery::new(cypher).param("rows", rows);
            for (name, value) in extra {
                query = query.param(name, value.clone());
            }
            self.store.execute(&query)?;

            batches += 1;
            tracing::debug!(file = T::FILE_NAME, batch = batches, size = batch.len(), "Sent batch");
        }

        let report = FileReport::new(T::FILE_NAME, source.stats(), batches);
        tracing::info!(
            file = report.file,
            rows = report.read,
            skipped = report.skipped,
            "Loaded file"
        );
        Ok(report)
    }
}
