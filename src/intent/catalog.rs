//! Known player and team names.
//!
//! Fetched once when a session opens. Lookups are case-insensitive and
//! return every stored spelling that shares the lower-cased key.

use crate::Result;
use crate::storage::{CypherQuery, GraphStore, row_str};
use std::collections::BTreeMap;

const PLAYER_NAMES: &str =
    "MATCH (p:Player) WHERE p.name IS NOT NULL RETURN DISTINCT p.name AS name";
const TEAM_NAMES: &str =
    "MATCH (t:Team) WHERE t.name IS NOT NULL RETURN DISTINCT t.name AS name";

/// Lower-cased name → stored spellings.
#[derive(Debug, Clone, Default)]
struct NameIndex(BTreeMap<String, Vec<String>>);

impl NameIndex {
    fn insert(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        let spellings = self.0.entry(name.to_lowercase()).or_default();
        if !spellings.iter().any(|s| s == name) {
            spellings.push(name.to_string());
        }
    }

    fn lookup(&self, phrase: &str) -> Vec<String> {
        self.0
            .get(&phrase.to_lowercase())
            .cloned()
            .unwrap_or_default()
    }

    fn len(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }
}

/// Player and team names the resolver can match against.
#[derive(Debug, Clone, Default)]
pub struct NameCatalog {
    players: NameIndex,
    teams: NameIndex,
}

impl NameCatalog {
    /// Builds a catalog from explicit name lists.
    #[must_use]
    pub fn from_names<P, T>(players: P, teams: T) -> Self
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        T: IntoIterator,
        T::Item: AsRef<str>,
    {
        let mut catalog = Self::default();
        for name in players {
            catalog.players.insert(name.as_ref());
        }
        for name in teams {
            catalog.teams.insert(name.as_ref());
        }
        catalog
    }

    /// Fetches every player and team name from the store.
    ///
    /// # Errors
    ///
    /// Returns an error if either query fails.
    pub fn load(store: &dyn GraphStore) -> Result<Self> {
        let players = store.execute(&CypherQuery::new(PLAYER_NAMES).returns(&["name"]))?;
        let teams = store.execute(&CypherQuery::new(TEAM_NAMES).returns(&["name"]))?;

        let catalog = Self::from_names(
            players.iter().filter_map(|row| row_str(row, "name")),
            teams.iter().filter_map(|row| row_str(row, "name")),
        );
        tracing::debug!(
            players = catalog.player_count(),
            teams = catalog.team_count(),
            "Loaded name catalog"
        );
        Ok(catalog)
    }

    /// Stored player spellings matching `phrase`, ignoring case.
    #[must_use]
    pub fn players_named(&self, phrase: &str) -> Vec<String> {
        self.players.lookup(phrase)
    }

    /// Stored team spellings matching `phrase`, ignoring case.
    #[must_use]
    pub fn teams_named(&self, phrase: &str) -> Vec<String> {
        self.teams.lookup(phrase)
    }

    /// Number of distinct player spellings.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Number of distinct team spellings.
    #[must_use]
    pub fn team_count(&self) -> usize {
        self.teams.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::ScriptedStore;
    use serde_json::json;

    #[test]
    fn test_lookup_ignores_case() {
        let catalog = NameCatalog::from_names(["LeBron James"], ["Los Angeles Lakers"]);
        assert_eq!(catalog.players_named("lebron james"), ["LeBron James"]);
        assert_eq!(catalog.players_named("LEBRON JAMES"), ["LeBron James"]);
        assert_eq!(catalog.teams_named("los angeles lakers"), ["Los Angeles Lakers"]);
        assert!(catalog.teams_named("LeBron James").is_empty());
    }

    #[test]
    fn test_collapsed_spellings_are_all_returned() {
        let catalog =
            NameCatalog::from_names(["Jr Smith", "JR Smith", "Jr Smith"], Vec::<&str>::new());
        assert_eq!(catalog.players_named("jr smith"), ["Jr Smith", "JR Smith"]);
        assert_eq!(catalog.player_count(), 2);
    }

    #[test]
    fn test_blank_names_are_ignored() {
        let catalog = NameCatalog::from_names(["", "  "], ["Boston Celtics"]);
        assert_eq!(catalog.player_count(), 0);
        assert_eq!(catalog.team_count(), 1);
    }

    #[test]
    fn test_load_from_store() {
        let store = ScriptedStore::new()
            .respond(
                "MATCH (p:Player)",
                vec![json!({ "name": "Nikola Jokic" }), json!({ "name": null })],
            )
            .respond("MATCH (t:Team)", vec![json!({ "name": "Denver Nuggets" })]);

        let catalog = NameCatalog::load(&store).unwrap();
        assert_eq!(catalog.players_named("nikola jokic"), ["Nikola Jokic"]);
        assert_eq!(catalog.teams_named("DENVER NUGGETS"), ["Denver Nuggets"]);
        assert_eq!(catalog.player_count(), 1);
    }
}
