//! Team reports.

use super::{QueryService, record_table, templates};
use crate::models::TeamKey;
use crate::rendering::{Block, format_cell};
use crate::storage::{Row, query_or_report};

const PROFILE_FIELDS: &[(&str, &str)] = &[
    ("teamID", "Team ID"),
    ("name", "Name"),
    ("abbreviation", "Abbreviation"),
    ("yearFounded", "Founded"),
    ("yearActiveTill", "Active Till"),
    ("arena", "Arena"),
    ("arenaCapacity", "Arena Capacity"),
    ("owner", "Owner"),
    ("gm", "General Manager"),
    ("coach", "Head Coach"),
    ("dLeague", "G League Affiliate"),
];

impl QueryService<'_> {
    /// Profile, franchise history and recent players for each team name.
    ///
    /// Several nodes can carry one name (a city and nickname reused across
    /// eras); each is profiled and franchise history is shown once per
    /// distinct team ID.
    #[must_use]
    pub fn team_report(&self, names: &[String]) -> Vec<Block> {
        let mut blocks = Vec::new();
        for name in names {
            self.report_team(name, &mut blocks);
        }
        blocks
    }

    fn report_team(&self, name: &str, blocks: &mut Vec<Block>) {
        let rows = query_or_report(self.store, &templates::team_profile(name));
        if rows.is_empty() {
            blocks.push(Block::notice(format!("{name} is not a valid team.")));
            return;
        }

        let ambiguous = rows.len() > 1;
        if ambiguous {
            blocks.push(Block::notice(format!(
                "{} teams are named {name}. Showing each.",
                rows.len()
            )));
        }
        for row in &rows {
            let title = if ambiguous {
                format!("Team Profile: {name} ({})", era(row))
            } else {
                format!("Team Profile: {name}")
            };
            blocks.push(record_table(&title, row, PROFILE_FIELDS).into());
        }

        let mut team_ids: Vec<String> = Vec::new();
        for row in &rows {
            let key: Option<TeamKey> = serde_json::from_value(row.clone().into()).ok();
            let id = key.and_then(|k| k.team_id);
            if let Some(id) = id.filter(|id| !team_ids.contains(id)) {
                team_ids.push(id);
            }
        }
        if team_ids.is_empty() {
            blocks.push(Block::notice(format!("No franchise history recorded for {name}.")));
        }
        for team_id in &team_ids {
            let (_, history) = self.section(
                &templates::franchise_history(team_id),
                &format!("Franchise History: {name}"),
                &[
                    ("name", "Team"),
                    ("yearFounded", "Founded"),
                    ("yearActiveTill", "Active Till"),
                ],
                &format!("No franchise history recorded for {name}."),
            );
            blocks.push(history);
        }

        let (_, players) = self.section(
            &templates::recent_players(name),
            &format!("Recent Players: {name}"),
            &[("name", "Player"), ("position", "Position"), ("season", "Season")],
            &format!("No players recorded for {name}."),
        );
        blocks.push(players);
    }
}

/// `founded-activeTill` for telling eras apart.
fn era(row: &Row) -> String {
    let year = |column: &str| row.get(column).map_or_else(|| "-".to_string(), format_cell);
    format!("{}-{}", year("yearFounded"), year("yearActiveTill"))
}
