//! Player reports.

use super::{QueryService, record_table, templates};
use crate::models::{PlayerProfile, SimilarityCriteria};
use crate::rendering::{Block, format_cell};
use crate::storage::{Row, query_or_report};

const PROFILE_FIELDS: &[(&str, &str)] = &[
    ("playerID", "Player ID"),
    ("name", "Name"),
    ("position", "Position"),
    ("height", "Height"),
    ("weight", "Weight"),
    ("birthDate", "Birth Date"),
    ("country", "Country"),
    ("school", "School"),
    ("jerseyNumber", "Jersey"),
    ("seasonsPlayed", "Seasons Played"),
    ("roundDrafted", "Draft Round"),
    ("pickDrafted", "Draft Pick"),
    ("pointsPerGame", "Points Per Game"),
    ("assistsPerGame", "Assists Per Game"),
    ("reboundsPerGame", "Rebounds Per Game"),
];

impl QueryService<'_> {
    /// Profile, season history, teams and similar players for each name.
    ///
    /// When several players share a name, a notice lists their identifiers
    /// and every one of them gets a full report.
    #[must_use]
    pub fn player_report(&self, names: &[String]) -> Vec<Block> {
        let mut blocks = Vec::new();
        for name in names {
            self.report_player(name, &mut blocks);
        }
        blocks
    }

    fn report_player(&self, name: &str, blocks: &mut Vec<Block>) {
        let rows = query_or_report(self.store, &templates::player_profile(name));
        if rows.is_empty() {
            blocks.push(Block::notice(format!("{name} is not a valid player.")));
            return;
        }

        let ambiguous = rows.len() > 1;
        if ambiguous {
            let ids: Vec<String> = rows
                .iter()
                .map(|row| row.get("playerID").map_or_else(|| "-".to_string(), format_cell))
                .collect();
            blocks.push(Block::notice(format!(
                "{} players are named {name} (player IDs: {}). Showing each.",
                rows.len(),
                ids.join(", ")
            )));
        }

        for row in &rows {
            self.report_candidate(name, row, ambiguous, blocks);
        }
    }

    fn report_candidate(&self, name: &str, row: &Row, ambiguous: bool, blocks: &mut Vec<Block>) {
        let profile: PlayerProfile = match serde_json::from_value(row.clone().into()) {
            Ok(profile) => profile,
            Err(e) => {
                tracing::debug!(player = name, error = %e, "Profile lacks required fields");
                blocks.push(Block::notice(format!(
                    "{} is not a valid player: per-game statistics are missing.",
                    label(name, row, ambiguous)
                )));
                return;
            },
        };
        let who = label(name, row, ambiguous);

        blocks.push(record_table(&format!("Player Profile: {who}"), row, PROFILE_FIELDS).into());

        let (_, history) = self.section(
            &templates::player_history(&profile.player_id),
            &format!("Season History: {who}"),
            &[("season", "Season"), ("team", "Team")],
            &format!("No season history recorded for {who}."),
        );
        blocks.push(history);

        let (_, teams) = self.section(
            &templates::player_teams(&profile.player_id),
            &format!("Teams Played For: {who}"),
            &[
                ("team", "Team"),
                ("city", "City"),
                ("yearFounded", "Founded"),
                ("yearActiveTill", "Active Till"),
                ("arena", "Arena"),
            ],
            &format!("No teams recorded for {who}."),
        );
        blocks.push(teams);

        let criteria = SimilarityCriteria::from_profile(&profile);
        let (_, similar) = self.section(
            &templates::similar_players(&criteria),
            &format!("Players Similar To {who}"),
            &[
                ("name", "Name"),
                ("position", "Position"),
                ("roundDrafted", "Draft Round"),
                ("pointsPerGame", "Points Per Game"),
                ("assistsPerGame", "Assists Per Game"),
                ("reboundsPerGame", "Rebounds Per Game"),
            ],
            &format!("No similar players found for {who}."),
        );
        blocks.push(similar);
    }
}

/// `name`, qualified by player ID when the name is shared.
fn label(name: &str, row: &Row, ambiguous: bool) -> String {
    match row.get("playerID") {
        Some(id) if ambiguous => format!("{name} ({})", format_cell(id)),
        _ => name.to_string(),
    }
}
