//! Cypher templates, one per question.
//!
//! Every user-supplied value is bound as a parameter. Only property names
//! from [`Stat`] and sort directions from [`Extremum`] are spliced into the
//! text, and both come from closed enums.

use crate::intent::{Extremum, Stat};
use crate::models::SimilarityCriteria;
use crate::storage::CypherQuery;

/// Rows returned by a leaderboard.
pub const LEADERBOARD_LIMIT: i64 = 10;

/// Recent players listed for a team.
pub const RECENT_PLAYERS_LIMIT: i64 = 10;

/// Top players by `stat`, positive values only, descending.
#[must_use]
pub fn leaderboard(stat: Stat) -> CypherQuery {
    let property = stat.property();
    CypherQuery::new(format!(
        "MATCH (p:Player)
WHERE p.{property} > 0
RETURN p.name AS name, p.position AS position, p.{property} AS {property}
ORDER BY p.{property} DESC
LIMIT $limit"
    ))
    .param("limit", LEADERBOARD_LIMIT)
    .returns(&["name", "position", property])
}

/// The single tallest or shortest player with a known height.
#[must_use]
pub fn extremum(end: Extremum) -> CypherQuery {
    let order = end.order();
    CypherQuery::new(format!(
        "MATCH (p:Player)
WHERE p.heightInches > 0
RETURN p.name AS name, p.position AS position, p.height AS height
ORDER BY p.heightInches {order}
LIMIT 1"
    ))
    .returns(&["name", "position", "height"])
}

/// Bio and stats of every player with this exact name.
#[must_use]
pub fn player_profile(name: &str) -> CypherQuery {
    CypherQuery::new(
        "MATCH (p:Player {name: $name})
RETURN p.playerID AS playerID, p.name AS name, p.position AS position,
    p.height AS height, p.weight AS weight, p.birthDate AS birthDate,
    p.country AS country, p.school AS school, p.jerseyNumber AS jerseyNumber,
    p.seasonsPlayed AS seasonsPlayed, p.roundDrafted AS roundDrafted,
    p.pickDrafted AS pickDrafted, p.pointsPerGame AS pointsPerGame,
    p.assistsPerGame AS assistsPerGame, p.reboundsPerGame AS reboundsPerGame
ORDER BY p.playerID",
    )
    .param("name", name)
    .returns(&[
        "playerID",
        "name",
        "position",
        "height",
        "weight",
        "birthDate",
        "country",
        "school",
        "jerseyNumber",
        "seasonsPlayed",
        "roundDrafted",
        "pickDrafted",
        "pointsPerGame",
        "assistsPerGame",
        "reboundsPerGame",
    ])
}

/// Season-by-season teams of one player, oldest first.
#[must_use]
pub fn player_history(player_id: &str) -> CypherQuery {
    CypherQuery::new(
        "MATCH (p:Player {playerID: $playerID})-[r:Played_For]->(t:Team)
RETURN r.year AS season, t.name AS team
ORDER BY r.year ASC, t.name ASC",
    )
    .param("playerID", player_id)
    .returns(&["season", "team"])
}

/// Distinct franchises one player appeared for.
#[must_use]
pub fn player_teams(player_id: &str) -> CypherQuery {
    CypherQuery::new(
        "MATCH (p:Player {playerID: $playerID})-[:Played_For]->(t:Team)
RETURN DISTINCT t.name AS team, t.city AS city, t.yearFounded AS yearFounded,
    t.yearActiveTill AS yearActiveTill, t.arena AS arena
ORDER BY team",
    )
    .param("playerID", player_id)
    .returns(&["team", "city", "yearFounded", "yearActiveTill", "arena"])
}

/// Players comparable to the reference, by truncated per-game stats.
#[must_use]
pub fn similar_players(criteria: &SimilarityCriteria) -> CypherQuery {
    CypherQuery::new(
        "MATCH (p:Player)
WHERE p.playerID <> $playerID
    AND p.position = $position
    AND coalesce(p.roundDrafted, $undrafted) = $draftRound
    AND abs(toInteger(p.pointsPerGame) - $points) <= $pointsBand
    AND abs(toInteger(p.assistsPerGame) - $assists) <= $assistsBand
    AND abs(toInteger(p.reboundsPerGame) - $rebounds) <= $reboundsBand
RETURN p.name AS name, p.position AS position, p.roundDrafted AS roundDrafted,
    p.pointsPerGame AS pointsPerGame, p.assistsPerGame AS assistsPerGame,
    p.reboundsPerGame AS reboundsPerGame
ORDER BY p.pointsPerGame DESC, p.name ASC
LIMIT $limit",
    )
    .param("playerID", criteria.player_id.as_str())
    .param("position", criteria.position.as_deref())
    .param("undrafted", crate::models::UNDRAFTED)
    .param("draftRound", criteria.draft_round.as_str())
    .param("points", criteria.points)
    .param("assists", criteria.assists)
    .param("rebounds", criteria.rebounds)
    .param("pointsBand", SimilarityCriteria::POINTS_BAND)
    .param("assistsBand", SimilarityCriteria::ASSISTS_BAND)
    .param("reboundsBand", SimilarityCriteria::REBOUNDS_BAND)
    .param("limit", SimilarityCriteria::LIMIT)
    .returns(&[
        "name",
        "position",
        "roundDrafted",
        "pointsPerGame",
        "assistsPerGame",
        "reboundsPerGame",
    ])
}

/// Every team node with this exact name, oldest era first.
#[must_use]
pub fn team_profile(name: &str) -> CypherQuery {
    CypherQuery::new(
        "MATCH (t:Team {name: $name})
RETURN t.teamID AS teamID, t.name AS name, t.abbreviation AS abbreviation,
    t.yearFounded AS yearFounded, t.yearActiveTill AS yearActiveTill,
    t.arena AS arena, t.arenaCapacity AS arenaCapacity, t.owner AS owner,
    t.gm AS gm, t.coach AS coach, t.dLeague AS dLeague
ORDER BY toInteger(t.yearFounded) ASC",
    )
    .param("name", name)
    .returns(&[
        "teamID",
        "name",
        "abbreviation",
        "yearFounded",
        "yearActiveTill",
        "arena",
        "arenaCapacity",
        "owner",
        "gm",
        "coach",
        "dLeague",
    ])
}

/// All eras sharing a franchise identifier, oldest first.
#[must_use]
pub fn franchise_history(team_id: &str) -> CypherQuery {
    CypherQuery::new(
        "MATCH (t:Team {teamID: $teamID})
RETURN t.name AS name, t.yearFounded AS yearFounded, t.yearActiveTill AS yearActiveTill
ORDER BY toInteger(t.yearFounded) ASC",
    )
    .param("teamID", team_id)
    .returns(&["name", "yearFounded", "yearActiveTill"])
}

/// The most recent players on a team, newest season first.
#[must_use]
pub fn recent_players(team_name: &str) -> CypherQuery {
    CypherQuery::new(
        "MATCH (p:Player)-[r:Played_For]->(t:Team {name: $name})
RETURN p.name AS name, p.position AS position, r.year AS season
ORDER BY r.year DESC, p.name ASC
LIMIT $limit",
    )
    .param("name", team_name)
    .param("limit", RECENT_PLAYERS_LIMIT)
    .returns(&["name", "position", "season"])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlayerProfile;
    use serde_json::{Value, json};

    #[test]
    fn test_leaderboard_uses_stat_property() {
        let query = leaderboard(Stat::Rebounds);
        assert!(query.text().contains("p.reboundsPerGame > 0"));
        assert!(query.text().contains("ORDER BY p.reboundsPerGame DESC"));
        assert_eq!(query.get_param("limit"), Some(&json!(10)));
        assert_eq!(query.columns(), ["name", "position", "reboundsPerGame"]);
    }

    #[test]
    fn test_extremum_direction() {
        assert!(extremum(Extremum::Tallest).text().contains("heightInches DESC"));
        assert!(extremum(Extremum::Shortest).text().contains("heightInches ASC"));
        assert!(extremum(Extremum::Shortest).text().contains("p.heightInches > 0"));
    }

    #[test]
    fn test_names_are_bound_not_spliced() {
        let name = "Shaquille O'Neal";
        for query in [player_profile(name), team_profile(name), recent_players(name)] {
            assert!(!query.text().contains("O'Neal"));
            assert_eq!(query.get_param("name"), Some(&json!(name)));
        }
    }

    #[test]
    fn test_similar_players_params() {
        let criteria = SimilarityCriteria {
            player_id: "2544".to_string(),
            position: None,
            draft_round: "Undrafted".to_string(),
            points: 27,
            assists: 7,
            rebounds: 7,
        };
        let query = similar_players(&criteria);
        assert_eq!(query.get_param("position"), Some(&Value::Null));
        assert_eq!(query.get_param("draftRound"), Some(&json!("Undrafted")));
        assert_eq!(query.get_param("pointsBand"), Some(&json!(8)));
        assert_eq!(query.get_param("limit"), Some(&json!(6)));
        assert!(query.text().contains("p.playerID <> $playerID"));
        assert!(query.text().contains("toInteger(p.pointsPerGame)"));
    }

    #[test]
    fn test_similar_players_bands_truncate_both_sides() {
        let reference = PlayerProfile {
            player_id: "2544".to_string(),
            name: "LeBron James".to_string(),
            position: Some("Forward".to_string()),
            round_drafted: None,
            points_per_game: 27.1,
            assists_per_game: 7.9,
            rebounds_per_game: 7.4,
        };
        let query = similar_players(&SimilarityCriteria::from_profile(&reference));

        assert_eq!(query.get_param("points"), Some(&json!(27)));
        assert_eq!(query.get_param("assists"), Some(&json!(7)));
        assert_eq!(query.get_param("rebounds"), Some(&json!(7)));
        assert_eq!(query.get_param("draftRound"), Some(&json!("Undrafted")));
        for (property, own, band) in [
            ("pointsPerGame", "$points", "$pointsBand"),
            ("assistsPerGame", "$assists", "$assistsBand"),
            ("reboundsPerGame", "$rebounds", "$reboundsBand"),
        ] {
            let clause = format!("abs(toInteger(p.{property}) - {own}) <= {band}");
            assert!(query.text().contains(&clause), "missing {clause}");
        }
        assert_eq!(query.get_param("assistsBand"), Some(&json!(4)));
        assert_eq!(query.get_param("reboundsBand"), Some(&json!(4)));
    }

    #[test]
    fn test_history_orders() {
        assert!(player_history("2544").text().contains("ORDER BY r.year ASC"));
        assert!(franchise_history("1").text().contains("toInteger(t.yearFounded) ASC"));
        assert!(recent_players("x").text().contains("ORDER BY r.year DESC"));
    }
}
