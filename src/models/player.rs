//! Player records and query results.

use super::{lenient_f64, lenient_opt_string};
use crate::io::CsvRecord;
use serde::Deserialize;
use serde_json::{Value, json};

/// Draft round recorded for players who were never drafted.
pub const UNDRAFTED: &str = "Undrafted";

/// One row of `Player_Attributes.csv`.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerAttributes {
    /// Unique player identifier.
    #[serde(rename = "ID")]
    pub id: String,
    /// First name.
    #[serde(rename = "FIRST_NAME")]
    pub first_name: String,
    /// Last name.
    #[serde(rename = "LAST_NAME")]
    pub last_name: String,
    /// Birth date as written in the source.
    #[serde(rename = "BIRTHDATE")]
    pub birth_date: Option<String>,
    /// School or club before the league.
    #[serde(rename = "SCHOOL")]
    pub school: Option<String>,
    /// Country.
    #[serde(rename = "COUNTRY")]
    pub country: Option<String>,
    /// Height, usually feet-inches such as `6-9`.
    #[serde(rename = "HEIGHT")]
    pub height: Option<String>,
    /// Weight in pounds.
    #[serde(rename = "WEIGHT")]
    pub weight: Option<String>,
    /// Seasons of experience.
    #[serde(rename = "SEASON_EXP")]
    pub seasons_played: Option<String>,
    /// Jersey number.
    #[serde(rename = "JERSEY")]
    pub jersey: Option<String>,
    /// Position, e.g. `Forward`.
    #[serde(rename = "POSITION")]
    pub position: Option<String>,
    /// Draft round or `Undrafted`.
    #[serde(rename = "DRAFT_ROUND")]
    pub draft_round: Option<String>,
    /// Pick number within the round.
    #[serde(rename = "DRAFT_NUMBER")]
    pub draft_number: Option<String>,
    /// Points per game.
    #[serde(rename = "PTS", default, deserialize_with = "csv::invalid_option")]
    pub points: Option<f64>,
    /// Assists per game.
    #[serde(rename = "AST", default, deserialize_with = "csv::invalid_option")]
    pub assists: Option<f64>,
    /// Rebounds per game.
    #[serde(rename = "REB", default, deserialize_with = "csv::invalid_option")]
    pub rebounds: Option<f64>,
}

impl CsvRecord for PlayerAttributes {
    const FILE_NAME: &'static str = "Player_Attributes.csv";
    const REQUIRED_COLUMNS: &'static [&'static str] = &[
        "ID",
        "FIRST_NAME",
        "LAST_NAME",
        "BIRTHDATE",
        "SCHOOL",
        "COUNTRY",
        "HEIGHT",
        "WEIGHT",
        "SEASON_EXP",
        "JERSEY",
        "POSITION",
        "DRAFT_ROUND",
        "DRAFT_NUMBER",
        "PTS",
        "AST",
        "REB",
    ];

    fn to_params(&self) -> Value {
        json!({
            "playerID": self.id,
            "firstName": self.first_name,
            "lastName": self.last_name,
            "birthDate": self.birth_date,
            "school": self.school,
            "country": self.country,
            "height": self.height,
            "heightInches": self.height.as_deref().and_then(parse_height_inches),
            "weight": self.weight,
            "seasonsPlayed": self.seasons_played,
            "jerseyNumber": self.jersey,
            "position": self.position,
            "roundDrafted": self.draft_round,
            "pickDrafted": self.draft_number,
            "pointsPerGame": self.points,
            "assistsPerGame": self.assists,
            "reboundsPerGame": self.rebounds,
        })
    }

    fn key(&self) -> Option<&str> {
        Some(&self.id)
    }
}

/// One row of `Player_Bios.csv`: a player on a team for one season.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerSeason {
    /// Player name as `first last`.
    #[serde(rename = "namePlayerBREF")]
    pub player: String,
    /// Team name as `city nickname`.
    #[serde(rename = "nameTeam")]
    pub team: String,
    /// Season slug, e.g. `2019-20`.
    #[serde(rename = "slugSeason")]
    pub season: String,
}

impl CsvRecord for PlayerSeason {
    const FILE_NAME: &'static str = "Player_Bios.csv";
    const REQUIRED_COLUMNS: &'static [&'static str] = &["namePlayerBREF", "nameTeam", "slugSeason"];

    fn to_params(&self) -> Value {
        json!({
            "player": self.player,
            "team": self.team,
            "season": self.season,
        })
    }

    fn key(&self) -> Option<&str> {
        Some(&self.player)
    }
}

/// Converts a height to inches.
///
/// Accepts `feet-inches` (`6-9` → 81) or a bare inch count. Returns `None`
/// for anything unparseable or non-positive.
#[must_use]
pub fn parse_height_inches(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let inches = if let Some((feet, inches)) = raw.split_once('-') {
        let feet: i64 = feet.trim().parse().ok()?;
        let inches: i64 = inches.trim().parse().ok()?;
        if !(0..12).contains(&inches) {
            return None;
        }
        feet.checked_mul(12)?.checked_add(inches)?
    } else {
        raw.parse().ok()?
    };
    (inches > 0).then_some(inches)
}

/// The profile row for a named player, as returned by the profile query.
///
/// The three stat fields are required: a player without them cannot be
/// compared with others and is reported as invalid.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
    /// Unique identifier.
    #[serde(rename = "playerID")]
    pub player_id: String,
    /// Display name.
    pub name: String,
    /// Position.
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub position: Option<String>,
    /// Draft round.
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub round_drafted: Option<String>,
    /// Points per game.
    #[serde(deserialize_with = "lenient_f64")]
    pub points_per_game: f64,
    /// Assists per game.
    #[serde(deserialize_with = "lenient_f64")]
    pub assists_per_game: f64,
    /// Rebounds per game.
    #[serde(deserialize_with = "lenient_f64")]
    pub rebounds_per_game: f64,
}

/// Bounds for the similar-players query.
///
/// Holds the reference side only; the query truncates the candidate side
/// with `toInteger`, so a 27.9 scorer and a 19.0 scorer (27 vs 19) are
/// within the ±8 band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimilarityCriteria {
    /// Player to exclude from results.
    pub player_id: String,
    /// Required position.
    pub position: Option<String>,
    /// Required draft round (`Undrafted` when the reference has none).
    pub draft_round: String,
    /// Truncated points per game.
    pub points: i64,
    /// Truncated assists per game.
    pub assists: i64,
    /// Truncated rebounds per game.
    pub rebounds: i64,
}

impl SimilarityCriteria {
    /// Allowed absolute difference in truncated points.
    pub const POINTS_BAND: i64 = 8;
    /// Allowed absolute difference in truncated assists.
    pub const ASSISTS_BAND: i64 = 4;
    /// Allowed absolute difference in truncated rebounds.
    pub const REBOUNDS_BAND: i64 = 4;
    /// Maximum similar players returned.
    pub const LIMIT: i64 = 6;

    /// Derives the criteria from a reference player's profile.
    #[must_use]
    pub fn from_profile(profile: &PlayerProfile) -> Self {
        let draft_round = profile
            .round_drafted
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(UNDRAFTED)
            .to_string();

        Self {
            player_id: profile.player_id.clone(),
            position: profile.position.clone(),
            draft_round,
            points: truncate(profile.points_per_game),
            assists: truncate(profile.assists_per_game),
            rebounds: truncate(profile.rebounds_per_game),
        }
    }

}

/// Truncates toward zero, matching Cypher's `toInteger` on floats.
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn truncate(value: f64) -> i64 {
    value.trunc() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(points: f64, assists: f64, rebounds: f64) -> PlayerProfile {
        PlayerProfile {
            player_id: "2544".to_string(),
            name: "LeBron James".to_string(),
            position: Some("Forward".to_string()),
            round_drafted: Some("1".to_string()),
            points_per_game: points,
            assists_per_game: assists,
            rebounds_per_game: rebounds,
        }
    }

    #[test]
    fn test_parse_height_inches() {
        assert_eq!(parse_height_inches("6-9"), Some(81));
        assert_eq!(parse_height_inches(" 7-6 "), Some(90));
        assert_eq!(parse_height_inches("80"), Some(80));
        assert_eq!(parse_height_inches("6-13"), None);
        assert_eq!(parse_height_inches("0"), None);
        assert_eq!(parse_height_inches(""), None);
        assert_eq!(parse_height_inches("tall"), None);
        assert_eq!(parse_height_inches("999999999999999999-1"), None);
        assert_eq!(parse_height_inches("-5"), None);
    }

    #[test]
    fn test_criteria_truncate_not_round() {
        let criteria = SimilarityCriteria::from_profile(&profile(27.9, 7.4, 7.99));
        assert_eq!(criteria.points, 27);
        assert_eq!(criteria.assists, 7);
        assert_eq!(criteria.rebounds, 7);
    }

    #[test]
    fn test_missing_round_means_undrafted() {
        let mut reference = profile(10.0, 2.0, 3.0);
        reference.round_drafted = None;
        assert_eq!(
            SimilarityCriteria::from_profile(&reference).draft_round,
            UNDRAFTED
        );

        reference.round_drafted = Some("  ".to_string());
        assert_eq!(
            SimilarityCriteria::from_profile(&reference).draft_round,
            UNDRAFTED
        );
    }

    #[test]
    fn test_player_params_derive_height() {
        let record = PlayerAttributes {
            id: "2544".to_string(),
            first_name: "LeBron".to_string(),
            last_name: "James".to_string(),
            birth_date: None,
            school: None,
            country: Some("USA".to_string()),
            height: Some("6-9".to_string()),
            weight: Some("250".to_string()),
            seasons_played: None,
            jersey: Some("23".to_string()),
            position: Some("Forward".to_string()),
            draft_round: Some("1".to_string()),
            draft_number: Some("1".to_string()),
            points: Some(27.1),
            assists: None,
            rebounds: Some(7.4),
        };
        let params = record.to_params();
        assert_eq!(params["playerID"], json!("2544"));
        assert_eq!(params["heightInches"], json!(81));
        assert_eq!(params["assistsPerGame"], Value::Null);
        assert_eq!(params["pointsPerGame"], json!(27.1));
    }
}
