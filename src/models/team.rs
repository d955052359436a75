//! Team records and query results.

use super::lenient_opt_string;
use crate::io::CsvRecord;
use serde::Deserialize;
use serde_json::{Value, json};

/// One row of `Team_History.csv`: one franchise era.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamEra {
    /// Franchise identifier, shared by all eras of a franchise.
    #[serde(rename = "ID")]
    pub team_id: String,
    /// Nickname, e.g. `Lakers`.
    #[serde(rename = "NICKNAME")]
    pub nickname: String,
    /// City, e.g. `Los Angeles`.
    #[serde(rename = "CITY")]
    pub city: String,
    /// First season of this era.
    #[serde(rename = "YEARFOUNDED")]
    pub year_founded: String,
    /// Last season of this era.
    #[serde(rename = "YEARACTIVETILL")]
    pub year_active_till: String,
}

impl TeamEra {
    /// Display name, `city nickname`.
    #[must_use]
    pub fn name(&self) -> String {
        format!("{} {}", self.city, self.nickname)
    }
}

impl CsvRecord for TeamEra {
    const FILE_NAME: &'static str = "Team_History.csv";
    const REQUIRED_COLUMNS: &'static [&'static str] =
        &["ID", "NICKNAME", "CITY", "YEARFOUNDED", "YEARACTIVETILL"];

    fn to_params(&self) -> Value {
        json!({
            "teamID": self.team_id,
            "nickname": self.nickname,
            "city": self.city,
            "yearFounded": self.year_founded,
            "yearActiveTill": self.year_active_till,
        })
    }

    fn key(&self) -> Option<&str> {
        Some(&self.nickname)
    }
}

/// One row of `Team_Attributes.csv`: details of a current franchise.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamAttributes {
    /// Franchise identifier.
    #[serde(rename = "ID")]
    pub team_id: String,
    /// Three-letter abbreviation.
    #[serde(rename = "ABBREVIATION")]
    pub abbreviation: Option<String>,
    /// Home arena.
    #[serde(rename = "ARENA")]
    pub arena: Option<String>,
    /// Arena capacity.
    #[serde(rename = "ARENACAPACITY")]
    pub arena_capacity: Option<String>,
    /// Owner.
    #[serde(rename = "OWNER")]
    pub owner: Option<String>,
    /// General manager.
    #[serde(rename = "GENERALMANAGER")]
    pub general_manager: Option<String>,
    /// Head coach.
    #[serde(rename = "HEADCOACH")]
    pub head_coach: Option<String>,
    /// G League affiliate.
    #[serde(rename = "DLEAGUEAFFILIATION")]
    pub d_league: Option<String>,
}

impl CsvRecord for TeamAttributes {
    const FILE_NAME: &'static str = "Team_Attributes.csv";
    const REQUIRED_COLUMNS: &'static [&'static str] = &[
        "ID",
        "ABBREVIATION",
        "ARENA",
        "ARENACAPACITY",
        "OWNER",
        "GENERALMANAGER",
        "HEADCOACH",
        "DLEAGUEAFFILIATION",
    ];

    fn to_params(&self) -> Value {
        json!({
            "teamID": self.team_id,
            "abbreviation": self.abbreviation,
            "arena": self.arena,
            "arenaCapacity": self.arena_capacity,
            "owner": self.owner,
            "gm": self.general_manager,
            "coach": self.head_coach,
            "dLeague": self.d_league,
        })
    }

    fn key(&self) -> Option<&str> {
        Some(&self.team_id)
    }
}

/// The identifying part of a team profile row.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamKey {
    /// Franchise identifier.
    #[serde(rename = "teamID", deserialize_with = "lenient_opt_string", default)]
    pub team_id: Option<String>,
    /// Display name.
    pub name: String,
}
