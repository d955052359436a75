//! Types for intent resolution.
//!
//! - [`Stat`]: a per-game statistic a leaderboard can rank by
//! - [`Extremum`]: tallest or shortest
//! - [`Intent`]: what a line of input asks for

use serde::{Deserialize, Serialize};
use std::fmt;

/// A per-game statistic stored on `Player` nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    /// Points per game.
    Points,
    /// Assists per game.
    Assists,
    /// Rebounds per game.
    Rebounds,
}

impl Stat {
    /// All stats, in rule order.
    pub const ALL: [Self; 3] = [Self::Points, Self::Assists, Self::Rebounds];

    /// The `Player` property holding this stat.
    #[must_use]
    pub const fn property(self) -> &'static str {
        match self {
            Self::Points => "pointsPerGame",
            Self::Assists => "assistsPerGame",
            Self::Rebounds => "reboundsPerGame",
        }
    }

    /// The column label shown to users.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Points => "Points Per Game",
            Self::Assists => "Assists Per Game",
            Self::Rebounds => "Rebounds Per Game",
        }
    }

    /// The keyword that selects this stat.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Points => "points",
            Self::Assists => "assists",
            Self::Rebounds => "rebounds",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Which end of the height ranking to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extremum {
    /// Greatest height.
    Tallest,
    /// Smallest positive height.
    Shortest,
}

impl Extremum {
    /// Both ends, in rule order.
    pub const ALL: [Self; 2] = [Self::Tallest, Self::Shortest];

    /// The keyword that selects this end.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Tallest => "tallest",
            Self::Shortest => "shortest",
        }
    }

    /// Cypher sort direction that puts this end first.
    #[must_use]
    pub const fn order(self) -> &'static str {
        match self {
            Self::Tallest => "DESC",
            Self::Shortest => "ASC",
        }
    }
}

impl fmt::Display for Extremum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// What a line of input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Blank input.
    Empty,
    /// `exit` or `e`.
    Exit,
    /// `help` or `?`.
    Help,
    /// Top players by a stat.
    Leaderboard(Stat),
    /// The tallest or shortest player.
    Extremum(Extremum),
    /// One or more players matching a name.
    Player {
        /// The input as echoed back, title-cased.
        query: String,
        /// Stored spellings that matched.
        names: Vec<String>,
    },
    /// One or more teams matching a name.
    Team {
        /// The input as echoed back, title-cased.
        query: String,
        /// Stored spellings that matched.
        names: Vec<String>,
    },
    /// Nothing matched.
    Invalid(String),
}

impl Intent {
    /// Short name for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Exit => "exit",
            Self::Help => "help",
            Self::Leaderboard(_) => "leaderboard",
            Self::Extremum(_) => "extremum",
            Self::Player { .. } => "player",
            Self::Team { .. } => "team",
            Self::Invalid(_) => "invalid",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_vocabulary() {
        assert_eq!(Stat::Points.property(), "pointsPerGame");
        assert_eq!(Stat::Assists.label(), "Assists Per Game");
        assert_eq!(Stat::Rebounds.to_string(), "rebounds");
    }

    #[test]
    fn test_extremum_order() {
        assert_eq!(Extremum::Tallest.order(), "DESC");
        assert_eq!(Extremum::Shortest.order(), "ASC");
    }

    #[test]
    fn test_intent_kind() {
        assert_eq!(Intent::Leaderboard(Stat::Points).kind(), "leaderboard");
        assert_eq!(Intent::Invalid("xyz".to_string()).kind(), "invalid");
    }
}
