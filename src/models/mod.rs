//! Data models for hoopgraph.
//!
//! CSV source records (one type per input file) and the decoded shapes of
//! query results that later queries depend on.

mod player;
mod team;

pub use player::{
    PlayerAttributes, PlayerProfile, PlayerSeason, SimilarityCriteria, UNDRAFTED,
    parse_height_inches, truncate,
};
pub use team::{TeamAttributes, TeamEra, TeamKey};

use serde::{Deserialize, Deserializer, de::Error as _};
use serde_json::Value;

/// Accepts a JSON number or a numeric string.
///
/// Older loads stored stats as text; both shapes decode to the same value.
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| D::Error::custom("number out of range")),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("not a number: {s:?}"))),
        other => Err(D::Error::custom(format!("expected a number, got {other}"))),
    }
}

/// Accepts a string, a number (rendered as text) or null.
pub(crate) fn lenient_opt_string<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    })
}
