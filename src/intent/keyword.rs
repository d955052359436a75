//! Ordered keyword rules.
//!
//! Each rule inspects the normalized input and either claims it or passes.
//! Rules run in table order and the first claim wins, so the stat and
//! height questions are settled before any name lookup.

use super::catalog::NameCatalog;
use super::normalize::title_case;
use super::types::{Extremum, Intent, Stat};
use crate::config::FeatureFlags;

/// Everything a rule may look at.
#[derive(Debug)]
pub struct RuleInput<'a> {
    /// Trimmed, whitespace-collapsed input.
    pub normalized: &'a str,
    /// `normalized`, lower-cased.
    pub lower: &'a str,
    /// Names to match against.
    pub catalog: &'a NameCatalog,
    /// Behaviour switches.
    pub flags: &'a FeatureFlags,
}

impl RuleInput<'_> {
    /// Whether a question keyword requirement is met.
    ///
    /// With conjunction on, `who` must appear alongside the subject keyword.
    fn asks_who(&self) -> bool {
        !self.flags.require_keyword_conjunction || self.lower.contains("who")
    }
}

/// A named predicate that may claim the input.
#[derive(Debug)]
pub struct Rule {
    /// Name used in logs.
    pub name: &'static str,
    /// Returns the intent when the rule applies.
    pub apply: fn(&RuleInput<'_>) -> Option<Intent>,
}

/// Resolution rules, in priority order.
pub static RULES: &[Rule] = &[
    Rule {
        name: "empty",
        apply: empty,
    },
    Rule {
        name: "exit",
        apply: exit,
    },
    Rule {
        name: "help",
        apply: help,
    },
    Rule {
        name: "leaderboard",
        apply: leaderboard,
    },
    Rule {
        name: "extremum",
        apply: extremum,
    },
    Rule {
        name: "player_name",
        apply: player_name,
    },
    Rule {
        name: "team_name",
        apply: team_name,
    },
];

/// Runs the rules in order; unclaimed input is [`Intent::Invalid`].
#[must_use]
pub fn apply_rules(input: &RuleInput<'_>) -> (&'static str, Intent) {
    RULES
        .iter()
        .find_map(|rule| (rule.apply)(input).map(|intent| (rule.name, intent)))
        .unwrap_or_else(|| ("fallback", Intent::Invalid(input.normalized.to_string())))
}

fn empty(input: &RuleInput<'_>) -> Option<Intent> {
    input.normalized.is_empty().then_some(Intent::Empty)
}

fn exit(input: &RuleInput<'_>) -> Option<Intent> {
    matches!(input.lower, "exit" | "e").then_some(Intent::Exit)
}

fn help(input: &RuleInput<'_>) -> Option<Intent> {
    matches!(input.lower, "help" | "?").then_some(Intent::Help)
}

fn leaderboard(input: &RuleInput<'_>) -> Option<Intent> {
    if !input.asks_who() {
        return None;
    }
    Stat::ALL
        .into_iter()
        .find(|stat| input.lower.contains(stat.keyword()))
        .map(Intent::Leaderboard)
}

fn extremum(input: &RuleInput<'_>) -> Option<Intent> {
    if !input.asks_who() {
        return None;
    }
    Extremum::ALL
        .into_iter()
        .find(|end| input.lower.contains(end.keyword()))
        .map(Intent::Extremum)
}

fn player_name(input: &RuleInput<'_>) -> Option<Intent> {
    let names = input.catalog.players_named(input.normalized);
    (!names.is_empty()).then(|| Intent::Player {
        query: title_case(input.normalized),
        names,
    })
}

fn team_name(input: &RuleInput<'_>) -> Option<Intent> {
    let names = input.catalog.teams_named(input.normalized);
    (!names.is_empty()).then(|| Intent::Team {
        query: title_case(input.normalized),
        names,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str, flags: &FeatureFlags) -> (&'static str, Intent) {
        let catalog = NameCatalog::from_names(["Who Knows", "LeBron James"], ["Boston Celtics"]);
        let lower = text.to_lowercase();
        apply_rules(&RuleInput {
            normalized: text,
            lower: &lower,
            catalog: &catalog,
            flags,
        })
    }

    #[test]
    fn test_rule_names_are_unique() {
        let mut names: Vec<_> = RULES.iter().map(|r| r.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), RULES.len());
    }

    #[test]
    fn test_leaderboard_before_names() {
        let (rule, _) = run("who has the most points", &FeatureFlags::strict());
        assert_eq!(rule, "leaderboard");
    }

    #[test]
    fn test_names_checked_player_first() {
        let (rule, intent) = run("lebron james", &FeatureFlags::strict());
        assert_eq!(rule, "player_name");
        assert_eq!(
            intent,
            Intent::Player {
                query: "Lebron James".to_string(),
                names: vec!["LeBron James".to_string()],
            }
        );
    }

    #[test]
    fn test_conjunction_flag() {
        assert_eq!(run("points", &FeatureFlags::strict()).0, "fallback");
        assert_eq!(
            run("points", &FeatureFlags::legacy()).1,
            Intent::Leaderboard(Stat::Points)
        );
        assert_eq!(
            run("shortest", &FeatureFlags::legacy()).1,
            Intent::Extremum(Extremum::Shortest)
        );
    }

    #[test]
    fn test_who_alone_does_not_claim() {
        assert_eq!(run("who knows", &FeatureFlags::strict()).0, "player_name");
    }
}
