//! Intent resolution tests.
//!
//! Table-driven checks of the rule order:
//! - exit and help commands
//! - stat leaderboards and height extremes, with and without `who`
//! - case-insensitive player and team names
//! - fallback to invalid

// Integration tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used)]

use hoopgraph::{Extremum, FeatureFlags, Intent, IntentResolver, NameCatalog, Stat};
use test_case::test_case;

fn resolver(flags: FeatureFlags) -> IntentResolver {
    let catalog = NameCatalog::from_names(
        ["LeBron James", "Kawhi Leonard", "Shaquille O'Neal", "Tacko Fall"],
        ["Los Angeles Lakers", "Minneapolis Lakers", "Boston Celtics"],
    );
    IntentResolver::new(catalog, flags)
}

fn player(query: &str, name: &str) -> Intent {
    Intent::Player {
        query: query.to_string(),
        names: vec![name.to_string()],
    }
}

fn team(query: &str, name: &str) -> Intent {
    Intent::Team {
        query: query.to_string(),
        names: vec![name.to_string()],
    }
}

#[test_case("exit", Intent::Exit ; "exit")]
#[test_case("EXIT", Intent::Exit ; "exit uppercase")]
#[test_case("  e  ", Intent::Exit ; "short exit")]
#[test_case("exit now", Intent::Invalid("exit now".to_string()) ; "exit needs exact match")]
#[test_case("help", Intent::Help ; "help")]
#[test_case("?", Intent::Help ; "question mark")]
#[test_case("", Intent::Empty ; "empty")]
#[test_case(" \t ", Intent::Empty ; "whitespace only")]
fn test_commands(input: &str, expected: Intent) {
    assert_eq!(resolver(FeatureFlags::default()).resolve(input), expected);
}

#[test_case("who has the most points", Stat::Points ; "points")]
#[test_case("Who leads in ASSISTS?", Stat::Assists ; "assists mixed case")]
#[test_case("who   grabs the most rebounds", Stat::Rebounds ; "rebounds extra spaces")]
#[test_case("who has more points than assists", Stat::Points ; "first stat wins")]
fn test_leaderboards(input: &str, stat: Stat) {
    assert_eq!(
        resolver(FeatureFlags::default()).resolve(input),
        Intent::Leaderboard(stat)
    );
}

#[test_case("who is the tallest player", Extremum::Tallest ; "tallest")]
#[test_case("WHO IS THE SHORTEST", Extremum::Shortest ; "shortest uppercase")]
fn test_extremes(input: &str, end: Extremum) {
    assert_eq!(
        resolver(FeatureFlags::default()).resolve(input),
        Intent::Extremum(end)
    );
}

#[test]
fn test_stat_keyword_alone_needs_legacy_flag() {
    let strict = resolver(FeatureFlags::strict());
    let legacy = resolver(FeatureFlags::legacy());

    assert_eq!(
        strict.resolve("most points"),
        Intent::Invalid("most points".to_string())
    );
    assert_eq!(legacy.resolve("most points"), Intent::Leaderboard(Stat::Points));
    assert_eq!(legacy.resolve("tallest"), Intent::Extremum(Extremum::Tallest));
}

#[test_case("LeBron James", player("Lebron James", "LeBron James") ; "stored spelling")]
#[test_case("lebron james", player("Lebron James", "LeBron James") ; "lowercase")]
#[test_case("  KAWHI   LEONARD ", player("Kawhi Leonard", "Kawhi Leonard") ; "uppercase with spaces")]
#[test_case("shaquille o'neal", player("Shaquille O'Neal", "Shaquille O'Neal") ; "apostrophe")]
#[test_case("los angeles lakers", team("Los Angeles Lakers", "Los Angeles Lakers") ; "team")]
#[test_case("MINNEAPOLIS LAKERS", team("Minneapolis Lakers", "Minneapolis Lakers") ; "historical team")]
fn test_names(input: &str, expected: Intent) {
    assert_eq!(resolver(FeatureFlags::default()).resolve(input), expected);
}

#[test]
fn test_leaderboard_checked_before_names() {
    let catalog = NameCatalog::from_names(["Who Points"], Vec::<&str>::new());
    let resolver = IntentResolver::new(catalog, FeatureFlags::default());
    assert_eq!(resolver.resolve("who points"), Intent::Leaderboard(Stat::Points));
}

#[test_case("lakers" ; "partial team name")]
#[test_case("lebron" ; "partial player name")]
#[test_case("what is the best team" ; "unrelated question")]
fn test_invalid(input: &str) {
    assert!(matches!(
        resolver(FeatureFlags::default()).resolve(input),
        Intent::Invalid(_)
    ));
}
