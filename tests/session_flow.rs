//! End-to-end session tests against a scripted store.
//!
//! Covers the question forms a user can type, from raw input through
//! intent resolution, dependent queries and rendered tables.

// Integration tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used)]

use hoopgraph::{Block, HoopgraphConfig, Reply, ScriptedStore, Session, Table};
use serde_json::json;

fn league() -> ScriptedStore {
    ScriptedStore::new()
        .respond(
            "RETURN DISTINCT p.name AS name",
            vec![json!({ "name": "LeBron James" }), json!({ "name": "Anthony Davis" })],
        )
        .respond(
            "RETURN DISTINCT t.name AS name",
            vec![json!({ "name": "Los Angeles Lakers" }), json!({ "name": "Minneapolis Lakers" })],
        )
        .respond(
            "ORDER BY p.pointsPerGame DESC\nLIMIT $limit",
            vec![
                json!({ "name": "James Harden", "position": "Guard", "pointsPerGame": 36.1 }),
                json!({ "name": "Paul George", "position": "Forward", "pointsPerGame": 28.0 }),
                json!({ "name": "LeBron James", "position": "Forward", "pointsPerGame": 27.1 }),
            ],
        )
        .respond(
            "ORDER BY p.heightInches DESC",
            vec![json!({ "name": "Tacko Fall", "position": "Center", "height": "7-6" })],
        )
        .respond(
            "MATCH (p:Player {name: $name})",
            vec![json!({
                "playerID": "2544",
                "name": "LeBron James",
                "position": "Forward",
                "height": "6-9",
                "roundDrafted": "1",
                "pointsPerGame": 27.1,
                "assistsPerGame": 7.4,
                "reboundsPerGame": 7.4,
            })],
        )
        .respond(
            "RETURN r.year AS season, t.name AS team",
            vec![
                json!({ "season": "2003-04", "team": "Cleveland Cavaliers" }),
                json!({ "season": "2010-11", "team": "Miami Heat" }),
                json!({ "season": "2018-19", "team": "Los Angeles Lakers" }),
            ],
        )
        .respond(
            "RETURN DISTINCT t.name AS team",
            vec![
                json!({ "team": "Cleveland Cavaliers" }),
                json!({ "team": "Los Angeles Lakers" }),
                json!({ "team": "Miami Heat" }),
            ],
        )
        .respond(
            "abs(toInteger(p.pointsPerGame)",
            vec![json!({
                "name": "Anthony Davis",
                "position": "Forward",
                "roundDrafted": "1",
                "pointsPerGame": 26.1,
                "assistsPerGame": 3.2,
                "reboundsPerGame": 9.3,
            })],
        )
        .respond(
            "MATCH (t:Team {name: $name})",
            vec![json!({
                "teamID": "1610612747",
                "name": "Los Angeles Lakers",
                "abbreviation": "LAL",
                "yearFounded": "1960",
                "yearActiveTill": "2019",
            })],
        )
        .respond(
            "MATCH (t:Team {teamID: $teamID})",
            vec![
                json!({ "name": "Minneapolis Lakers", "yearFounded": "1947", "yearActiveTill": "1959" }),
                json!({ "name": "Los Angeles Lakers", "yearFounded": "1960", "yearActiveTill": "2019" }),
            ],
        )
}

fn tables(reply: &Reply) -> Vec<&Table> {
    reply.blocks().iter().filter_map(Block::as_table).collect()
}

#[test]
fn test_points_leaderboard() {
    let store = league();
    let session = Session::open(&store, &HoopgraphConfig::default());

    let reply = session.answer("who has the most points");
    let tables = tables(&reply);

    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].headers(), ["Name", "Position", "Points Per Game"]);
    assert_eq!(tables[0].column("Points Per Game"), ["36.1", "28", "27.1"]);
    assert!(tables[0].rows().len() <= 10);
}

#[test]
fn test_tallest_player() {
    let store = league();
    let session = Session::open(&store, &HoopgraphConfig::default());

    let reply = session.answer("Who is the tallest?");
    let tables = tables(&reply);

    assert_eq!(tables[0].headers(), ["Name", "Position", "Height"]);
    assert_eq!(tables[0].column("Name"), ["Tacko Fall"]);
}

#[test]
fn test_player_report() {
    let store = league();
    let session = Session::open(&store, &HoopgraphConfig::default());

    let reply = session.answer("lebron james");
    let tables = tables(&reply);

    assert_eq!(reply.blocks()[0].as_notice(), Some("Results for Lebron James:"));
    assert_eq!(tables.len(), 4);
    assert_eq!(tables[0].title(), "Player Profile: LeBron James");
    assert_eq!(tables[1].column("Season"), ["2003-04", "2010-11", "2018-19"]);
    assert_eq!(tables[2].rows().len(), 3);
    assert_eq!(tables[3].column("Name"), ["Anthony Davis"]);
    assert!(tables[3].rows().len() <= 6);

    let similar = store.issued_matching("abs(toInteger(p.pointsPerGame)");
    assert_eq!(similar.len(), 1);
    assert_eq!(similar[0].get_param("playerID"), Some(&json!("2544")));
    assert_eq!(similar[0].get_param("points"), Some(&json!(27)));
    assert_eq!(similar[0].get_param("assists"), Some(&json!(7)));
    assert_eq!(similar[0].get_param("position"), Some(&json!("Forward")));
}

#[test]
fn test_team_report() {
    let store = league();
    let session = Session::open(&store, &HoopgraphConfig::default());

    let reply = session.answer("LOS ANGELES LAKERS");
    let tables = tables(&reply);

    assert_eq!(tables[0].title(), "Team Profile: Los Angeles Lakers");
    assert_eq!(tables[1].column("Founded"), ["1947", "1960"]);
    let notices: Vec<&str> = reply.blocks().iter().filter_map(Block::as_notice).collect();
    assert!(notices.contains(&"No players recorded for Los Angeles Lakers."));
}

#[test]
fn test_unknown_input() {
    let store = league();
    let session = Session::open(&store, &HoopgraphConfig::default());

    let reply = session.answer("michael jordan");
    assert!(tables(&reply).is_empty());
    assert!(reply.to_string().contains("\"michael jordan\" is not a known player"));
}

#[test]
fn test_queries_bind_user_text() {
    let store = league();
    let session = Session::open(&store, &HoopgraphConfig::default());
    let _ = session.answer("LeBron James");

    for query in store.issued() {
        assert!(!query.text().contains("LeBron"), "{}", query.text());
    }
}

#[test]
fn test_failed_store_keeps_session_alive() {
    let store = ScriptedStore::new()
        .respond("RETURN DISTINCT p.name AS name", vec![json!({ "name": "LeBron James" })])
        .fail("MATCH (p:Player {name: $name})", "connection reset");
    let session = Session::open(&store, &HoopgraphConfig::default());

    let reply = session.answer("LeBron James");
    assert!(reply.to_string().contains("LeBron James is not a valid player."));
    assert_eq!(session.answer("exit"), Reply::Exit);
}

#[test]
fn test_run_loop_transcript() {
    let store = league();
    let session = Session::open(&store, &HoopgraphConfig::default());
    let mut output = Vec::new();

    let answered = session
        .run("who is the tallest\n\nhelp\ne\n".as_bytes(), &mut output)
        .unwrap();

    assert_eq!(answered, 2);
    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("Tallest Player"));
    assert!(text.contains("Questions you can ask:"));
}
