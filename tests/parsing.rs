use std::fs;
use std::path::PathBuf;

use fsn_terminal::api::{
    parse_leaderboard_json, parse_overview_json, parse_punch_card_json, parse_ranking_graph_json,
    parse_roster_json, parse_valid_dates_json, parse_valid_phases_json,
};
use fsn_terminal::lookups::Lookups;
use fsn_terminal::model::ChartMetric;
use fsn_terminal::stamp::{StampCategory, select_stamp};
use fsn_terminal::views::{PunchCardView, punch_card_view};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_roster_fixture() {
    let roster = parse_roster_json(&read_fixture("roster.json")).expect("fixture should parse");
    assert_eq!(roster.len(), 3);
    assert_eq!(roster[0].player_id, "3425126856");
    assert_eq!(roster[1].selected_char.as_deref(), Some("Dee Jay"));
    assert_eq!(roster[2].selected_char, None);
}

#[test]
fn parses_overview_fixture_first_record() {
    let overview = parse_overview_json(&read_fixture("overview.json"))
        .expect("fixture should parse")
        .expect("fixture has a record");
    assert_eq!(overview.player_id, "42");
    assert_eq!(overview.selected_lp, Some(25000));
    assert_eq!(overview.extreme_time, None);
    assert_eq!(overview.total_kudos, Some(1_234_567));
}

#[test]
fn null_fields_in_records_fall_back_to_defaults() {
    let overview = parse_overview_json(&read_fixture("overview_nulls.json"))
        .expect("nulls should parse")
        .expect("fixture has a record");
    assert_eq!(overview.profile_tagline, "");
    assert_eq!(overview.last_played, "");
    assert_eq!(overview.selected_lp, None);
    assert_eq!(overview.hub_matches, None);

    let roster = parse_roster_json(&read_fixture("roster_nulls.json")).expect("nulls should parse");
    assert_eq!(roster[0].player_id, "42");
    assert_eq!(roster[0].player_name, "");
    assert_eq!(roster[0].last_played, "");

    let card = parse_punch_card_json(&read_fixture("punchcard_nulls.json"))
        .expect("nulls should parse")
        .expect("fixture has a card");
    assert_eq!(card.arcade_time, 0);
    assert_eq!(card.thumbs_gained, 0);
    assert!(card.ranked_changes.is_empty());
    assert_eq!(select_stamp(&card).category, StampCategory::Ranked);
}

#[test]
fn empty_overview_array_is_no_data() {
    assert_eq!(parse_overview_json("[]").expect("valid json"), None);
}

#[test]
fn parses_punch_card_fixture() {
    let card = parse_punch_card_json(&read_fixture("punchcard.json"))
        .expect("fixture should parse")
        .expect("fixture has a card");
    assert_eq!(card.prev_date, "2025-04-13");
    assert_eq!(card.ranked_changes["Ryu"].lp, 420);
    assert_eq!(select_stamp(&card).category, StampCategory::Ranked);

    let PunchCardView::Card(lines) = punch_card_view(&card) else {
        panic!("fixture card has activity");
    };
    assert_eq!(lines.logged, "8.50 Hours");
    assert_eq!(lines.period, "Activity measured from 2025-04-13 to 2025-04-20");
    assert_eq!(lines.footer_number, "No. 20250413-42");
    assert_eq!(lines.rank_changes.len(), 1);
    assert!(lines.totals.contains(&"+2 👍".to_string()));
    assert!(lines.totals.contains(&"Kudos: +5,400".to_string()));
    assert!(lines.totals.contains(&"World Tour Time: 0.25 Hours".to_string()));
}

#[test]
fn error_shaped_punch_card_is_no_data() {
    let card = parse_punch_card_json(&read_fixture("punchcard_not_found.json"))
        .expect("fixture should parse");
    assert_eq!(card, None);
}

#[test]
fn parses_ranking_graph_in_both_shapes() {
    let graph = parse_ranking_graph_json(&read_fixture("ranking_graph.json"))
        .expect("fixture should parse");

    let lp = graph.chart(ChartMetric::Lp).expect("lp chart");
    assert_eq!(lp.title.as_deref(), Some("League Points"));
    assert_eq!(lp.traces.len(), 2);
    assert_eq!(
        lp.traces[1].points(&lp.labels()),
        vec![(0.0, 12000.0), (2.0, 12100.0)]
    );
    assert_eq!(lp.y_bounds(), Some((12000.0, 25000.0)));

    let mr = graph.chart(ChartMetric::Mr).expect("mr chart");
    assert_eq!(mr.traces[0].name, "Ryu");
    assert_eq!(mr.labels(), vec!["2025-04-06", "2025-04-13", "2025-04-20"]);
    assert_eq!(mr.traces[0].y, vec![Some(1650.0), Some(1677.0), Some(1712.0)]);
}

#[test]
fn parses_leaderboard_fixture() {
    let board = parse_leaderboard_json(&read_fixture("leaderboard.json"))
        .expect("fixture should parse")
        .expect("fixture has players");
    assert_eq!(board.players.len(), 3);
    assert_eq!(board.players[0].value, "1712");
    assert_eq!(board.players[1].value, "1620");

    let rows = fsn_terminal::views::leaderboard_rows(&board);
    assert_eq!(rows[2][2], "[???] Random");
}

#[test]
fn lookups_from_fixtures() {
    let dates = parse_valid_dates_json(&read_fixture("valid_dates.json")).expect("dates");
    let phases = parse_valid_phases_json(&read_fixture("valid_phases.json")).expect("phases");
    let lookups = Lookups::from_records(dates, phases).expect("non-empty lookups");
    assert_eq!(lookups.latest_date(), "2025-04-20");
    assert_eq!(lookups.earliest_date(), "2025-04-06");
    assert_eq!(lookups.latest_phase(), 3);
}
