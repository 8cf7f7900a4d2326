use std::sync::Arc;

use fsn_terminal::api::{PunchCardQuery, RangeQuery};
use fsn_terminal::lookups::Lookups;
use fsn_terminal::model::{
    Board, HistoricStats, Leaderboard, PunchCard, RosterEntry, ValidDates, ValidPhases,
};
use fsn_terminal::route::Route;
use fsn_terminal::state::{AppState, Delta, FetchCommand, FetchOutcome, LoadState, apply_delta};
use fsn_terminal::views::{player_header_lines, player_panel_title};

fn lookups() -> Arc<Lookups> {
    Arc::new(
        Lookups::from_records(
            ValidDates {
                dates: vec![
                    "2025-04-06".to_string(),
                    "2025-04-13".to_string(),
                    "2025-04-20".to_string(),
                ],
            },
            ValidPhases {
                phases: vec![1, 2],
            },
        )
        .expect("lookups"),
    )
}

fn overview_for(player_id: &str) -> HistoricStats {
    HistoricStats {
        player_id: player_id.to_string(),
        player_name: "Mystery".to_string(),
        ..HistoricStats::default()
    }
}

fn roster() -> Vec<RosterEntry> {
    ["1", "2", "3"]
        .into_iter()
        .map(|id| RosterEntry {
            player_id: id.to_string(),
            player_name: format!("Player {id}"),
            last_played: String::new(),
            selected_char: None,
        })
        .collect()
}

fn overview_generation(cmds: &[FetchCommand]) -> u64 {
    cmds.iter()
        .find_map(|cmd| match cmd {
            FetchCommand::Overview { generation, .. } => Some(*generation),
            _ => None,
        })
        .expect("overview command issued")
}

#[test]
fn player_route_requests_latest_date_and_waits_for_overview() {
    let mut state = AppState::new(lookups());
    let cmds = state.navigate(Route::parse("/player/42"));

    assert!(cmds.contains(&FetchCommand::Overview {
        generation: state.overview.generation(),
        query: RangeQuery {
            player_id: "42".to_string(),
            date_start: "2025-04-20".to_string(),
            date_end: "2025-04-20".to_string(),
            phase: 2,
            fetch_range: false,
        },
    }));
    assert!(cmds.contains(&FetchCommand::RankingGraph {
        generation: state.ranking_graph.generation(),
        query: RangeQuery {
            player_id: "42".to_string(),
            date_start: "2025-04-06".to_string(),
            date_end: "2025-04-20".to_string(),
            phase: 2,
            fetch_range: true,
        },
    }));
    assert_eq!(cmds.len(), 3);
    assert!(player_header_lines(&state).is_none());
    assert_eq!(player_panel_title(&state), "Player");

    apply_delta(
        &mut state,
        Delta::Overview {
            generation: overview_generation(&cmds),
            outcome: FetchOutcome::Data(overview_for("42")),
        },
    );
    let header = player_header_lines(&state).expect("header after overview resolves");
    assert_eq!(header[0], "Mystery");
    assert_eq!(player_panel_title(&state), "Player  img/card/card_random.jpg");
}

#[test]
fn changing_date_issues_one_punch_card_request_for_new_date() {
    let mut state = AppState::new(lookups());
    state.navigate(Route::parse("/player/42"));

    let cmds = state.player_date_older();
    let punch_cards: Vec<&PunchCardQuery> = cmds
        .iter()
        .filter_map(|cmd| match cmd {
            FetchCommand::PunchCard { query, .. } => Some(query),
            _ => None,
        })
        .collect();
    assert_eq!(
        punch_cards,
        vec![&PunchCardQuery {
            player_id: "42".to_string(),
            date: "2025-04-13".to_string(),
        }]
    );
    // The graph spans every date, so it does not refetch.
    assert!(
        !cmds
            .iter()
            .any(|cmd| matches!(cmd, FetchCommand::RankingGraph { .. }))
    );
    assert!(
        cmds.iter()
            .any(|cmd| matches!(cmd, FetchCommand::Overview { .. }))
    );

    assert!(state.set_player_date("2025-04-13").is_empty());
}

#[test]
fn stale_punch_card_is_discarded() {
    let mut state = AppState::new(lookups());
    let first = state.navigate(Route::parse("/player/42"));
    let old_generation = first
        .iter()
        .find_map(|cmd| match cmd {
            FetchCommand::PunchCard { generation, .. } => Some(*generation),
            _ => None,
        })
        .expect("punch card command");

    state.player_date_older();
    let stale = PunchCard {
        player_id: "42".to_string(),
        date: "2025-04-20".to_string(),
        total_time: 60,
        ..PunchCard::default()
    };
    apply_delta(
        &mut state,
        Delta::PunchCard {
            generation: old_generation,
            outcome: FetchOutcome::Data(stale),
        },
    );
    assert_eq!(state.punch_card.state, LoadState::Loading);

    let current = state.punch_card.generation();
    apply_delta(
        &mut state,
        Delta::PunchCard {
            generation: current,
            outcome: FetchOutcome::NoData,
        },
    );
    assert_eq!(state.punch_card.state, LoadState::Empty);
}

#[test]
fn reply_for_previous_player_is_discarded() {
    let mut state = AppState::new(lookups());
    let first = state.navigate(Route::parse("/player/1"));
    state.navigate(Route::parse("/player/2"));

    apply_delta(
        &mut state,
        Delta::Overview {
            generation: overview_generation(&first),
            outcome: FetchOutcome::Data(overview_for("1")),
        },
    );
    assert!(player_header_lines(&state).is_none());
}

#[test]
fn failed_request_is_visible_and_logged() {
    let mut state = AppState::new(lookups());
    let cmds = state.navigate(Route::parse("/player/42"));
    apply_delta(
        &mut state,
        Delta::Overview {
            generation: overview_generation(&cmds),
            outcome: FetchOutcome::Failed("connection refused".to_string()),
        },
    );
    assert_eq!(
        state.overview.state,
        LoadState::Failed("connection refused".to_string())
    );
    assert!(
        state
            .logs
            .back()
            .is_some_and(|line| line.starts_with("[WARN] Overview request failed"))
    );
}

#[test]
fn roster_selection_opens_player() {
    let mut state = AppState::new(lookups());
    let cmds = state.navigate(Route::Roster);
    let [FetchCommand::Roster { generation }] = cmds.as_slice() else {
        panic!("expected a single roster command");
    };
    apply_delta(
        &mut state,
        Delta::Roster {
            generation: *generation,
            outcome: FetchOutcome::Data(roster()),
        },
    );

    state.select_next();
    state.select_next();
    state.select_next();
    assert_eq!(state.roster_selected, 2);
    state.select_prev();

    let cmds = state.open_selected_player();
    assert_eq!(state.route, Route::Player {
        player_id: "2".to_string()
    });
    assert_eq!(cmds.len(), 3);
}

#[test]
fn leaderboard_board_toggle_refetches() {
    let mut state = AppState::new(lookups());
    let cmds = state.navigate(Route::Leaderboards);
    assert!(matches!(
        cmds.as_slice(),
        [FetchCommand::Leaderboard { query, .. }] if query.board == Board::MrAll && query.date == "2025-04-20"
    ));

    let cmds = state.toggle_board();
    assert!(matches!(
        cmds.as_slice(),
        [FetchCommand::Leaderboard { query, .. }] if query.board == Board::LpAll
    ));

    let current = state.leaderboard.generation();
    apply_delta(
        &mut state,
        Delta::Leaderboard {
            generation: current,
            outcome: FetchOutcome::Data(Leaderboard::default()),
        },
    );
    assert!(state.leaderboard.loaded().is_some());
    assert!(state.leaderboard_date_newer().is_empty());
}

#[test]
fn path_prompt_navigates() {
    let mut state = AppState::new(lookups());
    state.begin_path_input();
    for ch in "nope".chars() {
        state.push_path_char(ch);
    }
    let cmds = state.submit_path_input();
    assert!(cmds.is_empty());
    assert_eq!(state.route, Route::NotFound {
        path: "/nope".to_string()
    });
    assert!(state.path_input.is_none());
}
