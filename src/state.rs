use std::collections::VecDeque;
use std::sync::Arc;

use tracing::debug;

use crate::api::{LeaderboardQuery, PunchCardQuery, RangeQuery};
use crate::lookups::Lookups;
use crate::model::{
    Board, ChartMetric, HistoricStats, Leaderboard, PunchCard, RankingGraph, RosterEntry,
};
use crate::route::Route;

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Unloaded,
    Loading,
    Loaded(T),
    /// The backend answered but had nothing for this filter.
    Empty,
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Data(T),
    NoData,
    Failed(String),
}

impl<T> FetchOutcome<T> {
    pub fn from_result(result: crate::error::Result<Option<T>>) -> Self {
        match result {
            Ok(Some(value)) => FetchOutcome::Data(value),
            Ok(None) => FetchOutcome::NoData,
            Err(err) => FetchOutcome::Failed(err.to_string()),
        }
    }
}

/// One loader: the dependency key it last fired for, its state, and a
/// generation that identifies the newest request. Replies carrying any other
/// generation are stale.
#[derive(Debug, Clone)]
pub struct Fetch<K, T> {
    generation: u64,
    key: Option<K>,
    pub state: LoadState<T>,
}

impl<K, T> Default for Fetch<K, T> {
    fn default() -> Self {
        Self {
            generation: 0,
            key: None,
            state: LoadState::Unloaded,
        }
    }
}

impl<K: PartialEq, T> Fetch<K, T> {
    /// True when `key` differs from what the slot last fired for.
    pub fn wants(&self, key: &K) -> bool {
        self.key.as_ref() != Some(key)
    }

    pub fn begin(&mut self, key: K) -> u64 {
        self.generation += 1;
        self.key = Some(key);
        self.state = LoadState::Loading;
        self.generation
    }

    /// Forget the current key and orphan any request in flight.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.key = None;
        self.state = LoadState::Unloaded;
    }

    /// Stores `outcome` if `generation` is current. Returns whether it was kept.
    pub fn resolve(&mut self, generation: u64, outcome: FetchOutcome<T>) -> bool {
        if generation != self.generation || self.key.is_none() {
            return false;
        }
        self.state = match outcome {
            FetchOutcome::Data(value) => LoadState::Loaded(value),
            FetchOutcome::NoData => LoadState::Empty,
            FetchOutcome::Failed(reason) => LoadState::Failed(reason),
        };
        true
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn loaded(&self) -> Option<&T> {
        self.state.loaded()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchCommand {
    Roster {
        generation: u64,
    },
    Overview {
        generation: u64,
        query: RangeQuery,
    },
    PunchCard {
        generation: u64,
        query: PunchCardQuery,
    },
    RankingGraph {
        generation: u64,
        query: RangeQuery,
    },
    Leaderboard {
        generation: u64,
        query: LeaderboardQuery,
    },
}

#[derive(Debug, Clone)]
pub enum Delta {
    Roster {
        generation: u64,
        outcome: FetchOutcome<Vec<RosterEntry>>,
    },
    Overview {
        generation: u64,
        outcome: FetchOutcome<HistoricStats>,
    },
    PunchCard {
        generation: u64,
        outcome: FetchOutcome<PunchCard>,
    },
    RankingGraph {
        generation: u64,
        outcome: FetchOutcome<RankingGraph>,
    },
    Leaderboard {
        generation: u64,
        outcome: FetchOutcome<Leaderboard>,
    },
    Log(String),
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub route: Route,
    pub lookups: Arc<Lookups>,
    pub roster: Fetch<(), Vec<RosterEntry>>,
    pub roster_selected: usize,
    pub player_date: String,
    pub player_phase: u32,
    pub chart_metric: ChartMetric,
    pub overview: Fetch<RangeQuery, HistoricStats>,
    pub punch_card: Fetch<PunchCardQuery, PunchCard>,
    pub ranking_graph: Fetch<RangeQuery, RankingGraph>,
    pub leaderboard_date: String,
    pub board: Board,
    pub leaderboard: Fetch<LeaderboardQuery, Leaderboard>,
    pub leaderboard_scroll: u16,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
    pub path_input: Option<String>,
}

impl AppState {
    pub fn new(lookups: Arc<Lookups>) -> Self {
        let latest_date = lookups.latest_date().to_string();
        let latest_phase = lookups.latest_phase();
        Self {
            route: Route::Roster,
            lookups,
            roster: Fetch::default(),
            roster_selected: 0,
            player_date: latest_date.clone(),
            player_phase: latest_phase,
            chart_metric: ChartMetric::Lp,
            overview: Fetch::default(),
            punch_card: Fetch::default(),
            ranking_graph: Fetch::default(),
            leaderboard_date: latest_date,
            board: Board::MrAll,
            leaderboard: Fetch::default(),
            leaderboard_scroll: 0,
            logs: VecDeque::with_capacity(200),
            help_overlay: false,
            path_input: None,
        }
    }

    /// Enter `route` as a fresh mount: page state resets and its loaders fire.
    pub fn navigate(&mut self, route: Route) -> Vec<FetchCommand> {
        self.push_log(format!("[INFO] Open {}", route.path()));
        self.route = route;
        match self.route.clone() {
            Route::Roster => {
                self.roster.reset();
                self.roster_selected = 0;
                let generation = self.roster.begin(());
                vec![FetchCommand::Roster { generation }]
            }
            Route::Player { .. } => {
                self.overview.reset();
                self.punch_card.reset();
                self.ranking_graph.reset();
                self.player_date = self.lookups.latest_date().to_string();
                self.player_phase = self.lookups.latest_phase();
                self.chart_metric = ChartMetric::Lp;
                self.refresh_player()
            }
            Route::Leaderboards => {
                self.leaderboard.reset();
                self.leaderboard_date = self.lookups.latest_date().to_string();
                self.board = Board::MrAll;
                self.leaderboard_scroll = 0;
                self.refresh_leaderboard()
            }
            Route::NotFound { path } => {
                self.push_log(format!("[WARN] No page at {path}"));
                Vec::new()
            }
        }
    }

    pub fn go_back(&mut self) -> Vec<FetchCommand> {
        if self.route == Route::Roster {
            return Vec::new();
        }
        self.navigate(Route::Roster)
    }

    pub fn player_id(&self) -> Option<&str> {
        match &self.route {
            Route::Player { player_id } => Some(player_id),
            _ => None,
        }
    }

    pub fn overview_query(&self) -> Option<RangeQuery> {
        Some(RangeQuery {
            player_id: self.player_id()?.to_string(),
            date_start: self.player_date.clone(),
            date_end: self.player_date.clone(),
            phase: self.player_phase,
            fetch_range: false,
        })
    }

    pub fn punch_card_query(&self) -> Option<PunchCardQuery> {
        Some(PunchCardQuery {
            player_id: self.player_id()?.to_string(),
            date: self.player_date.clone(),
        })
    }

    pub fn ranking_graph_query(&self) -> Option<RangeQuery> {
        Some(RangeQuery {
            player_id: self.player_id()?.to_string(),
            date_start: self.lookups.earliest_date().to_string(),
            date_end: self.lookups.latest_date().to_string(),
            phase: self.player_phase,
            fetch_range: true,
        })
    }

    pub fn leaderboard_query(&self) -> LeaderboardQuery {
        LeaderboardQuery {
            date: self.leaderboard_date.clone(),
            board: self.board,
        }
    }

    /// Fire every dashboard loader whose dependencies changed.
    fn refresh_player(&mut self) -> Vec<FetchCommand> {
        let mut cmds = Vec::new();
        if let Some(query) = self.overview_query()
            && self.overview.wants(&query)
        {
            let generation = self.overview.begin(query.clone());
            cmds.push(FetchCommand::Overview { generation, query });
        }
        if let Some(query) = self.punch_card_query()
            && self.punch_card.wants(&query)
        {
            let generation = self.punch_card.begin(query.clone());
            cmds.push(FetchCommand::PunchCard { generation, query });
        }
        if let Some(query) = self.ranking_graph_query()
            && self.ranking_graph.wants(&query)
        {
            let generation = self.ranking_graph.begin(query.clone());
            cmds.push(FetchCommand::RankingGraph { generation, query });
        }
        cmds
    }

    fn refresh_leaderboard(&mut self) -> Vec<FetchCommand> {
        if self.route != Route::Leaderboards {
            return Vec::new();
        }
        let query = self.leaderboard_query();
        if !self.leaderboard.wants(&query) {
            return Vec::new();
        }
        let generation = self.leaderboard.begin(query.clone());
        vec![FetchCommand::Leaderboard { generation, query }]
    }

    /// Select a report date on the dashboard. Unknown dates are ignored.
    pub fn set_player_date(&mut self, date: &str) -> Vec<FetchCommand> {
        if self.player_id().is_none() || self.lookups.date_index(date).is_none() {
            return Vec::new();
        }
        self.player_date = date.to_string();
        self.refresh_player()
    }

    pub fn player_date_older(&mut self) -> Vec<FetchCommand> {
        match self.lookups.older_date(&self.player_date).map(str::to_string) {
            Some(date) => self.set_player_date(&date),
            None => Vec::new(),
        }
    }

    pub fn player_date_newer(&mut self) -> Vec<FetchCommand> {
        match self.lookups.newer_date(&self.player_date).map(str::to_string) {
            Some(date) => self.set_player_date(&date),
            None => Vec::new(),
        }
    }

    pub fn cycle_player_phase(&mut self) -> Vec<FetchCommand> {
        if self.player_id().is_none() {
            return Vec::new();
        }
        self.player_phase = self.lookups.next_phase(self.player_phase);
        self.refresh_player()
    }

    pub fn toggle_chart_metric(&mut self) {
        self.chart_metric = self.chart_metric.toggle();
    }

    pub fn set_leaderboard_date(&mut self, date: &str) -> Vec<FetchCommand> {
        if self.lookups.date_index(date).is_none() {
            return Vec::new();
        }
        self.leaderboard_date = date.to_string();
        self.leaderboard_scroll = 0;
        self.refresh_leaderboard()
    }

    pub fn leaderboard_date_older(&mut self) -> Vec<FetchCommand> {
        match self
            .lookups
            .older_date(&self.leaderboard_date)
            .map(str::to_string)
        {
            Some(date) => self.set_leaderboard_date(&date),
            None => Vec::new(),
        }
    }

    pub fn leaderboard_date_newer(&mut self) -> Vec<FetchCommand> {
        match self
            .lookups
            .newer_date(&self.leaderboard_date)
            .map(str::to_string)
        {
            Some(date) => self.set_leaderboard_date(&date),
            None => Vec::new(),
        }
    }

    pub fn toggle_board(&mut self) -> Vec<FetchCommand> {
        self.board = self.board.toggle();
        self.leaderboard_scroll = 0;
        self.refresh_leaderboard()
    }

    pub fn scroll_leaderboard_down(&mut self) {
        let total = self
            .leaderboard
            .loaded()
            .map(|lb| lb.players.len())
            .unwrap_or(0);
        if (self.leaderboard_scroll as usize) + 1 < total {
            self.leaderboard_scroll = self.leaderboard_scroll.saturating_add(1);
        }
    }

    pub fn scroll_leaderboard_up(&mut self) {
        self.leaderboard_scroll = self.leaderboard_scroll.saturating_sub(1);
    }

    pub fn roster_len(&self) -> usize {
        self.roster.loaded().map(Vec::len).unwrap_or(0)
    }

    pub fn selected_roster_entry(&self) -> Option<&RosterEntry> {
        self.roster.loaded()?.get(self.roster_selected)
    }

    pub fn select_next(&mut self) {
        let len = self.roster_len();
        if len == 0 {
            self.roster_selected = 0;
            return;
        }
        self.roster_selected = (self.roster_selected + 1).min(len - 1);
    }

    pub fn select_prev(&mut self) {
        self.roster_selected = self.roster_selected.saturating_sub(1);
    }

    pub fn open_selected_player(&mut self) -> Vec<FetchCommand> {
        let Some(entry) = self.selected_roster_entry() else {
            self.push_log("[INFO] No player selected");
            return Vec::new();
        };
        let player_id = entry.player_id.clone();
        self.navigate(Route::Player { player_id })
    }

    pub fn begin_path_input(&mut self) {
        self.path_input = Some("/".to_string());
    }

    pub fn cancel_path_input(&mut self) {
        self.path_input = None;
    }

    pub fn push_path_char(&mut self, ch: char) {
        if let Some(input) = self.path_input.as_mut()
            && !ch.is_control()
        {
            input.push(ch);
        }
    }

    pub fn pop_path_char(&mut self) {
        if let Some(input) = self.path_input.as_mut() {
            input.pop();
        }
    }

    pub fn submit_path_input(&mut self) -> Vec<FetchCommand> {
        let Some(path) = self.path_input.take() else {
            return Vec::new();
        };
        self.navigate(Route::parse(&path))
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}

/// Applies a reply to `slot`. Returns the console warning for a kept failure.
fn resolve_reply<K: PartialEq, T>(
    slot: &mut Fetch<K, T>,
    label: &str,
    generation: u64,
    outcome: FetchOutcome<T>,
) -> Option<String> {
    let failure = match &outcome {
        FetchOutcome::Failed(reason) => Some(reason.clone()),
        _ => None,
    };
    if !slot.resolve(generation, outcome) {
        debug!(
            label,
            generation,
            current = slot.generation(),
            "discarding stale response"
        );
        return None;
    }
    failure.map(|reason| format!("[WARN] {label} request failed: {reason}"))
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    let warning = match delta {
        Delta::Roster {
            generation,
            outcome,
        } => {
            let warning = resolve_reply(&mut state.roster, "Roster", generation, outcome);
            let len = state.roster_len();
            state.roster_selected = state.roster_selected.min(len.saturating_sub(1));
            warning
        }
        Delta::Overview {
            generation,
            outcome,
        } => resolve_reply(&mut state.overview, "Overview", generation, outcome),
        Delta::PunchCard {
            generation,
            outcome,
        } => resolve_reply(&mut state.punch_card, "Punch card", generation, outcome),
        Delta::RankingGraph {
            generation,
            outcome,
        } => resolve_reply(
            &mut state.ranking_graph,
            "Ranking graph",
            generation,
            outcome,
        ),
        Delta::Leaderboard {
            generation,
            outcome,
        } => resolve_reply(&mut state.leaderboard, "Leaderboard", generation, outcome),
        Delta::Log(msg) => Some(msg),
    };
    if let Some(line) = warning {
        state.push_log(line);
    }
}
