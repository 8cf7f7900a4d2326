use crate::characters::char_card;
use crate::format::{add_commas, convert_to_hours, format_last_played, league_rank, punch_card_number};
use crate::lookups::Lookups;
use crate::model::{HistoricStats, Leaderboard, PunchCard, RosterEntry};
use crate::route::Route;
use crate::stamp::select_stamp;
use crate::state::{AppState, LoadState};

pub const SITE_TITLE: &str = "FIGHT STREETER NETWORK";
pub const BUCKLER_PROFILE_URL: &str = "https://www.streetfighter.com/6/buckler/profile/";
pub const PUNCH_CARD_NO_DATA: &str = "No punch card data logged for this time period!";
pub const OVERVIEW_NO_DATA: &str = "No stats recorded for this player on this date.";
pub const CHART_NO_DATA: &str = "No ranking history for this phase.";
pub const ROSTER_NO_DATA: &str = "No club members found.";
pub const LEADERBOARD_NO_DATA: &str = "No leaderboard for this date.";

pub fn site_header_text(route: &Route) -> String {
    let roster = if matches!(route, Route::Roster) {
        "[Club Roster]"
    } else {
        " Club Roster "
    };
    let boards = if matches!(route, Route::Leaderboards) {
        "[Leaderboards]"
    } else {
        " Leaderboards "
    };
    format!("{SITE_TITLE}  {roster} {boards}  {}", route.path())
}

/// Message to show in place of a slot's content, or `None` once loaded.
pub fn placeholder<T>(state: &LoadState<T>, no_data: &str) -> Option<String> {
    match state {
        LoadState::Loaded(_) => None,
        LoadState::Unloaded => Some(String::new()),
        LoadState::Loading => Some("Loading...".to_string()),
        LoadState::Empty => Some(no_data.to_string()),
        LoadState::Failed(reason) => Some(format!("Could not load: {reason}")),
    }
}

pub fn player_card_lines(entry: &RosterEntry) -> [String; 3] {
    let card = char_card(entry.selected_char.as_deref());
    [
        format!("[{}] {}", card.tag, card.name),
        entry.player_name.clone(),
        format!("Last Played {}", format_last_played(&entry.last_played)),
    ]
}

/// The dashboard heading. Nothing renders until the overview has resolved.
pub fn player_header_lines(state: &AppState) -> Option<Vec<String>> {
    state.overview.loaded().map(summary_header_lines)
}

/// Panel title naming the card art for the current character.
pub fn player_panel_title(state: &AppState) -> String {
    match state.overview.loaded() {
        Some(overview) => format!(
            "Player  {}",
            char_card(overview.selected_character.as_deref()).asset
        ),
        None => "Player".to_string(),
    }
}

pub fn summary_header_lines(overview: &HistoricStats) -> Vec<String> {
    let card = char_card(overview.selected_character.as_deref());
    let character = overview.selected_character.as_deref().unwrap_or(card.name);
    let mut lines = vec![
        overview.player_name.clone(),
        format!(
            "CFN ID#: {}  {BUCKLER_PROFILE_URL}{}",
            overview.player_id, overview.player_id
        ),
    ];
    if !overview.profile_tagline.is_empty() {
        lines.push(overview.profile_tagline.clone());
    }
    lines.push(format!("[{}] Current character: {character}", card.tag));
    if let Some(lp) = overview.selected_lp {
        let mr = overview
            .selected_mr
            .filter(|mr| *mr > 0)
            .map(|mr| format!("  MR {}", add_commas(Some(mr))))
            .unwrap_or_default();
        lines.push(format!(
            "LP {} ({}){mr}",
            add_commas(Some(lp)),
            league_rank(lp)
        ));
    }
    if !overview.title_text.is_empty() {
        lines.push(overview.title_text.clone());
    }
    lines
}

pub fn summary_match_counts(overview: &HistoricStats) -> [(&'static str, String); 3] {
    [
        ("Casual", add_commas(overview.casual_matches)),
        ("Hub", add_commas(overview.hub_matches)),
        ("Ranked", add_commas(overview.ranked_matches)),
    ]
}

pub fn summary_social_rows(overview: &HistoricStats) -> [(&'static str, String); 2] {
    [
        ("Likes", format!("{} 👍", add_commas(overview.thumbs))),
        ("Total Kudos", add_commas(overview.total_kudos)),
    ]
}

pub fn time_played_rows(overview: &HistoricStats) -> [(&'static str, String); 8] {
    [
        ("Arcade Time", convert_to_hours(overview.arcade_time)),
        ("Casual Time", convert_to_hours(overview.casual_time)),
        ("Custom Time", convert_to_hours(overview.custom_time)),
        ("Extreme Time", convert_to_hours(overview.extreme_time)),
        ("Practice Time", convert_to_hours(overview.practice_time)),
        ("Ranked Time", convert_to_hours(overview.ranked_time)),
        ("Versus Time", convert_to_hours(overview.versus_time)),
        ("World Tour Time", convert_to_hours(overview.wt_time)),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PunchCardLines {
    pub name: String,
    pub logged: String,
    pub period: String,
    pub totals: Vec<String>,
    pub stamp: String,
    pub rank_changes: Vec<String>,
    pub footer_title: &'static str,
    pub footer_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PunchCardView {
    NoData,
    Card(PunchCardLines),
}

pub fn punch_card_view(card: &PunchCard) -> PunchCardView {
    if card.is_empty() {
        return PunchCardView::NoData;
    }
    let stamp = select_stamp(card);
    PunchCardView::Card(PunchCardLines {
        name: card.player_name.clone(),
        logged: convert_to_hours(Some(card.total_time)),
        period: format!(
            "Activity measured from {} to {}",
            card.prev_date, card.date
        ),
        totals: punch_card_totals(card),
        stamp: format!("{} {}", stamp.category.glyph(), stamp.label),
        rank_changes: rank_change_lines(card),
        footer_title: "PUNCH CARD",
        footer_number: punch_card_number(&card.prev_date, &card.player_id),
    })
}

fn matches_line(label: &str, matches: i64, seconds: i64) -> String {
    format!("{label}: {matches} ({})", convert_to_hours(Some(seconds)))
}

pub fn punch_card_totals(card: &PunchCard) -> Vec<String> {
    let mut lines = Vec::new();
    if card.thumbs_gained > 0 {
        lines.push(format!("+{} 👍", card.thumbs_gained));
    }
    if card.kudos_gained > 1 {
        lines.push(format!("Kudos: +{}", add_commas(Some(card.kudos_gained))));
    }
    if card.total_matches > 0 {
        lines.push(matches_line("Total Matches", card.total_matches, card.total_time));
    }
    if card.hub_matches > 0 {
        lines.push(matches_line("Hub Matches", card.hub_matches, card.hub_time));
    }
    if card.casual_matches > 0 {
        lines.push(matches_line("Casual Matches", card.casual_matches, card.casual_time));
    }
    if card.ranked_matches > 0 {
        lines.push(matches_line("Ranked Matches", card.ranked_matches, card.ranked_time));
    }
    if card.custom_matches > 0 {
        lines.push(matches_line(
            "Custom Room Matches",
            card.custom_matches,
            card.custom_time,
        ));
    }
    if card.practice_time > 1 {
        lines.push(format!("Practice Time: {}", convert_to_hours(Some(card.practice_time))));
    }
    if card.versus_time > 1 {
        lines.push(format!("Versus Time: {}", convert_to_hours(Some(card.versus_time))));
    }
    if card.extreme_time > 1 {
        lines.push(format!("Extreme Time: {}", convert_to_hours(Some(card.extreme_time))));
    }
    if card.arcade_time > 0 {
        lines.push(format!("Arcade Time: {}", convert_to_hours(Some(card.arcade_time))));
    }
    if card.wt_time > 0 {
        lines.push(format!("World Tour Time: {}", convert_to_hours(Some(card.wt_time))));
    }
    lines
}

/// Characters whose LP or MR moved during the period.
pub fn rank_change_lines(card: &PunchCard) -> Vec<String> {
    card.ranked_changes
        .iter()
        .filter(|(_, change)| change.lp != 0 || change.mr != 0)
        .map(|(name, change)| {
            let tag = char_card(Some(name)).tag;
            format!("[{tag}] {name}: LP {:+}  MR {:+}", change.lp, change.mr)
        })
        .collect()
}

pub fn date_selector_text(lookups: &Lookups, date: &str) -> String {
    let older = if lookups.older_date(date).is_some() {
        "◀ Previous"
    } else {
        "          "
    };
    let newer = if lookups.newer_date(date).is_some() {
        "Next ▶"
    } else {
        "      "
    };
    format!("{older} | {date} | {newer}")
}

pub fn phase_selector_text(lookups: &Lookups, phase: u32) -> String {
    if lookups.phases().len() > 1 {
        format!("Phase {phase} (of {})", lookups.phases().len())
    } else {
        format!("Phase {phase}")
    }
}

pub fn leaderboard_rows(board: &Leaderboard) -> Vec<[String; 4]> {
    board
        .players
        .iter()
        .enumerate()
        .map(|(idx, player)| {
            let card = char_card(player.character.as_deref());
            [
                format!("{}", idx + 1),
                player.player_name.clone(),
                format!("[{}] {}", card.tag, player.character.as_deref().unwrap_or(card.name)),
                player.value.clone(),
            ]
        })
        .collect()
}
