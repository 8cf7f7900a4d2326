use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::widgets::{Axis, Block, Borders, Chart, Clear, Dataset, GraphType, Paragraph, Wrap};

use fsn_terminal::characters::char_card;
use fsn_terminal::route::Route;
use fsn_terminal::state::AppState;
use fsn_terminal::views::{
    self, CHART_NO_DATA, LEADERBOARD_NO_DATA, OVERVIEW_NO_DATA, PUNCH_CARD_NO_DATA,
    PunchCardView, ROSTER_NO_DATA,
};

pub fn ui(frame: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(views::site_header_text(&state.route))
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match &state.route {
        Route::Roster => render_roster(frame, chunks[1], state),
        Route::Player { .. } => render_player(frame, chunks[1], state),
        Route::Leaderboards => render_leaderboards(frame, chunks[1], state),
        Route::NotFound { path } => render_not_found(frame, chunks[1], path),
    }

    let console = Paragraph::new(console_text(state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = match &state.path_input {
        Some(input) => Paragraph::new(format!("Go to: {input}_"))
            .style(Style::default().fg(Color::Yellow)),
        None => Paragraph::new(footer_text(&state.route)),
    };
    frame.render_widget(footer, chunks[3]);

    if state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn footer_text(route: &Route) -> &'static str {
    match route {
        Route::Roster => "j/k Move | Enter Open | L Leaderboards | / Go to | ? Help | q Quit",
        Route::Player { .. } => {
            "h/l Date | p Phase | m LP/MR | b Back | / Go to | ? Help | q Quit"
        }
        Route::Leaderboards => {
            "h/l Date | t Board | j/k Scroll | b Back | / Go to | ? Help | q Quit"
        }
        Route::NotFound { .. } => "r Roster | L Leaderboards | / Go to | q Quit",
    }
}

fn dim(text: impl Into<String>) -> Paragraph<'static> {
    Paragraph::new(text.into()).style(Style::default().fg(Color::DarkGray))
}

fn render_roster(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().title("Club Roster").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(roster) = state.roster.loaded() else {
        let msg = views::placeholder(&state.roster.state, ROSTER_NO_DATA).unwrap_or_default();
        frame.render_widget(dim(msg), inner);
        return;
    };

    const CARD_WIDTH: u16 = 30;
    const CARD_HEIGHT: u16 = 5;
    if inner.height < CARD_HEIGHT || inner.width < CARD_WIDTH {
        frame.render_widget(dim("Roster needs more room"), inner);
        return;
    }

    let per_row = (inner.width / CARD_WIDTH).max(1) as usize;
    let total_rows = roster.len().div_ceil(per_row);
    let visible_rows = (inner.height / CARD_HEIGHT) as usize;
    let (start, end) = visible_range(state.roster_selected / per_row, total_rows, visible_rows);

    for (i, row) in (start..end).enumerate() {
        for col in 0..per_row {
            let idx = row * per_row + col;
            let Some(entry) = roster.get(idx) else {
                break;
            };
            let card_area = Rect {
                x: inner.x + (col as u16) * CARD_WIDTH,
                y: inner.y + (i as u16) * CARD_HEIGHT,
                width: CARD_WIDTH,
                height: CARD_HEIGHT,
            };
            let selected = idx == state.roster_selected;
            let accent = char_card(entry.selected_char.as_deref()).color;
            let border = if selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(accent)
            };
            let [character, name, last_played] = views::player_card_lines(entry);
            let card = Paragraph::new(vec![
                Line::styled(character, Style::default().fg(accent)),
                Line::styled(name, Style::default().add_modifier(Modifier::BOLD)),
                Line::styled(last_played, Style::default().fg(Color::Gray)),
            ])
            .block(Block::default().borders(Borders::ALL).border_style(border));
            frame.render_widget(card, card_area);
        }
    }
}

fn render_player(frame: &mut Frame, area: Rect, state: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9),
            Constraint::Length(1),
            Constraint::Min(8),
        ])
        .split(area);

    let header = match views::player_header_lines(state) {
        Some(lines) => Paragraph::new(lines.join("\n")),
        None => dim(
            views::placeholder(&state.overview.state, OVERVIEW_NO_DATA).unwrap_or_default(),
        ),
    };
    frame.render_widget(
        header
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(views::player_panel_title(state))
                    .borders(Borders::ALL),
            ),
        rows[0],
    );

    let selectors = format!(
        " {}    {}    Chart: {}",
        views::date_selector_text(&state.lookups, &state.player_date),
        views::phase_selector_text(&state.lookups, state.player_phase),
        state.chart_metric.label()
    );
    frame.render_widget(
        Paragraph::new(selectors).style(Style::default().fg(Color::Cyan)),
        rows[1],
    );

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(34),
            Constraint::Length(46),
            Constraint::Min(30),
        ])
        .split(rows[2]);

    render_summary_table(frame, columns[0], state);
    render_punch_card(frame, columns[1], state);
    render_ranking_chart(frame, columns[2], state);
}

fn render_summary_table(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().title("Summary").borders(Borders::ALL);
    let Some(overview) = state.overview.loaded() else {
        let msg = views::placeholder(&state.overview.state, OVERVIEW_NO_DATA).unwrap_or_default();
        frame.render_widget(dim(msg).block(block), area);
        return;
    };

    let mut lines = vec![Line::styled(
        "Matches",
        Style::default().add_modifier(Modifier::BOLD),
    )];
    for (label, value) in views::summary_match_counts(overview) {
        lines.push(Line::from(format!("  {label:<16}{value:>12}")));
    }
    for (label, value) in views::summary_social_rows(overview) {
        lines.push(Line::from(format!("{label:<18}{value:>12}")));
    }
    lines.push(Line::styled(
        "Time Played",
        Style::default().add_modifier(Modifier::BOLD),
    ));
    for (label, value) in views::time_played_rows(overview) {
        lines.push(Line::from(format!("  {label:<16}{value:>12}")));
    }
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_punch_card(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().title("Punch Card").borders(Borders::ALL);
    let Some(card) = state.punch_card.loaded() else {
        let msg =
            views::placeholder(&state.punch_card.state, PUNCH_CARD_NO_DATA).unwrap_or_default();
        frame.render_widget(dim(msg).block(block), area);
        return;
    };

    let lines = match views::punch_card_view(card) {
        PunchCardView::NoData => {
            frame.render_widget(dim(PUNCH_CARD_NO_DATA).block(block), area);
            return;
        }
        PunchCardView::Card(lines) => lines,
    };

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut text = vec![
        Line::from(vec![Span::styled("NAME    ", bold), Span::raw(lines.name)]),
        Line::from(vec![Span::styled("LOGGED  ", bold), Span::raw(lines.logged)]),
        Line::styled(lines.period, Style::default().fg(Color::Gray)),
        Line::raw(""),
    ];
    text.extend(lines.totals.into_iter().map(Line::from));
    text.push(Line::raw(""));
    text.push(Line::styled(
        lines.stamp,
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    ));
    text.extend(lines.rank_changes.into_iter().map(Line::from));
    text.push(Line::raw(""));
    text.push(Line::from(vec![
        Span::styled(lines.footer_title, bold),
        Span::raw("  "),
        Span::raw(lines.footer_number),
    ]));
    frame.render_widget(
        Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .block(block),
        area,
    );
}

fn render_ranking_chart(frame: &mut Frame, area: Rect, state: &AppState) {
    let title = format!("Ranking: {}", state.chart_metric.label());
    let block = Block::default().title(title).borders(Borders::ALL);
    let Some(graph) = state.ranking_graph.loaded() else {
        let msg =
            views::placeholder(&state.ranking_graph.state, CHART_NO_DATA).unwrap_or_default();
        frame.render_widget(dim(msg).block(block), area);
        return;
    };
    let Some(payload) = graph.chart(state.chart_metric) else {
        frame.render_widget(dim(CHART_NO_DATA).block(block), area);
        return;
    };
    let Some((lo, hi)) = payload.y_bounds() else {
        frame.render_widget(dim(CHART_NO_DATA).block(block), area);
        return;
    };

    let labels = payload.labels();
    let series: Vec<(String, Color, Vec<(f64, f64)>)> = payload
        .traces
        .iter()
        .map(|trace| {
            (
                trace.name.clone(),
                char_card(Some(&trace.name)).color,
                trace.points(&labels),
            )
        })
        .collect();
    let datasets = series
        .iter()
        .map(|(name, color, points)| {
            Dataset::default()
                .name(name.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(*color))
                .data(points)
        })
        .collect::<Vec<_>>();

    let x_max = labels.len().saturating_sub(1).max(1) as f64;
    let x_labels = match labels.as_slice() {
        [] => Vec::new(),
        [only] => vec![Span::raw(only.clone())],
        [first, .., last] => vec![
            Span::raw(first.clone()),
            Span::raw(labels[labels.len() / 2].clone()),
            Span::raw(last.clone()),
        ],
    };
    let pad = ((hi - lo) * 0.05).max(1.0);
    let (y_lo, y_hi) = (lo - pad, hi + pad);

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([y_lo, y_hi])
                .labels(vec![
                    Span::raw(format!("{y_lo:.0}")),
                    Span::raw(format!("{:.0}", (y_lo + y_hi) / 2.0)),
                    Span::raw(format!("{y_hi:.0}")),
                ]),
        );
    frame.render_widget(chart, area);
}

fn render_leaderboards(frame: &mut Frame, area: Rect, state: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let selectors = format!(
        " {}    Board: {}",
        views::date_selector_text(&state.lookups, &state.leaderboard_date),
        state.board.label()
    );
    frame.render_widget(
        Paragraph::new(selectors).style(Style::default().fg(Color::Cyan)),
        rows[0],
    );

    let title = state
        .leaderboard
        .loaded()
        .map(|lb| {
            if lb.desc.is_empty() {
                lb.name.clone()
            } else {
                format!("{} - {}", lb.name, lb.desc)
            }
        })
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "Leaderboard".to_string());
    let block = Block::default().title(title).borders(Borders::ALL);

    let Some(board) = state.leaderboard.loaded() else {
        let msg =
            views::placeholder(&state.leaderboard.state, LEADERBOARD_NO_DATA).unwrap_or_default();
        frame.render_widget(dim(msg).block(block), rows[1]);
        return;
    };

    let mut lines = vec![Line::styled(
        format!("{:>4}  {:<22}{:<20}{:>10}", "#", "Player", "Character", "Value"),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    for [rank, name, character, value] in views::leaderboard_rows(board) {
        lines.push(Line::from(format!(
            "{rank:>4}  {name:<22}{character:<20}{value:>10}"
        )));
    }
    if lines.len() == 1 {
        lines.push(Line::styled(
            LEADERBOARD_NO_DATA,
            Style::default().fg(Color::DarkGray),
        ));
    }
    let body = Paragraph::new(lines)
        .scroll((state.leaderboard_scroll, 0))
        .block(block);
    frame.render_widget(body, rows[1]);
}

fn render_not_found(frame: &mut Frame, area: Rect, path: &str) {
    let text = format!(
        "404\n\nNothing lives at {path}.\n\nPress r for the club roster or L for the leaderboards."
    );
    let body = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().title("Not Found").borders(Borders::ALL));
    frame.render_widget(body, area);
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No alerts yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Fight Streeter Network - Help",
        "",
        "Global:",
        "  /            Go to a path (/, /roster, /leaderboards, /player/<id>)",
        "  r            Club roster",
        "  L            Leaderboards",
        "  b / Esc      Back to roster",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Roster:",
        "  j/k or ↑/↓   Move",
        "  Enter        Open player",
        "",
        "Player:",
        "  h/l or ←/→   Older / newer date",
        "  p            Cycle phase",
        "  m            Toggle LP / MR chart",
        "",
        "Leaderboards:",
        "  h/l or ←/→   Older / newer date",
        "  t            Toggle MR / LP board",
        "  j/k or ↑/↓   Scroll",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_range_keeps_selection_in_window() {
        assert_eq!(visible_range(0, 0, 4), (0, 0));
        assert_eq!(visible_range(2, 3, 4), (0, 3));
        assert_eq!(visible_range(9, 10, 4), (6, 10));
        assert_eq!(visible_range(5, 10, 4), (3, 7));
    }
}
