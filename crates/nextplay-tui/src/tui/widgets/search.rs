// Search widget: query box over the player table.
//
// Rows come from `SearchScreen::visible`: server results while they still
// match the typed query, otherwise the instant local filter.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;

use nextplay_core::protocol::{Screen, SearchScreen};

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let Screen::Search(search) = &state.screen else {
        return;
    };
    let [query_area, table_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(3)]).areas(area);

    render_query(frame, query_area, state);

    let Some(roster) = &search.roster else {
        let loading = Paragraph::new("  Loading players...")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title("Players"));
        frame.render_widget(loading, table_area);
        return;
    };

    let visible = search.visible();
    let header = Row::new(vec![
        Cell::from("Name"),
        Cell::from("Team"),
        Cell::from("Pos"),
    ])
    .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = visible
        .iter()
        .map(|p| {
            Row::new(vec![
                Cell::from(p.name.clone()),
                Cell::from(p.team.clone()),
                Cell::from(p.position.clone().unwrap_or_else(|| "--".into())),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(20),
        Constraint::Min(22),
        Constraint::Length(5),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(build_title(search, visible.len(), roster.len())),
        )
        .row_highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");

    let mut table_state = TableState::default()
        .with_selected((!visible.is_empty()).then_some(state.selected));
    frame.render_stateful_widget(table, table_area, &mut table_state);
}

fn render_query(frame: &mut Frame, area: Rect, state: &ViewState) {
    let (border, cursor) = if state.search_typing {
        (Style::default().fg(Color::Cyan), "_")
    } else {
        (Style::default(), "")
    };
    let line = if state.query.is_empty() && !state.search_typing {
        Line::from(Span::styled(
            "Name or team (press / to type)",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(format!("{}{}", state.query, cursor))
    };
    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title("Search"),
    );
    frame.render_widget(paragraph, area);
}

/// "Players (shown/total)", tagged when server results are showing.
pub fn build_title(search: &SearchScreen, shown: usize, total: usize) -> String {
    let server = matches!(&search.remote, Some(r) if r.query == search.query);
    if server {
        format!("Players ({shown}) [server search]")
    } else {
        format!("Players ({shown}/{total})")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
