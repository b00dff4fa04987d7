// Recommendations widget: other players from either side of the matchup.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use nextplay_core::protocol::Screen;

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let Screen::Prediction(view) = &state.screen else {
        return;
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Also in this game");

    let Some(recs) = &view.recommendations else {
        let p = Paragraph::new("  Loading roster...")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(p, area);
        return;
    };
    if recs.is_empty() {
        let p = Paragraph::new("  No other players for this matchup.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(p, area);
        return;
    }

    let own_team = view.context.team_name.as_str();
    let items: Vec<ListItem> = recs
        .iter()
        .map(|p| {
            let side = if p.team == own_team { Color::Green } else { Color::Cyan };
            ListItem::new(Line::from(vec![
                Span::raw(p.name.clone()),
                Span::styled(format!("  {}", p.team), Style::default().fg(side)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");

    let mut list_state = ListState::default().with_selected(Some(state.selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
