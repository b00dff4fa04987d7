// Prediction widget: matchup header over the projected box score.
//
// Counts are rounded for display and the 3PT/FT percentages are recomputed
// from the rounded pair (see `nextplay_core::stats`).

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

use nextplay_core::model::PredictionContext;
use nextplay_core::protocol::{PredictionScreen, PredictionStatus};
use nextplay_core::stats::{DisplayBox, ShotLine};

pub fn render(frame: &mut Frame, area: Rect, view: &PredictionScreen) {
    let [header_area, body_area] =
        Layout::vertical([Constraint::Length(4), Constraint::Min(3)]).areas(area);

    let header = Paragraph::new(header_lines(&view.context))
        .block(Block::default().borders(Borders::ALL).title("Matchup"));
    frame.render_widget(header, header_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Projected Box Score");

    match &view.prediction {
        PredictionStatus::Loading => {
            let p = Paragraph::new("  Loading prediction...")
                .style(Style::default().fg(Color::Yellow))
                .block(block);
            frame.render_widget(p, body_area);
        }
        PredictionStatus::Unavailable(reason) => {
            let p = Paragraph::new(vec![
                Line::from(Span::styled(
                    "  Prediction unavailable",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!("  {reason}"),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .wrap(Wrap { trim: false })
            .block(block.border_style(Style::default().fg(Color::Red)));
            frame.render_widget(p, body_area);
        }
        PredictionStatus::Ready(result) => {
            let rows: Vec<Row> = box_rows(&DisplayBox::from_stats(&result.predictions))
                .into_iter()
                .map(|(label, value)| {
                    Row::new(vec![
                        Cell::from(Span::styled(label, Style::default().fg(Color::Gray))),
                        Cell::from(Span::styled(
                            value,
                            Style::default().add_modifier(Modifier::BOLD),
                        )),
                    ])
                })
                .collect();
            let table = Table::new(rows, [Constraint::Length(12), Constraint::Min(10)])
                .block(block.border_style(Style::default().fg(Color::Green)));
            frame.render_widget(table, body_area);
        }
    }
}

fn header_lines(context: &PredictionContext) -> Vec<Line<'static>> {
    let opponent = if context.opponent.is_empty() {
        "(no opponent)".to_string()
    } else {
        context.opponent.clone()
    };
    let date = if context.date.is_empty() {
        "(no date)".to_string()
    } else {
        context.date.clone()
    };
    vec![
        Line::from(vec![
            Span::styled(
                context.player_name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" vs "),
            Span::styled(opponent, Style::default().fg(Color::Cyan)),
        ]),
        Line::from(Span::styled(
            format!("{date} | {}", context.home.label()),
            Style::default().fg(Color::Gray),
        )),
    ]
}

/// Label/value pairs in display order.
pub fn box_rows(line: &DisplayBox) -> Vec<(&'static str, String)> {
    vec![
        ("Minutes", format!("{:.1}", line.minutes)),
        ("Points", line.points.to_string()),
        ("Rebounds", line.rebounds.to_string()),
        ("Assists", line.assists.to_string()),
        ("Steals", line.steals.to_string()),
        ("Blocks", line.blocks.to_string()),
        ("FG%", format!("{}%", line.field_goal_percent)),
        ("3PT", shot_text(&line.threes)),
        ("FT", shot_text(&line.free_throws)),
        ("Fouls", line.fouls.to_string()),
        ("Turnovers", line.turnovers.to_string()),
    ]
}

/// "3/7 (43%)"
fn shot_text(shots: &ShotLine) -> String {
    format!("{}/{} ({}%)", shots.made, shots.attempted, shots.percent())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
