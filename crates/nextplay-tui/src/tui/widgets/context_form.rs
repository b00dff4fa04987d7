// Context form widget: opponent, date and home/away for the next game.
//
// Shows the locally edited `FormState`. The date is free text; a parsed hint
// is shown beside it but never blocks submission.

use chrono::NaiveDate;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use nextplay_core::protocol::Screen;

use crate::tui::{FormField, ViewState};

/// Format the hint recognizes.
const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let Screen::ContextInput(form) = &state.screen else {
        return;
    };

    let opponent = state
        .form
        .opponent
        .and_then(|i| form.opponents.get(i).copied())
        .unwrap_or("(choose with Left/Right)");
    let date = if state.form.date.is_empty() {
        Span::styled(
            state.today.format(DATE_FORMAT).to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::raw(state.form.date.clone())
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Player    ", Style::default().fg(Color::Gray)),
            Span::styled(
                form.context.player_name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" ({})", form.context.team_name)),
        ]),
        Line::raw(""),
        field_line("Opponent", Span::raw(opponent), state.form.field == FormField::Opponent),
        field_line("Date", date, state.form.field == FormField::Date),
        Line::from(Span::styled(
            format!("          {}", date_hint(&state.form.date, state.today)),
            Style::default().fg(Color::DarkGray),
        )),
        field_line(
            "Home/Away",
            Span::raw(state.form.home.label()),
            state.form.field == FormField::Home,
        ),
        Line::raw(""),
    ];
    lines.push(Line::from(Span::styled(
        "Enter: predict this matchup",
        Style::default().fg(Color::Green),
    )));

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Next Game"));
    frame.render_widget(paragraph, area);
}

fn field_line(label: &'static str, value: Span<'static>, focused: bool) -> Line<'static> {
    let marker = if focused { "> " } else { "  " };
    let label_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    Line::from(vec![
        Span::styled(format!("{marker}{label:<8}"), label_style),
        value,
    ])
}

/// One-line reading of the typed date.
pub fn date_hint(text: &str, today: NaiveDate) -> String {
    let text = text.trim();
    if text.is_empty() {
        return format!("blank; Right fills in {}", today.format(DATE_FORMAT));
    }
    match NaiveDate::parse_from_str(text, DATE_FORMAT) {
        Ok(date) => {
            let days = (date - today).num_days();
            let when = match days {
                0 => "today".to_string(),
                1 => "tomorrow".to_string(),
                d if d > 1 => format!("in {d} days"),
                d => format!("{} days ago", -d),
            };
            format!("{} ({when})", date.format("%a %b %-d, %Y"))
        }
        Err(_) => "not YYYY-MM-DD; sent as typed".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
