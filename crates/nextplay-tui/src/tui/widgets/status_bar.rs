// Status bar widget: workflow breadcrumb, current player, latest notice.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use nextplay_core::protocol::Screen;

use crate::tui::ViewState;

/// Workflow steps in order, by screen title.
const STEPS: [&str; 3] = ["Search", "Next Game", "Prediction"];

/// Render the status bar into the given area.
///
/// Layout: [breadcrumb] [player] [notice]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = vec![Span::styled(" NextPlay ", Style::default().fg(Color::Cyan))];
    spans.extend(breadcrumb_spans(state.screen.title()));

    if let Some(player) = player_label(&state.screen) {
        spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled(player, Style::default().fg(Color::White)));
    }

    if let Some(notice) = &state.notice {
        spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled(notice.clone(), Style::default().fg(Color::Yellow)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// "[Search] > [Next Game] > [Prediction]" with the active step highlighted.
pub fn breadcrumb_spans(active: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (i, step) in STEPS.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" > ", Style::default().fg(Color::DarkGray)));
        }
        let style = if *step == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!("[{step}]"), style));
    }
    spans
}

/// "Name (Team)" once a player has been chosen.
fn player_label(screen: &Screen) -> Option<String> {
    let context = match screen {
        Screen::Search(_) => return None,
        Screen::ContextInput(form) => &form.context,
        Screen::Prediction(view) => &view.context,
    };
    Some(format!("{} ({})", context.player_name, context.team_name))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::test_util::{contains, render_lines};
    use nextplay_core::model::PredictionContext;
    use nextplay_core::protocol::{ContextScreen, SearchScreen};

    #[test]
    fn breadcrumb_highlights_active_step() {
        let spans = breadcrumb_spans("Next Game");
        // [Search] " > " [Next Game] " > " [Prediction]
        assert_eq!(spans.len(), 5);
        assert_eq!(spans[2].content, "[Next Game]");
        assert!(spans[2].style.add_modifier.contains(Modifier::BOLD));
        assert!(!spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn steps_match_screen_titles() {
        assert_eq!(STEPS[0], Screen::Search(SearchScreen::default()).title());
    }

    #[test]
    fn shows_player_and_notice() {
        let mut state = ViewState::default();
        state.screen = Screen::ContextInput(ContextScreen {
            context: PredictionContext::for_player("J. Smith", "Los Angeles Lakers"),
            opponents: Vec::new(),
            recent_games: None,
        });
        state.notice = Some("Could not load game history".into());
        let lines = render_lines(140, 1, |f, area| render(f, area, &state));
        assert!(contains(&lines, "J. Smith (Los Angeles Lakers)"));
        assert!(contains(&lines, "Could not load game history"));
    }

    #[test]
    fn render_does_not_panic_with_defaults() {
        let state = ViewState::default();
        let lines = render_lines(80, 1, |f, area| render(f, area, &state));
        assert!(contains(&lines, "[Search]"));
    }
}
