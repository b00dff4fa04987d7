// Screen layout: panel arrangement per workflow step.
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +-------------------------+------------------------+
// | Main Panel               | Sidebar                |
// |   search list /          | +- Recent games ------+|
// |   context form /         | +- Recommendations ---+|
// |   prediction             |    (prediction only)   |
// +-------------------------+------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+
//
// Search uses the full width; the sidebar only exists on the later steps.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use nextplay_core::protocol::Screen;

/// Resolved screen areas. Sidebar areas are empty when the screen has no
/// sidebar.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: workflow breadcrumb, player, notices.
    pub status_bar: Rect,
    pub main_panel: Rect,
    /// Recent games.
    pub side_top: Rect,
    /// Recommendations.
    pub side_bottom: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

pub fn build_layout(area: Rect, screen: &Screen) -> AppLayout {
    // Vertical: status(1) | middle(fill) | help(1)
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(area);

    let status_bar = vertical[0];
    let middle = vertical[1];
    let help_bar = vertical[2];

    let (main_panel, side_top, side_bottom) = match screen {
        Screen::Search(_) => (middle, Rect::default(), Rect::default()),
        Screen::ContextInput(_) => {
            let horizontal = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
                .split(middle);
            (horizontal[0], horizontal[1], Rect::default())
        }
        Screen::Prediction(_) => {
            let horizontal = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(middle);
            let sidebar = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(horizontal[1]);
            (horizontal[0], sidebar[0], sidebar[1])
        }
    };

    AppLayout {
        status_bar,
        main_panel,
        side_top,
        side_bottom,
        help_bar,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
