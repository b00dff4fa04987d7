// Recent games widget: the player's last games, most recent first.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use nextplay_core::history::{format_count, format_minutes, matchup_label};
use nextplay_core::model::GameRecord;

/// `games` is `None` while the history request is in flight.
pub fn render(frame: &mut Frame, area: Rect, games: Option<&[GameRecord]>) {
    let block = Block::default().borders(Borders::ALL);

    let games = match games {
        None => {
            let p = Paragraph::new("  Loading game history...")
                .style(Style::default().fg(Color::DarkGray))
                .block(block.title("Recent Games"));
            frame.render_widget(p, area);
            return;
        }
        Some([]) => {
            let p = Paragraph::new("  No games found.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block.title("Recent Games"));
            frame.render_widget(p, area);
            return;
        }
        Some(games) => games,
    };

    let header = Row::new(["Date", "Matchup", "MIN", "PTS", "REB", "AST", "STL", "BLK"])
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = games.iter().map(game_row).collect();

    let widths = [
        Constraint::Length(10),
        Constraint::Min(14),
        Constraint::Length(6),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(4),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block.title(format!("Recent Games ({})", games.len())));
    frame.render_widget(table, area);
}

fn game_row(game: &GameRecord) -> Row<'static> {
    Row::new(vec![
        Cell::from(game.game_date.clone()),
        Cell::from(matchup_label(game)),
        Cell::from(format_minutes(game.minutes)),
        Cell::from(format_count(game.points)),
        Cell::from(format_count(game.rebounds)),
        Cell::from(format_count(game.assists)),
        Cell::from(format_count(game.steals)),
        Cell::from(format_count(game.blocks)),
    ])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
