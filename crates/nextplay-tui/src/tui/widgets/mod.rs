// TUI widget modules, one per panel.

pub mod context_form;
pub mod prediction;
pub mod quit_confirm;
pub mod recent_games;
pub mod recommendations;
pub mod search;
pub mod status_bar;

#[cfg(test)]
pub(crate) mod test_util {
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;
    use ratatui::{Frame, Terminal};

    /// Draw with `draw` into a `width` x `height` test terminal and return the
    /// buffer as one string per row.
    pub fn render_lines<F>(width: u16, height: u16, draw: F) -> Vec<String>
    where
        F: FnOnce(&mut Frame, Rect),
    {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| draw(frame, frame.area())).unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect()
    }

    pub fn contains(lines: &[String], needle: &str) -> bool {
        lines.iter().any(|l| l.contains(needle))
    }
}
