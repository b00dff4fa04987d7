// TUI: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` holding the latest workflow snapshot plus the
// purely local bits (cursor, text being typed, form focus). The workflow pushes
// `UiUpdate` messages over an mpsc channel; the TUI applies them to
// `ViewState` and re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use chrono::NaiveDate;
use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::debug;

use nextplay_core::model::{HomeFlag, PlayerSummary, PredictionContext};
use nextplay_core::protocol::{
    Screen, SearchScreen, UiUpdate, UserCommand, WorkflowSnapshot,
};

use layout::{build_layout, AppLayout};

// ---------------------------------------------------------------------------
// FormState
// ---------------------------------------------------------------------------

/// Which context-form field has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Opponent,
    Date,
    Home,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Opponent => FormField::Date,
            FormField::Date => FormField::Home,
            FormField::Home => FormField::Opponent,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Opponent => FormField::Home,
            FormField::Date => FormField::Opponent,
            FormField::Home => FormField::Date,
        }
    }
}

/// Local copy of the matchup being edited.
///
/// Keys are applied here first and forwarded as edits, so fast typing never
/// races the workflow's echo. Reseeded from the snapshot whenever a new
/// workflow instance starts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub field: FormField,
    /// Index into the screen's opponent choices.
    pub opponent: Option<usize>,
    pub date: String,
    pub home: HomeFlag,
}

impl FormState {
    fn seed(context: &PredictionContext, opponents: &[&'static str]) -> Self {
        FormState {
            field: FormField::Opponent,
            opponent: opponents.iter().position(|o| *o == context.opponent),
            date: context.date.clone(),
            home: context.home,
        }
    }
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state for rendering.
pub struct ViewState {
    /// Latest screen from the workflow.
    pub screen: Screen,
    /// Degraded-fetch warning for the status bar.
    pub notice: Option<String>,
    pub generation: u64,
    /// Highlighted row in the search list or recommendation list.
    pub selected: usize,
    /// Search text; authoritative over the snapshot's copy.
    pub query: String,
    /// Whether keys go to the search box.
    pub search_typing: bool,
    pub form: FormState,
    pub confirm_quit: bool,
    /// Date suggested as the form's placeholder.
    pub today: NaiveDate,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            screen: Screen::Search(SearchScreen::default()),
            notice: None,
            generation: 0,
            selected: 0,
            query: String::new(),
            search_typing: true,
            form: FormState::default(),
            confirm_quit: false,
            today: chrono::Local::now().date_naive(),
        }
    }
}

impl ViewState {
    /// Apply a full snapshot from the workflow.
    ///
    /// A new generation resets every local field; within one generation the
    /// locally typed query wins over the echoed one.
    pub fn apply_snapshot(&mut self, snapshot: WorkflowSnapshot) {
        let new_instance = snapshot.generation != self.generation;
        self.generation = snapshot.generation;
        self.notice = snapshot.notice;
        self.screen = snapshot.screen;

        if new_instance {
            debug!("New workflow instance {} ({})", self.generation, self.screen.title());
            self.selected = 0;
            self.confirm_quit = false;
            match &self.screen {
                Screen::Search(search) => {
                    self.query = search.query.clone();
                    self.search_typing = true;
                }
                Screen::ContextInput(form) => {
                    self.form = FormState::seed(&form.context, &form.opponents);
                }
                Screen::Prediction(view) => {
                    self.form = FormState::seed(&view.context, &view.opponents);
                }
            }
        } else if let Screen::Search(search) = &mut self.screen {
            search.query = self.query.clone();
        }

        self.clamp_selection();
    }

    /// Replace the search text locally.
    pub fn set_query(&mut self, query: String) {
        if let Screen::Search(search) = &mut self.screen {
            search.query = query.clone();
        }
        self.query = query;
        self.selected = 0;
    }

    /// Rows the cursor moves over on the current screen.
    pub fn selectable(&self) -> Vec<&PlayerSummary> {
        match &self.screen {
            Screen::Search(search) => search.visible(),
            Screen::Prediction(view) => view
                .recommendations
                .as_deref()
                .map(|recs| recs.iter().collect())
                .unwrap_or_default(),
            Screen::ContextInput(_) => Vec::new(),
        }
    }

    pub fn selected_player(&self) -> Option<&PlayerSummary> {
        self.selectable().get(self.selected).copied()
    }

    /// Opponent choices on the current screen.
    pub fn opponents(&self) -> &[&'static str] {
        match &self.screen {
            Screen::ContextInput(form) => &form.opponents,
            Screen::Prediction(view) => &view.opponents,
            Screen::Search(_) => &[],
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.selectable().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::Snapshot(snapshot) => state.apply_snapshot(*snapshot),
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete frame for the current screen.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area(), &state.screen);

    widgets::status_bar::render(frame, layout.status_bar, state);
    match &state.screen {
        Screen::Search(_) => {
            widgets::search::render(frame, layout.main_panel, state);
        }
        Screen::ContextInput(form) => {
            widgets::context_form::render(frame, layout.main_panel, state);
            widgets::recent_games::render(frame, layout.side_top, form.recent_games.as_deref());
        }
        Screen::Prediction(view) => {
            widgets::prediction::render(frame, layout.main_panel, view);
            widgets::recent_games::render(frame, layout.side_top, view.recent_games.as_deref());
            widgets::recommendations::render(frame, layout.side_bottom, state);
        }
    }
    render_help_bar(frame, &layout, state);

    if state.confirm_quit {
        widgets::quit_confirm::render(frame, frame.area());
    }
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    let text = help_text(state);
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default().fg(Color::White).add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

/// Key hints for the current screen and mode.
pub fn help_text(state: &ViewState) -> &'static str {
    match &state.screen {
        Screen::Search(_) if state.search_typing => {
            " type:Filter | Enter:Server search | Esc:Done typing | Ctrl+C:Quit"
        }
        Screen::Search(_) => " Up/Down:Move | Enter:Select | /:Search | q:Quit",
        Screen::ContextInput(_) => {
            " Tab:Next field | Left/Right:Change | Enter:Predict | Esc:Back | Ctrl+C:Quit"
        }
        Screen::Prediction(_) => {
            " Left/Right:Opponent | h:Home/Away | Up/Down+Enter:Recommended | Esc:Back | q:Quit"
        }
    }
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// 1. Initializes the terminal (raw mode, alternate screen).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop: UI updates, keyboard input, render ticks.
/// 4. Restores the terminal on exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
) -> anyhow::Result<()> {
    // 1. Initialize terminal
    let mut terminal = ratatui::init();

    // 2. Restore the terminal before the default hook prints the panic.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::default();
    let mut event_stream = EventStream::new();

    // ~30 fps
    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    // 3. Main loop
    let result = loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    // Workflow is shutting down
                    None => break Ok(()),
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            let _ = cmd_tx.send(cmd).await;
                            if quit {
                                break Ok(());
                            }
                        }
                    }
                    // Resize and mouse events only need a redraw
                    Some(Ok(_)) => {}
                    Some(Err(e)) => break Err(anyhow::Error::new(e).context("terminal input error")),
                    None => break Ok(()),
                }
            }

            _ = render_tick.tick() => {
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &view_state)) {
                    break Err(anyhow::Error::new(e).context("failed to draw frame"));
                }
            }
        }
    };

    // 4. Restore terminal
    ratatui::restore();
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
