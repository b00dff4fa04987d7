// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages for the workflow,
// or into local ViewState mutations (cursor movement, form focus, typing
// mode).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use nextplay_core::protocol::{ContextEdit, Screen, UserCommand};

use super::{FormField, ViewState};

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// workflow. Returns `None` when the key was handled locally.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // crossterm on Windows reports Press and Release; act on Press only.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately regardless of mode
    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    if view_state.confirm_quit {
        return handle_confirm_quit(key_event, view_state);
    }

    match view_state.screen {
        Screen::Search(_) if view_state.search_typing => {
            handle_search_typing(key_event, view_state)
        }
        Screen::Search(_) => handle_search_list(key_event, view_state),
        Screen::ContextInput(_) => handle_form(key_event, view_state),
        Screen::Prediction(_) => handle_prediction(key_event, view_state),
    }
}

/// Quit confirmation: `y`/`q` confirm, `n`/Esc cancel, everything else is
/// blocked.
fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm_quit = false;
            None
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

fn handle_search_typing(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => {
            view_state.search_typing = false;
            None
        }
        KeyCode::Enter => {
            view_state.search_typing = false;
            if view_state.query.trim().is_empty() {
                None
            } else {
                Some(UserCommand::SubmitSearch)
            }
        }
        KeyCode::Backspace => {
            let mut query = view_state.query.clone();
            query.pop()?;
            view_state.set_query(query.clone());
            Some(UserCommand::SetQuery(query))
        }
        KeyCode::Char(c) => {
            let query = format!("{}{}", view_state.query, c);
            view_state.set_query(query.clone());
            Some(UserCommand::SetQuery(query))
        }
        KeyCode::Up => {
            move_selection(view_state, -1);
            None
        }
        KeyCode::Down => {
            move_selection(view_state, 1);
            None
        }
        _ => None,
    }
}

fn handle_search_list(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Up | KeyCode::Char('k') => {
            move_selection(view_state, -1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            move_selection(view_state, 1);
            None
        }
        KeyCode::Enter => view_state
            .selected_player()
            .map(|p| UserCommand::SelectPlayer(p.id)),
        KeyCode::Char('/') => {
            view_state.search_typing = true;
            None
        }
        KeyCode::Esc => {
            if view_state.query.is_empty() {
                return None;
            }
            view_state.set_query(String::new());
            Some(UserCommand::SetQuery(String::new()))
        }
        KeyCode::Char('q') => {
            view_state.confirm_quit = true;
            None
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Context form
// ---------------------------------------------------------------------------

fn handle_form(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => return Some(UserCommand::BackToSearch),
        KeyCode::Enter => return Some(UserCommand::SubmitContext),
        KeyCode::Tab | KeyCode::Down => {
            view_state.form.field = view_state.form.field.next();
            return None;
        }
        KeyCode::BackTab | KeyCode::Up => {
            view_state.form.field = view_state.form.field.prev();
            return None;
        }
        _ => {}
    }

    let edit = match view_state.form.field {
        FormField::Opponent => match key_event.code {
            KeyCode::Left => step_opponent(view_state, -1),
            KeyCode::Right => step_opponent(view_state, 1),
            KeyCode::Char('h') => toggle_home(view_state),
            KeyCode::Char('q') => quit_prompt(view_state),
            _ => None,
        },
        FormField::Date => match key_event.code {
            KeyCode::Char(c) => {
                view_state.form.date.push(c);
                Some(ContextEdit::Date(view_state.form.date.clone()))
            }
            KeyCode::Backspace => {
                view_state.form.date.pop()?;
                Some(ContextEdit::Date(view_state.form.date.clone()))
            }
            // Accept the suggested date into an empty field.
            KeyCode::Right if view_state.form.date.is_empty() => {
                view_state.form.date = view_state.today.format("%Y-%m-%d").to_string();
                Some(ContextEdit::Date(view_state.form.date.clone()))
            }
            _ => None,
        },
        FormField::Home => match key_event.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') | KeyCode::Char('h') => {
                toggle_home(view_state)
            }
            KeyCode::Char('q') => quit_prompt(view_state),
            _ => None,
        },
    };

    edit.map(UserCommand::EditContext)
}

// ---------------------------------------------------------------------------
// Prediction
// ---------------------------------------------------------------------------

fn handle_prediction(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => Some(UserCommand::BackToSearch),
        KeyCode::Left | KeyCode::Char('<') => {
            step_opponent(view_state, -1).map(UserCommand::Retarget)
        }
        KeyCode::Right | KeyCode::Char('>') => {
            step_opponent(view_state, 1).map(UserCommand::Retarget)
        }
        KeyCode::Char('h') => toggle_home(view_state).map(UserCommand::Retarget),
        KeyCode::Up | KeyCode::Char('k') => {
            move_selection(view_state, -1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            move_selection(view_state, 1);
            None
        }
        KeyCode::Enter => view_state
            .selected_player()
            .map(|p| UserCommand::SelectRecommendation(p.id)),
        KeyCode::Char('q') => {
            view_state.confirm_quit = true;
            None
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Move the cursor, clamped to the current list.
fn move_selection(view_state: &mut ViewState, delta: isize) {
    let len = view_state.selectable().len();
    if len == 0 {
        view_state.selected = 0;
        return;
    }
    view_state.selected = view_state
        .selected
        .saturating_add_signed(delta)
        .min(len - 1);
}

/// Step to the next/previous opponent, wrapping. The first step from an
/// empty choice lands on the first (or last) team.
fn step_opponent(view_state: &mut ViewState, delta: isize) -> Option<ContextEdit> {
    let opponents = view_state.opponents();
    let n = opponents.len();
    if n == 0 {
        return None;
    }
    let next = match view_state.form.opponent {
        None if delta >= 0 => 0,
        None => n - 1,
        Some(i) => (i as isize + delta).rem_euclid(n as isize) as usize,
    };
    let name = opponents[next].to_string();
    view_state.form.opponent = Some(next);
    Some(ContextEdit::Opponent(name))
}

fn toggle_home(view_state: &mut ViewState) -> Option<ContextEdit> {
    view_state.form.home = view_state.form.home.toggle();
    Some(ContextEdit::Home(view_state.form.home))
}

fn quit_prompt(view_state: &mut ViewState) -> Option<ContextEdit> {
    view_state.confirm_quit = true;
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
