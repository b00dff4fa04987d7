// Recent-games view over a player's chronological game log.

use crate::model::{GameRecord, HomeFlag};

/// Number of games shown in the recent-games panel.
pub const RECENT_GAMES: usize = 10;

/// The trailing `n` games of an ascending log, most recent first.
///
/// Shorter logs are returned whole, still reversed.
pub fn recent_games(records: &[GameRecord], n: usize) -> Vec<GameRecord> {
    let start = records.len().saturating_sub(n);
    records[start..].iter().rev().cloned().collect()
}

/// "OPP at TEAM" for home games, "TEAM at OPP" otherwise.
pub fn matchup_label(game: &GameRecord) -> String {
    match game.home {
        HomeFlag::Home => format!("{} at {}", game.opponent, game.team),
        HomeFlag::Away | HomeFlag::Unset => format!("{} at {}", game.team, game.opponent),
    }
}

/// Minutes with two decimals; missing or zero minutes show as a bare `0`.
pub fn format_minutes(minutes: Option<f64>) -> String {
    match minutes {
        Some(m) if m != 0.0 => format!("{m:.2}"),
        _ => "0".to_string(),
    }
}

/// A box-score count as a whole number, `-` when the server sent nothing.
pub fn format_count(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.0}"),
        None => "-".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
