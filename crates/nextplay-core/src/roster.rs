// Roster filtering: instant client-side search and matchup recommendations.

use crate::model::PlayerSummary;

/// Players whose name or team contains `query`, ignoring case.
///
/// An empty query keeps the whole roster. Source order is preserved.
pub fn filter_players<'a>(roster: &'a [PlayerSummary], query: &str) -> Vec<&'a PlayerSummary> {
    let needle = query.to_lowercase();
    roster
        .iter()
        .filter(|p| {
            needle.is_empty()
                || p.name.to_lowercase().contains(&needle)
                || p.team.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Players on either side of the predicted matchup, minus the player who was
/// just predicted.
pub fn recommend(
    roster: &[PlayerSummary],
    player_name: &str,
    team: &str,
    opponent: &str,
) -> Vec<PlayerSummary> {
    roster
        .iter()
        .filter(|p| (p.team == team || p.team == opponent) && p.name != player_name)
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
