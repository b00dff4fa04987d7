// Static team directory: the opponent names the prediction model knows about.

/// Every franchise name the prediction service accepts as an opponent.
pub const TEAMS: &[&str] = &[
    "Atlanta Hawks",
    "Boston Celtics",
    "Brooklyn Nets",
    "Charlotte Hornets",
    "Chicago Bulls",
    "Cleveland Cavaliers",
    "Dallas Mavericks",
    "Denver Nuggets",
    "Detroit Pistons",
    "Golden State Warriors",
    "Houston Rockets",
    "Indiana Pacers",
    "Los Angeles Clippers",
    "Los Angeles Lakers",
    "Memphis Grizzlies",
    "Miami Heat",
    "Milwaukee Bucks",
    "Minnesota Timberwolves",
    "New Orleans Pelicans",
    "New York Knicks",
    "Oklahoma City Thunder",
    "Orlando Magic",
    "Philadelphia 76ers",
    "Phoenix Suns",
    "Portland Trail Blazers",
    "Sacramento Kings",
    "San Antonio Spurs",
    "Toronto Raptors",
    "Utah Jazz",
    "Washington Wizards",
];

/// Whether `name` is exactly one of the known team names.
pub fn is_known_team(name: &str) -> bool {
    TEAMS.contains(&name)
}

/// Whether `candidate` names the same franchise as `own_team`.
///
/// Roster entries sometimes carry a short team name ("Lakers") while the
/// directory uses the full one ("Los Angeles Lakers"), so containment counts
/// as a match. An empty `own_team` matches nothing.
pub fn is_same_team(candidate: &str, own_team: &str) -> bool {
    let own = own_team.trim();
    if own.is_empty() {
        return false;
    }
    candidate == own || candidate.contains(own)
}

/// The opponent choices offered for a player on `own_team`, in directory order.
///
/// The player's own team is never offered.
pub fn opponent_choices(own_team: &str) -> Vec<&'static str> {
    TEAMS
        .iter()
        .copied()
        .filter(|team| !is_same_team(team, own_team))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
