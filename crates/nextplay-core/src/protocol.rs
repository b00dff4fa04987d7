// Messages exchanged between the front end, the workflow controller and the
// controller's fetch tasks, plus the screen snapshots the front end renders.

use crate::api::ApiResult;
use crate::model::{
    GameRecord, HomeFlag, MatchupKey, PlayerSummary, PredictionContext, PredictionResult,
};
use crate::roster::filter_players;

// ---------------------------------------------------------------------------
// Front end -> controller
// ---------------------------------------------------------------------------

/// A single field change in the context form.
#[derive(Debug, Clone, PartialEq)]
pub enum ContextEdit {
    Opponent(String),
    Date(String),
    Home(HomeFlag),
}

#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    /// Replace the search text (instant client-side filtering).
    SetQuery(String),
    /// Ask the server to search for the current text.
    SubmitSearch,
    /// Pick a player from the search list by id.
    SelectPlayer(u64),
    /// Change one field of the context being filled in.
    EditContext(ContextEdit),
    /// Advance from the context form to the prediction.
    SubmitContext,
    /// Change the matchup shown on the prediction screen in place.
    Retarget(ContextEdit),
    /// Start over with a recommended player.
    SelectRecommendation(u64),
    /// Escape back to the search screen from anywhere.
    BackToSearch,
    Quit,
}

// ---------------------------------------------------------------------------
// Fetch task -> controller
// ---------------------------------------------------------------------------

/// Completion of a spawned request.
///
/// Every variant carries the workflow generation it was issued under and,
/// where relevant, the input it was issued for. The controller drops events
/// whose captured input no longer matches its current state.
#[derive(Debug)]
pub enum FetchEvent {
    /// Full roster for the search screen.
    Directory {
        generation: u64,
        result: ApiResult<Vec<PlayerSummary>>,
    },
    /// Server-side search results for `query`.
    SearchResults {
        generation: u64,
        query: String,
        result: ApiResult<Vec<PlayerSummary>>,
    },
    /// Game log for `player`, oldest first.
    History {
        generation: u64,
        player: String,
        result: ApiResult<Vec<GameRecord>>,
    },
    /// Prediction for `key`.
    Prediction {
        generation: u64,
        key: MatchupKey,
        result: ApiResult<PredictionResult>,
    },
    /// Full roster used to derive recommendations.
    Recommendations {
        generation: u64,
        result: ApiResult<Vec<PlayerSummary>>,
    },
}

impl FetchEvent {
    pub fn generation(&self) -> u64 {
        match self {
            FetchEvent::Directory { generation, .. }
            | FetchEvent::SearchResults { generation, .. }
            | FetchEvent::History { generation, .. }
            | FetchEvent::Prediction { generation, .. }
            | FetchEvent::Recommendations { generation, .. } => *generation,
        }
    }
}

// ---------------------------------------------------------------------------
// Controller -> front end
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum UiUpdate {
    /// Full replacement of what the front end should show.
    Snapshot(Box<WorkflowSnapshot>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowSnapshot {
    /// Workflow instance this snapshot belongs to; changes on every
    /// transition, stays put while an instance is retargeted.
    pub generation: u64,
    pub screen: Screen,
    /// Latest degraded-fetch warning, cleared on every transition.
    pub notice: Option<String>,
}

/// Which step of the workflow is showing, with its data.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Search(SearchScreen),
    ContextInput(ContextScreen),
    Prediction(PredictionScreen),
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Search(_) => "Search",
            Screen::ContextInput(_) => "Next Game",
            Screen::Prediction(_) => "Prediction",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchScreen {
    /// Cached full roster; `None` until the directory fetch completes.
    pub roster: Option<Vec<PlayerSummary>>,
    pub query: String,
    /// Server-side results, valid only while `query` still equals their query.
    pub remote: Option<RemoteSearch>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RemoteSearch {
    pub query: String,
    pub players: Vec<PlayerSummary>,
}

impl SearchScreen {
    /// The list to show: server results for the current query when present,
    /// otherwise the local filter over the cached roster.
    pub fn visible(&self) -> Vec<&PlayerSummary> {
        if let Some(remote) = &self.remote {
            if remote.query == self.query {
                return remote.players.iter().collect();
            }
        }
        match &self.roster {
            Some(roster) => filter_players(roster, &self.query),
            None => Vec::new(),
        }
    }

    pub fn find(&self, id: u64) -> Option<&PlayerSummary> {
        self.visible().into_iter().find(|p| p.id == id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContextScreen {
    pub context: PredictionContext,
    /// Opponent choices; never includes the player's own team.
    pub opponents: Vec<&'static str>,
    /// Most recent games first; `None` while loading.
    pub recent_games: Option<Vec<GameRecord>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PredictionStatus {
    Loading,
    Ready(PredictionResult),
    /// Terminal for the current key; never retried automatically.
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionScreen {
    /// The context submitted from the form (or retargeted since).
    pub context: PredictionContext,
    pub opponents: Vec<&'static str>,
    pub prediction: PredictionStatus,
    pub recent_games: Option<Vec<GameRecord>>,
    pub recommendations: Option<Vec<PlayerSummary>>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: u64, name: &str, team: &str) -> PlayerSummary {
        PlayerSummary {
            id,
            name: name.into(),
            team: team.into(),
            position: None,
        }
    }

    #[test]
    fn visible_uses_local_filter_without_remote_results() {
        let screen = SearchScreen {
            roster: Some(vec![player(1, "Ann", "Utah Jazz"), player(2, "Bo", "Miami Heat")]),
            query: "heat".into(),
            remote: None,
        };
        let names: Vec<&str> = screen.visible().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Bo"]);
    }

    #[test]
    fn remote_results_apply_only_to_their_query() {
        let mut screen = SearchScreen {
            roster: Some(vec![player(1, "Ann", "Utah Jazz"), player(2, "Bo", "Miami Heat")]),
            query: "pg".into(),
            remote: Some(RemoteSearch {
                query: "pg".into(),
                players: vec![player(1, "Ann", "Utah Jazz")],
            }),
        };
        assert_eq!(screen.visible().len(), 1);
        assert!(screen.find(1).is_some());

        screen.query = "b".into();
        let names: Vec<&str> = screen.visible().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Bo"]);
    }

    #[test]
    fn visible_is_empty_before_roster_arrives() {
        assert!(SearchScreen::default().visible().is_empty());
    }
}
