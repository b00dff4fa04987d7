// Wire and domain types shared by the API client, the workflow controller and
// the front end.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

// ---------------------------------------------------------------------------
// Players
// ---------------------------------------------------------------------------

/// A roster entry as returned by the player directory.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlayerSummary {
    pub id: u64,
    pub name: String,
    pub team: String,
    /// Present on the wire but unused by the workflow; the server search
    /// matches on it, which is why remote results can differ from the local
    /// filter.
    #[serde(default)]
    pub position: Option<String>,
}

// ---------------------------------------------------------------------------
// Home/away flag
// ---------------------------------------------------------------------------

/// Home/away for the hypothetical game.
///
/// `Unset` is a real state: the user has not chosen yet. It is sent to the
/// server as `null`, never as `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HomeFlag {
    #[default]
    Unset,
    Away,
    Home,
}

impl HomeFlag {
    /// The server's encoding: `1` home, `0` away, absent when unset.
    pub fn as_wire(self) -> Option<u8> {
        match self {
            HomeFlag::Unset => None,
            HomeFlag::Away => Some(0),
            HomeFlag::Home => Some(1),
        }
    }

    /// Cycle used by the form and the in-place retarget: unset goes to home,
    /// then home and away alternate.
    pub fn toggle(self) -> Self {
        match self {
            HomeFlag::Unset | HomeFlag::Away => HomeFlag::Home,
            HomeFlag::Home => HomeFlag::Away,
        }
    }

    pub fn is_set(self) -> bool {
        self != HomeFlag::Unset
    }

    pub fn label(self) -> &'static str {
        match self {
            HomeFlag::Unset => "--",
            HomeFlag::Away => "Away",
            HomeFlag::Home => "Home",
        }
    }
}

impl Serialize for HomeFlag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_wire().serialize(serializer)
    }
}

/// Accepted encodings for a home flag coming back from the server.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawHomeFlag {
    Int(i64),
    Bool(bool),
    Text(String),
}

impl<'de> Deserialize<'de> for HomeFlag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<RawHomeFlag>::deserialize(deserializer)?;
        match raw {
            None => Ok(HomeFlag::Unset),
            Some(RawHomeFlag::Int(1)) | Some(RawHomeFlag::Bool(true)) => Ok(HomeFlag::Home),
            Some(RawHomeFlag::Int(0)) | Some(RawHomeFlag::Bool(false)) => Ok(HomeFlag::Away),
            Some(RawHomeFlag::Text(s)) => match s.trim() {
                "1" => Ok(HomeFlag::Home),
                "0" => Ok(HomeFlag::Away),
                "" => Ok(HomeFlag::Unset),
                other => Err(de::Error::custom(format!("invalid home flag: {other:?}"))),
            },
            Some(RawHomeFlag::Int(other)) => {
                Err(de::Error::custom(format!("invalid home flag: {other}")))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Prediction context
// ---------------------------------------------------------------------------

/// The user's hypothetical next game for one player.
///
/// Seeded on player selection, edited field by field in the context form, and
/// copied (never shared) into the prediction step on submission.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PredictionContext {
    pub player_name: String,
    pub team_name: String,
    pub opponent: String,
    /// Free-form date text; the server interprets it.
    pub date: String,
    pub home: HomeFlag,
}

impl PredictionContext {
    /// A fresh context for the selected player with every game field empty.
    pub fn for_player(player_name: impl Into<String>, team_name: impl Into<String>) -> Self {
        Self {
            player_name: player_name.into(),
            team_name: team_name.into(),
            ..Self::default()
        }
    }

    /// The tuple that identifies which prediction this context asks for.
    pub fn key(&self) -> MatchupKey {
        MatchupKey {
            player: self.player_name.clone(),
            opponent: self.opponent.clone(),
            date: self.date.clone(),
            home: self.home,
        }
    }

    pub fn to_request(&self) -> PredictionRequest {
        PredictionRequest {
            player: self.player_name.clone(),
            opponent: self.opponent.clone(),
            home: self.home,
            game_date: self.date.clone(),
        }
    }
}

/// Identity of a prediction: results are only shown for the current key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchupKey {
    pub player: String,
    pub opponent: String,
    pub date: String,
    pub home: HomeFlag,
}

/// Body of `POST player-predictions/predict/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRequest {
    pub player: String,
    pub opponent: String,
    pub home: HomeFlag,
    pub game_date: String,
}

// ---------------------------------------------------------------------------
// Prediction result
// ---------------------------------------------------------------------------

/// Response of `POST player-predictions/predict/`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PredictionResult {
    pub player: String,
    pub opponent: String,
    pub predictions: StatBlock,
}

/// Projected per-game stat line. Counts are raw model outputs (floats).
///
/// `three_percent` and `free_throw_percent` are carried as received but the
/// display recomputes them from rounded made/attempted counts.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StatBlock {
    pub minutes: f64,
    pub points: f64,
    #[serde(rename = "total_rebounds")]
    pub rebounds: f64,
    pub assists: f64,
    pub blocks: f64,
    pub steals: f64,
    #[serde(rename = "fg_percent")]
    pub field_goal_percent: f64,
    #[serde(rename = "threepa")]
    pub three_attempted: f64,
    #[serde(rename = "threep")]
    pub three_made: f64,
    #[serde(rename = "threep_percent", default)]
    pub three_percent: Option<f64>,
    #[serde(rename = "fta")]
    pub free_throw_attempted: f64,
    #[serde(rename = "ft")]
    pub free_throw_made: f64,
    #[serde(rename = "ft_percent", default)]
    pub free_throw_percent: Option<f64>,
    #[serde(rename = "personal_fouls")]
    pub fouls_committed: f64,
    pub turnovers: f64,
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// One historical game from `GET game-stats/`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GameRecord {
    pub team: String,
    pub opponent: String,
    pub game_date: String,
    #[serde(default)]
    pub home: HomeFlag,
    #[serde(default)]
    pub minutes: Option<f64>,
    #[serde(default)]
    pub points: Option<f64>,
    #[serde(rename = "total_rebounds", default)]
    pub rebounds: Option<f64>,
    #[serde(default)]
    pub assists: Option<f64>,
    #[serde(default)]
    pub steals: Option<f64>,
    #[serde(default)]
    pub blocks: Option<f64>,
}

/// One season-aggregate row from `GET stats/`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SeasonStat {
    #[serde(default)]
    pub season: String,
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub points: Option<f64>,
    #[serde(default)]
    pub rebounds: Option<f64>,
    #[serde(default)]
    pub assists: Option<f64>,
    #[serde(default)]
    pub steals: Option<f64>,
    #[serde(default)]
    pub blocks: Option<f64>,
}

// ---------------------------------------------------------------------------
// Legacy single-output model
// ---------------------------------------------------------------------------

/// Body of `POST predictions/predict/`: recent per-game averages.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct BasicPredictionInput {
    pub minutes: f64,
    pub fg_percent: f64,
    pub threep_percent: f64,
    pub ft_percent: f64,
    pub rebounds: f64,
    pub assists: f64,
    pub steals: f64,
    pub blocks: f64,
    pub turnovers: f64,
    pub personal_fouls: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BasicPrediction {
    pub predicted_points: f64,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
