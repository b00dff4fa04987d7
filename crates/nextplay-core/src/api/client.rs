// Request/response client for the stats service REST endpoints.
//
// Every call is a single exchange: no streaming, no retries. Non-success
// statuses become `ApiError::Remote` with the server's `error` message when it
// sent one; success bodies that do not deserialize become
// `ApiError::Malformed`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::error::{ApiError, ApiResult};
use crate::config::Config;
use crate::model::{
    BasicPrediction, BasicPredictionInput, GameRecord, PlayerSummary, PredictionRequest,
    PredictionResult, SeasonStat,
};

/// Path segment every endpoint lives under.
const API_PREFIX: &str = "api";

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Optional `season` / `search` / `ordering` filters for the stats listings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsQuery {
    pub season: Option<String>,
    pub search: Option<String>,
    /// Field name, `-` prefixed for descending (e.g. `-points`).
    pub ordering: Option<String>,
}

impl StatsQuery {
    pub fn search(text: impl Into<String>) -> Self {
        StatsQuery {
            search: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn ordered_by(mut self, field: impl Into<String>) -> Self {
        self.ordering = Some(field.into());
        self
    }

    pub fn in_season(mut self, season: impl Into<String>) -> Self {
        self.season = Some(season.into());
        self
    }

    /// Query pairs for the parameters that are set, in a stable order.
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::new();
        if let Some(season) = self.season.as_deref() {
            pairs.push(("season", season));
        }
        if let Some(search) = self.search.as_deref() {
            pairs.push(("search", search));
        }
        if let Some(ordering) = self.ordering.as_deref() {
            pairs.push(("ordering", ordering));
        }
        pairs
    }
}

// ---------------------------------------------------------------------------
// StatsApi
// ---------------------------------------------------------------------------

/// Operations the workflow needs from the service.
///
/// The workflow holds this as a trait object so tests can substitute an
/// in-process implementation.
#[async_trait]
pub trait StatsApi: Send + Sync {
    /// `GET players/`, optionally narrowed by server-side search.
    async fn list_players(&self, query: Option<&str>) -> ApiResult<Vec<PlayerSummary>>;

    /// `GET players/<id>/`.
    async fn get_player(&self, id: u64) -> ApiResult<PlayerSummary>;

    /// `GET game-stats/`.
    async fn game_stats(&self, query: &StatsQuery) -> ApiResult<Vec<GameRecord>>;

    /// `GET stats/`.
    async fn season_stats(&self, query: &StatsQuery) -> ApiResult<Vec<SeasonStat>>;

    /// `POST player-predictions/predict/`.
    async fn predict(&self, request: &PredictionRequest) -> ApiResult<PredictionResult>;

    /// `POST predictions/predict/` (legacy points-only model).
    async fn predict_points(&self, input: &BasicPredictionInput) -> ApiResult<BasicPrediction>;

    /// A player's game log, oldest first.
    async fn history(&self, player_name: &str) -> ApiResult<Vec<GameRecord>> {
        self.game_stats(&StatsQuery::search(player_name)).await
    }
}

// ---------------------------------------------------------------------------
// HttpApi
// ---------------------------------------------------------------------------

/// reqwest-backed [`StatsApi`].
#[derive(Debug, Clone)]
pub struct HttpApi {
    http: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::ClientBuild)?;
        Ok(HttpApi {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bearer_token: None,
        })
    }

    /// Build from config, attaching the bearer token when one is configured.
    pub fn from_config(config: &Config) -> ApiResult<Self> {
        let api = HttpApi::new(config.api.base_url.clone(), config.request_timeout())?;
        Ok(match &config.credentials.api_token {
            Some(token) if !token.is_empty() => api.with_bearer_token(token.clone()),
            _ => api,
        })
    }

    /// Send `Authorization: Bearer <token>` on every request.
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an endpoint path such as `players/` or `players/7/`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}/{}", self.base_url, API_PREFIX, path.trim_start_matches('/'))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ApiResult<T> {
        let url = self.endpoint(path);
        let mut request = self.http.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }
        self.execute(url, request).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let url = self.endpoint(path);
        let request = self.http.post(&url).json(body);
        self.execute(url, request).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        url: String,
        request: RequestBuilder,
    ) -> ApiResult<T> {
        let request = match &self.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        debug!(%url, "sending request");
        let response = match request.send().await {
            Ok(r) => r,
            Err(source) => return Err(ApiError::Network { url, source }),
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(b) => b,
            Err(source) => return Err(ApiError::Network { url, source }),
        };

        if !status.is_success() {
            return Err(ApiError::Remote {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        parse_body(&url, &body)
    }
}

#[async_trait]
impl StatsApi for HttpApi {
    async fn list_players(&self, query: Option<&str>) -> ApiResult<Vec<PlayerSummary>> {
        match query.map(str::trim).filter(|q| !q.is_empty()) {
            Some(q) => self.get_json("players/", &[("search", q)]).await,
            None => self.get_json("players/", &[]).await,
        }
    }

    async fn get_player(&self, id: u64) -> ApiResult<PlayerSummary> {
        self.get_json(&format!("players/{id}/"), &[]).await
    }

    async fn game_stats(&self, query: &StatsQuery) -> ApiResult<Vec<GameRecord>> {
        self.get_json("game-stats/", &query.pairs()).await
    }

    async fn season_stats(&self, query: &StatsQuery) -> ApiResult<Vec<SeasonStat>> {
        self.get_json("stats/", &query.pairs()).await
    }

    async fn predict(&self, request: &PredictionRequest) -> ApiResult<PredictionResult> {
        self.post_json("player-predictions/predict/", request).await
    }

    async fn predict_points(&self, input: &BasicPredictionInput) -> ApiResult<BasicPrediction> {
        self.post_json("predictions/predict/", input).await
    }
}

// ---------------------------------------------------------------------------
// Body helpers
// ---------------------------------------------------------------------------

/// Deserialize a success body, mapping shape mismatches to `Malformed`.
pub(crate) fn parse_body<T: DeserializeOwned>(url: &str, body: &str) -> ApiResult<T> {
    serde_json::from_str(body).map_err(|e| ApiError::Malformed {
        url: url.to_string(),
        message: e.to_string(),
    })
}

/// Human-readable message for a failed response.
///
/// Prefers the service's `{"error": ...}` body, then a framework-style
/// `{"detail": ...}`, then the bare status.
pub(crate) fn error_message(status: StatusCode, body: &str) -> String {
    let from_body = serde_json::from_str::<Value>(body).ok().and_then(|v| {
        ["error", "detail"]
            .iter()
            .find_map(|key| v.get(*key).and_then(Value::as_str).map(str::to_string))
    });
    from_body.unwrap_or_else(|| format!("Server error: {status}"))
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
