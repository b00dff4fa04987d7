// Workflow controller: search -> context input -> prediction.
//
// Owns the current screen and is its only writer. Requests run as spawned
// tasks that report back through an mpsc channel; each completion carries the
// generation and input it was issued for, and is dropped unless both still
// match the controller's current state. That check is what keeps a slow,
// superseded response from overwriting a newer one.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::api::{ApiResult, StatsApi};
use crate::history::recent_games;
use crate::model::{PlayerSummary, PredictionContext};
use crate::protocol::{
    ContextEdit, ContextScreen, FetchEvent, PredictionScreen, PredictionStatus, RemoteSearch,
    Screen, SearchScreen, UiUpdate, UserCommand, WorkflowSnapshot,
};
use crate::roster::recommend;
use crate::teams::{is_known_team, is_same_team, opponent_choices};

// ---------------------------------------------------------------------------
// Workflow
// ---------------------------------------------------------------------------

pub struct Workflow {
    api: Arc<dyn StatsApi>,
    fetch_tx: mpsc::Sender<FetchEvent>,
    recent_games: usize,
    screen: Screen,
    notice: Option<String>,
    /// Bumped on every transition. Completions from an earlier generation
    /// belong to a discarded workflow instance.
    generation: u64,
    /// Roster fetched by the current prediction instance; recommendations are
    /// re-derived from it when the matchup is retargeted.
    recommendation_roster: Option<Vec<PlayerSummary>>,
    prediction_task: Option<JoinHandle<()>>,
    tasks: Vec<JoinHandle<()>>,
}

impl Workflow {
    pub fn new(
        api: Arc<dyn StatsApi>,
        fetch_tx: mpsc::Sender<FetchEvent>,
        recent_games: usize,
    ) -> Self {
        Workflow {
            api,
            fetch_tx,
            recent_games,
            screen: Screen::Search(SearchScreen::default()),
            notice: None,
            generation: 0,
            recommendation_roster: None,
            prediction_task: None,
            tasks: Vec::new(),
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn snapshot(&self) -> WorkflowSnapshot {
        WorkflowSnapshot {
            generation: self.generation,
            screen: self.screen.clone(),
            notice: self.notice.clone(),
        }
    }

    /// Enter the initial search step and load the roster.
    pub fn start(&mut self) {
        self.enter_search();
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    /// Escape to search from any step, discarding the current instance.
    pub fn enter_search(&mut self) {
        self.begin_instance();
        self.screen = Screen::Search(SearchScreen::default());
        info!("Entered search (gen: {})", self.generation);

        let api = Arc::clone(&self.api);
        let tx = self.fetch_tx.clone();
        let generation = self.generation;
        self.spawn(async move {
            let result = api.list_players(None).await;
            let _ = tx.send(FetchEvent::Directory { generation, result }).await;
        });
    }

    /// Search -> context input for the player with `id`.
    pub fn select_player(&mut self, id: u64) -> bool {
        let player = match &self.screen {
            Screen::Search(search) => search.find(id).cloned(),
            _ => None,
        };
        match player {
            Some(p) => {
                self.enter_context(&p);
                true
            }
            None => {
                warn!("select_player({}) ignored: not on the visible search list", id);
                false
            }
        }
    }

    fn enter_context(&mut self, player: &PlayerSummary) {
        self.begin_instance();
        let context = PredictionContext::for_player(player.name.clone(), player.team.clone());
        self.screen = Screen::ContextInput(ContextScreen {
            opponents: opponent_choices(&context.team_name),
            context,
            recent_games: None,
        });
        info!(
            "Entered context input for {} ({}) (gen: {})",
            player.name, player.team, self.generation
        );
        self.spawn_history(player.name.clone());
    }

    /// Apply one field edit to the context form.
    ///
    /// Returns `false` when not on the form or when the edit would make the
    /// opponent the player's own team.
    pub fn edit_context(&mut self, edit: ContextEdit) -> bool {
        let form = match &mut self.screen {
            Screen::ContextInput(form) => form,
            _ => return false,
        };
        apply_edit(&mut form.context, edit)
    }

    /// Context input -> prediction with a copy of the form's context.
    pub fn submit_context(&mut self) -> bool {
        let snapshot = match &self.screen {
            Screen::ContextInput(form) => form.context.clone(),
            _ => return false,
        };
        self.enter_prediction(snapshot);
        true
    }

    /// Enter the prediction step and fire its three independent requests.
    pub fn enter_prediction(&mut self, context: PredictionContext) {
        self.begin_instance();
        info!(
            "Entered prediction: {} vs {} on {:?} ({}) (gen: {})",
            context.player_name,
            context.opponent,
            context.date,
            context.home.label(),
            self.generation
        );

        let player = context.player_name.clone();
        self.screen = Screen::Prediction(PredictionScreen {
            opponents: opponent_choices(&context.team_name),
            context: context.clone(),
            prediction: PredictionStatus::Loading,
            recent_games: None,
            recommendations: None,
        });

        self.spawn_prediction(&context);
        self.spawn_history(player);

        let api = Arc::clone(&self.api);
        let tx = self.fetch_tx.clone();
        let generation = self.generation;
        self.spawn(async move {
            let result = api.list_players(None).await;
            let _ = tx
                .send(FetchEvent::Recommendations { generation, result })
                .await;
        });
    }

    /// Change the matchup on the prediction screen in place.
    ///
    /// A changed key supersedes the in-flight prediction and issues a new
    /// one; history stays, recommendations are re-derived locally.
    pub fn retarget(&mut self, edit: ContextEdit) -> bool {
        let view = match &mut self.screen {
            Screen::Prediction(view) => view,
            _ => return false,
        };

        let mut next = view.context.clone();
        if !apply_edit(&mut next, edit) || next.key() == view.context.key() {
            return false;
        }

        info!(
            "Retargeted prediction: {} vs {} ({})",
            next.player_name,
            next.opponent,
            next.home.label()
        );
        view.context = next.clone();
        view.prediction = PredictionStatus::Loading;
        view.recommendations = self
            .recommendation_roster
            .as_deref()
            .map(|roster| recommend(roster, &next.player_name, &next.team_name, &next.opponent));

        if let Some(handle) = self.prediction_task.take() {
            handle.abort();
        }
        self.spawn_prediction(&next);
        true
    }

    /// Start over with a recommended player: escape, then select.
    pub fn select_recommendation(&mut self, id: u64) -> bool {
        let player = match &self.screen {
            Screen::Prediction(view) => view
                .recommendations
                .as_ref()
                .and_then(|recs| recs.iter().find(|p| p.id == id).cloned()),
            _ => None,
        };
        match player {
            Some(p) => {
                info!("Recommendation selected: {}", p.name);
                self.enter_context(&p);
                true
            }
            None => false,
        }
    }

    pub fn set_query(&mut self, query: String) {
        if let Screen::Search(search) = &mut self.screen {
            search.query = query;
        }
    }

    /// Issue a server-side search for the current query text.
    pub fn submit_search(&mut self) {
        let query = match &mut self.screen {
            Screen::Search(search) => {
                if search.query.trim().is_empty() {
                    search.remote = None;
                    return;
                }
                search.query.clone()
            }
            _ => return,
        };

        let api = Arc::clone(&self.api);
        let tx = self.fetch_tx.clone();
        let generation = self.generation;
        self.spawn(async move {
            let result = api.list_players(Some(&query)).await;
            let _ = tx
                .send(FetchEvent::SearchResults {
                    generation,
                    query,
                    result,
                })
                .await;
        });
    }

    // -----------------------------------------------------------------------
    // Fetch completions
    // -----------------------------------------------------------------------

    /// Commit a completed request if it still belongs to the current state.
    ///
    /// Returns `true` when the event changed the screen.
    pub fn handle_fetch_event(&mut self, event: FetchEvent) -> bool {
        if event.generation() != self.generation {
            debug!(
                "Discarding stale fetch event (event gen: {}, current gen: {})",
                event.generation(),
                self.generation
            );
            return false;
        }

        let recent_n = self.recent_games;
        match (&mut self.screen, event) {
            (Screen::Search(search), FetchEvent::Directory { result, .. }) => {
                let roster = degrade("player directory", result, &mut self.notice);
                info!("Roster loaded: {} players", roster.len());
                search.roster = Some(roster);
                true
            }
            (Screen::Search(search), FetchEvent::SearchResults { query, result, .. }) => {
                if query != search.query {
                    debug!("Discarding search results for superseded query {:?}", query);
                    return false;
                }
                match result {
                    Ok(players) => {
                        search.remote = Some(RemoteSearch { query, players });
                    }
                    Err(e) => {
                        warn!("Player search failed, keeping local results: {}", e);
                        self.notice = Some(format!("Search unavailable: {e}"));
                        search.remote = None;
                    }
                }
                true
            }
            (Screen::ContextInput(form), FetchEvent::History { player, result, .. }) => {
                if player != form.context.player_name {
                    return false;
                }
                let log = degrade("game history", result, &mut self.notice);
                form.recent_games = Some(recent_games(&log, recent_n));
                true
            }
            (Screen::Prediction(view), FetchEvent::History { player, result, .. }) => {
                if player != view.context.player_name {
                    return false;
                }
                let log = degrade("game history", result, &mut self.notice);
                view.recent_games = Some(recent_games(&log, recent_n));
                true
            }
            (Screen::Prediction(view), FetchEvent::Prediction { key, result, .. }) => {
                if key != view.context.key() {
                    debug!(
                        "Discarding prediction for superseded matchup {} vs {}",
                        key.player, key.opponent
                    );
                    return false;
                }
                self.prediction_task = None;
                view.prediction = match result {
                    Ok(prediction) => {
                        info!("Prediction received for {} vs {}", key.player, key.opponent);
                        PredictionStatus::Ready(prediction)
                    }
                    Err(e) => {
                        warn!(
                            "Prediction unavailable for {} vs {}: {}",
                            key.player, key.opponent, e
                        );
                        PredictionStatus::Unavailable(e.to_string())
                    }
                };
                true
            }
            (Screen::Prediction(view), FetchEvent::Recommendations { result, .. }) => {
                let roster = degrade("recommendation roster", result, &mut self.notice);
                let ctx = &view.context;
                view.recommendations = Some(recommend(
                    &roster,
                    &ctx.player_name,
                    &ctx.team_name,
                    &ctx.opponent,
                ));
                self.recommendation_roster = Some(roster);
                true
            }
            (_, event) => {
                debug!("Fetch event does not apply to the current screen: {:?}", event);
                false
            }
        }
    }

    /// Abort every outstanding task (best effort; the generation check is
    /// what actually guards the screen).
    pub fn cancel_tasks(&mut self) {
        if let Some(handle) = self.prediction_task.take() {
            handle.abort();
        }
        for handle in self.tasks.drain(..) {
            handle.abort();
        }
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn begin_instance(&mut self) {
        self.cancel_tasks();
        self.generation += 1;
        self.notice = None;
        self.recommendation_roster = None;
    }

    fn spawn<F>(&mut self, fut: F)
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        self.tasks.retain(|h| !h.is_finished());
        self.tasks.push(tokio::spawn(fut));
    }

    fn spawn_history(&mut self, player: String) {
        let api = Arc::clone(&self.api);
        let tx = self.fetch_tx.clone();
        let generation = self.generation;
        self.spawn(async move {
            let result = api.history(&player).await;
            let _ = tx
                .send(FetchEvent::History {
                    generation,
                    player,
                    result,
                })
                .await;
        });
    }

    fn spawn_prediction(&mut self, context: &PredictionContext) {
        let api = Arc::clone(&self.api);
        let tx = self.fetch_tx.clone();
        let generation = self.generation;
        let key = context.key();
        let request = context.to_request();
        info!(
            "Requesting prediction: {} vs {} (gen: {})",
            request.player, request.opponent, generation
        );
        self.prediction_task = Some(tokio::spawn(async move {
            let result = api.predict(&request).await;
            let _ = tx
                .send(FetchEvent::Prediction {
                    generation,
                    key,
                    result,
                })
                .await;
        }));
    }
}

/// Apply `edit` to `context`, refusing an opponent that is unknown or is the
/// player's own team.
fn apply_edit(context: &mut PredictionContext, edit: ContextEdit) -> bool {
    match edit {
        ContextEdit::Opponent(opponent) => {
            if !is_known_team(&opponent) {
                warn!("Rejected opponent {:?}: not a known team", opponent);
                return false;
            }
            if is_same_team(&opponent, &context.team_name) {
                warn!(
                    "Rejected opponent {:?}: same team as {}",
                    opponent, context.player_name
                );
                return false;
            }
            context.opponent = opponent;
        }
        ContextEdit::Date(date) => context.date = date,
        ContextEdit::Home(home) => context.home = home,
    }
    true
}

/// Non-fatal fetch: failures become an empty list plus a logged warning.
fn degrade<T>(what: &str, result: ApiResult<Vec<T>>, notice: &mut Option<String>) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(e) => {
            warn!("Failed to fetch {}: {}", what, e);
            *notice = Some(format!("Could not load {what}: {e}"));
            Vec::new()
        }
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the workflow event loop.
///
/// Listens on two channels using `tokio::select!`:
/// 1. User commands from the front end
/// 2. Completions from the workflow's fetch tasks
///
/// Pushes a fresh snapshot through `ui_tx` after every change.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    mut fetch_rx: mpsc::Receiver<FetchEvent>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut workflow: Workflow,
) -> anyhow::Result<()> {
    info!("Workflow event loop started");
    workflow.start();
    publish(&workflow, &ui_tx).await;

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("Quit command received, shutting down");
                        break;
                    }
                    Some(cmd) => {
                        if handle_user_command(&mut workflow, cmd) {
                            publish(&workflow, &ui_tx).await;
                        }
                    }
                    None => {
                        info!("Command channel closed, shutting down");
                        break;
                    }
                }
            }

            // The workflow holds a sender, so this channel never closes while
            // the loop runs.
            Some(event) = fetch_rx.recv() => {
                if workflow.handle_fetch_event(event) {
                    publish(&workflow, &ui_tx).await;
                }
            }
        }
    }

    workflow.cancel_tasks();
    info!("Workflow event loop exiting");
    Ok(())
}

/// Dispatch a user command. Returns `true` when the screen may have changed.
fn handle_user_command(workflow: &mut Workflow, cmd: UserCommand) -> bool {
    match cmd {
        UserCommand::SetQuery(query) => {
            workflow.set_query(query);
            true
        }
        UserCommand::SubmitSearch => {
            workflow.submit_search();
            true
        }
        UserCommand::SelectPlayer(id) => workflow.select_player(id),
        UserCommand::EditContext(edit) => workflow.edit_context(edit),
        UserCommand::SubmitContext => workflow.submit_context(),
        UserCommand::Retarget(edit) => workflow.retarget(edit),
        UserCommand::SelectRecommendation(id) => workflow.select_recommendation(id),
        UserCommand::BackToSearch => {
            workflow.enter_search();
            true
        }
        UserCommand::Quit => false,
    }
}

async fn publish(workflow: &Workflow, ui_tx: &mpsc::Sender<UiUpdate>) {
    let _ = ui_tx
        .send(UiUpdate::Snapshot(Box::new(workflow.snapshot())))
        .await;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, StatsQuery};
    use crate::model::{
        BasicPrediction, BasicPredictionInput, GameRecord, HomeFlag, PredictionRequest,
        PredictionResult, SeasonStat, StatBlock,
    };
    use async_trait::async_trait;

    /// In-process API: answers immediately from canned data.
    struct CannedApi {
        roster: Vec<PlayerSummary>,
    }

    #[async_trait]
    impl StatsApi for CannedApi {
        async fn list_players(&self, _query: Option<&str>) -> ApiResult<Vec<PlayerSummary>> {
            Ok(self.roster.clone())
        }
        async fn get_player(&self, id: u64) -> ApiResult<PlayerSummary> {
            self.roster
                .iter()
                .find(|p| p.id == id)
                .cloned()
                .ok_or(ApiError::Remote {
                    status: 404,
                    message: "Not found.".into(),
                })
        }
        async fn game_stats(&self, _query: &StatsQuery) -> ApiResult<Vec<GameRecord>> {
            Ok(Vec::new())
        }
        async fn season_stats(&self, _query: &StatsQuery) -> ApiResult<Vec<SeasonStat>> {
            Ok(Vec::new())
        }
        async fn predict(&self, request: &PredictionRequest) -> ApiResult<PredictionResult> {
            Ok(result_for(&request.player, &request.opponent))
        }
        async fn predict_points(
            &self,
            _input: &BasicPredictionInput,
        ) -> ApiResult<BasicPrediction> {
            Ok(BasicPrediction {
                predicted_points: 0.0,
            })
        }
    }

    fn player(id: u64, name: &str, team: &str) -> PlayerSummary {
        PlayerSummary {
            id,
            name: name.into(),
            team: team.into(),
            position: None,
        }
    }

    fn roster() -> Vec<PlayerSummary> {
        vec![
            player(1, "J. Smith", "Los Angeles Lakers"),
            player(2, "K. Jones", "Los Angeles Lakers"),
            player(3, "M. Brown", "Boston Celtics"),
            player(4, "D. White", "Miami Heat"),
        ]
    }

    fn result_for(player: &str, opponent: &str) -> PredictionResult {
        PredictionResult {
            player: player.into(),
            opponent: opponent.into(),
            predictions: StatBlock {
                minutes: 30.0,
                points: 20.0,
                rebounds: 5.0,
                assists: 4.0,
                blocks: 1.0,
                steals: 1.0,
                field_goal_percent: 0.5,
                three_attempted: 7.0,
                three_made: 3.0,
                three_percent: None,
                free_throw_attempted: 4.0,
                free_throw_made: 3.0,
                free_throw_percent: None,
                fouls_committed: 2.0,
                turnovers: 2.0,
            },
        }
    }

    fn workflow() -> (Workflow, mpsc::Receiver<FetchEvent>) {
        let (tx, rx) = mpsc::channel(64);
        let api: Arc<dyn StatsApi> = Arc::new(CannedApi { roster: roster() });
        (Workflow::new(api, tx, 10), rx)
    }

    fn context(opponent: &str) -> PredictionContext {
        PredictionContext {
            player_name: "J. Smith".into(),
            team_name: "Los Angeles Lakers".into(),
            opponent: opponent.into(),
            date: "2024-03-01".into(),
            home: HomeFlag::Home,
        }
    }

    fn prediction_view(wf: &Workflow) -> &PredictionScreen {
        match wf.screen() {
            Screen::Prediction(view) => view,
            other => panic!("expected prediction screen, got {}", other.title()),
        }
    }

    /// Drain and apply every completion currently queued or about to be.
    async fn settle(wf: &mut Workflow, rx: &mut mpsc::Receiver<FetchEvent>, expected: usize) {
        for _ in 0..expected {
            let event = rx.recv().await.expect("fetch event");
            wf.handle_fetch_event(event);
        }
    }

    #[tokio::test]
    async fn start_loads_roster_into_search() {
        let (mut wf, mut rx) = workflow();
        wf.start();
        settle(&mut wf, &mut rx, 1).await;
        match wf.screen() {
            Screen::Search(search) => assert_eq!(search.roster.as_ref().unwrap().len(), 4),
            other => panic!("unexpected screen {}", other.title()),
        }
    }

    #[tokio::test]
    async fn selecting_player_seeds_empty_context() {
        let (mut wf, mut rx) = workflow();
        wf.start();
        settle(&mut wf, &mut rx, 1).await;

        assert!(wf.select_player(1));
        match wf.screen() {
            Screen::ContextInput(form) => {
                assert_eq!(form.context, PredictionContext::for_player("J. Smith", "Los Angeles Lakers"));
                assert!(!form.opponents.contains(&"Los Angeles Lakers"));
                assert!(form.recent_games.is_none());
            }
            other => panic!("unexpected screen {}", other.title()),
        }
    }

    #[tokio::test]
    async fn selecting_unknown_player_is_ignored() {
        let (mut wf, mut rx) = workflow();
        wf.start();
        settle(&mut wf, &mut rx, 1).await;
        assert!(!wf.select_player(99));
        assert!(matches!(wf.screen(), Screen::Search(_)));
    }

    #[tokio::test]
    async fn own_team_cannot_be_chosen_as_opponent() {
        let (mut wf, mut rx) = workflow();
        wf.start();
        settle(&mut wf, &mut rx, 1).await;
        wf.select_player(1);

        assert!(!wf.edit_context(ContextEdit::Opponent("Los Angeles Lakers".into())));
        assert!(!wf.edit_context(ContextEdit::Opponent("Springfield Atoms".into())));
        assert!(wf.edit_context(ContextEdit::Opponent("Boston Celtics".into())));
        match wf.screen() {
            Screen::ContextInput(form) => assert_eq!(form.context.opponent, "Boston Celtics"),
            other => panic!("unexpected screen {}", other.title()),
        }
    }

    #[tokio::test]
    async fn submit_carries_a_snapshot_not_a_reference() {
        let (mut wf, _rx) = workflow();
        wf.start();
        if let Screen::Search(search) = &mut wf.screen {
            search.roster = Some(roster());
        }
        wf.select_player(1);
        wf.edit_context(ContextEdit::Opponent("Boston Celtics".into()));
        wf.edit_context(ContextEdit::Home(HomeFlag::Away));
        assert!(wf.submit_context());

        // Form edits are no longer accepted once the step has advanced.
        assert!(!wf.edit_context(ContextEdit::Opponent("Miami Heat".into())));
        let view = prediction_view(&wf);
        assert_eq!(view.context.opponent, "Boston Celtics");
        assert_eq!(view.context.home, HomeFlag::Away);
        assert_eq!(view.prediction, PredictionStatus::Loading);
    }

    #[tokio::test]
    async fn prediction_entry_populates_all_three_panels() {
        let (mut wf, mut rx) = workflow();
        wf.enter_prediction(context("Boston Celtics"));
        settle(&mut wf, &mut rx, 3).await;

        let view = prediction_view(&wf);
        assert!(matches!(view.prediction, PredictionStatus::Ready(_)));
        assert_eq!(view.recent_games.as_deref(), Some(&[][..]));
        let recs: Vec<&str> = view
            .recommendations
            .as_ref()
            .unwrap()
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(recs, vec!["K. Jones", "M. Brown"]);
    }

    #[tokio::test]
    async fn stale_prediction_never_overwrites_current_one() {
        let (mut wf, _rx) = workflow();
        wf.enter_prediction(context("Boston Celtics"));
        let generation = wf.generation();
        let key_a = context("Boston Celtics").key();

        assert!(wf.retarget(ContextEdit::Opponent("Miami Heat".into())));
        let key_b = context("Miami Heat").key();

        // B answers first, then the superseded A.
        assert!(wf.handle_fetch_event(FetchEvent::Prediction {
            generation,
            key: key_b,
            result: Ok(result_for("J. Smith", "Miami Heat")),
        }));
        assert!(!wf.handle_fetch_event(FetchEvent::Prediction {
            generation,
            key: key_a,
            result: Ok(result_for("J. Smith", "Boston Celtics")),
        }));

        match &prediction_view(&wf).prediction {
            PredictionStatus::Ready(result) => assert_eq!(result.opponent, "Miami Heat"),
            other => panic!("unexpected status {:?}", other),
        }
    }

    #[tokio::test]
    async fn events_from_previous_instance_are_discarded() {
        let (mut wf, _rx) = workflow();
        wf.enter_prediction(context("Boston Celtics"));
        let old_generation = wf.generation();

        wf.enter_search();
        wf.enter_prediction(context("Boston Celtics"));

        // Same key, earlier instance.
        assert!(!wf.handle_fetch_event(FetchEvent::Prediction {
            generation: old_generation,
            key: context("Boston Celtics").key(),
            result: Ok(result_for("J. Smith", "Boston Celtics")),
        }));
        assert_eq!(prediction_view(&wf).prediction, PredictionStatus::Loading);
    }

    #[tokio::test]
    async fn prediction_failure_is_unavailable_not_loading() {
        let (mut wf, _rx) = workflow();
        wf.enter_prediction(context("Boston Celtics"));
        let generation = wf.generation();
        wf.handle_fetch_event(FetchEvent::Prediction {
            generation,
            key: context("Boston Celtics").key(),
            result: Err(ApiError::Remote {
                status: 503,
                message: "Model not loaded.".into(),
            }),
        });
        match &prediction_view(&wf).prediction {
            PredictionStatus::Unavailable(msg) => assert!(msg.contains("Model not loaded")),
            other => panic!("unexpected status {:?}", other),
        }
    }

    #[tokio::test]
    async fn history_failure_degrades_to_empty_with_notice() {
        let (mut wf, _rx) = workflow();
        wf.enter_prediction(context("Boston Celtics"));
        let generation = wf.generation();
        wf.handle_fetch_event(FetchEvent::History {
            generation,
            player: "J. Smith".into(),
            result: Err(ApiError::Remote {
                status: 500,
                message: "boom".into(),
            }),
        });
        assert_eq!(prediction_view(&wf).recent_games, Some(Vec::new()));
        assert!(wf.snapshot().notice.unwrap().contains("game history"));
    }

    #[tokio::test]
    async fn retarget_rederives_recommendations_from_cached_roster() {
        let (mut wf, mut rx) = workflow();
        wf.enter_prediction(context("Boston Celtics"));
        settle(&mut wf, &mut rx, 3).await;

        assert!(wf.retarget(ContextEdit::Opponent("Miami Heat".into())));
        let view = prediction_view(&wf);
        assert_eq!(view.prediction, PredictionStatus::Loading);
        let recs: Vec<&str> = view
            .recommendations
            .as_ref()
            .unwrap()
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(recs, vec!["K. Jones", "D. White"]);
    }

    #[tokio::test]
    async fn retarget_with_unchanged_key_is_a_no_op() {
        let (mut wf, _rx) = workflow();
        wf.enter_prediction(context("Boston Celtics"));
        assert!(!wf.retarget(ContextEdit::Opponent("Boston Celtics".into())));
        assert!(!wf.retarget(ContextEdit::Opponent("Los Angeles Lakers".into())));
    }

    #[tokio::test]
    async fn recommendation_selection_starts_new_context() {
        let (mut wf, mut rx) = workflow();
        wf.enter_prediction(context("Boston Celtics"));
        settle(&mut wf, &mut rx, 3).await;

        assert!(wf.select_recommendation(3));
        match wf.screen() {
            Screen::ContextInput(form) => {
                assert_eq!(form.context.player_name, "M. Brown");
                assert_eq!(form.context.team_name, "Boston Celtics");
                assert!(form.context.opponent.is_empty());
            }
            other => panic!("unexpected screen {}", other.title()),
        }
    }

    #[tokio::test]
    async fn search_results_for_old_query_are_dropped() {
        let (mut wf, _rx) = workflow();
        wf.start();
        let generation = wf.generation();
        wf.set_query("celt".into());
        assert!(!wf.handle_fetch_event(FetchEvent::SearchResults {
            generation,
            query: "lak".into(),
            result: Ok(roster()),
        }));
        assert!(wf.handle_fetch_event(FetchEvent::SearchResults {
            generation,
            query: "celt".into(),
            result: Ok(vec![player(3, "M. Brown", "Boston Celtics")]),
        }));
        match wf.screen() {
            Screen::Search(search) => assert_eq!(search.visible().len(), 1),
            other => panic!("unexpected screen {}", other.title()),
        }
    }

    #[tokio::test]
    async fn directory_failure_leaves_usable_empty_search() {
        let (mut wf, _rx) = workflow();
        wf.start();
        let generation = wf.generation();
        wf.handle_fetch_event(FetchEvent::Directory {
            generation,
            result: Err(ApiError::Remote {
                status: 502,
                message: "Bad gateway".into(),
            }),
        });
        match wf.screen() {
            Screen::Search(search) => assert_eq!(search.roster, Some(Vec::new())),
            other => panic!("unexpected screen {}", other.title()),
        }
        assert!(wf.snapshot().notice.is_some());
    }
}
