// NextPlay entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Build the stats service client
// 4. Create mpsc channels
// 5. Spawn the workflow task
// 6. Run the TUI until the user quits
// 7. Cleanup on exit

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info};

use nextplay_core::api::{HttpApi, StatsApi};
use nextplay_core::config;
use nextplay_core::workflow::{self, Workflow};
use nextplay_tui::tui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing
    init_tracing()?;
    info!("NextPlay starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: api={}, timeout={}s, recent_games={}",
        config.api.base_url, config.api.timeout_secs, config.workflow.recent_games
    );

    // 3. Build the API client
    let api = HttpApi::from_config(&config).context("failed to build HTTP client")?;
    if config.credentials.api_token.is_some() {
        info!("Bearer token configured");
    }
    let api: Arc<dyn StatsApi> = Arc::new(api);

    // 4. Channels
    let (fetch_tx, fetch_rx) = mpsc::channel(64);
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);

    // 5. Spawn the workflow task
    let wf = Workflow::new(api, fetch_tx, config.workflow.recent_games);
    let workflow_handle = tokio::spawn(async move {
        if let Err(e) = workflow::run(cmd_rx, fetch_rx, ui_tx, wf).await {
            error!("Workflow loop error: {}", e);
        }
    });

    // 6. Run the TUI (returns when the user quits)
    if let Err(e) = tui::run(ui_rx, cmd_tx).await {
        error!("TUI error: {:#}", e);
    }

    // 7. Cleanup: give the workflow a moment to wind down
    let _ = tokio::time::timeout(Duration::from_secs(5), workflow_handle).await;

    info!("NextPlay shut down cleanly");
    Ok(())
}

/// Initialize tracing to a file; the terminal belongs to the TUI.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("nextplay.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("nextplay=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
