use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use miette::{IntoDiagnostic, WrapErr};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use trpg_client::config::{AppConfig, BACKEND_URL_ENV};
use trpg_client::core::client::GameClient;
use trpg_client::core::logging;
use trpg_client::tui::app::AppState;
use trpg_client::tui::services::Services;

#[derive(Parser)]
#[command(name = "trpg-client")]
#[command(about = "Terminal client for an AI game-master backend")]
#[command(version)]
struct Cli {
    /// Game-master backend base URL (overrides TRPG_BACKEND_URL and the config file)
    #[arg(short, long)]
    backend_url: Option<String>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    let _log_guard = logging::init_tui();
    log::info!("{} v{} starting", trpg_client::NAME, trpg_client::VERSION);

    let config = AppConfig::load(cli.config.as_deref());
    let env_url = std::env::var(BACKEND_URL_ENV).ok();
    let base_url = config.resolve_base_url(cli.backend_url.as_deref(), env_url.as_deref());

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let services = Services::init(&base_url, event_tx)
        .into_diagnostic()
        .wrap_err_with(|| format!("cannot use backend URL '{base_url}'"))?;

    let mut app = AppState::new(
        GameClient::new(),
        event_rx,
        services,
        Duration::from_millis(config.tui.tick_rate_ms.max(1)),
    );

    // Setup terminal
    enable_raw_mode().into_diagnostic()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).into_diagnostic()?;
    if config.tui.mouse_enabled {
        execute!(stdout, EnableMouseCapture).into_diagnostic()?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).into_diagnostic()?;

    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode().into_diagnostic()?;
    if config.tui.mouse_enabled {
        execute!(terminal.backend_mut(), DisableMouseCapture).into_diagnostic()?;
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen).into_diagnostic()?;
    terminal.show_cursor().into_diagnostic()?;

    log::info!("Shutting down");
    result.into_diagnostic().wrap_err("terminal UI failed")
}
