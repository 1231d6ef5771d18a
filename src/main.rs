//! userreg-manager binary entry point.
//!
//! Parses the CLI, resolves the store connection config, initializes the
//! terminal in raw mode, runs the TUI event loop, and restores the
//! terminal state on exit.
//!
use crate::error::Result;
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

mod app;
mod error;
mod form;
mod store;
mod ui;

#[derive(Parser, Debug)]
#[command(name = "userreg-manager", version, about = "Register and manage user records in a remote document store")]
struct Cli {
    /// Path to the store connection config file.
    #[arg(long, default_value = "store.conf")]
    store_config: String,
    /// Override the store endpoint from the config file.
    #[arg(long, env = "USERREG_ENDPOINT")]
    endpoint: Option<String>,
    /// Override the bearer token sent to the store.
    #[arg(long, env = "USERREG_API_KEY")]
    api_key: Option<String>,
    /// Override the collection holding the user documents.
    #[arg(long, env = "USERREG_COLLECTION")]
    collection: Option<String>,
    /// Path to the theme config file.
    #[arg(long, default_value = "theme.conf")]
    theme: String,
    /// Log file; RUST_LOG controls the filter.
    #[arg(long, default_value = "userreg-manager.log")]
    log_file: String,
}

/// Send tracing output to a file so it never draws over the UI.
fn init_tracing(path: &str) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Program entry point: run the TUI and report any top-level error to stderr.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_file).map_err(|e| format!("init logging: {}", e))?;

    let mut config = store::StoreConfig::load_or_init(&cli.store_config);
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }
    if let Some(collection) = cli.collection {
        config.collection = collection;
    }
    if let Some(api_key) = cli.api_key {
        config.api_key = Some(api_key);
    }
    tracing::info!(endpoint = %config.endpoint, collection = %config.collection, "starting");

    let theme = app::Theme::load_or_init(&cli.theme);
    let store = store::HttpUserStore::new(config);
    let mut state = app::AppState::new(Box::new(store), theme);

    let mut terminal = init_terminal().map_err(|e| format!("init terminal: {}", e))?;

    let res = app::run(&mut terminal, &mut state);

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    if let Err(err) = res {
        eprintln!("application error: {err}");
    }
    Ok(())
}
