use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, path::PathBuf, sync::atomic::Ordering, time::Duration};
use tokio::sync::mpsc;

use admintui::api::CatalogClient;
use admintui::config::Config;
use admintui::model::Model;
use admintui::services::{spawn_api_service, ApiRequest, SessionRequest, SessionResponse};
use admintui::{log_debug, utils, DEBUG_MODE};

/// Catalog admin console for banners, courses and tests
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging to the temp directory (admintui-debug.log)
    #[arg(short, long)]
    debug: bool,

    /// Path to config file (default: platform-specific, see docs)
    #[arg(short, long)]
    config: Option<String>,

    /// Send every request to this host instead of the configured endpoints
    #[arg(long)]
    base_url: Option<String>,
}

mod handlers;
mod ui;

pub struct App {
    pub model: Model,
    pub config: Config,
    /// Shown in the status bar
    pub backend_label: String,
    pub debug_log: Option<String>,
    api_tx: mpsc::UnboundedSender<SessionRequest>,
    api_rx: mpsc::UnboundedReceiver<SessionResponse>,
}

impl App {
    fn new(config: Config) -> Result<Self> {
        let client = CatalogClient::new(
            config.resolved_endpoints(),
            Duration::from_secs(config.request_timeout_secs),
        )?;
        let (api_tx, api_rx) = spawn_api_service(client);

        let backend_label = config
            .base_url
            .clone()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| "configured endpoints".to_string());
        let debug_log = DEBUG_MODE
            .load(Ordering::Relaxed)
            .then(|| utils::get_debug_log_path().display().to_string());

        Ok(Self {
            model: Model::new(config.default_page_size),
            config,
            backend_label,
            debug_log,
            api_tx,
            api_rx,
        })
    }

    /// Hand a request to the background API service, tagged with the
    /// current login session
    pub fn send_request(&self, request: ApiRequest) {
        log_debug(&format!(
            "DEBUG [App]: Sending {:?} (session {})",
            request, self.model.session
        ));
        let request = SessionRequest {
            session: self.model.session,
            request,
        };
        if let Err(e) = self.api_tx.send(request) {
            log_debug(&format!("DEBUG [App]: API service is gone: {}", e));
        }
    }
}

/// Determine the config file path with fallback logic
///
/// Returns None when no file exists in the default locations; built-in
/// defaults are used then.
fn get_config_path(cli_path: Option<String>) -> Result<Option<PathBuf>> {
    // If CLI argument provided, it must exist
    if let Some(path) = cli_path {
        let p = PathBuf::from(&path);
        if p.exists() {
            return Ok(Some(p));
        } else {
            anyhow::bail!("Config file not found at specified path: {}", path);
        }
    }

    // Try ~/.config/admintui/config.yaml
    if let Some(config_path) = utils::default_config_path() {
        if config_path.exists() {
            return Ok(Some(config_path));
        }
    }

    // Fallback to ./config.yaml
    let local_config = PathBuf::from("config.yaml");
    if local_config.exists() {
        return Ok(Some(local_config));
    }

    Ok(None)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    // Set debug mode
    DEBUG_MODE.store(args.debug, Ordering::Relaxed);
    log_debug("Debug mode enabled");

    let mut config = match get_config_path(args.config)? {
        Some(path) => {
            log_debug(&format!("Loading config from: {:?}", path));
            Config::load(&path)?
        }
        None => {
            log_debug("No config file found, using defaults");
            Config::default()
        }
    };

    // Override config with CLI flags
    if let Some(base_url) = args.base_url {
        config.base_url = Some(base_url);
    }

    // Initialize app
    let mut app = App::new(config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app with error handler
    let result = run_app(&mut terminal, &mut app).await;

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Return result after cleanup
    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Always render (Elm Architecture approach)
        terminal.draw(|f| {
            ui::render(f, app);
        })?;

        if app.model.ui.should_quit {
            break;
        }

        // Process API responses (non-blocking)
        while let Ok(response) = app.api_rx.try_recv() {
            handlers::handle_api_response(app, response);
        }

        // Auto-dismiss toast after 1.5 seconds
        if app.model.should_dismiss_toast() {
            app.model.dismiss_toast();
        }

        if app.model.finish_login_if_due() {
            log_debug("DEBUG [Login]: Opening dashboard");
        }

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handlers::handle_key(app, key);
                }
            }
        }
    }

    Ok(())
}
