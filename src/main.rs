//! LazyTables - a terminal browser for a tables API.
//!
//! Fetches every table once, shows the first one, and lets the user search
//! and sort its rows.

mod api;
mod app;
mod cli;
mod config;
mod error;
mod events;
mod logging;
mod query;
mod tasks;
mod ui;

use std::io::{self, Stdout};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::api::TablesClient;
use crate::app::App;
use crate::cli::{Cli, Command};
use crate::config::{Config, Settings};
use crate::error::AppError;
use crate::events::EventHandler;
use crate::tasks::TaskSpawner;

type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init() {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }

    let (config, client) = match startup(&cli) {
        Ok(started) => started,
        Err(e) => {
            error!(error = %e, "Startup failed");
            eprintln!("{}: {}", e.title(), e.user_message());
            if let Some(action) = e.suggested_action() {
                eprintln!("{}", action);
            }
            std::process::exit(2);
        }
    };

    let result = match cli.command {
        Some(command) => run_command(&client, command)
            .await
            .map(|summary| println!("{}", summary)),
        None => run_tui(client, &config.settings),
    };

    logging::shutdown();
    result
}

/// Run a one-shot subcommand, returning the line to print on success.
async fn run_command(client: &TablesClient, command: Command) -> anyhow::Result<String> {
    let summary = match command {
        Command::CreateTable { title } => {
            let table = client.create_table(&title).await?;
            format!("Created table {} ({})", table.id, table.title)
        }
        Command::CreateTag { title, description } => {
            let tag = client.create_tag(&title, &description).await?;
            format!("Created tag {} ({}): {}", tag.id, tag.title, tag.description)
        }
    };
    info!(%summary, "Command finished");
    Ok(summary)
}

/// Load configuration and build the client before touching the terminal.
fn startup(cli: &Cli) -> error::Result<(Config, TablesClient)> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let api = config.resolve_api(cli.api_url.as_deref())?;
    let client = TablesClient::new(&api)?;
    info!(base_url = %client.base_url(), timeout = ?api.timeout, "Using tables API");
    Ok((config, client))
}

fn run_tui(client: TablesClient, settings: &Settings) -> anyhow::Result<()> {
    install_panic_hook();
    let mut terminal = setup_terminal().context("Failed to set up terminal")?;

    let result = run_loop(&mut terminal, client, settings);

    restore_terminal(&mut terminal).context("Failed to restore terminal")?;
    if let Err(e) = &result {
        error!(error = %e, "Event loop failed");
    }
    result
}

fn run_loop(terminal: &mut Tui, client: TablesClient, settings: &Settings) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let spawner = TaskSpawner::new(tx);
    let events = EventHandler::new(settings);
    let mut app = App::new();

    loop {
        if let Some(request_id) = app.take_pending_fetch() {
            spawner.spawn_fetch_tables(&client, request_id);
        }

        while let Ok(message) = rx.try_recv() {
            app.handle_api_message(message);
        }

        terminal.draw(|frame| app.view(frame))?;

        // Event polling blocks up to one tick; keep it off the async workers.
        let event = tokio::task::block_in_place(|| events.next())
            .map_err(|e| AppError::terminal(e.to_string()))?;
        app.update(event);

        if app.should_quit() {
            break;
        }
    }

    // Dropping the receiver makes any in-flight fetch discard its result.
    drop(rx);
    Ok(())
}

fn setup_terminal() -> io::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(terminal: &mut Tui) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

/// Restore the terminal before the default panic output is printed.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        error!(panic = %info, "Application panicked");
        if let Some(dir) = logging::log_directory() {
            eprintln!("Logs are in {}", dir.display());
        }
        default_hook(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_run_command_create_table_summary() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tables"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "data": {"id": 3, "title": "Backlog", "items": []}
            })))
            .mount(&server)
            .await;

        let client = TablesClient::new(&ApiConfig::new(server.uri())).unwrap();
        let summary = run_command(
            &client,
            Command::CreateTable {
                title: "Backlog".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(summary, "Created table 3 (Backlog)");
    }

    #[tokio::test]
    async fn test_run_command_returns_api_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tags"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "title taken"})))
            .mount(&server)
            .await;

        let client = TablesClient::new(&ApiConfig::new(server.uri())).unwrap();
        let err = run_command(
            &client,
            Command::CreateTag {
                title: "urgent".to_string(),
                description: "now".to_string(),
            },
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("title taken"));
    }
}
