//! Terminal UI showing the next Auckland kerbside collection days for a location.

mod app;
mod input;
mod ui;

use std::{
    io,
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use reqwest::Client;
use tracing_subscriber::EnvFilter;

use kerbside_core::service::{KerbsideService, ValidationError};
use kerbside_provider_auckland::AucklandSchedulePort;

use crate::app::App;
use crate::input::Action;

/// Show upcoming Auckland Council kerbside collection days.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// 11-digit location id from the council's collection day page URL
    location_id: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr and stay off unless RUST_LOG enables them, keeping
    // the alternate screen clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    // HTTP + service setup
    let client = Client::builder().user_agent("kerbside/0.1").build()?;
    let port = Arc::new(AucklandSchedulePort::new(client));
    let service = Arc::new(KerbsideService::new(port));
    tracing::info!(council = service.council_name(), "starting kerbside");

    // App state; a location id given on the command line is submitted as if
    // the user had typed it
    let mut app = App::new(service);
    if let Some(candidate) = args.location_id {
        app.location_input = candidate;
    }

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let res = run(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

async fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    if !app.location_input.is_empty() {
        submit_location(terminal, &mut app).await?;
    }

    loop {
        // Draw current UI
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Hourly refresh for the active location; also covers the first
        // fetch right after a location is applied
        if app.refresh_due() {
            refresh_schedule(terminal, &mut app).await?;
            continue;
        }

        // Poll for input (non-blocking, small timeout to keep CPU low)
        if event::poll(Duration::from_millis(100))?
            && let CEvent::Key(key) = event::read()?
        {
            match input::handle_key_event(key, &mut app) {
                Action::Quit => break,
                Action::None => {}
                Action::SubmitLocation => submit_location(terminal, &mut app).await?,
                Action::RefreshSchedule => refresh_schedule(terminal, &mut app).await?,
            }
        }
    }

    Ok(())
}

async fn submit_location(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let candidate = app.location_input.trim().to_owned();
    if candidate.is_empty() {
        app.error_message = Some("Type your 11-digit location id, then press Enter".into());
        return Ok(());
    }

    app.is_loading = true;
    app.error_message = None;
    terminal.draw(|frame| ui::draw(frame, app))?;

    let res = app.service.validate_location_id(&candidate).await;

    app.is_loading = false;
    match res {
        Ok(location) => app.apply_location(location),
        Err(error) => app.error_message = Some(validation_message(&error).to_owned()),
    }
    Ok(())
}

async fn refresh_schedule(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let Some(location) = app.location.clone() else {
        return Ok(());
    };

    app.is_loading = true;
    terminal.draw(|frame| ui::draw(frame, app))?;

    let res = app.service.collection_days(&location).await;

    app.is_loading = false;
    app.last_refresh = Some(Instant::now());
    match res {
        Ok(days) => {
            app.schedule = Some(days);
            app.error_message = None;
        }
        Err(error) => {
            // Keep the previous schedule on screen; the sensors read
            // whatever data is held
            app.error_message = Some(format!("Refresh failed: {error}"));
        }
    }
    Ok(())
}

fn validation_message(error: &ValidationError) -> &'static str {
    match error.user_code() {
        "invalid_id" => "Invalid location id: it must be exactly 11 digits",
        _ => "No collection schedule found for that location id",
    }
}
