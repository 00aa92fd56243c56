//! Terminal UI for binday that answers bin collection questions for a configured household.

mod app;
mod cli;
mod input;
mod ui;

use std::{io, sync::Arc, time::Duration as StdDuration};

use anyhow::{Context, Result};
use binday_core::{
    config::Settings, intent::Intent, plugin::PluginRegistry, service::BindayService,
    tracing::init_tracing,
};
use binday_provider_east_ayrshire as east_ayrshire;
use chrono::Local;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use reqwest::Client;
use tracing::debug;

use crate::app::App;
use crate::cli::Cli;
use crate::input::Action;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => Settings::default(),
    };

    // HTTP + service setup
    let client = Client::builder()
        .user_agent("binday/0.1")
        .timeout(StdDuration::from_secs(settings.source.timeout_secs))
        .build()?;

    let plugins = vec![east_ayrshire::plugin(
        client,
        &settings.source,
        settings.guard.allowed_postcodes.clone(),
    )];
    let registry = Arc::new(PluginRegistry::new(plugins));
    let service = Arc::new(BindayService::new(registry, settings.resolver));

    if let Some(name) = cli.intent {
        // The UI owns the terminal, so only one-shot mode logs to stderr
        init_tracing(&settings.logging.tracing_config()?)?;
        let reference_date = cli.date.unwrap_or_else(|| Local::now().date_naive());
        return answer_once(
            &service,
            &settings,
            Intent::new(name, cli.bin_type),
            reference_date,
        )
        .await;
    }

    // App state
    let mut app = App::new(
        service,
        settings.council_id(),
        settings.address.consent,
        settings.address.device_address(),
    );
    if let Some(date) = cli.date {
        app.reference_date = date;
    }

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
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

#[expect(clippy::print_stdout, reason = "one-shot mode writes the answer to stdout")]
async fn answer_once(
    service: &BindayService,
    settings: &Settings,
    intent: Intent,
    reference_date: chrono::NaiveDate,
) -> Result<()> {
    debug!(intent = %intent.name, %reference_date, "Answering one-shot intent");
    let address = settings.address.device_address();
    let reply = service
        .respond(
            &settings.council_id(),
            settings.address.consent,
            address.as_ref(),
            intent,
            reference_date,
        )
        .await;

    println!("{}", reply.text);
    if let Some(request) = reply.permission_request {
        println!("permission: {}", request.scope);
    }
    Ok(())
}

async fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    loop {
        // Draw current UI
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Poll for input (non-blocking, small timeout to keep CPU low)
        if event::poll(StdDuration::from_millis(100))?
            && let CEvent::Key(key) = event::read()?
        {
            let action = input::handle_key_event(key, &mut app);

            match action {
                Action::Quit => break,
                Action::None => {}
                Action::Ask(intent) => {
                    app.is_loading = true;
                    app.error_message = None;
                    app.reply = None;
                    terminal.draw(|frame| ui::draw(frame, &app))?;

                    let reply = app
                        .service
                        .respond(
                            &app.council,
                            app.consent,
                            app.address.as_ref(),
                            intent,
                            app.reference_date,
                        )
                        .await;

                    app.is_loading = false;
                    if reply.permission_request.is_some() {
                        app.error_message =
                            Some("Set [address] consent = true in the config file".into());
                    }
                    app.reply = Some(reply);
                }
            }
        }
    }

    Ok(())
}
