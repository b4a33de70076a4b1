mod app;
mod event;
mod ui;

use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use app::{App, BgEvent};
use genpad::config::AppConfig;
use genpad::generate;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load();
    let _log_guard = init_logging(&config)?;

    if !AppConfig::config_path().exists() {
        if let Err(e) = config.save() {
            warn!(error = %e, "could not write default config");
        }
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, App::new(&config)).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

/// File logging, only when enabled in settings: the terminal belongs to the UI.
fn init_logging(config: &AppConfig) -> anyhow::Result<Option<WorkerGuard>> {
    if !config.settings.log_to_file {
        return Ok(None);
    }
    let dir = AppConfig::config_dir();
    std::fs::create_dir_all(&dir)?;
    let appender = tracing_appender::rolling::never(&dir, "genpad.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_env("GENPAD_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(Some(guard))
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
) -> anyhow::Result<()> {
    info!(program = %app.invoker.program(), "editor started");

    loop {
        // Draw
        terminal.draw(|frame| {
            ui::layout::render(frame, &mut app);
        })?;

        // Handle events
        if !event::handle_events(&mut app)? {
            break;
        }

        // ──────── Poll background task results ────────
        while let Ok(event) = app.bg_rx.try_recv() {
            app.handle_bg_event(event);
        }
        app.show_waiting_response();

        // ──────── Async action dispatch ────────
        // Generation blocks on the tool, so it runs on the blocking pool.
        if let Some((generation, prompt)) = app.pending_generation.take() {
            let invoker = app.invoker.clone();
            let tx = app.bg_tx.clone();

            tokio::spawn(async move {
                let event = match generate::spawn_generation(invoker, prompt).await {
                    Ok(Ok(text)) => BgEvent::Generated { generation, text },
                    Ok(Err(e)) => BgEvent::Failed {
                        generation,
                        message: e.to_string(),
                    },
                    Err(e) => BgEvent::Failed {
                        generation,
                        message: format!("Generation task failed: {}", e),
                    },
                };
                let _ = tx.send(event);
            });
        }
    }

    info!("editor closed");
    Ok(())
}
