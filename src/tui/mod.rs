//! Terminal User Interface for hirrd
//!
//! An interactive job board:
//! - Debounced title search, location and company filters
//! - Paginated job card grid with keyboard navigation
//! - Dual-channel event architecture (priority input, data events)
//! - Graceful degradation while the session or the job source is unavailable

pub mod app;
pub mod event;
pub mod runtime;
pub mod theme;
pub mod ui;

use std::io::{self, IsTerminal, stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, bail};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use crate::listing::{spawn_company_fetcher, spawn_job_fetcher};
use crate::models::BoardConfig;
use crate::session::{Session, SessionProfile, spawn_session_loader};
use crate::source::CatalogSource;
use crate::tui::app::App;
use crate::tui::runtime::{
    TuiRuntime, create_channels, run_event_loop, spawn_input_task, spawn_spinner_tick,
};

/// Terminal capability requirements for TUI mode
#[derive(Debug)]
pub struct TerminalCapabilities {
    pub is_tty: bool,
    pub term_type: String,
    pub supports_alternate_screen: bool,
}

impl TerminalCapabilities {
    /// Detect terminal capabilities
    pub fn detect() -> Self {
        let is_tty = stdout().is_terminal();
        let term_type = std::env::var("TERM").unwrap_or_default();

        let supports_alternate_screen = !matches!(term_type.as_str(), "dumb" | "" | "unknown");

        Self {
            is_tty,
            term_type,
            supports_alternate_screen,
        }
    }

    /// Check if terminal is suitable for TUI mode
    pub fn is_suitable(&self) -> bool {
        self.is_tty && self.supports_alternate_screen
    }

    /// Get error message for unsuitable terminal
    pub fn error_message(&self) -> String {
        if !self.is_tty {
            "TUI mode requires an interactive terminal (stdout is not a TTY).\n\
             Hint: Use 'hirrd jobs' or 'hirrd companies' instead."
                .to_string()
        } else if !self.supports_alternate_screen {
            format!(
                "Terminal type '{}' may not support TUI mode.\n\
                 Hint: Set TERM to a supported value (e.g., xterm-256color) or use CLI mode.",
                if self.term_type.is_empty() {
                    "(unset)"
                } else {
                    &self.term_type
                }
            )
        } else {
            "Unknown terminal capability issue.".to_string()
        }
    }
}

/// Run the TUI application
pub async fn run_tui(config: BoardConfig, config_warnings: Vec<String>) -> Result<()> {
    let capabilities = TerminalCapabilities::detect();
    if !capabilities.is_suitable() {
        bail!("{}", capabilities.error_message());
    }

    let source = Arc::new(
        CatalogSource::new(config.catalog_path())
            .with_latency(Duration::from_millis(config.source.latency_ms)),
    );
    tracing::info!("Reading jobs from {}", source.path().display());

    let session = Session::new(SessionProfile {
        signed_in: config.session.signed_in,
        role: config.session.role,
    });

    let (input_tx, input_rx, data_tx, data_rx) = create_channels();
    let mut runtime = TuiRuntime::new();

    let app = App::new(
        config.clone(),
        config_warnings,
        session.profile(),
        session.subscribe_ready(),
        data_tx.clone(),
        &runtime.cancel_token(),
    );

    runtime.track(spawn_input_task(input_tx, runtime.cancel_token()));
    runtime.track(spawn_spinner_tick(data_tx.clone(), runtime.cancel_token()));
    runtime.track(spawn_job_fetcher(
        Arc::clone(&source),
        app.listing.subscribe_filters(),
        session.subscribe_ready(),
        data_tx.clone(),
        runtime.cancel_token(),
    ));
    runtime.track(spawn_company_fetcher(
        Arc::clone(&source),
        session.subscribe_ready(),
        data_tx,
        runtime.cancel_token(),
    ));
    runtime.track(spawn_session_loader(
        session.clone(),
        Duration::from_millis(config.session.ready_delay_ms),
        runtime.cancel_token(),
    ));

    let mut terminal = setup_terminal()?;

    let result = run_event_loop(app, input_rx, data_rx, |app| {
        terminal.draw(|frame| ui::render(app, frame))?;
        Ok(())
    })
    .await;

    runtime.shutdown().await;
    restore_terminal(&mut terminal)?;

    result
}

/// Setup the terminal for TUI mode
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
