use std::sync::Arc;

pub mod app;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

use app::{AppState, CliCommand};
use domain::errors::DomainError;
use infrastructure::config::WidgetConfig;
use infrastructure::logging::logger;
use presentation::terminal_view::TerminalView;

/// Run one command against the configured avatar service in the terminal.
pub async fn run(config: WidgetConfig, command: CliCommand) -> Result<bool, DomainError> {
    // Held until the command finishes so the file writer is flushed
    let _log_guard = match logger::init_logger(&config.log_dir) {
        Ok(guard) => Some(guard),
        Err(error) => {
            eprintln!("Failed to initialize logger: {}", error);
            None
        }
    };

    tracing::info!("Starting avatar widget");

    let state = AppState::new(config, Arc::new(TerminalView::new()))?;
    state.execute(command).await
}
