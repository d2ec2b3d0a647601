use std::sync::Mutex;
use std::time::Duration;

use chrono::Local;
use colored::*;
use dialoguer::{Confirm, theme::ColorfulTheme};
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::models::avatar::{AvatarReference, PreviewState};
use crate::presentation::view::{Prompt, WidgetView};

/// Characters of a data URL echoed to the terminal
const PREVIEW_ECHO_CHARS: usize = 48;

/// [`WidgetView`] rendering to an interactive terminal
#[derive(Default)]
pub struct TerminalView {
    spinner: Mutex<Option<ProgressBar>>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    fn print_line(label: ColoredString, message: &str) {
        let time = Local::now().format("%H:%M:%S").to_string();
        println!("{} {} {}", format!("[{}]", time).dimmed(), label, message);
    }

    fn start_spinner() -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        match ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.green} {msg}")
        {
            Ok(style) => spinner.set_style(style),
            Err(error) => tracing::warn!("Invalid spinner template: {}", error),
        }
        spinner.set_message("Uploading avatar...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }
}

impl Prompt for TerminalView {
    fn alert(&self, message: &str) {
        Self::print_line("NOTICE".cyan().bold(), message);
    }

    fn confirm(&self, message: &str) -> bool {
        match Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .default(false)
            .interact()
        {
            Ok(answer) => answer,
            Err(error) => {
                tracing::warn!("Confirmation prompt failed, treating as declined: {}", error);
                false
            }
        }
    }
}

impl WidgetView for TerminalView {
    fn show_preview(&self, preview: &PreviewState) {
        let echoed: String = preview.data_url.chars().take(PREVIEW_ECHO_CHARS).collect();
        Self::print_line(
            "PREVIEW".green().bold(),
            &format!("{}... ({} chars)", echoed, preview.data_url.len()),
        );
    }

    fn hide_preview(&self) {
        tracing::debug!("Preview hidden");
    }

    fn set_progress_visible(&self, visible: bool) {
        let mut spinner = self
            .spinner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        if visible {
            if spinner.is_none() {
                *spinner = Some(Self::start_spinner());
            }
        } else if let Some(active) = spinner.take() {
            active.finish_and_clear();
        }
    }

    fn set_submit_enabled(&self, enabled: bool) {
        tracing::debug!("Submit trigger enabled: {}", enabled);
    }

    fn set_avatar_src(&self, avatar: &AvatarReference) {
        Self::print_line("AVATAR".yellow().bold(), avatar.as_str());
    }

    fn reset_form(&self) {
        tracing::debug!("Avatar form reset");
    }
}
