use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::errors::DomainError;
use crate::infrastructure::config::WidgetConfig;
use crate::infrastructure::persistence::local_file_picker::read_selected_file;
use crate::presentation::avatar_widget::{
    AvatarWidget, DeleteOutcome, SelectionOutcome, UploadOutcome,
};
use crate::presentation::link_guard::{LinkGuard, Navigation};
use crate::presentation::view::WidgetView;

mod bootstrap;

/// Action requested from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Upload(PathBuf),
    Delete,
    Open(String),
}

pub struct AppState {
    pub config: WidgetConfig,
    pub view: Arc<dyn WidgetView>,
    pub avatar_widget: Arc<AvatarWidget>,
    pub link_guard: LinkGuard,
}

impl AppState {
    pub fn new(config: WidgetConfig, view: Arc<dyn WidgetView>) -> Result<Self, DomainError> {
        tracing::info!(
            "Initializing avatar widget for user {} against {}",
            config.user_id,
            config.base_url
        );

        let services = bootstrap::build_services(&config, view.clone())?;

        Ok(Self {
            config,
            view,
            avatar_widget: services.avatar_widget,
            link_guard: services.link_guard,
        })
    }

    /// Run one command; `Ok(false)` means the user was shown a failure.
    pub async fn execute(&self, command: CliCommand) -> Result<bool, DomainError> {
        match command {
            CliCommand::Upload(path) => self.upload(path).await,
            CliCommand::Delete => Ok(self.delete().await),
            CliCommand::Open(href) => Ok(self.open(&href)),
        }
    }

    async fn upload(&self, path: PathBuf) -> Result<bool, DomainError> {
        let file = read_selected_file(&path).await?;

        match self.avatar_widget.select_file(Some(file)).await {
            SelectionOutcome::Previewed(_) => {}
            outcome => {
                tracing::debug!("Selection not accepted: {:?}", outcome);
                return Ok(false);
            }
        }

        let outcome = self.avatar_widget.submit().await;
        tracing::debug!("Upload finished: {:?}", outcome);
        Ok(matches!(outcome, UploadOutcome::Uploaded(_)))
    }

    async fn delete(&self) -> bool {
        let outcome = self.avatar_widget.delete().await;
        tracing::debug!("Delete finished: {:?}", outcome);
        matches!(outcome, DeleteOutcome::Deleted(_) | DeleteOutcome::Cancelled)
    }

    fn open(&self, href: &str) -> bool {
        match self.link_guard.on_click(href, self.view.as_ref()) {
            Navigation::Proceed => {
                tracing::info!("Navigating to {}", href);
                true
            }
            Navigation::Cancelled => true,
        }
    }
}
