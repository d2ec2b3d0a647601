use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;

use crate::application::errors::ApplicationError;
use crate::application::services::avatar_service::AvatarService;
use crate::domain::models::avatar::{AvatarReference, PreviewState, SelectedFile};
use crate::infrastructure::logging::logger;
use crate::presentation::messages;
use crate::presentation::view::WidgetView;

/// Result of picking (or clearing) a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The input was emptied and the preview hidden
    Cleared,
    /// The file passed validation and its preview is shown
    Previewed(PreviewState),
    /// The file failed validation; nothing is selected
    Rejected(ApplicationError),
    /// A newer selection replaced this one before its preview was ready
    Superseded,
}

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Uploaded(AvatarReference),
    /// The service answered `success: false`
    Rejected(String),
    /// The request did not complete
    Failed(String),
    NoFileSelected,
    /// Another upload is still outstanding; the trigger is disabled
    InFlight,
}

/// Result of a delete attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(AvatarReference),
    Cancelled,
    Rejected(String),
    Failed(String),
}

/// Observable widget state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetSnapshot {
    pub selected_file: Option<String>,
    pub preview_visible: bool,
    pub progress_visible: bool,
    pub submit_enabled: bool,
    pub avatar: AvatarReference,
}

struct WidgetState {
    selection: Option<SelectedFile>,
    // Bumped on every selection change so late previews can be discarded
    generation: u64,
    preview_visible: bool,
    upload_in_flight: bool,
    avatar: AvatarReference,
}

/// Avatar upload, preview and delete workflow bound to a [`WidgetView`]
pub struct AvatarWidget {
    avatar_service: Arc<AvatarService>,
    view: Arc<dyn WidgetView>,
    default_avatar_path: String,
    state: Mutex<WidgetState>,
}

impl AvatarWidget {
    pub fn new(
        avatar_service: Arc<AvatarService>,
        view: Arc<dyn WidgetView>,
        default_avatar_path: impl Into<String>,
    ) -> Self {
        let default_avatar_path = default_avatar_path.into();
        let avatar = AvatarReference::default_avatar(&default_avatar_path);

        Self {
            avatar_service,
            view,
            default_avatar_path,
            state: Mutex::new(WidgetState {
                selection: None,
                generation: 0,
                preview_visible: false,
                upload_in_flight: false,
                avatar,
            }),
        }
    }

    /// Start from the avatar the page currently displays
    pub fn with_current_avatar(self, url: impl Into<String>) -> Self {
        self.state().avatar = AvatarReference::new(url, &self.default_avatar_path);
        self
    }

    pub fn snapshot(&self) -> WidgetSnapshot {
        let state = self.state();
        WidgetSnapshot {
            selected_file: state.selection.as_ref().map(|file| file.file_name.clone()),
            preview_visible: state.preview_visible,
            progress_visible: state.upload_in_flight,
            submit_enabled: !state.upload_in_flight,
            avatar: state.avatar.clone(),
        }
    }

    pub fn avatar(&self) -> AvatarReference {
        self.state().avatar.clone()
    }

    fn state(&self) -> MutexGuard<'_, WidgetState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn clear_selection(state: &mut WidgetState) {
        state.generation += 1;
        state.selection = None;
        state.preview_visible = false;
    }

    // View callbacks run with the state lock released so they may read `snapshot()`
    fn clear_and_hide(&self) {
        Self::clear_selection(&mut self.state());
        self.view.hide_preview();
    }

    /// Handle a change of the file input. `None` means the input was cleared.
    pub async fn select_file(&self, file: Option<SelectedFile>) -> SelectionOutcome {
        let Some(file) = file else {
            self.clear_and_hide();
            return SelectionOutcome::Cleared;
        };

        if let Err(error) = self.avatar_service.validate_selection(&file) {
            logger::warn(&format!("Selection {} rejected: {}", file.file_name, error));
            self.clear_and_hide();
            self.view.alert(messages::selection_rejected(&error));
            return SelectionOutcome::Rejected(error);
        }

        let generation = {
            let mut state = self.state();
            state.generation += 1;
            state.selection = Some(file.clone());
            state.generation
        };

        let preview = match tokio::task::spawn_blocking(move || PreviewState::render(&file)).await
        {
            Ok(preview) => preview,
            Err(error) => {
                logger::error(&format!("Failed to render avatar preview: {}", error));
                let error = ApplicationError::InternalError(error.to_string());
                {
                    let mut state = self.state();
                    if state.generation != generation {
                        return SelectionOutcome::Superseded;
                    }
                    Self::clear_selection(&mut state);
                }
                self.view.hide_preview();
                self.view.alert(messages::selection_rejected(&error));
                return SelectionOutcome::Rejected(error);
            }
        };

        {
            let mut state = self.state();
            if state.generation != generation {
                logger::debug("Discarding preview of a superseded selection");
                return SelectionOutcome::Superseded;
            }
            state.preview_visible = true;
        }

        self.view.show_preview(&preview);
        SelectionOutcome::Previewed(preview)
    }

    /// Upload the current selection.
    ///
    /// The progress indicator and the disabled trigger are restored on every
    /// exit path once the request has been issued.
    pub async fn submit(&self) -> UploadOutcome {
        let file = {
            let mut state = self.state();
            if state.upload_in_flight {
                logger::debug("Ignoring submit while an upload is in flight");
                return UploadOutcome::InFlight;
            }

            match state.selection.clone() {
                Some(file) => {
                    state.upload_in_flight = true;
                    file
                }
                None => {
                    drop(state);
                    self.view.alert(messages::NO_FILE_SELECTED);
                    return UploadOutcome::NoFileSelected;
                }
            }
        };

        let _in_flight = InFlightGuard::engage(self);

        match self.avatar_service.upload_avatar(&file).await {
            Ok(result) => {
                let avatar = AvatarReference::refreshed(
                    &result.avatar_url,
                    Utc::now(),
                    &self.default_avatar_path,
                );

                {
                    let mut state = self.state();
                    state.avatar = avatar.clone();
                    Self::clear_selection(&mut state);
                }
                self.view.set_avatar_src(&avatar);
                self.view.reset_form();
                self.view.hide_preview();

                self.view.alert(messages::UPLOAD_SUCCESS);
                UploadOutcome::Uploaded(avatar)
            }
            Err(ApplicationError::ServiceError(message)) => {
                logger::warn(&format!("Avatar upload rejected: {}", message));
                self.view.alert(&messages::upload_failed(&message));
                UploadOutcome::Rejected(message)
            }
            Err(error) => {
                logger::error(&format!("Avatar upload failed: {}", error));
                self.view.alert(messages::UPLOAD_RETRY);
                UploadOutcome::Failed(error.to_string())
            }
        }
    }

    /// Delete the avatar after the user confirms
    pub async fn delete(&self) -> DeleteOutcome {
        if !self.view.confirm(messages::DELETE_CONFIRM) {
            return DeleteOutcome::Cancelled;
        }

        match self.avatar_service.delete_avatar().await {
            Ok(()) => {
                let avatar = AvatarReference::default_avatar(&self.default_avatar_path);
                self.state().avatar = avatar.clone();
                self.view.set_avatar_src(&avatar);

                self.view.alert(messages::DELETE_SUCCESS);
                DeleteOutcome::Deleted(avatar)
            }
            Err(ApplicationError::ServiceError(message)) => {
                logger::warn(&format!("Avatar delete rejected: {}", message));
                self.view.alert(&messages::delete_failed(&message));
                DeleteOutcome::Rejected(message)
            }
            Err(error) => {
                logger::error(&format!("Avatar delete failed: {}", error));
                self.view.alert(messages::DELETE_RETRY);
                DeleteOutcome::Failed(error.to_string())
            }
        }
    }
}

/// Shows the progress indicator and disables the submit trigger for as long
/// as it lives.
struct InFlightGuard<'a> {
    widget: &'a AvatarWidget,
}

impl<'a> InFlightGuard<'a> {
    fn engage(widget: &'a AvatarWidget) -> Self {
        widget.view.set_progress_visible(true);
        widget.view.set_submit_enabled(false);
        Self { widget }
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.widget.state().upload_in_flight = false;
        self.widget.view.set_progress_visible(false);
        self.widget.view.set_submit_enabled(true);
    }
}
