use crate::domain::models::avatar::{AvatarReference, PreviewState};

/// Blocking notifications and yes/no prompts
pub trait Prompt: Send + Sync {
    /// Show a notice and wait for the user to acknowledge it
    fn alert(&self, message: &str);

    /// Ask a yes/no question; `false` means the user declined
    fn confirm(&self, message: &str) -> bool;
}

/// Surface the avatar widget renders into: the form, its image input,
/// the preview container, the progress indicator and the avatar image.
pub trait WidgetView: Prompt {
    fn show_preview(&self, preview: &PreviewState);

    fn hide_preview(&self);

    fn set_progress_visible(&self, visible: bool);

    fn set_submit_enabled(&self, enabled: bool);

    fn set_avatar_src(&self, avatar: &AvatarReference);

    /// Clear the file input
    fn reset_form(&self);
}
