//! User-facing notices shown by the widget and the link guard.

use crate::application::errors::{ApplicationError, ValidationError};

pub const INVALID_FORMAT: &str = "Please choose a valid image format (PNG, JPG, JPEG, GIF, WebP)";
pub const FILE_TOO_LARGE: &str = "File size cannot exceed 16MB";
pub const NO_FILE_SELECTED: &str = "Please choose an image to upload";
pub const PREVIEW_FAILED: &str = "Could not read the selected image";
pub const UPLOAD_SUCCESS: &str = "Avatar uploaded successfully!";
pub const UPLOAD_RETRY: &str = "Upload failed, please try again";
pub const DELETE_CONFIRM: &str = "Are you sure you want to delete your avatar?";
pub const DELETE_SUCCESS: &str = "Avatar deleted successfully!";
pub const DELETE_RETRY: &str = "Delete failed, please try again";
pub const LEAVE_SITE_CONFIRM: &str = "Are you sure you want to leave this site?";

pub fn upload_failed(message: &str) -> String {
    format!("Upload failed: {}", message)
}

pub fn delete_failed(message: &str) -> String {
    format!("Delete failed: {}", message)
}

/// Notice for a rejected file selection
pub fn selection_rejected(error: &ApplicationError) -> &'static str {
    match error {
        ApplicationError::ValidationError(ValidationError::InvalidFormat(_)) => INVALID_FORMAT,
        ApplicationError::ValidationError(ValidationError::FileTooLarge { .. }) => FILE_TOO_LARGE,
        _ => PREVIEW_FAILED,
    }
}
