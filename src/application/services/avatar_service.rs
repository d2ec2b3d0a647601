use std::sync::Arc;

use crate::application::errors::ApplicationError;
use crate::domain::models::avatar::{AvatarUploadResult, SelectedFile, UploadRequest};
use crate::domain::models::user::UserId;
use crate::domain::repositories::avatar_repository::AvatarRepository;
use crate::infrastructure::logging::logger;

/// Service for managing the avatar of the session user
pub struct AvatarService {
    avatar_repository: Arc<dyn AvatarRepository>,
    user_id: UserId,
}

impl AvatarService {
    /// Create a new AvatarService bound to `user_id`
    pub fn new(avatar_repository: Arc<dyn AvatarRepository>, user_id: UserId) -> Self {
        Self {
            avatar_repository,
            user_id,
        }
    }

    /// Check a local selection against the format and size constraints
    pub fn validate_selection(&self, file: &SelectedFile) -> Result<(), ApplicationError> {
        file.validate().map_err(|error| {
            logger::debug(&format!(
                "Rejected selection {} ({}, {} bytes): {}",
                file.file_name, file.mime_type, file.size, error
            ));
            ApplicationError::from(error)
        })
    }

    /// Upload an avatar
    pub async fn upload_avatar(
        &self,
        file: &SelectedFile,
    ) -> Result<AvatarUploadResult, ApplicationError> {
        self.validate_selection(file)?;

        logger::debug(&format!(
            "Uploading avatar for user {}: {} ({} bytes)",
            self.user_id, file.file_name, file.size
        ));

        let result = self
            .avatar_repository
            .upload_avatar(&self.user_id, UploadRequest::from(file))
            .await?;

        logger::info(&format!(
            "Avatar uploaded for user {}: {}",
            self.user_id, result.avatar_url
        ));
        Ok(result)
    }

    /// Delete the avatar
    pub async fn delete_avatar(&self) -> Result<(), ApplicationError> {
        logger::debug(&format!("Deleting avatar for user {}", self.user_id));
        self.avatar_repository.delete_avatar(&self.user_id).await?;
        logger::info(&format!("Avatar deleted for user {}", self.user_id));
        Ok(())
    }
}
