use async_trait::async_trait;

use crate::domain::errors::DomainError;
use crate::domain::models::avatar::{AvatarUploadResult, UploadRequest};
use crate::domain::models::user::UserId;

/// Remote avatar service reached over `/api/users/{id}/avatar`
#[async_trait]
pub trait AvatarRepository: Send + Sync {
    /// Upload an avatar image for `user_id`
    async fn upload_avatar(
        &self,
        user_id: &UserId,
        request: UploadRequest,
    ) -> Result<AvatarUploadResult, DomainError>;

    /// Delete the avatar of `user_id`
    async fn delete_avatar(&self, user_id: &UserId) -> Result<(), DomainError>;
}
