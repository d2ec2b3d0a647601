use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::application::dto::avatar_dto::{ApiResponseDto, UploadAvatarDataDto};
use crate::domain::errors::DomainError;
use crate::domain::models::avatar::{AvatarUploadResult, UploadRequest};
use crate::domain::models::user::UserId;
use crate::domain::repositories::avatar_repository::AvatarRepository;

/// Avatar service client speaking the `/api/users/{id}/avatar` contract
pub struct HttpAvatarRepository {
    client: Client,
    base_url: String,
}

impl HttpAvatarRepository {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn build_url(base_url: &str, path: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), path)
    }

    fn avatar_url(&self, user_id: &UserId) -> String {
        Self::build_url(&self.base_url, &format!("/api/users/{}/avatar", user_id))
    }

    fn map_send_error(operation: &str, error: reqwest::Error) -> DomainError {
        tracing::error!("{} request failed: {}", operation, error);
        DomainError::Transport(format!("{} request failed: {}", operation, error))
    }

    /// Decode the JSON envelope whatever the HTTP status: the service reports
    /// application failures as `success: false` alongside 4xx statuses.
    async fn decode_envelope<T: DeserializeOwned>(
        operation: &str,
        response: reqwest::Response,
    ) -> Result<ApiResponseDto<T>, DomainError> {
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|error| Self::map_send_error(operation, error))?;

        serde_json::from_slice(&body).map_err(|error| {
            tracing::error!(
                "{} returned an unreadable response (status {}): {}",
                operation,
                status.as_u16(),
                error
            );
            DomainError::Transport(format!(
                "{} returned an unreadable response (status {}): {}",
                operation,
                status.as_u16(),
                error
            ))
        })
    }
}

#[async_trait]
impl AvatarRepository for HttpAvatarRepository {
    async fn upload_avatar(
        &self,
        user_id: &UserId,
        request: UploadRequest,
    ) -> Result<AvatarUploadResult, DomainError> {
        let url = self.avatar_url(user_id);
        tracing::debug!("POST {} ({} bytes)", url, request.bytes.len());

        let part = Part::bytes(request.bytes.to_vec())
            .file_name(request.file_name.clone())
            .mime_str(&request.mime_type)
            .map_err(|error| {
                DomainError::InternalError(format!(
                    "Invalid MIME type {}: {}",
                    request.mime_type, error
                ))
            })?;
        let form = Form::new().part(request.field_name, part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|error| Self::map_send_error("Avatar upload", error))?;

        let envelope: ApiResponseDto<UploadAvatarDataDto> =
            Self::decode_envelope("Avatar upload", response).await?;

        if !envelope.success {
            let message = envelope.message_or("Upload rejected");
            tracing::warn!("Avatar upload rejected: {}", message);
            return Err(DomainError::Rejected(message));
        }

        match envelope.data {
            Some(data) if !data.avatar_url.trim().is_empty() => Ok(AvatarUploadResult {
                avatar_url: data.avatar_url,
            }),
            _ => {
                tracing::error!("Avatar upload response is missing data.avatar_url");
                Err(DomainError::Transport(
                    "Avatar upload response is missing data.avatar_url".to_string(),
                ))
            }
        }
    }

    async fn delete_avatar(&self, user_id: &UserId) -> Result<(), DomainError> {
        let url = self.avatar_url(user_id);
        tracing::debug!("DELETE {}", url);

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|error| Self::map_send_error("Avatar delete", error))?;

        let envelope: ApiResponseDto<Value> =
            Self::decode_envelope("Avatar delete", response).await?;

        if envelope.success {
            Ok(())
        } else {
            let message = envelope.message_or("Delete rejected");
            tracing::warn!("Avatar delete rejected: {}", message);
            Err(DomainError::Rejected(message))
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::extract::{Multipart, Path};
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use bytes::Bytes;
    use serde_json::json;

    use super::*;
    use crate::domain::models::avatar::SelectedFile;
    use crate::infrastructure::http_client::build_http_client;

    async fn spawn_server(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let address = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve test router");
        });
        format!("http://{}/", address)
    }

    async fn accept_upload(
        Path(id): Path<String>,
        mut multipart: Multipart,
    ) -> (StatusCode, Json<Value>) {
        while let Some(field) = multipart.next_field().await.expect("read field") {
            if field.name() != Some("avatar") {
                continue;
            }
            let content_type = field.content_type().map(str::to_string);
            let file_name = field.file_name().map(str::to_string);
            let data = field.bytes().await.expect("field bytes");

            if content_type.as_deref() == Some("image/png")
                && file_name.as_deref() == Some("photo.png")
                && data.as_ref() == b"png-bytes"
            {
                return (
                    StatusCode::OK,
                    Json(json!({
                        "success": true,
                        "message": "Success",
                        "data": {"avatar_url": format!("/u/{}.png", id)}
                    })),
                );
            }
        }

        (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "message": "unexpected payload", "errors": null})),
        )
    }

    async fn reject(Path(_id): Path<String>, _body: Bytes) -> (StatusCode, Json<Value>) {
        (
            StatusCode::NOT_FOUND,
            Json(json!({"success": false, "message": "not found", "errors": null})),
        )
    }

    async fn accept_delete(Path(_id): Path<String>) -> Json<Value> {
        Json(json!({"success": true, "message": "Success", "data": null}))
    }

    async fn bad_gateway(_body: Bytes) -> (StatusCode, &'static str) {
        (StatusCode::BAD_GATEWAY, "<html>Bad Gateway</html>")
    }

    fn repository(base_url: String) -> HttpAvatarRepository {
        let client = build_http_client(Client::builder()).expect("build client");
        HttpAvatarRepository::new(client, base_url)
    }

    fn png_request() -> UploadRequest {
        let file = SelectedFile::new("photo.png", "image/png", Bytes::from_static(b"png-bytes"));
        UploadRequest::from(&file)
    }

    #[test]
    fn avatar_url_joins_base_and_user_path() {
        let repository = repository("http://localhost:5000/".to_string());
        let user = UserId::new("1").unwrap();
        assert_eq!(
            repository.avatar_url(&user),
            "http://localhost:5000/api/users/1/avatar"
        );
    }

    #[tokio::test]
    async fn upload_posts_multipart_avatar_field() {
        let router = Router::new().route(
            "/api/users/:id/avatar",
            post(accept_upload).delete(accept_delete),
        );
        let repository = repository(spawn_server(router).await);
        let user = UserId::new("1").unwrap();

        let result = repository
            .upload_avatar(&user, png_request())
            .await
            .expect("upload succeeds");

        assert_eq!(result.avatar_url, "/u/1.png");
        repository.delete_avatar(&user).await.expect("delete succeeds");
    }

    #[tokio::test]
    async fn failure_envelope_maps_to_rejection() {
        let router = Router::new().route("/api/users/:id/avatar", post(reject).delete(reject));
        let repository = repository(spawn_server(router).await);
        let user = UserId::new("1").unwrap();

        assert_eq!(
            repository.upload_avatar(&user, png_request()).await,
            Err(DomainError::Rejected("not found".to_string()))
        );
        assert_eq!(
            repository.delete_avatar(&user).await,
            Err(DomainError::Rejected("not found".to_string()))
        );
    }

    #[tokio::test]
    async fn non_json_body_is_a_transport_error() {
        let router = Router::new().route(
            "/api/users/:id/avatar",
            post(bad_gateway).delete(bad_gateway),
        );
        let repository = repository(spawn_server(router).await);
        let user = UserId::new("1").unwrap();

        assert!(matches!(
            repository.upload_avatar(&user, png_request()).await,
            Err(DomainError::Transport(_))
        ));
        assert!(matches!(
            repository.delete_avatar(&user).await,
            Err(DomainError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_service_is_a_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind probe listener");
        let address = listener.local_addr().expect("local addr");
        drop(listener);

        let repository = repository(format!("http://{}", address));
        let user = UserId::new("1").unwrap();

        assert!(matches!(
            repository.delete_avatar(&user).await,
            Err(DomainError::Transport(_))
        ));
    }
}
