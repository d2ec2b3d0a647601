use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON envelope used by every avatar service endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponseDto<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Value>,
}

impl<T> ApiResponseDto<T> {
    /// Service-supplied message, or `fallback` when the service sent none
    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|message| !message.is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}

/// `data` payload of a successful upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadAvatarDataDto {
    pub avatar_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_success_envelope() {
        let response: ApiResponseDto<UploadAvatarDataDto> = serde_json::from_value(json!({
            "success": true,
            "message": "Success",
            "data": {"avatar_url": "/u/1.png"}
        }))
        .unwrap();

        assert!(response.success);
        assert_eq!(response.data.unwrap().avatar_url, "/u/1.png");
    }

    #[test]
    fn decodes_failure_envelope_without_data() {
        let response: ApiResponseDto<UploadAvatarDataDto> = serde_json::from_value(json!({
            "success": false,
            "message": "not found",
            "errors": null
        }))
        .unwrap();

        assert!(!response.success);
        assert!(response.data.is_none());
        assert_eq!(response.message_or("unknown"), "not found");
    }

    #[test]
    fn message_or_falls_back_on_blank_message() {
        let response: ApiResponseDto<Value> =
            serde_json::from_value(json!({"success": false, "message": "  "})).unwrap();
        assert_eq!(response.message_or("unknown error"), "unknown error");
    }
}
