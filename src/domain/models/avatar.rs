use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// MIME types accepted for avatar uploads
pub const ALLOWED_MIME_TYPES: [&str; 5] = [
    "image/png",
    "image/jpg",
    "image/jpeg",
    "image/gif",
    "image/webp",
];

/// Upload size ceiling (16 MiB)
pub const MAX_AVATAR_BYTES: u64 = 16 * 1024 * 1024;

/// Multipart field carrying the image bytes
pub const AVATAR_FIELD_NAME: &str = "avatar";

/// Static asset shown whenever no avatar is set
pub const DEFAULT_AVATAR_PATH: &str = "/static/images/default_avatar.png";

/// Query parameter used to bypass cached copies of an avatar URL
pub const CACHE_BUST_PARAM: &str = "t";

/// Image chosen locally by the user, prior to upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// Original file name, forwarded to the service in the multipart part
    pub file_name: String,
    /// MIME type reported for the file
    pub mime_type: String,
    /// Size in bytes
    pub size: u64,
    /// Raw file contents
    pub bytes: Bytes,
}

impl SelectedFile {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Bytes) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            size: bytes.len() as u64,
            bytes,
        }
    }

    /// Lower-cased MIME essence without parameters such as `; charset=...`
    pub fn mime_essence(&self) -> String {
        self.mime_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase()
    }

    /// Check the file against the format allow-set and the size ceiling.
    ///
    /// The format is checked first and a bad format short-circuits, so an
    /// oversized file of a disallowed type reports the format error.
    pub fn validate(&self) -> Result<(), DomainError> {
        let essence = self.mime_essence();
        if !ALLOWED_MIME_TYPES.contains(&essence.as_str()) {
            return Err(DomainError::InvalidFormat(if essence.is_empty() {
                "unknown".to_string()
            } else {
                essence
            }));
        }

        if self.size > MAX_AVATAR_BYTES {
            return Err(DomainError::FileTooLarge {
                size: self.size,
                limit: MAX_AVATAR_BYTES,
            });
        }

        Ok(())
    }
}

/// Preview of a validated selection, rendered as a data URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewState {
    pub data_url: String,
}

impl PreviewState {
    pub fn render(file: &SelectedFile) -> Self {
        Self {
            data_url: format!(
                "data:{};base64,{}",
                file.mime_essence(),
                BASE64_STANDARD.encode(&file.bytes)
            ),
        }
    }
}

/// Multipart payload built from a selection at submit time
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub field_name: &'static str,
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Bytes,
}

impl From<&SelectedFile> for UploadRequest {
    fn from(file: &SelectedFile) -> Self {
        Self {
            field_name: AVATAR_FIELD_NAME,
            file_name: file.file_name.clone(),
            mime_type: file.mime_essence(),
            bytes: file.bytes.clone(),
        }
    }
}

/// Result of avatar upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarUploadResult {
    /// URL of the stored avatar, as returned by the service
    pub avatar_url: String,
}

/// URL currently displayed as the user's avatar. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarReference(String);

impl AvatarReference {
    /// Reference to `url`, falling back to `default_path` when `url` is blank
    pub fn new(url: impl Into<String>, default_path: &str) -> Self {
        let url = url.into();
        if url.trim().is_empty() {
            Self::default_avatar(default_path)
        } else {
            Self(url)
        }
    }

    pub fn default_avatar(default_path: &str) -> Self {
        if default_path.trim().is_empty() {
            Self(DEFAULT_AVATAR_PATH.to_string())
        } else {
            Self(default_path.to_string())
        }
    }

    /// Reference to a freshly uploaded avatar with a cache-busting timestamp
    pub fn refreshed(url: &str, at: DateTime<Utc>, default_path: &str) -> Self {
        if url.trim().is_empty() {
            return Self::default_avatar(default_path);
        }

        let separator = if url.contains('?') { '&' } else { '?' };
        Self(format!(
            "{}{}{}={}",
            url,
            separator,
            CACHE_BUST_PARAM,
            at.timestamp_millis()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AvatarReference {
    fn default() -> Self {
        Self(DEFAULT_AVATAR_PATH.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn file(mime: &str, size: usize) -> SelectedFile {
        SelectedFile::new("photo", mime, Bytes::from(vec![0u8; size]))
    }

    #[test]
    fn validate_accepts_every_allowed_type() {
        for mime in ALLOWED_MIME_TYPES {
            assert!(file(mime, 16).validate().is_ok(), "{mime} should pass");
        }
        assert!(file("IMAGE/PNG; charset=binary", 16).validate().is_ok());
    }

    #[test]
    fn validate_rejects_disallowed_type() {
        assert_eq!(
            file("image/bmp", 16).validate(),
            Err(DomainError::InvalidFormat("image/bmp".to_string()))
        );
        assert_eq!(
            file("", 16).validate(),
            Err(DomainError::InvalidFormat("unknown".to_string()))
        );
    }

    #[test]
    fn validate_rejects_oversized_file() {
        let oversized = file("image/png", MAX_AVATAR_BYTES as usize + 1);
        assert_eq!(
            oversized.validate(),
            Err(DomainError::FileTooLarge {
                size: MAX_AVATAR_BYTES + 1,
                limit: MAX_AVATAR_BYTES,
            })
        );

        let at_limit = file("image/webp", MAX_AVATAR_BYTES as usize);
        assert!(at_limit.validate().is_ok());
    }

    #[test]
    fn format_error_wins_over_size_error() {
        let oversized_bitmap = file("image/bmp", 20 * 1024 * 1024);
        assert_eq!(
            oversized_bitmap.validate(),
            Err(DomainError::InvalidFormat("image/bmp".to_string()))
        );
    }

    #[test]
    fn preview_encodes_exact_bytes() {
        let selected = SelectedFile::new("a.gif", "image/gif", Bytes::from_static(b"GIF89a"));
        let preview = PreviewState::render(&selected);
        assert_eq!(preview.data_url, "data:image/gif;base64,R0lGODlh");
    }

    #[test]
    fn refreshed_reference_appends_timestamp() {
        let first = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let second = Utc.timestamp_millis_opt(1_700_000_000_500).unwrap();

        let a = AvatarReference::refreshed("/u/1.png", first, DEFAULT_AVATAR_PATH);
        let b = AvatarReference::refreshed("/u/1.png", second, DEFAULT_AVATAR_PATH);

        assert_eq!(a.as_str(), "/u/1.png?t=1700000000000");
        assert_ne!(a, b);

        let with_query = AvatarReference::refreshed("/u/1.png?size=150", first, DEFAULT_AVATAR_PATH);
        assert_eq!(with_query.as_str(), "/u/1.png?size=150&t=1700000000000");
    }

    #[test]
    fn reference_is_never_empty() {
        assert_eq!(
            AvatarReference::new("  ", "/static/custom.png").as_str(),
            "/static/custom.png"
        );
        assert_eq!(AvatarReference::default_avatar("").as_str(), DEFAULT_AVATAR_PATH);
    }
}
