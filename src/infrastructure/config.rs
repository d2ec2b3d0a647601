use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::errors::DomainError;
use crate::domain::models::avatar::DEFAULT_AVATAR_PATH;
use crate::domain::models::user::UserId;

pub const ENV_BASE_URL: &str = "AVATAR_WIDGET_BASE_URL";
pub const ENV_USER_ID: &str = "AVATAR_WIDGET_USER_ID";
pub const ENV_DEFAULT_AVATAR: &str = "AVATAR_WIDGET_DEFAULT_AVATAR";
pub const ENV_LOG_DIR: &str = "AVATAR_WIDGET_LOG_DIR";
pub const ENV_CURRENT_AVATAR: &str = "AVATAR_WIDGET_CURRENT_AVATAR";

/// Widget configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Origin of the avatar service, e.g. `http://127.0.0.1:5000`
    pub base_url: String,
    /// Session user whose avatar is managed
    pub user_id: String,
    /// Static asset shown when no avatar is set
    pub default_avatar_path: String,
    /// Directory for rolling log files
    pub log_dir: PathBuf,
    /// Avatar URL the page currently shows; the default asset when unset
    pub current_avatar: Option<String>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            user_id: "1".to_string(),
            default_avatar_path: DEFAULT_AVATAR_PATH.to_string(),
            log_dir: PathBuf::from("logs"),
            current_avatar: None,
        }
    }
}

impl WidgetConfig {
    /// Load configuration from an optional YAML file, then apply environment
    /// overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, DomainError> {
        let config = match path {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };

        let config = config.with_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self, DomainError> {
        let contents = std::fs::read_to_string(path).map_err(|error| {
            DomainError::InternalError(format!(
                "Failed to read config file {:?}: {}",
                path, error
            ))
        })?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, DomainError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(contents).map_err(|error| {
            DomainError::InternalError(format!("Failed to parse config: {}", error))
        })
    }

    /// Apply overrides from `lookup`, typically the process environment.
    /// Blank values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(value) = lookup(ENV_BASE_URL) {
            self.base_url = value;
        }
        if let Some(value) = lookup(ENV_USER_ID) {
            self.user_id = value;
        }
        if let Some(value) = lookup(ENV_DEFAULT_AVATAR) {
            self.default_avatar_path = value;
        }
        if let Some(value) = lookup(ENV_LOG_DIR) {
            self.log_dir = PathBuf::from(value);
        }
        if let Some(value) = lookup(ENV_CURRENT_AVATAR) {
            self.current_avatar = Some(value);
        }

        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let url = Url::parse(&self.base_url).map_err(|error| {
            DomainError::InternalError(format!("Invalid base_url {}: {}", self.base_url, error))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(DomainError::InternalError(format!(
                "Unsupported base_url scheme: {}",
                url.scheme()
            )));
        }

        self.user_id()?;
        Ok(())
    }

    pub fn user_id(&self) -> Result<UserId, DomainError> {
        UserId::new(self.user_id.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn empty_yaml_yields_defaults() {
        assert_eq!(WidgetConfig::from_yaml_str("").unwrap(), WidgetConfig::default());
    }

    #[test]
    fn yaml_fields_override_defaults() {
        let config = WidgetConfig::from_yaml_str(
            "base_url: https://avatars.example.com\nuser_id: \"42\"\n",
        )
        .unwrap();

        assert_eq!(config.base_url, "https://avatars.example.com");
        assert_eq!(config.user_id, "42");
        assert_eq!(config.default_avatar_path, DEFAULT_AVATAR_PATH);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn environment_overrides_file_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_USER_ID, "9"),
            (ENV_DEFAULT_AVATAR, "/static/none.png"),
            (ENV_BASE_URL, "   "),
            (ENV_CURRENT_AVATAR, "/u/9.png"),
        ]);

        let config = WidgetConfig::default()
            .with_overrides(|key| env.get(key).map(|value| value.to_string()));

        assert_eq!(config.user_id, "9");
        assert_eq!(config.default_avatar_path, "/static/none.png");
        assert_eq!(config.base_url, WidgetConfig::default().base_url);
        assert_eq!(config.current_avatar.as_deref(), Some("/u/9.png"));
    }

    #[test]
    fn validate_rejects_bad_base_url_and_blank_user() {
        let config = WidgetConfig {
            base_url: "ftp://example.com".to_string(),
            ..WidgetConfig::default()
        };
        assert!(config.validate().is_err());

        let config = WidgetConfig {
            user_id: " ".to_string(),
            ..WidgetConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_yaml_is_reported() {
        assert!(WidgetConfig::from_yaml_str("base_url: [unclosed").is_err());
    }
}
