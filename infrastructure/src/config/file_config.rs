//! Raw TOML configuration data types
//!
//! These structs mirror the TOML file. Conversions into domain types
//! validate as they go.

use portal_domain::{
    ConversationId, DEFAULT_CONVERSATION_ID, RoleRouteMap, Route, SessionUser,
    VerificationStatus,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("chat.base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("chat.conversation_id is invalid: '{0}'")]
    InvalidConversationId(String),

    #[error("chat.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("auth.role_routes.{role} must be an absolute path, got '{route}'")]
    InvalidRoleRoute { role: String, route: String },

    #[error("auth.dev_user.role cannot be empty")]
    EmptyDevUserRole,
}

/// Raw chat configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChatConfig {
    /// Base URL of the conversational service
    pub base_url: String,
    /// Conversation all messages are posted into
    pub conversation_id: String,
    /// Request timeout; no timeout when unset
    pub timeout_seconds: Option<u64>,
}

impl Default for FileChatConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            conversation_id: DEFAULT_CONVERSATION_ID.to_string(),
            timeout_seconds: None,
        }
    }
}

impl FileChatConfig {
    pub fn conversation_id(&self) -> Result<ConversationId, ConfigValidationError> {
        ConversationId::new(self.conversation_id.clone())
            .map_err(|_| ConfigValidationError::InvalidConversationId(self.conversation_id.clone()))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

/// Account the local identity provider signs in as
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDevUserConfig {
    pub role: String,
    /// `PENDING`, `APPROVED`, anything else, or unset
    pub verification_status: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
}

impl FileDevUserConfig {
    pub fn to_session_user(&self) -> SessionUser {
        SessionUser {
            role: self.role.clone(),
            verification_status: self
                .verification_status
                .clone()
                .map(VerificationStatus::from),
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }
}

/// Raw auth configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAuthConfig {
    /// Identity provider name passed to sign-in
    pub provider: String,
    /// Role → landing route
    pub role_routes: BTreeMap<String, String>,
    /// Local account used by `sign-in`
    pub dev_user: Option<FileDevUserConfig>,
}

impl Default for FileAuthConfig {
    fn default() -> Self {
        Self {
            provider: "google".to_string(),
            role_routes: RoleRouteMap::default()
                .iter()
                .map(|(role, route)| (role.to_string(), route.to_string()))
                .collect(),
            dev_user: None,
        }
    }
}

impl FileAuthConfig {
    pub fn role_routes(&self) -> Result<RoleRouteMap, ConfigValidationError> {
        let mut routes = RoleRouteMap::empty();
        for (role, path) in &self.role_routes {
            let route = Route::new(path.clone()).map_err(|_| {
                ConfigValidationError::InvalidRoleRoute {
                    role: role.clone(),
                    route: path.clone(),
                }
            })?;
            routes.insert(role.clone(), route);
        }
        Ok(routes)
    }

    pub fn dev_user(&self) -> Option<SessionUser> {
        self.dev_user.as_ref().map(FileDevUserConfig::to_session_user)
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Chat service settings
    pub chat: FileChatConfig,
    /// Sign-in and redirect settings
    pub auth: FileAuthConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.chat.base_url.trim().is_empty() {
            return Err(ConfigValidationError::EmptyBaseUrl);
        }

        self.chat.conversation_id()?;

        if let Some(0) = self.chat.timeout_seconds {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        self.auth.role_routes()?;

        if let Some(user) = &self.auth.dev_user
            && user.role.trim().is_empty()
        {
            return Err(ConfigValidationError::EmptyDevUserRole);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[chat]
base_url = "https://chat.example.edu"
conversation_id = "0f0e7d4c"
timeout_seconds = 30

[auth]
provider = "google"

[auth.role_routes]
admin = "/admin/home"
recruiter = "/recruiter"

[auth.dev_user]
role = "admin"
verification_status = "APPROVED"
email = "admin@example.edu"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.chat.base_url, "https://chat.example.edu");
        assert_eq!(config.chat.conversation_id().unwrap().as_str(), "0f0e7d4c");
        assert_eq!(config.chat.timeout(), Some(Duration::from_secs(30)));

        let routes = config.auth.role_routes().unwrap();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes.get("recruiter").unwrap(), "/recruiter");

        let user = config.auth.dev_user().unwrap();
        assert_eq!(user.role, "admin");
        assert_eq!(user.verification_status, Some(VerificationStatus::Approved));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[chat]
base_url = "http://10.0.0.5:8000"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.chat.base_url, "http://10.0.0.5:8000");
        // Defaults should apply
        assert_eq!(config.chat.conversation_id, DEFAULT_CONVERSATION_ID);
        assert_eq!(config.chat.timeout(), None);
        assert_eq!(config.auth.provider, "google");
        assert_eq!(config.auth.role_routes().unwrap(), RoleRouteMap::default());
        assert!(config.auth.dev_user().is_none());
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = FileConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_base_url() {
        let config: FileConfig = toml::from_str("[chat]\nbase_url = \" \"\n").unwrap();
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyBaseUrl));
    }

    #[test]
    fn test_validate_empty_conversation_id() {
        let config: FileConfig = toml::from_str("[chat]\nconversation_id = \"\"\n").unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidConversationId(String::new()))
        );
    }

    #[test]
    fn test_validate_zero_timeout() {
        let config: FileConfig = toml::from_str("[chat]\ntimeout_seconds = 0\n").unwrap();
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTimeout));
    }

    #[test]
    fn test_validate_relative_role_route() {
        let toml_str = r#"
[auth.role_routes]
admin = "admin/dashboard"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidRoleRoute {
                role: "admin".to_string(),
                route: "admin/dashboard".to_string(),
            })
        );
    }

    #[test]
    fn test_validate_empty_dev_user_role() {
        let config: FileConfig = toml::from_str("[auth.dev_user]\nrole = \"\"\n").unwrap();
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyDevUserRole));
    }

    #[test]
    fn test_dev_user_without_status() {
        let config: FileConfig = toml::from_str("[auth.dev_user]\nrole = \"student\"\n").unwrap();
        let user = config.auth.dev_user().unwrap();
        assert_eq!(user.verification_status, None);
    }
}
