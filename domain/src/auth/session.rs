//! Session entities
//!
//! A session is owned by an external provider. This crate only reads it.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::str::FromStr;

/// Lifecycle state of a session as reported by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// The provider has not resolved the session yet
    #[default]
    Loading,
    Unauthenticated,
    Authenticated,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SessionStatus::Loading => "loading",
            SessionStatus::Unauthenticated => "unauthenticated",
            SessionStatus::Authenticated => "authenticated",
        };
        f.write_str(s)
    }
}

/// Institutional approval state of an account
///
/// Anything that is not `PENDING` or `APPROVED` is kept as [`Other`](Self::Other)
/// with the raw value, e.g. `REJECTED`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VerificationStatus {
    Pending,
    Approved,
    Other(String),
}

impl VerificationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            VerificationStatus::Pending => "PENDING",
            VerificationStatus::Approved => "APPROVED",
            VerificationStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for VerificationStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "PENDING" => VerificationStatus::Pending,
            "APPROVED" => VerificationStatus::Approved,
            _ => VerificationStatus::Other(value),
        }
    }
}

impl From<VerificationStatus> for String {
    fn from(status: VerificationStatus) -> Self {
        status.as_str().to_string()
    }
}

impl FromStr for VerificationStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(VerificationStatus::from(s.to_string()))
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The signed-in user carried by an authenticated session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    /// Role key looked up in the role → route table
    pub role: String,
    #[serde(default)]
    pub verification_status: Option<VerificationStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl SessionUser {
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            verification_status: None,
            email: None,
            name: None,
        }
    }

    pub fn with_verification_status(mut self, status: VerificationStatus) -> Self {
        self.verification_status = Some(status);
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Snapshot of the provider's session (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Session {
    pub status: SessionStatus,
    #[serde(default)]
    pub user: Option<SessionUser>,
}

impl Session {
    pub fn loading() -> Self {
        Self::default()
    }

    pub fn unauthenticated() -> Self {
        Self {
            status: SessionStatus::Unauthenticated,
            user: None,
        }
    }

    pub fn authenticated(user: SessionUser) -> Self {
        Self {
            status: SessionStatus::Authenticated,
            user: Some(user),
        }
    }

    /// The user, only when the session is authenticated
    pub fn authenticated_user(&self) -> Option<&SessionUser> {
        match self.status {
            SessionStatus::Authenticated => self.user.as_ref(),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated_user().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_session_is_loading() {
        let session = Session::default();
        assert_eq!(session.status, SessionStatus::Loading);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_verification_status_parsing() {
        assert_eq!("PENDING".parse::<VerificationStatus>().unwrap(), VerificationStatus::Pending);
        assert_eq!("APPROVED".parse::<VerificationStatus>().unwrap(), VerificationStatus::Approved);
        assert_eq!(
            "REJECTED".parse::<VerificationStatus>().unwrap(),
            VerificationStatus::Other("REJECTED".to_string())
        );
        // Case matters: the provider sends upper-case values
        assert_eq!(
            "approved".parse::<VerificationStatus>().unwrap(),
            VerificationStatus::Other("approved".to_string())
        );
    }

    #[test]
    fn test_deserialize_provider_payload() {
        let json = r#"{
            "status": "authenticated",
            "user": {"role": "admin", "verificationStatus": "APPROVED", "email": "a@b.edu"}
        }"#;
        let session: Session = serde_json::from_str(json).unwrap();
        let user = session.authenticated_user().unwrap();
        assert_eq!(user.role, "admin");
        assert_eq!(user.verification_status, Some(VerificationStatus::Approved));
        assert_eq!(user.email.as_deref(), Some("a@b.edu"));
    }

    #[test]
    fn test_missing_verification_status_is_none() {
        let json = r#"{"status": "authenticated", "user": {"role": "student"}}"#;
        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.user.unwrap().verification_status, None);
    }

    #[test]
    fn test_user_ignored_unless_authenticated() {
        let session = Session {
            status: SessionStatus::Loading,
            user: Some(SessionUser::new("admin")),
        };
        assert!(session.authenticated_user().is_none());
    }

    #[test]
    fn test_serialize_status_lowercase() {
        let json = serde_json::to_string(&SessionStatus::Unauthenticated).unwrap();
        assert_eq!(json, "\"unauthenticated\"");
    }
}
