//! Local identity provider
//!
//! Stands in for the hosted OAuth flow: a successful sign-in publishes a
//! pre-configured user into the session store, exactly as the real provider
//! would update the session after its callback.

use super::session_store::WatchSessionProvider;
use async_trait::async_trait;
use portal_application::{GOOGLE_PROVIDER, IdentityError, IdentityProvider, SignInRequest};
use portal_domain::{Session, SessionUser};
use std::sync::Arc;
use tracing::info;

/// [`IdentityProvider`] that authenticates a fixed local account
pub struct LocalIdentityProvider {
    sessions: Arc<WatchSessionProvider>,
    user: Option<SessionUser>,
    providers: Vec<String>,
}

impl LocalIdentityProvider {
    /// Accepts `google` sign-ins; with no `user` every sign-in is rejected
    pub fn new(sessions: Arc<WatchSessionProvider>, user: Option<SessionUser>) -> Self {
        Self {
            sessions,
            user,
            providers: vec![GOOGLE_PROVIDER.to_string()],
        }
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn sign_in(&self, request: &SignInRequest) -> Result<(), IdentityError> {
        if !self.providers.iter().any(|p| p == &request.provider) {
            return Err(IdentityError::UnknownProvider(request.provider.clone()));
        }

        match &self.user {
            Some(user) => {
                info!(
                    "Local {} sign-in accepted for role '{}'",
                    request.provider, user.role
                );
                self.sessions.publish(Session::authenticated(user.clone()));
                Ok(())
            }
            None => {
                self.sessions.publish(Session::unauthenticated());
                Err(IdentityError::Rejected(
                    "no local account is configured".to_string(),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_application::SessionProvider;
    use portal_domain::{SessionStatus, VerificationStatus};

    #[tokio::test]
    async fn test_sign_in_publishes_configured_user() {
        let sessions = Arc::new(WatchSessionProvider::new());
        let user = SessionUser::new("admin").with_verification_status(VerificationStatus::Approved);
        let provider = LocalIdentityProvider::new(sessions.clone(), Some(user.clone()));

        provider.sign_in(&SignInRequest::new("google")).await.unwrap();

        assert_eq!(sessions.current(), Session::authenticated(user));
    }

    #[tokio::test]
    async fn test_sign_in_without_account_is_rejected() {
        let sessions = Arc::new(WatchSessionProvider::new());
        let provider = LocalIdentityProvider::new(sessions.clone(), None);

        let err = provider.sign_in(&SignInRequest::new("google")).await.unwrap_err();

        assert!(matches!(err, IdentityError::Rejected(_)));
        assert_eq!(sessions.current().status, SessionStatus::Unauthenticated);
    }

    #[tokio::test]
    async fn test_unknown_provider_leaves_session_untouched() {
        let sessions = Arc::new(WatchSessionProvider::new());
        let provider = LocalIdentityProvider::new(sessions.clone(), Some(SessionUser::new("x")));

        let err = provider.sign_in(&SignInRequest::new("github")).await.unwrap_err();

        assert!(matches!(err, IdentityError::UnknownProvider(p) if p == "github"));
        assert_eq!(sessions.current().status, SessionStatus::Loading);
    }
}
