//! Identity provider port
//!
//! Delegates sign-in to an external OAuth integration. The caller does not
//! get a session back; it observes the [`SessionProvider`](super::session_provider::SessionProvider)
//! instead.

use async_trait::async_trait;
use thiserror::Error;

/// Provider name used by the landing page
pub const GOOGLE_PROVIDER: &str = "google";

/// Errors reported by an identity provider
#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("Unknown identity provider: {0}")]
    UnknownProvider(String),

    #[error("Sign-in rejected: {0}")]
    Rejected(String),

    #[error("Identity provider unavailable: {0}")]
    Unavailable(String),
}

/// Parameters of a sign-in call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInRequest {
    /// Provider name, e.g. `"google"`
    pub provider: String,
    /// When false the provider must not navigate away on completion
    pub redirect: bool,
}

impl SignInRequest {
    /// A non-redirecting request for `provider`
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            redirect: false,
        }
    }
}

/// Port for the external sign-in integration
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Start a sign-in. Resolves once the provider has accepted or rejected it.
    async fn sign_in(&self, request: &SignInRequest) -> Result<(), IdentityError>;
}
