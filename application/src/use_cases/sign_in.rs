//! Sign-in use case
//!
//! Starts a non-redirecting sign-in with the configured identity provider.
//! A loading flag suppresses duplicate submissions while a call is in flight.
//! Rejections are logged and reported as [`SignInOutcome::Failed`]; the
//! resulting session is observed separately through the session provider.

use crate::ports::identity_provider::{GOOGLE_PROVIDER, IdentityProvider, SignInRequest};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error, info};

/// Result of a sign-in attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInOutcome {
    /// The provider accepted the sign-in
    Completed,
    /// The provider rejected the sign-in; the error was logged
    Failed,
    /// Another sign-in was still in flight; the provider was not called
    AlreadyInFlight,
}

/// Clears the loading flag on every exit path, including cancellation.
struct LoadingGuard<'a>(&'a AtomicBool);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Use case for the sign-in button
pub struct SignInUseCase {
    provider: Arc<dyn IdentityProvider>,
    provider_name: String,
    loading: AtomicBool,
}

impl SignInUseCase {
    /// Sign in through the `google` provider
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            provider,
            provider_name: GOOGLE_PROVIDER.to_string(),
            loading: AtomicBool::new(false),
        }
    }

    pub fn with_provider_name(mut self, name: impl Into<String>) -> Self {
        self.provider_name = name.into();
        self
    }

    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    /// True while a sign-in call is in flight
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    pub async fn sign_in(&self) -> SignInOutcome {
        if self
            .loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Sign-in already in flight, ignoring");
            return SignInOutcome::AlreadyInFlight;
        }
        let _guard = LoadingGuard(&self.loading);

        let request = SignInRequest::new(&self.provider_name);
        info!("Signing in with {}", self.provider_name);

        match self.provider.sign_in(&request).await {
            Ok(()) => SignInOutcome::Completed,
            Err(e) => {
                error!("{} sign-in error: {}", self.provider_name, e);
                SignInOutcome::Failed
            }
        }
    }
}
