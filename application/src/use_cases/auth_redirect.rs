//! Auth redirect use case
//!
//! Observes the session provider and sends an authenticated user to their
//! landing route. One navigation per observed session value; nothing while
//! the session is loading or unauthenticated.

use crate::ports::navigator::Navigator;
use portal_domain::{RedirectDecision, RedirectPolicy, RedirectReason, Session};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Use case that turns session changes into navigations
pub struct AuthRedirectUseCase {
    policy: RedirectPolicy,
    navigator: Arc<dyn Navigator>,
    last_decision: Mutex<Option<RedirectDecision>>,
}

impl AuthRedirectUseCase {
    /// Create with the default role → route table
    pub fn new(navigator: Arc<dyn Navigator>) -> Self {
        Self {
            policy: RedirectPolicy::default(),
            navigator,
            last_decision: Mutex::new(None),
        }
    }

    pub fn with_policy(mut self, policy: RedirectPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Outcome of the most recently evaluated session value
    pub fn last_decision(&self) -> Option<RedirectDecision> {
        self.last_decision
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Evaluate one session value and navigate if it calls for it
    pub fn on_session(&self, session: &Session) -> Option<RedirectDecision> {
        let decision = self.policy.decide(session);
        *self.last_decision.lock().unwrap_or_else(|e| e.into_inner()) = decision.clone();

        let Some(decision) = decision else {
            debug!("No redirect while session is {}", session.status);
            return None;
        };

        if decision.reason == RedirectReason::UnmappedRole {
            let role = session
                .user
                .as_ref()
                .map(|u| u.role.as_str())
                .unwrap_or_default();
            warn!(
                "Approved user has role '{}' with no landing route, sending to {}",
                role, decision.route
            );
        }

        info!("Redirecting to {} ({:?})", decision.route, decision.reason);
        self.navigator.push(&decision.route);
        Some(decision)
    }

    /// Observe a session subscription until the provider goes away.
    ///
    /// The value held by the receiver is evaluated first, then every update.
    /// Returns how many navigations were issued.
    pub async fn watch(&self, mut sessions: watch::Receiver<Session>) -> usize {
        let mut navigations = 0;
        loop {
            let session = sessions.borrow_and_update().clone();
            if self.on_session(&session).is_some() {
                navigations += 1;
            }
            if sessions.changed().await.is_err() {
                debug!("Session provider closed after {} redirect(s)", navigations);
                return navigations;
            }
        }
    }

    /// Run [`watch`](Self::watch) on a background task
    pub fn spawn(self: Arc<Self>, sessions: watch::Receiver<Session>) -> JoinHandle<usize> {
        tokio::spawn(async move { self.watch(sessions).await })
    }
}
