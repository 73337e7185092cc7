//! In-process session provider backed by a `tokio::sync::watch` channel.

use portal_application::SessionProvider;
use portal_domain::Session;
use tokio::sync::watch;
use tracing::debug;

/// Holds the latest [`Session`] and wakes subscribers on every publish.
///
/// Starts out [`Loading`](portal_domain::SessionStatus::Loading).
#[derive(Debug)]
pub struct WatchSessionProvider {
    tx: watch::Sender<Session>,
}

impl WatchSessionProvider {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Session::loading());
        Self { tx }
    }

    /// Replace the session and notify subscribers
    pub fn publish(&self, session: Session) {
        debug!("Session is now {}", session.status);
        self.tx.send_replace(session);
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for WatchSessionProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionProvider for WatchSessionProvider {
    fn current(&self) -> Session {
        self.tx.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Session> {
        self.tx.subscribe()
    }
}
