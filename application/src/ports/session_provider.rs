//! Session provider port
//!
//! The session is owned by an external provider. Consumers read the latest
//! value or subscribe to be woken on every change.

use portal_domain::Session;
use tokio::sync::watch;

/// Port for observing the externally owned session
pub trait SessionProvider: Send + Sync {
    /// Latest session value
    fn current(&self) -> Session;

    /// Subscribe to session changes.
    ///
    /// The receiver starts out holding the current value; `changed()` resolves
    /// on each later update and errors once the provider is gone.
    fn subscribe(&self) -> watch::Receiver<Session>;
}
