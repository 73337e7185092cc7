//! Navigator port
//!
//! Client-side route changes. Navigation is assumed to succeed, so the
//! method is synchronous and infallible.

use portal_domain::Route;
use std::sync::Mutex;

/// Port for issuing a client-side navigation
pub trait Navigator: Send + Sync {
    /// Navigate to `route`
    fn push(&self, route: &Route);
}

/// Navigator that only remembers where it was sent.
///
/// Useful for tests and headless runs.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    history: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every route pushed so far, oldest first
    pub fn history(&self) -> Vec<Route> {
        self.history.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn last(&self) -> Option<Route> {
        self.history().pop()
    }
}

impl Navigator for RecordingNavigator {
    fn push(&self, route: &Route) {
        self.history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(route.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_navigator_keeps_order() {
        let navigator = RecordingNavigator::new();
        navigator.push(&Route::new("/a").unwrap());
        navigator.push(&Route::new("/b").unwrap());
        assert_eq!(navigator.history().len(), 2);
        assert_eq!(navigator.last().unwrap(), "/b");
    }
}
