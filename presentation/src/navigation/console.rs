//! Navigator that reports route changes on the terminal

use colored::Colorize;
use portal_application::Navigator;
use portal_domain::Route;
use std::sync::Mutex;
use tracing::info;

/// [`Navigator`] for the CLI: there is no router, so a navigation is
/// printed and remembered.
#[derive(Debug, Default)]
pub struct ConsoleNavigator {
    current: Mutex<Option<Route>>,
}

impl ConsoleNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last route navigated to
    pub fn current(&self) -> Option<Route> {
        self.current
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Navigator for ConsoleNavigator {
    fn push(&self, route: &Route) {
        info!("Navigating to {}", route);
        println!("{} {}", "→".cyan().bold(), route.as_str().bold());
        *self.current.lock().unwrap_or_else(|e| e.into_inner()) = Some(route.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_remembers_latest_route() {
        let navigator = ConsoleNavigator::new();
        assert!(navigator.current().is_none());

        navigator.push(&Route::new("/student/dashboard").unwrap());
        navigator.push(&Route::new("/verification-status").unwrap());

        assert_eq!(navigator.current().unwrap(), "/verification-status");
    }
}
