//! Route value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A client-side navigation target (Value Object)
///
/// Always an absolute path starting with `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Route(String);

impl Route {
    /// Try to create a route, rejecting paths that are not absolute
    pub fn new(path: impl Into<String>) -> Result<Self, DomainError> {
        let path = path.into();
        if path.starts_with('/') {
            Ok(Self(path))
        } else {
            Err(DomainError::InvalidRoute(path))
        }
    }

    /// Build a route from a compile-time constant known to be absolute
    pub(crate) fn from_static(path: &'static str) -> Self {
        debug_assert!(path.starts_with('/'));
        Self(path.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Route {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Route::new(value)
    }
}

impl From<Route> for String {
    fn from(route: Route) -> Self {
        route.0
    }
}

impl PartialEq<str> for Route {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Route {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
