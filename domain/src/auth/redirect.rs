//! Post sign-in redirect rules
//!
//! ```text
//! AUTHENTICATED ─┬─ PENDING   → /auth/verification-status
//!                ├─ APPROVED  → role_routes[role]
//!                └─ otherwise → /auth/profile-setup
//! ```

use super::session::{Session, VerificationStatus};
use crate::core::route::Route;
use std::collections::BTreeMap;

/// Landing page for accounts waiting on institutional approval
pub const VERIFICATION_STATUS_ROUTE: &str = "/auth/verification-status";

/// Landing page for accounts that still need to complete their profile
pub const PROFILE_SETUP_ROUTE: &str = "/auth/profile-setup";

/// Static role → landing route table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRouteMap {
    routes: BTreeMap<String, Route>,
}

impl RoleRouteMap {
    /// An empty table; every approved user falls through to profile setup
    pub fn empty() -> Self {
        Self {
            routes: BTreeMap::new(),
        }
    }

    pub fn with_route(mut self, role: impl Into<String>, route: Route) -> Self {
        self.routes.insert(role.into(), route);
        self
    }

    /// Insert or replace the route for a role
    pub fn insert(&mut self, role: impl Into<String>, route: Route) {
        self.routes.insert(role.into(), route);
    }

    pub fn get(&self, role: &str) -> Option<&Route> {
        self.routes.get(role)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Route)> {
        self.routes.iter().map(|(role, route)| (role.as_str(), route))
    }
}

impl Default for RoleRouteMap {
    fn default() -> Self {
        Self::empty()
            .with_route("admin", Route::from_static("/admin/dashboard"))
            .with_route(
                "institution-admin",
                Route::from_static("/institution-admin/verification"),
            )
            .with_route("student", Route::from_static("/student/dashboard"))
    }
}

/// Why a particular route was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectReason {
    /// Verification status is `PENDING`
    PendingVerification,
    /// Verification status is `APPROVED` and the role has a route
    Approved,
    /// Verification status is `APPROVED` but the role is not in the table
    UnmappedRole,
    /// Verification status is missing or anything else
    ProfileIncomplete,
}

impl std::fmt::Display for RedirectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            RedirectReason::PendingVerification => "verification pending",
            RedirectReason::Approved => "approved",
            RedirectReason::UnmappedRole => "approved, no route for role",
            RedirectReason::ProfileIncomplete => "profile incomplete",
        };
        write!(f, "{}", reason)
    }
}

/// Outcome of evaluating a session (Value Object)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectDecision {
    pub route: Route,
    pub reason: RedirectReason,
}

/// Decides where an authenticated user is sent
#[derive(Debug, Clone, Default)]
pub struct RedirectPolicy {
    routes: RoleRouteMap,
}

impl RedirectPolicy {
    pub fn new(routes: RoleRouteMap) -> Self {
        Self { routes }
    }

    /// Evaluate a session.
    ///
    /// Returns `None` while the session is loading, unauthenticated, or has no user.
    pub fn decide(&self, session: &Session) -> Option<RedirectDecision> {
        let user = session.authenticated_user()?;

        let decision = match &user.verification_status {
            Some(VerificationStatus::Pending) => RedirectDecision {
                route: Route::from_static(VERIFICATION_STATUS_ROUTE),
                reason: RedirectReason::PendingVerification,
            },
            Some(VerificationStatus::Approved) => match self.routes.get(&user.role) {
                Some(route) => RedirectDecision {
                    route: route.clone(),
                    reason: RedirectReason::Approved,
                },
                None => RedirectDecision {
                    route: Route::from_static(PROFILE_SETUP_ROUTE),
                    reason: RedirectReason::UnmappedRole,
                },
            },
            Some(VerificationStatus::Other(_)) | None => RedirectDecision {
                route: Route::from_static(PROFILE_SETUP_ROUTE),
                reason: RedirectReason::ProfileIncomplete,
            },
        };

        Some(decision)
    }
}
