//! Authentication domain.
//!
//! - [`session::Session`]: the externally owned sign-in state
//! - [`redirect::RedirectPolicy`]: where a signed-in user lands
//! - [`redirect::RoleRouteMap`]: static role → landing route table

pub mod redirect;
pub mod session;
