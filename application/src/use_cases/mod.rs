//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod auth_redirect;
pub mod chat_session;
pub mod sign_in;
