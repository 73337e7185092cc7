//! Domain layer for campus-portal
//!
//! This crate contains the core entities, value objects and decision rules.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Auth redirect
//!
//! Once a session is authenticated, [`RedirectPolicy`] picks a landing route
//! from the user's verification status and role.
//!
//! ## Chat
//!
//! [`ChatState`] is an ordered queue of [`Message`]s returned by the remote
//! conversational service. Its head is the message currently being played.

pub mod auth;
pub mod chat;
pub mod core;
pub mod nav;
pub mod util;

// Re-export commonly used types
pub use auth::{
    redirect::{
        PROFILE_SETUP_ROUTE, RedirectDecision, RedirectPolicy, RedirectReason, RoleRouteMap,
        VERIFICATION_STATUS_ROUTE,
    },
    session::{Session, SessionStatus, SessionUser, VerificationStatus},
};
pub use chat::{
    conversation::{ConversationId, DEFAULT_CONVERSATION_ID},
    message::{Message, OutgoingMessage},
    state::ChatState,
};
pub use core::{error::DomainError, route::Route};
pub use nav::sidebar::{NavEntry, NavItem, Sidebar};
