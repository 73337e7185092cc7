//! Infrastructure layer for campus-portal
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod auth;
pub mod chat;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use auth::{LocalIdentityProvider, WatchSessionProvider};
pub use chat::{API_PREFIX, HttpChatGateway};
pub use config::{
    ConfigLoader, ConfigValidationError, FileAuthConfig, FileChatConfig, FileConfig,
    FileDevUserConfig,
};
pub use logging::JsonlConversationLogger;
