//! Application layer for campus-portal
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    chat_gateway::{
        ChatGateway, ChatGatewayError, ChatReply, ConversationHistory, ConversationInfo,
        ConversationSummary, HistoryEntry, ServiceHealth, TokenUsage,
    },
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    identity_provider::{GOOGLE_PROVIDER, IdentityError, IdentityProvider, SignInRequest},
    navigator::{Navigator, RecordingNavigator},
    session_provider::SessionProvider,
};
pub use use_cases::auth_redirect::AuthRedirectUseCase;
pub use use_cases::chat_session::{ChatError, ChatSession};
pub use use_cases::sign_in::{SignInOutcome, SignInUseCase};
