//! Chat domain.
//!
//! - [`message::Message`]: a message returned by the conversational service
//! - [`conversation::ConversationId`]: the remote conversation messages are posted into
//! - [`state::ChatState`]: the pending-message queue and request bookkeeping

pub mod conversation;
pub mod message;
pub mod state;
