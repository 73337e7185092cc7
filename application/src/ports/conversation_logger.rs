//! Port for structured conversation logging.
//!
//! Records chat traffic (user messages, service replies, failures) as
//! machine-readable events. Separate from `tracing`, which carries the
//! human-readable diagnostics.

use serde_json::Value;

/// A structured chat event.
pub struct ConversationEvent {
    /// Event type identifier (e.g. "chat_request", "chat_response", "chat_error").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging chat events.
///
/// Synchronous and infallible: a broken log must never fail a send.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
