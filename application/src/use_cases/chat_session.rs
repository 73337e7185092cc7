//! Chat session use case
//!
//! Owns the [`ChatState`] of one conversation. `send` posts a user message
//! through the [`ChatGateway`] and appends whatever the service returns;
//! `consume_one` pops the message that has finished playing.
//!
//! Overlapping sends are not serialized: their replies are appended in the
//! order the responses arrive.

use crate::ports::chat_gateway::{
    ChatGateway, ChatGatewayError, ConversationHistory, ConversationSummary,
};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use portal_domain::util::preview;
use portal_domain::{ChatState, ConversationId, DomainError, Message, OutgoingMessage};
use serde_json::json;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Errors that can occur while chatting
#[derive(Error, Debug)]
pub enum ChatError {
    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] ChatGatewayError),
}

/// Marks a request as outstanding for as long as it lives.
struct InFlight<'a>(&'a ChatSession);

impl<'a> InFlight<'a> {
    fn begin(session: &'a ChatSession) -> Self {
        session.with_state(|state| state.begin_request());
        Self(session)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.with_state(|state| state.finish_request());
    }
}

/// Chat state plus the gateway it talks through.
///
/// Construct once and share by `Arc` with whatever needs it.
pub struct ChatSession {
    gateway: Arc<dyn ChatGateway>,
    conversation: Mutex<ConversationId>,
    state: Mutex<ChatState>,
    current_tx: watch::Sender<Option<Message>>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl ChatSession {
    pub fn new(gateway: Arc<dyn ChatGateway>, conversation: ConversationId) -> Self {
        let (current_tx, _) = watch::channel(None);
        Self {
            gateway,
            conversation: Mutex::new(conversation),
            state: Mutex::new(ChatState::new()),
            current_tx,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut ChatState) -> R) -> R {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut state)
    }

    /// Mutate the queue and push its head to observers if it changed.
    ///
    /// The head is published before the lock is released, so concurrent
    /// mutators cannot leave observers holding a stale head.
    fn mutate<R>(&self, f: impl FnOnce(&mut ChatState) -> R) -> R {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let result = f(&mut state);
        let head = state.current().cloned();
        self.current_tx.send_if_modified(|current| {
            if *current == head {
                false
            } else {
                *current = head;
                true
            }
        });
        result
    }

    pub fn conversation_id(&self) -> ConversationId {
        self.conversation
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Send one user message and append the reply.
    ///
    /// Returns how many messages were appended. On failure nothing is
    /// appended. Loading is cleared in both cases.
    pub async fn send(&self, text: impl Into<String>) -> Result<usize, ChatError> {
        let message = OutgoingMessage::new(text)?;
        let conversation = self.conversation_id();

        info!(
            "Sending message to conversation {}: {}",
            conversation,
            preview(message.content(), 80)
        );
        self.conversation_logger.log(ConversationEvent::new(
            "chat_request",
            json!({
                "conversation_id": conversation.as_str(),
                "message": message.content(),
            }),
        ));

        let result = {
            let _in_flight = InFlight::begin(self);
            let result = self.gateway.send_message(&conversation, &message).await;
            if let Ok(reply) = &result {
                let batch = reply.messages.clone();
                self.mutate(|state| state.append(batch));
            }
            result
        };

        match result {
            Ok(reply) => {
                let appended = reply.messages.len();
                debug!("Appended {} message(s)", appended);
                self.conversation_logger.log(ConversationEvent::new(
                    "chat_response",
                    json!({
                        "conversation_id": conversation.as_str(),
                        "messages": reply.messages,
                        "token_usage": reply.token_usage,
                    }),
                ));
                Ok(appended)
            }
            Err(e) => {
                warn!("Chat request failed: {}", e);
                self.conversation_logger.log(ConversationEvent::new(
                    "chat_error",
                    json!({
                        "conversation_id": conversation.as_str(),
                        "error": e.to_string(),
                    }),
                ));
                Err(e.into())
            }
        }
    }

    /// Drop the message at the head of the queue (it has been played).
    ///
    /// No-op on an empty queue.
    pub fn consume_one(&self) -> Option<Message> {
        self.mutate(|state| state.consume_one())
    }

    /// The message currently at the head of the queue
    pub fn current_message(&self) -> Option<Message> {
        self.with_state(|state| state.current().cloned())
    }

    /// Snapshot of all pending messages, oldest first
    pub fn messages(&self) -> Vec<Message> {
        self.with_state(|state| state.to_vec())
    }

    pub fn is_loading(&self) -> bool {
        self.with_state(|state| state.is_loading())
    }

    pub fn camera_zoomed(&self) -> bool {
        self.with_state(|state| state.camera_zoomed())
    }

    pub fn set_camera_zoomed(&self, zoomed: bool) {
        self.with_state(|state| state.set_camera_zoomed(zoomed));
    }

    /// Observe the head of the queue.
    ///
    /// The receiver is notified each time the current message changes.
    pub fn subscribe_current(&self) -> watch::Receiver<Option<Message>> {
        self.current_tx.subscribe()
    }

    /// Create a fresh remote conversation and post into it from now on.
    ///
    /// Pending messages are kept.
    pub async fn new_conversation(&self) -> Result<ConversationId, ChatError> {
        let info = self.gateway.create_conversation().await?;
        info!("Switched to new conversation {}", info.conversation_id);
        *self.conversation.lock().unwrap_or_else(|e| e.into_inner()) =
            info.conversation_id.clone();
        Ok(info.conversation_id)
    }

    /// Fetch the stored transcript of the active conversation
    pub async fn history(&self) -> Result<ConversationHistory, ChatError> {
        let conversation = self.conversation_id();
        Ok(self.gateway.conversation_history(&conversation).await?)
    }

    /// Every conversation stored on the service
    pub async fn conversations(&self) -> Result<Vec<ConversationSummary>, ChatError> {
        Ok(self.gateway.list_conversations().await?)
    }

    /// Delete a stored conversation.
    ///
    /// Deleting the active conversation is allowed; later sends to it fail
    /// until [`new_conversation`](Self::new_conversation) switches away.
    pub async fn delete_conversation(
        &self,
        conversation: &ConversationId,
    ) -> Result<(), ChatError> {
        self.gateway.delete_conversation(conversation).await?;
        if *conversation == self.conversation_id() {
            warn!("Deleted the active conversation {}", conversation);
        } else {
            info!("Deleted conversation {}", conversation);
        }
        Ok(())
    }
}
