//! Chat gateway port
//!
//! Defines the interface for talking to the remote conversational service.

use async_trait::async_trait;
use portal_domain::{ConversationId, Message, OutgoingMessage};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors that can occur during chat gateway operations
#[derive(Error, Debug)]
pub enum ChatGatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Service returned HTTP {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Operation not supported by this gateway: {0}")]
    Unsupported(&'static str),
}

impl ChatGatewayError {
    /// The conversation does not exist on the service
    pub fn is_not_found(&self) -> bool {
        matches!(self, ChatGatewayError::Status { status: 404, .. })
    }
}

/// Token accounting reported alongside a reply
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

/// Messages produced in response to one user message
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_usage: Option<TokenUsage>,
}

/// A freshly created remote conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationInfo {
    pub conversation_id: ConversationId,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// One stored turn of a conversation transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Stored transcript of a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationHistory {
    pub conversation_id: ConversationId,
    #[serde(default)]
    pub messages: Vec<HistoryEntry>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_activity: Option<String>,
}

/// One entry of the service's conversation listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSummary {
    #[serde(alias = "conversation_id")]
    pub id: ConversationId,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_activity: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Health report of the conversational service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub status: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl ServiceHealth {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

/// Gateway for the conversational service
///
/// Only `send_message` is required. The remaining operations default to
/// [`ChatGatewayError::Unsupported`].
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Post one user message and return every message the service produced
    async fn send_message(
        &self,
        conversation: &ConversationId,
        message: &OutgoingMessage,
    ) -> Result<ChatReply, ChatGatewayError>;

    /// Create a new conversation on the service
    async fn create_conversation(&self) -> Result<ConversationInfo, ChatGatewayError> {
        Err(ChatGatewayError::Unsupported("create_conversation"))
    }

    /// Fetch the stored transcript of a conversation
    async fn conversation_history(
        &self,
        _conversation: &ConversationId,
    ) -> Result<ConversationHistory, ChatGatewayError> {
        Err(ChatGatewayError::Unsupported("conversation_history"))
    }

    /// List every conversation stored on the service
    async fn list_conversations(&self) -> Result<Vec<ConversationSummary>, ChatGatewayError> {
        Err(ChatGatewayError::Unsupported("list_conversations"))
    }

    /// Delete a stored conversation
    async fn delete_conversation(
        &self,
        _conversation: &ConversationId,
    ) -> Result<(), ChatGatewayError> {
        Err(ChatGatewayError::Unsupported("delete_conversation"))
    }

    /// Query the service health endpoint
    async fn health(&self) -> Result<ServiceHealth, ChatGatewayError> {
        Err(ChatGatewayError::Unsupported("health"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct EchoGateway;

    #[async_trait]
    impl ChatGateway for EchoGateway {
        async fn send_message(
            &self,
            _conversation: &ConversationId,
            message: &OutgoingMessage,
        ) -> Result<ChatReply, ChatGatewayError> {
            Ok(ChatReply {
                messages: vec![Message::text(message.content())],
                token_usage: None,
            })
        }
    }

    #[tokio::test]
    async fn test_optional_operations_default_to_unsupported() {
        let gateway = EchoGateway;
        assert!(matches!(
            gateway.create_conversation().await,
            Err(ChatGatewayError::Unsupported("create_conversation"))
        ));
        assert!(matches!(
            gateway.health().await,
            Err(ChatGatewayError::Unsupported("health"))
        ));
        assert!(matches!(
            gateway.list_conversations().await,
            Err(ChatGatewayError::Unsupported("list_conversations"))
        ));
        assert!(matches!(
            gateway
                .delete_conversation(&ConversationId::default())
                .await,
            Err(ChatGatewayError::Unsupported("delete_conversation"))
        ));
    }

    #[test]
    fn test_reply_deserialize_with_usage() {
        let reply: ChatReply = serde_json::from_value(json!({
            "messages": [{"text": "hi"}],
            "token_usage": {"prompt_tokens": 4, "total_tokens": 9}
        }))
        .unwrap();
        assert_eq!(reply.messages, vec![Message::text("hi")]);
        let usage = reply.token_usage.unwrap();
        assert_eq!(usage.total_tokens, 9);
        assert_eq!(usage.completion_tokens, 0);
    }

    #[test]
    fn test_conversation_summary_deserialize() {
        let listing: Vec<ConversationSummary> = serde_json::from_value(json!([
            {"id": "abc", "created_at": "t0", "last_activity": "t1", "title": "Placements"},
            {"conversation_id": "def"}
        ]))
        .unwrap();
        assert_eq!(listing[0].id.as_str(), "abc");
        assert_eq!(listing[0].last_activity.as_deref(), Some("t1"));
        assert_eq!(listing[0].extra.get("title"), Some(&json!("Placements")));
        assert_eq!(listing[1].id.as_str(), "def");
        assert_eq!(listing[1].created_at, None);
    }

    #[test]
    fn test_history_deserialize() {
        let history: ConversationHistory = serde_json::from_value(json!({
            "conversation_id": "abc",
            "messages": [
                {"role": "user", "content": "hello", "timestamp": "2025-04-30T10:00:00"},
                {"role": "assistant", "content": "hi", "tool_calls": []}
            ]
        }))
        .unwrap();
        assert_eq!(history.conversation_id.as_str(), "abc");
        assert_eq!(history.messages.len(), 2);
        assert!(history.messages[1].extra.contains_key("tool_calls"));
    }

    #[test]
    fn test_not_found_check() {
        let err = ChatGatewayError::Status {
            status: 404,
            detail: "Conversation not found".to_string(),
        };
        assert!(err.is_not_found());
        assert!(!ChatGatewayError::Timeout.is_not_found());
    }
}
