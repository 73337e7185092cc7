//! Chat message entity

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A message produced by the conversational service (Entity)
///
/// Known fields are typed; anything else the service sends is kept in
/// [`extra`](Self::extra) so the message round-trips unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// The backend names this field `message`; both spellings are accepted
    #[serde(default, alias = "message", skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facial_expression: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<String>,
    /// Base64-encoded speech audio
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lipsync: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Message {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_facial_expression(mut self, expression: impl Into<String>) -> Self {
        self.facial_expression = Some(expression.into());
        self
    }

    pub fn with_animation(mut self, animation: impl Into<String>) -> Self {
        self.animation = Some(animation.into());
        self
    }

    pub fn has_audio(&self) -> bool {
        self.audio.as_deref().is_some_and(|a| !a.is_empty())
    }
}

/// Text a user is about to send (Value Object)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    content: String,
}

impl OutgoingMessage {
    /// Rejects empty or whitespace-only text
    pub fn new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::EmptyMessage);
        }
        Ok(Self { content })
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

impl std::fmt::Display for OutgoingMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_only_message_serializes_minimal() {
        let json = serde_json::to_value(Message::text("hi")).unwrap();
        assert_eq!(json, json!({"text": "hi"}));
    }

    #[test]
    fn test_full_message_deserialize() {
        let value = json!({
            "text": "Hello there",
            "facialExpression": "smile",
            "animation": "Talking_1",
            "audio": "UklGRg==",
            "lipsync": {"mouthCues": [{"start": 0.0, "end": 0.2, "value": "X"}]}
        });
        let message: Message = serde_json::from_value(value).unwrap();
        assert_eq!(message.text, "Hello there");
        assert_eq!(message.facial_expression.as_deref(), Some("smile"));
        assert_eq!(message.animation.as_deref(), Some("Talking_1"));
        assert!(message.has_audio());
        assert!(message.lipsync.is_some());
        assert!(message.extra.is_empty());
    }

    #[test]
    fn test_unknown_fields_preserved() {
        let value = json!({"text": "hi", "role": "assistant", "tokens": 3});
        let message: Message = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(message.extra.get("role"), Some(&json!("assistant")));
        assert_eq!(serde_json::to_value(&message).unwrap(), value);
    }

    #[test]
    fn test_message_key_accepted_as_text() {
        let message: Message =
            serde_json::from_value(json!({"message": "From the service", "animation": "Talking"}))
                .unwrap();
        assert_eq!(message.text, "From the service");
        assert!(message.extra.is_empty());
    }

    #[test]
    fn test_missing_text_defaults_to_empty() {
        let message: Message = serde_json::from_value(json!({"animation": "Idle"})).unwrap();
        assert!(message.text.is_empty());
        assert!(!message.has_audio());
    }

    #[test]
    fn test_outgoing_rejects_blank() {
        assert_eq!(OutgoingMessage::new(""), Err(DomainError::EmptyMessage));
        assert_eq!(OutgoingMessage::new("  \n"), Err(DomainError::EmptyMessage));
        assert_eq!(OutgoingMessage::new("hello").unwrap().content(), "hello");
    }
}
