//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Message cannot be empty")]
    EmptyMessage,

    #[error("Invalid conversation id: {0}")]
    InvalidConversationId(String),

    #[error("Invalid route: {0}")]
    InvalidRoute(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_message_display() {
        assert_eq!(DomainError::EmptyMessage.to_string(), "Message cannot be empty");
    }

    #[test]
    fn test_invalid_route_display() {
        let error = DomainError::InvalidRoute("admin".to_string());
        assert_eq!(error.to_string(), "Invalid route: admin");
    }
}
