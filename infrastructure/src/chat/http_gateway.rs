//! HTTP adapter for the conversational service
//!
//! Endpoints (relative to `{base_url}/api/v1`):
//!
//! | method | path                                   | purpose            |
//! |--------|----------------------------------------|--------------------|
//! | POST   | `/conversations/{id}/messages`         | send a message     |
//! | POST   | `/conversations`                       | new conversation   |
//! | GET    | `/conversations/{id}`                  | transcript         |
//! | GET    | `/conversations`                       | list conversations |
//! | DELETE | `/conversations/{id}`                  | delete             |
//! | GET    | `/health`                              | health check       |
//!
//! No authentication headers and no retries.

use async_trait::async_trait;
use portal_application::{
    ChatGateway, ChatGatewayError, ChatReply, ConversationHistory, ConversationInfo,
    ConversationSummary, ServiceHealth,
};
use portal_domain::{ConversationId, OutgoingMessage};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;

/// Path prefix of the versioned API
pub const API_PREFIX: &str = "/api/v1";

/// Error body produced by the service on non-2xx responses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Value,
}

/// Body of `GET /conversations`
#[derive(Debug, Deserialize)]
struct ConversationList {
    conversations: Vec<ConversationSummary>,
}

/// Body of `DELETE /conversations/{id}`
#[derive(Debug, Deserialize)]
struct DeleteStatus {
    success: bool,
}

/// [`ChatGateway`] over HTTP using `reqwest`
#[derive(Debug, Clone)]
pub struct HttpChatGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpChatGateway {
    /// Create a gateway with a default client (no timeout)
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a gateway whose requests give up after `timeout`
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ChatGatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChatGatewayError::ConnectionError(e.to_string()))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    /// Check the status and decode the whole body before handing anything back
    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ChatGatewayError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatGatewayError::Status {
                status: status.as_u16(),
                detail: error_detail(&body)
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown").to_string()),
            });
        }

        let body = response.bytes().await.map_err(transport_error)?;
        serde_json::from_slice(&body).map_err(|e| ChatGatewayError::InvalidResponse(e.to_string()))
    }
}

/// Extract a human-readable reason from an error body
fn error_detail(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: Value::String(detail),
        }) => Some(detail),
        Ok(ErrorBody { detail }) => Some(detail.to_string()),
        Err(_) => Some(body.trim().to_string()),
    }
}

fn transport_error(e: reqwest::Error) -> ChatGatewayError {
    if e.is_timeout() {
        ChatGatewayError::Timeout
    } else {
        ChatGatewayError::ConnectionError(e.to_string())
    }
}

#[async_trait]
impl ChatGateway for HttpChatGateway {
    async fn send_message(
        &self,
        conversation: &ConversationId,
        message: &OutgoingMessage,
    ) -> Result<ChatReply, ChatGatewayError> {
        let url = self.url(&format!("/conversations/{}/messages", conversation));
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(&json!({ "message": message.content() }))
            .send()
            .await
            .map_err(transport_error)?;

        Self::decode(response).await
    }

    async fn create_conversation(&self) -> Result<ConversationInfo, ChatGatewayError> {
        let url = self.url("/conversations");
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(transport_error)?;

        Self::decode(response).await
    }

    async fn conversation_history(
        &self,
        conversation: &ConversationId,
    ) -> Result<ConversationHistory, ChatGatewayError> {
        let url = self.url(&format!("/conversations/{}", conversation));
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await.map_err(transport_error)?;
        Self::decode(response).await
    }

    async fn list_conversations(&self) -> Result<Vec<ConversationSummary>, ChatGatewayError> {
        let url = self.url("/conversations");
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await.map_err(transport_error)?;
        let list: ConversationList = Self::decode(response).await?;
        Ok(list.conversations)
    }

    async fn delete_conversation(
        &self,
        conversation: &ConversationId,
    ) -> Result<(), ChatGatewayError> {
        let url = self.url(&format!("/conversations/{}", conversation));
        debug!("DELETE {}", url);

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(transport_error)?;
        let status: DeleteStatus = Self::decode(response).await?;
        if status.success {
            Ok(())
        } else {
            Err(ChatGatewayError::InvalidResponse(format!(
                "service did not delete conversation {}",
                conversation
            )))
        }
    }

    async fn health(&self) -> Result<ServiceHealth, ChatGatewayError> {
        let url = self.url("/health");
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await.map_err(transport_error)?;
        Self::decode(response).await
    }
}
