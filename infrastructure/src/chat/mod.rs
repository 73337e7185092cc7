//! Chat adapters: HTTP client for the conversational service.

mod http_gateway;

pub use http_gateway::{API_PREFIX, HttpChatGateway};
