// src/chat_client.rs
//
// Typed transport to the chat proxy. Everything that talks to the chat API
// goes through this module so the rest of the code never touches reqwest or
// response parsing directly.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;

use crate::config::REQUEST_TIMEOUT;
use crate::models::chat::{ChatRequest, ChatResponse, Suggestions};

/// Raised on any non-successful outcome of a chat call.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ChatClientError {
    pub message: String,
    /// HTTP status code when available, 0 for transport-level failures.
    pub status: u16,
}

impl ChatClientError {
    pub fn new(message: impl Into<String>, status: u16) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }
}

/// Seam between the session controller and the network. A single attempt
/// per invocation; retries, if desired, are the caller's responsibility.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send_chat_request(
        &self,
        request: ChatRequest,
    ) -> Result<ChatResponse, ChatClientError>;
}

#[derive(Debug, Clone)]
pub struct ChatClient {
    client: Client,
    base_url: String,
}

impl ChatClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Send a single message without session continuity and return the
    /// assistant's reply as a plain string.
    pub async fn send_message(&self, message: &str) -> Result<String, ChatClientError> {
        let request = ChatRequest {
            message: message.to_string(),
            session_id: None,
            history: None,
        };
        Ok(self.send_chat_request(request).await?.response)
    }

    /// Fetch the seed questions shown as quick prompts.
    pub async fn suggestions(&self) -> Result<Suggestions, ChatClientError> {
        let url = format!("{}/api/chat/suggestions", self.base_url);
        let response = self
            .client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ChatClientError::new(e.to_string(), 0))?;
        let value = parse_json_body(status, &body)?;

        serde_json::from_value(value).map_err(|_| {
            ChatClientError::new(
                "Invalid response shape: missing \"questions\" field",
                status.as_u16(),
            )
        })
    }
}

#[async_trait]
impl ChatTransport for ChatClient {
    async fn send_chat_request(
        &self,
        request: ChatRequest,
    ) -> Result<ChatResponse, ChatClientError> {
        let url = format!("{}/api/chat", self.base_url);

        let response = self
            .client
            .post(&url)
            .timeout(REQUEST_TIMEOUT)
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ChatClientError::new(e.to_string(), 0))?;

        parse_chat_response(status, &body)
    }
}

/// Map a reqwest failure (no HTTP response at all) to a user-facing error.
fn map_transport_error(err: reqwest::Error) -> ChatClientError {
    if err.is_timeout() {
        ChatClientError::new(
            "Request timed out. The AI assistant took too long to respond.",
            0,
        )
    } else if err.is_connect() {
        ChatClientError::new(
            "AI assistant is currently unavailable. Please try again later.",
            0,
        )
    } else {
        ChatClientError::new(err.to_string(), 0)
    }
}

/// Parse a response body as JSON and surface non-2xx statuses with the
/// body's embedded error text when present.
fn parse_json_body(status: StatusCode, body: &str) -> Result<Value, ChatClientError> {
    let value: Value = serde_json::from_str(body).map_err(|_| {
        ChatClientError::new(
            format!("Server returned non-JSON response (HTTP {})", status.as_u16()),
            status.as_u16(),
        )
    })?;

    if !status.is_success() {
        let detail = value
            .get("error")
            .or_else(|| value.get("detail"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
        return Err(ChatClientError::new(detail, status.as_u16()));
    }

    Ok(value)
}

fn parse_chat_response(status: StatusCode, body: &str) -> Result<ChatResponse, ChatClientError> {
    let value = parse_json_body(status, body)?;

    let response = value
        .get("response")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            ChatClientError::new(
                "Invalid response shape: missing \"response\" field",
                status.as_u16(),
            )
        })?
        .to_string();

    // session_id and model are tolerated missing so a lenient upstream
    // cannot fail an otherwise valid reply.
    let field = |name: &str| {
        value
            .get(name)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    Ok(ChatResponse {
        response,
        session_id: field("session_id"),
        model: field("model"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_body_parses() {
        let body = r#"{"response": "hi", "session_id": "s2", "model": "m"}"#;
        let parsed = parse_chat_response(StatusCode::OK, body).unwrap();
        assert_eq!(parsed.response, "hi");
        assert_eq!(parsed.session_id, "s2");
        assert_eq!(parsed.model, "m");
    }

    #[test]
    fn test_non_json_body_cites_http_status() {
        let err = parse_chat_response(StatusCode::BAD_GATEWAY, "<html>oops</html>").unwrap_err();
        assert_eq!(err.status, 502);
        assert!(err.message.contains("non-JSON"));
        assert!(err.message.contains("502"));
    }

    #[test]
    fn test_error_status_uses_embedded_error_field() {
        let err =
            parse_chat_response(StatusCode::INTERNAL_SERVER_ERROR, r#"{"error": "X"}"#).unwrap_err();
        assert_eq!(err.status, 500);
        assert_eq!(err.message, "X");
    }

    #[test]
    fn test_error_status_falls_back_to_detail_field() {
        let err =
            parse_chat_response(StatusCode::BAD_GATEWAY, r#"{"detail": "backend down"}"#)
                .unwrap_err();
        assert_eq!(err.status, 502);
        assert_eq!(err.message, "backend down");
    }

    #[test]
    fn test_error_status_without_detail_is_generic() {
        let err = parse_chat_response(StatusCode::NOT_FOUND, r#"{}"#).unwrap_err();
        assert_eq!(err.status, 404);
        assert_eq!(err.message, "Request failed with status 404");
    }

    #[test]
    fn test_missing_response_field_is_shape_error() {
        let err = parse_chat_response(StatusCode::OK, r#"{"session_id": "s"}"#).unwrap_err();
        assert_eq!(err.status, 200);
        assert!(err.message.contains("response"));
    }

    #[test]
    fn test_non_string_response_field_is_shape_error() {
        let err = parse_chat_response(StatusCode::OK, r#"{"response": 42}"#).unwrap_err();
        assert!(err.message.contains("Invalid response shape"));
    }

    #[test]
    fn test_missing_session_id_tolerated() {
        let parsed = parse_chat_response(StatusCode::OK, r#"{"response": "ok"}"#).unwrap();
        assert_eq!(parsed.response, "ok");
        assert_eq!(parsed.session_id, "");
    }
}
