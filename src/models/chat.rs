// src/models/chat.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed id of the synthetic welcome message. It is shown before any user
/// input and is never included in outgoing history.
pub const WELCOME_MESSAGE_ID: &str = "welcome";

pub const WELCOME_MESSAGE_TEXT: &str = "Hi! I'm the portfolio AI assistant. \
Ask me anything about the projects, skills, or experience on this site. \
For example: \"What projects are featured here?\" or \"Explain MarketMuse AI\".";

/// The two roles that exist in a real conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// Roles as rendered in the conversation. Extends [`ChatRole`] with a
/// synthetic error role used to surface failed turns inline, without
/// polluting the wire-level role set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    User,
    Assistant,
    Error,
}

impl MessageRole {
    /// The wire role for this message, if it has one. Error entries are
    /// local-only and are never sent upstream.
    pub fn as_chat_role(&self) -> Option<ChatRole> {
        match self {
            MessageRole::User => Some(ChatRole::User),
            MessageRole::Assistant => Some(ChatRole::Assistant),
            MessageRole::Error => None,
        }
    }
}

/// A single message in a conversation. Created once, appended, never
/// mutated afterwards.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    fn new(role: MessageRole, content: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content,
            timestamp: Utc::now(),
        }
    }

    pub fn user(content: String) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: String) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    pub fn error(content: String) -> Self {
        Self::new(MessageRole::Error, content)
    }

    pub fn welcome() -> Self {
        Self {
            id: WELCOME_MESSAGE_ID.to_string(),
            role: MessageRole::Assistant,
            content: WELCOME_MESSAGE_TEXT.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// A prior conversation turn as sent upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: ChatRole,
    pub content: String,
}

/// Payload for POST /api/chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Opaque session identifier for multi-turn continuity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Prior turns, newest last. Optional for single-shot queries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<HistoryEntry>>,
}

/// Payload returned by POST /api/chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    /// Session identifier echoed back or newly created by the backend.
    pub session_id: String,
    /// Name of the model that produced the response.
    pub model: String,
}

/// Error body returned by the proxy on any failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

/// Body of GET /api/chat/suggestions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestions {
    pub questions: Vec<String>,
}
