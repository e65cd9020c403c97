// src/session.rs
//
// Single authority for the visible conversation and request lifecycle.
// Owns the message list, session id, and loading flag; `send_message` and
// `clear_chat` are the only mutators.

use std::sync::Arc;

use uuid::Uuid;

use crate::chat_client::ChatTransport;
use crate::models::chat::{ChatMessage, ChatRequest, HistoryEntry, WELCOME_MESSAGE_ID};

pub struct ChatSession {
    transport: Arc<dyn ChatTransport>,
    session_id: String,
    messages: Vec<ChatMessage>,
    is_loading: bool,
    last_error: Option<String>,
}

impl ChatSession {
    pub fn new(transport: Arc<dyn ChatTransport>) -> Self {
        Self {
            transport,
            session_id: Uuid::new_v4().to_string(),
            messages: vec![ChatMessage::welcome()],
            is_loading: false,
            last_error: None,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Send a user message and append the reply (or the failure) to the
    /// conversation. Empty input and re-entrant calls are ignored.
    ///
    /// Exactly one user message and exactly one assistant-or-error message
    /// are appended per accepted call; neither is ever retracted.
    pub async fn send_message(&mut self, text: &str) {
        let trimmed = text.trim();
        if trimmed.is_empty() || self.is_loading {
            return;
        }

        self.last_error = None;

        // History is built from the turns before this one; the current
        // message travels in the `message` field.
        let history = self.outgoing_history();

        self.messages.push(ChatMessage::user(trimmed.to_string()));
        // Set before the await so a re-entrant send is refused for the
        // whole in-flight window.
        self.is_loading = true;

        let request = ChatRequest {
            message: trimmed.to_string(),
            session_id: Some(self.session_id.clone()),
            history: Some(history),
        };

        match self.transport.send_chat_request(request).await {
            Ok(response) => {
                // The upstream owns session continuity once established.
                if !response.session_id.is_empty() {
                    self.session_id = response.session_id;
                }
                self.messages.push(ChatMessage::assistant(response.response));
            }
            Err(err) => {
                tracing::warn!(status = err.status, "chat request failed: {}", err.message);
                self.last_error = Some(err.message.clone());
                self.messages.push(ChatMessage::error(err.message));
            }
        }

        self.is_loading = false;
    }

    /// Discard the conversation: fresh welcome message, new session id.
    pub fn clear_chat(&mut self) {
        self.session_id = Uuid::new_v4().to_string();
        self.messages = vec![ChatMessage::welcome()];
        self.last_error = None;
    }

    /// Prior turns as sent upstream, excluding the welcome placeholder and
    /// any error entries.
    fn outgoing_history(&self) -> Vec<HistoryEntry> {
        self.messages
            .iter()
            .filter(|m| m.id != WELCOME_MESSAGE_ID)
            .filter_map(|m| {
                m.role.as_chat_role().map(|role| HistoryEntry {
                    role,
                    content: m.content.clone(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat_client::ChatClientError;
    use crate::models::chat::{ChatResponse, ChatRole, MessageRole};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Transport double: records requests, replays a scripted outcome.
    struct FakeTransport {
        outcome: Mutex<Result<ChatResponse, ChatClientError>>,
        requests: Mutex<Vec<ChatRequest>>,
    }

    impl FakeTransport {
        fn replying(response: ChatResponse) -> Arc<Self> {
            Arc::new(Self {
                outcome: Mutex::new(Ok(response)),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn failing(err: ChatClientError) -> Arc<Self> {
            Arc::new(Self {
                outcome: Mutex::new(Err(err)),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        fn last_request(&self) -> ChatRequest {
            self.requests.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl ChatTransport for FakeTransport {
        async fn send_chat_request(
            &self,
            request: ChatRequest,
        ) -> Result<ChatResponse, ChatClientError> {
            self.requests.lock().unwrap().push(request);
            self.outcome.lock().unwrap().clone()
        }
    }

    fn reply(text: &str, session_id: &str) -> ChatResponse {
        ChatResponse {
            response: text.to_string(),
            session_id: session_id.to_string(),
            model: "m".to_string(),
        }
    }

    #[tokio::test]
    async fn test_send_appends_user_then_assistant() {
        let transport = FakeTransport::replying(reply("hi", "s2"));
        let mut session = ChatSession::new(transport.clone());

        session.send_message("  hello there  ").await;

        let messages = session.messages();
        assert_eq!(messages.len(), 3); // welcome + user + assistant
        assert_eq!(messages[1].role, MessageRole::User);
        assert_eq!(messages[1].content, "hello there");
        assert_eq!(messages[2].role, MessageRole::Assistant);
        assert_eq!(messages[2].content, "hi");
        assert!(!session.is_loading());
        assert_eq!(session.session_id(), "s2");
    }

    #[tokio::test]
    async fn test_empty_input_is_a_noop() {
        let transport = FakeTransport::replying(reply("hi", "s2"));
        let mut session = ChatSession::new(transport.clone());

        session.send_message("   ").await;
        session.send_message("").await;

        assert_eq!(session.messages().len(), 1);
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_send_while_loading_is_refused() {
        let transport = FakeTransport::replying(reply("hi", "s2"));
        let mut session = ChatSession::new(transport.clone());

        session.is_loading = true;
        session.send_message("hello").await;

        assert_eq!(session.messages().len(), 1);
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_failure_appends_error_entry() {
        let transport =
            FakeTransport::failing(ChatClientError::new("X happened upstream", 500));
        let mut session = ChatSession::new(transport);

        session.send_message("hello").await;

        let last = session.messages().last().unwrap();
        assert_eq!(last.role, MessageRole::Error);
        assert!(last.content.contains("X happened upstream"));
        assert_eq!(session.last_error(), Some("X happened upstream"));
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn test_timeout_failure_surfaces_and_clears_loading() {
        let transport = FakeTransport::failing(ChatClientError::new(
            "Request timed out. The AI assistant took too long to respond.",
            0,
        ));
        let mut session = ChatSession::new(transport);

        session.send_message("hello").await;

        let last = session.messages().last().unwrap();
        assert_eq!(last.role, MessageRole::Error);
        assert!(last.content.contains("timed out"));
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn test_unavailable_failure_surfaces() {
        let transport = FakeTransport::failing(ChatClientError::new(
            "AI assistant is currently unavailable. Please try again later.",
            0,
        ));
        let mut session = ChatSession::new(transport);

        session.send_message("hello").await;

        assert!(session
            .messages()
            .last()
            .unwrap()
            .content
            .contains("unavailable"));
    }

    #[tokio::test]
    async fn test_history_excludes_welcome_and_errors() {
        let failing = FakeTransport::failing(ChatClientError::new("boom", 500));
        let mut session = ChatSession::new(failing);
        session.send_message("first").await; // appends user + error

        let transport = FakeTransport::replying(reply("hi", "s2"));
        session.transport = transport.clone();
        session.send_message("second").await;

        let sent = transport.last_request();
        let history = sent.history.unwrap();
        // The failed turn's user message survives; the welcome entry and
        // the error entry do not.
        assert_eq!(
            history,
            vec![HistoryEntry {
                role: ChatRole::User,
                content: "first".to_string()
            }]
        );
        assert_eq!(sent.message, "second");
    }

    #[tokio::test]
    async fn test_clear_chat_resets_to_welcome_with_new_id() {
        let transport = FakeTransport::replying(reply("hi", "s2"));
        let mut session = ChatSession::new(transport);
        session.send_message("hello").await;

        let before = session.session_id().to_string();
        session.clear_chat();

        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].id, WELCOME_MESSAGE_ID);
        assert_ne!(session.session_id(), before);
        assert_eq!(session.last_error(), None);
    }

    #[tokio::test]
    async fn test_empty_session_id_in_reply_is_not_adopted() {
        let transport = FakeTransport::replying(reply("hi", ""));
        let mut session = ChatSession::new(transport);
        let before = session.session_id().to_string();

        session.send_message("hello").await;

        assert_eq!(session.session_id(), before);
    }
}
