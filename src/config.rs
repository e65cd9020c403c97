// src/config.rs
use std::time::Duration;

/// Timeout applied to every chat request, on both the client-to-proxy and
/// proxy-to-upstream legs.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Server-side configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the upstream AI backend. Server-side only; never sent to
    /// or revealed in any client-facing response.
    pub upstream_url: String,
    pub bind_addr: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let upstream_url = match std::env::var("CHAT_UPSTREAM_URL") {
            Ok(url) => url.trim_end_matches('/').to_string(),
            Err(_) => {
                tracing::warn!(
                    "CHAT_UPSTREAM_URL not set, using http://localhost:8000"
                );
                "http://localhost:8000".to_string()
            }
        };

        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        Self {
            upstream_url,
            bind_addr,
        }
    }

    /// Full URL of the upstream chat endpoint.
    pub fn upstream_chat_url(&self) -> String {
        format!("{}/api/chat", self.upstream_url)
    }

    pub fn upstream_suggestions_url(&self) -> String {
        format!("{}/api/chat/suggestions", self.upstream_url)
    }

    pub fn upstream_health_url(&self) -> String {
        format!("{}/health", self.upstream_url)
    }
}

/// Base URL used by the terminal chat client to reach the proxy.
pub fn client_api_base() -> String {
    std::env::var("CHAT_API_BASE")
        .map(|s| s.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| "http://localhost:3000".to_string())
}
