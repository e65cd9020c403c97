// src/handlers/chat.rs
//
// Same-origin proxy to the upstream AI backend. Keeps the upstream URL
// server-side only and normalizes its failures into `{ "error": ... }`
// bodies the client can rely on.

use crate::config::REQUEST_TIMEOUT;
use crate::models::chat::Suggestions;
use crate::AppState;
use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;

pub fn chat_routes() -> Router {
    Router::new()
        .route("/api/chat", post(chat_proxy))
        .route("/api/chat/suggestions", get(chat_suggestions))
}

async fn chat_proxy(
    Extension(state): Extension<Arc<AppState>>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    if !has_string_message(&body) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "message is required" })),
        );
    }

    // Body is forwarded verbatim so upstream additions (history limits,
    // new optional fields) need no proxy change.
    let upstream = match state
        .http
        .post(state.config.upstream_chat_url())
        .timeout(REQUEST_TIMEOUT)
        .json(&body)
        .send()
        .await
    {
        Ok(response) => response,
        Err(err) if err.is_connect() => {
            tracing::warn!("upstream chat backend unreachable: {}", err);
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "error": "AI assistant is offline. Make sure the chat backend is running and CHAT_UPSTREAM_URL points at it."
                })),
            );
        }
        Err(err) => {
            tracing::error!("upstream chat request failed: {}", err);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Unexpected error reaching AI backend" })),
            );
        }
    };

    let status = upstream.status();
    let data: Value = match upstream.json().await {
        Ok(data) => data,
        Err(err) => {
            tracing::error!(status = status.as_u16(), "upstream returned non-JSON body: {}", err);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Unexpected error reaching AI backend" })),
            );
        }
    };

    if !status.is_success() {
        tracing::warn!(status = status.as_u16(), "upstream chat error relayed");
        return (status, Json(json!({ "error": upstream_error_text(&data) })));
    }

    (status, Json(data))
}

/// Seed questions for the chat UI's quick-prompt buttons. Owned by the
/// upstream; a baked-in copy is served when it cannot be reached so the UI
/// always has prompts.
async fn chat_suggestions(Extension(state): Extension<Arc<AppState>>) -> Json<Suggestions> {
    let result = state
        .http
        .get(state.config.upstream_suggestions_url())
        .timeout(REQUEST_TIMEOUT)
        .send()
        .await;

    match result {
        Ok(response) if response.status().is_success() => {
            match response.json::<Suggestions>().await {
                Ok(suggestions) => Json(suggestions),
                Err(err) => {
                    tracing::warn!("malformed suggestions from upstream: {}", err);
                    Json(default_suggestions())
                }
            }
        }
        Ok(response) => {
            tracing::warn!(status = response.status().as_u16(), "upstream suggestions error");
            Json(default_suggestions())
        }
        Err(err) => {
            tracing::debug!("upstream suggestions unreachable: {}", err);
            Json(default_suggestions())
        }
    }
}

fn has_string_message(body: &Value) -> bool {
    body.get("message").map(Value::is_string).unwrap_or(false)
}

/// Upstream error bodies use `detail` (FastAPI convention) or `error`.
fn upstream_error_text(data: &Value) -> String {
    data.get("detail")
        .or_else(|| data.get("error"))
        .and_then(Value::as_str)
        .unwrap_or("AI backend error")
        .to_string()
}

fn default_suggestions() -> Suggestions {
    Suggestions {
        questions: vec![
            "What projects are featured here?".to_string(),
            "What are the main technical skills?".to_string(),
            "Explain the MarketMuse AI project.".to_string(),
            "What certifications are listed?".to_string(),
            "Is there experience with RAG or LLMs?".to_string(),
        ],
    }
}
