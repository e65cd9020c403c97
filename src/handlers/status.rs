// src/handlers/status.rs
use crate::AppState;
use axum::{extract::Extension, routing::get, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

pub fn status_routes() -> Router {
    Router::new().route("/api/status", get(api_status))
}

/// Liveness check. Probes the upstream's /health endpoint but reports only
/// its state, never its location.
async fn api_status(Extension(state): Extension<Arc<AppState>>) -> Json<Value> {
    let upstream_status = match state
        .http
        .get(state.config.upstream_health_url())
        .timeout(Duration::from_secs(5))
        .send()
        .await
    {
        Ok(response) if response.status().is_success() => "healthy",
        Ok(_) => "unhealthy",
        Err(_) => "unreachable",
    };

    Json(json!({
        "status": "operational",
        "version": env!("CARGO_PKG_VERSION"),
        "services": {
            "ai_backend": upstream_status
        },
        "endpoints": {
            "chat": "/api/chat",
            "suggestions": "/api/chat/suggestions",
            "status": "/api/status"
        }
    }))
}
