// src/handlers/ui.rs
use axum::{response::Html, routing::get, Router};

pub fn ui_routes() -> Router {
    Router::new().route("/", get(index))
}

/// Minimal landing page. The portfolio site itself is rendered elsewhere;
/// this service only fronts the AI assistant API.
async fn index() -> Html<String> {
    let html = r###"<!DOCTYPE html>
<html>
<head>
    <title>Portfolio AI Assistant</title>
    <style>
        body { font-family: -apple-system, sans-serif; max-width: 720px; margin: 2rem auto; padding: 0 1rem; color: #212529; }
        .endpoint { background: #f8f9fa; border-left: 4px solid #495057; padding: 0.75rem 1rem; margin: 0.75rem 0; }
        .method { font-weight: bold; margin-right: 0.5rem; }
        .post { color: #0d6efd; }
        .get { color: #198754; }
        code { background: #e9ecef; padding: 0.1rem 0.3rem; border-radius: 3px; }
    </style>
</head>
<body>
    <h1>Portfolio AI Assistant</h1>
    <p>Same-origin proxy for the portfolio chat widget. The upstream AI
    backend is configured server-side and never exposed here.</p>

    <div class="endpoint">
        <span class="method post">POST</span><strong>/api/chat</strong><br>
        Body: <code>{"message": "...", "session_id": "...", "history": [...]}</code><br>
        Returns: <code>{"response": "...", "session_id": "...", "model": "..."}</code>
    </div>

    <div class="endpoint">
        <span class="method get">GET</span><strong>/api/chat/suggestions</strong><br>
        Seed questions for the quick-prompt buttons
    </div>

    <div class="endpoint">
        <span class="method get">GET</span><strong>/api/status</strong><br>
        Service health and upstream reachability
    </div>
</body>
</html>
"###;

    Html(html.to_string())
}
