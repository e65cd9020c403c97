// lib.rs - exports the chat stack for the server and the terminal client
pub mod chat_client;
pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod session;

use config::AppConfig;

/// Shared state behind every handler: configuration plus one pooled HTTP
/// client for all upstream calls.
pub struct AppState {
    pub config: AppConfig,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }
}
