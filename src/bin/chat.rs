// src/bin/chat.rs
//
// Terminal chat client for the portfolio assistant. Talks to the proxy the
// same way the web widget does: one session, optimistic appends, errors
// rendered inline.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use portfolio_assistant::chat_client::ChatClient;
use portfolio_assistant::config;
use portfolio_assistant::models::chat::MessageRole;
use portfolio_assistant::session::ChatSession;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let base = config::client_api_base();
    let client = Arc::new(ChatClient::new(base.clone()));
    let mut session = ChatSession::new(client.clone());

    println!("Portfolio assistant chat ({base})");
    println!("Commands: /suggest, /clear, /quit");
    println!();
    println!("assistant> {}", session.messages()[0].content);

    let stdin = io::stdin();
    loop {
        print!("you> ");
        io::stdout().flush().ok();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break, // EOF
            Ok(_) => {}
            Err(err) => {
                eprintln!("failed to read input: {err}");
                break;
            }
        }

        match line.trim() {
            "" => {}
            "/quit" | "/exit" => break,
            "/clear" => {
                session.clear_chat();
                println!("(conversation cleared, new session {})", session.session_id());
                println!("assistant> {}", session.messages()[0].content);
            }
            "/suggest" => match client.suggestions().await {
                Ok(suggestions) => {
                    println!("Try asking:");
                    for question in suggestions.questions {
                        println!("  - {question}");
                    }
                }
                Err(err) => println!("error> {err}"),
            },
            text => {
                session.send_message(text).await;
                if let Some(reply) = session.messages().last() {
                    match reply.role {
                        MessageRole::Error => println!("error> {}", reply.content),
                        _ => println!("assistant> {}", reply.content),
                    }
                }
            }
        }
    }
}
