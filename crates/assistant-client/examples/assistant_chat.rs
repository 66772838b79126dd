//! Simple test for the assistant chat completion.
//!
//! Run with: cargo run -p assistant-client --example assistant_chat
//! Or with a custom message: cargo run -p assistant-client --example assistant_chat -- "Your message here"
//!
//! Make sure to set environment variables in .env:
//!   ASSISTANT_API_KEY - API key for authentication

use assistant_client::{AssistantClient, AssistantSession};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Get message from command line args or use default
    let args: Vec<String> = env::args().collect();
    let message_text = if args.len() > 1 {
        args[1..].join(" ")
    } else {
        "How do I set up an away message?".to_string()
    };

    let client = AssistantClient::from_env()?;
    println!("API URL: {}", client.config().api_url);
    println!("Model: {}", client.config().model);
    println!();

    let mut session = AssistantSession::default();

    println!("Sending: \"{message_text}\"");
    println!("Waiting for response...\n");

    let reply = client.complete_chat(session.history(), &message_text).await?;
    session.push_exchange(&message_text, &reply);

    println!("=== Response ===");
    println!("{reply}");
    println!("================");

    Ok(())
}
