//! # gptcli
//!
//! Ask a chat-completion model one question and get one answer back.
//!
//! ```rust,no_run
//! use gptcli::{CompletionProvider, OpenAiClient, OpenAiConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OpenAiClient::new(OpenAiConfig::new("sk-..."))?;
//!     let reply = client.complete("Say this is a test!").await?;
//!     println!("{reply}");
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod core;
pub mod provider;

pub use crate::core::{
    ChatRequest, ChatResponse, ChatRole, CompletionError, CompletionProvider, HttpClientConfig,
    Message, Prompt,
};
pub use crate::provider::{OpenAiClient, OpenAiConfig, complete};
