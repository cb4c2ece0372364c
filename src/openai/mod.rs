//! OpenAI API access: key resolution and the chat-completions client.

pub mod auth;
pub mod client;

pub use auth::resolve_api_key;
pub use client::{CodeModel, DEFAULT_MODEL, OpenAiClient};
