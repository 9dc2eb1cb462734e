//! Upstream chat-completion client.

mod error;
mod provider;
mod types;

pub use error::LlmError;
pub use provider::{ChatProvider, NimProvider};
pub use types::{ChatRequest, ChatResponse, Choice, Message, Role, Usage};
