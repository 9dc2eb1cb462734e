//! Terminal conversation client for the relay API.

mod api;
mod conversation;
mod picker;
mod render;
mod repl;

pub use api::{RelayClient, RelayError};
pub use conversation::{Conversation, Outbound, Turn, TurnBody};
pub use picker::render_picker;
pub use render::MarkdownRenderer;
pub use repl::{ChatOpts, run_chat, show_models};
