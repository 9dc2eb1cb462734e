//! V1 API handlers.

mod chat;
mod models;

pub use chat::relay_chat;
pub use models::list_models;
