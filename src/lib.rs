//! Nimchat - a minimal chat relay for NVIDIA NIM with a terminal client.

pub mod catalog;
pub mod client;
pub mod config;
pub mod handlers;
pub mod llm;
pub mod response;
pub mod server;
