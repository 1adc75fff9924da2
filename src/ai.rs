//! Access to the reasoning model: configuration, the client seam and the
//! prompt templates.

pub mod client;
pub mod common;
pub mod config;
pub mod prompts;

pub use client::{ChatClient, CompletionRequest, ReasoningClient, ResponseFormat};
