//! ReportRoute LLM Integration
//!
//! OpenAI-compatible chat completion client

mod client;
mod llm_trait;
mod types;

pub use client::OpenAiClient;
pub use llm_trait::{CompletionClient, CompletionRequest};
pub use types::{ChatChoice, ChatMessage, ChatRequest, ChatResponse};
