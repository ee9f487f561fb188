//! LLM providers, prompt construction and the task-level client.

pub mod client;
pub mod prompt;
pub mod provider;

pub use client::{LlmClient, strip_code_fences};
pub use provider::{CompletionBackend, GeminiBackend, OpenRouterBackend, Provider};
