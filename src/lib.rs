//! git-summarizer - A CLI tool that summarizes git changes with an LLM.
//!
//! # Overview
//!
//! git-summarizer reads repository status, diffs and recent history by running
//! the `git` binary, normalizes the output into plain value types, and asks an
//! LLM (OpenRouter or Gemini) for change summaries, conventional commit
//! messages and progress reports. Reports can be saved as Markdown or posted
//! to Slack.

pub mod commands;
pub mod config;
pub mod error;
pub mod git;
pub mod llm;
pub mod output;
pub mod report;

// Re-export commonly used types
pub use config::Config;
pub use error::{ConfigError, GitError, LlmError, ProviderError, ReportError, SlackError};
pub use git::{CommitRecord, DiffSummary, GitAnalyzer, RepoStatus};
pub use llm::{LlmClient, Provider};
