//! Error types for git-summarizer modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

use crate::llm::Provider;

/// Errors from git operations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository: {}", .0.display())]
    NotARepository(PathBuf),

    #[error("Git is not installed or not in PATH")]
    ToolMissing,

    #[error("Git error running `git {command}`: {stderr}")]
    FatalCommand { command: String, stderr: String },

    #[error("`git {command}` failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("Failed to spawn git process: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("Invalid time window of {0} days (expected 1 to 365)")]
    InvalidWindow(i64),
}

/// Errors from configuration resolution.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "No LLM API key configured. Please set one of:\n  \
             \u{2022} OPENROUTER_API_KEY (get free at https://openrouter.ai/keys) [RECOMMENDED]\n  \
             \u{2022} GEMINI_API_KEY (get at https://aistudio.google.com/apikey)"
    )]
    NoProviderConfigured,
}

/// Errors from LLM provider calls.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Request failed: {0}")]
    Http(#[source] reqwest::Error),

    #[error("Authentication rejected (HTTP {status}): {body}")]
    Unauthorized { status: u16, body: String },

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Unexpected response shape: {0}")]
    MalformedResponse(String),
}

/// Errors surfaced by the LLM client.
#[derive(Error, Debug)]
pub enum LlmError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{provider} API error: {source}")]
    Provider {
        provider: Provider,
        #[source]
        source: ProviderError,
    },
}

/// Errors from writing Markdown reports.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to write report: {0}")]
    WriteFailed(#[source] std::io::Error),

    #[error("Failed to move report into place: {0}")]
    PersistFailed(#[source] std::io::Error),
}

/// Errors from the Slack webhook integration.
#[derive(Error, Debug)]
pub enum SlackError {
    #[error(
        "Slack webhook URL not configured.\n\
             Set SLACK_WEBHOOK_URL in your .env file or environment."
    )]
    NotConfigured,

    #[error("Failed to send to Slack: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Slack rejected the message (HTTP {status}): {body}")]
    Status { status: u16, body: String },
}
