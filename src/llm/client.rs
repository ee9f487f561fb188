//! High-level LLM client for the summarization tasks.

use tracing::debug;

use crate::config::Config;
use crate::error::{LlmError, ProviderError};

use super::prompt;
use super::provider::{CompletionBackend, GeminiBackend, OpenRouterBackend, Provider};

/// Client for LLM interactions over whichever backend is configured.
pub struct LlmClient {
    backend: Box<dyn CompletionBackend>,
}

impl LlmClient {
    /// Build a client for the provider selected by `config`.
    pub fn from_config(config: &Config) -> Result<Self, LlmError> {
        let provider = config.active_provider()?;
        let wrap = |source: ProviderError| LlmError::Provider { provider, source };

        let backend: Box<dyn CompletionBackend> = match provider {
            Provider::Gemini => Box::new(
                GeminiBackend::new(
                    &config.gemini_api_key,
                    &config.gemini_model,
                    &config.gemini_base_url,
                )
                .map_err(wrap)?,
            ),
            Provider::OpenRouter => Box::new(
                OpenRouterBackend::new(
                    &config.openrouter_api_key,
                    &config.openrouter_model,
                    &config.openrouter_base_url,
                )
                .map_err(wrap)?,
            ),
        };

        debug!("Using {} provider", provider);
        Ok(Self { backend })
    }

    /// Build a client over an explicit backend.
    pub fn with_backend(backend: Box<dyn CompletionBackend>) -> Self {
        Self { backend }
    }

    pub fn provider(&self) -> Provider {
        self.backend.provider()
    }

    /// Send a fully rendered prompt and return the completion text.
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        debug!("Prompt length: {} chars", prompt.len());
        self.backend
            .generate(prompt)
            .await
            .map_err(|source| LlmError::Provider {
                provider: self.provider(),
                source,
            })
    }

    /// Generate a human-readable summary of uncommitted changes.
    pub async fn summarize_changes(
        &self,
        diff: &str,
        stats: &str,
        files: &[String],
    ) -> Result<String, LlmError> {
        self.generate(&prompt::status_summary(diff, stats, files)).await
    }

    /// Generate a conventional commit message.
    pub async fn suggest_commit_message(&self, diff: &str, stats: &str) -> Result<String, LlmError> {
        let response = self.generate(&prompt::commit_message(diff, stats)).await?;
        Ok(strip_code_fences(&response))
    }

    /// Generate a progress report for a commit summary.
    pub async fn generate_report(
        &self,
        commits_summary: &str,
        total_commits: usize,
        days: u32,
    ) -> Result<String, LlmError> {
        self.generate(&prompt::progress_report(commits_summary, total_commits, days))
            .await
    }
}

/// Remove a surrounding Markdown code fence from a response.
///
/// Models sometimes wrap a one-line answer in ```` ``` ```` fences even when
/// told not to. Responses without a leading fence are only trimmed.
pub fn strip_code_fences(response: &str) -> String {
    let trimmed = response.trim();
    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }

    let lines: Vec<&str> = trimmed.lines().collect();
    if lines.len() <= 2 {
        return trimmed.to_string();
    }

    let end = if lines[lines.len() - 1].trim_start().starts_with("```") {
        lines.len() - 1
    } else {
        lines.len()
    };

    lines[1..end].join("\n").trim().to_string()
}
