//! `commit`: suggest a commit message for the current changes.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::llm::LlmClient;
use crate::output::{formatter, select};

use super::{open_repository, selection_stats};

#[derive(Debug, Clone)]
pub struct CommitOptions {
    pub path: PathBuf,
    pub interactive: bool,
}

impl Default for CommitOptions {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
            interactive: false,
        }
    }
}

/// Generate a message for staged changes, falling back to all uncommitted ones.
///
/// Returns the suggested message, or `None` when there was nothing to describe
/// or the user deselected every file.
pub async fn run_commit(options: &CommitOptions, config: &Config) -> Result<Option<String>> {
    let analyzer = open_repository(&options.path, "Commit Message Generator")?;

    let mut diff = analyzer
        .staged_diff(config.diff_budget())
        .context("Failed to read staged changes")?;

    let staged = diff.has_changes();
    if !staged {
        diff = analyzer
            .uncommitted_diff(config.diff_budget())
            .context("Failed to read uncommitted changes")?;
        if !diff.has_changes() {
            formatter::print_no_changes();
            return Ok(None);
        }
        formatter::print_warning("No staged changes. Using all uncommitted changes.");
    }

    let mut files = diff.files.clone();
    if options.interactive {
        files = select::select_files(&files).context("File selection failed")?;
        if files.is_empty() {
            formatter::print_warning("No files selected. Exiting.");
            return Ok(None);
        }
        if files.len() < diff.files.len() {
            let budget = config.diff_budget();
            diff = if staged {
                analyzer.staged_diff_for(&files, budget)
            } else {
                analyzer.uncommitted_diff_for(&files, budget)
            }
            .context("Failed to read selected changes")?;
        }
    }

    formatter::print_diff_stats(&files, diff.total_additions, diff.total_deletions);

    let client = LlmClient::from_config(config)?;
    let spinner = formatter::create_spinner("🤖 Generating commit message...");
    let message = client
        .suggest_commit_message(&diff.raw_diff, &selection_stats(&files, &diff))
        .await;
    spinner.finish_and_clear();

    let message = message.context("Failed to generate commit message")?;
    formatter::print_commit_message(&message);

    if options.interactive
        && select::confirm("Would you like to run this commit?", true)
            .context("Confirmation prompt failed")?
    {
        match analyzer.commit(&message) {
            Ok(()) => formatter::print_success("Commit created successfully!"),
            Err(e) => formatter::print_error(&format!("Commit failed: {}", e)),
        }
    }

    Ok(Some(message))
}
