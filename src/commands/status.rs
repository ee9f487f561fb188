//! `status`: summarize uncommitted changes.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use crate::config::Config;
use crate::llm::LlmClient;
use crate::output::{formatter, select};

use super::{open_repository, selection_stats};

#[derive(Debug, Clone)]
pub struct StatusOptions {
    pub path: PathBuf,
    pub interactive: bool,
    pub show_diff: bool,
}

impl Default for StatusOptions {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
            interactive: false,
            show_diff: false,
        }
    }
}

pub async fn run_status(options: &StatusOptions, config: &Config) -> Result<()> {
    let analyzer = open_repository(&options.path, "Git-Summarizer")?;

    let status = analyzer
        .repo_status()
        .context("Failed to read repository status")?;
    formatter::print_status(&status);
    let last_activity = analyzer.last_activity()?;
    formatter::print_last_activity(last_activity);
    if last_activity.is_some() {
        let recent = analyzer
            .commit_count(config.default_days)
            .context("Failed to count recent commits")?;
        formatter::print_info(&format!(
            "{} commits in the last {} days",
            recent, config.default_days
        ));
    }

    if !status.is_dirty() {
        formatter::print_no_changes();
        return Ok(());
    }

    let mut diff = analyzer
        .uncommitted_diff(config.diff_budget())
        .context("Failed to read uncommitted changes")?;
    debug!(
        "Uncommitted diff: {} files, truncated={}",
        diff.files.len(),
        diff.truncated
    );

    let mut files = diff.files.clone();
    if options.interactive && !files.is_empty() {
        files = select::select_files(&files).context("File selection failed")?;
        if files.is_empty() {
            formatter::print_warning("No files selected. Exiting.");
            return Ok(());
        }
        if files.len() < diff.files.len() {
            diff = analyzer
                .uncommitted_diff_for(&files, config.diff_budget())
                .context("Failed to read selected changes")?;
        }
    }

    formatter::print_diff_stats(&files, diff.total_additions, diff.total_deletions);
    formatter::print_file_tree(&files);
    if options.show_diff {
        formatter::print_diff_preview(&diff.raw_diff);
    }

    // Without a provider the local part of the report is still useful
    if let Err(e) = config.validate() {
        formatter::print_warning(&e.to_string());
        formatter::print_info(
            "Showing changes without an AI summary. Set OPENROUTER_API_KEY or GEMINI_API_KEY to enable it.",
        );
        return Ok(());
    }
    let client = LlmClient::from_config(config)?;

    let spinner = formatter::create_spinner("🤖 Generating AI summary...");
    let summary = client
        .summarize_changes(&diff.raw_diff, &selection_stats(&files, &diff), &files)
        .await;
    spinner.finish_and_clear();

    let summary = summary.context("AI summary failed")?;
    formatter::print_summary(&summary, "AI Summary");
    Ok(())
}
