//! `report`: progress report over recent commits.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use crate::config::Config;
use crate::error::SlackError;
use crate::git::{CommitRecord, GitAnalyzer, validate_days};
use crate::llm::{LlmClient, prompt};
use crate::output::{formatter, select};
use crate::report::{ReportInput, SlackSender, write_report};

use super::open_repository;

#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub path: PathBuf,
    /// Window in days; `None` asks (interactive) or uses the configured default.
    pub days: Option<i64>,
    pub interactive: bool,
    pub save_path: Option<PathBuf>,
    pub slack: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
            days: None,
            interactive: false,
            save_path: None,
            slack: false,
        }
    }
}

fn resolve_days(options: &ReportOptions, config: &Config) -> Result<u32> {
    let days = match options.days {
        Some(days) => days,
        None if options.interactive => {
            i64::from(select::select_days(config.default_days).context("Day selection failed")?)
        }
        None => i64::from(config.default_days),
    };
    Ok(validate_days(days)?)
}

/// Generate the report text. Returns `None` when there was nothing to report.
pub async fn run_report(options: &ReportOptions, config: &Config) -> Result<Option<String>> {
    let analyzer = open_repository(&options.path, "Progress Report Generator")?;
    let days = resolve_days(options, config)?;

    let commits = analyzer
        .recent_commits(days)
        .context("Failed to read commit history")?;
    if commits.is_empty() {
        formatter::print_warning(&format!("No commits found in the last {} days.", days));
        return Ok(None);
    }

    formatter::print_info(&format!(
        "Found {} commits in the last {} days",
        commits.len(),
        days
    ));
    formatter::print_commits_table(&commits);

    let selected = if options.interactive {
        let selected = select::select_commits(&commits).context("Commit selection failed")?;
        if selected.is_empty() {
            formatter::print_warning("No commits selected. Exiting.");
            return Ok(None);
        }
        formatter::print_info(&format!("Selected {} commits for report", selected.len()));
        selected
    } else {
        commits
    };

    let client = LlmClient::from_config(config)?;
    let spinner = formatter::create_spinner("🤖 Generating progress report...");
    let report_text = client
        .generate_report(&prompt::commits_summary(&selected), selected.len(), days)
        .await;
    spinner.finish_and_clear();
    let report_text = report_text.context("Failed to generate report")?;

    let selected = with_stats(&analyzer, selected);
    let repo_name = analyzer.repo_name();

    if let Some(path) = &options.save_path {
        let input = ReportInput {
            repo_name: &repo_name,
            days,
            report_text: &report_text,
            commits: &selected,
        };
        match write_report(path, &input) {
            Ok(saved) => formatter::print_success(&format!("Report saved to: {}", saved.display())),
            Err(e) => formatter::print_error(&format!("Failed to save report: {}", e)),
        }
    }

    if options.slack {
        match send_to_slack(config, &repo_name, days, &report_text, &selected).await {
            Ok(()) => formatter::print_success("📤 Report sent to Slack!"),
            Err(e) => formatter::print_error(&e.to_string()),
        }
    }

    formatter::print_report(&report_text, days);
    Ok(Some(report_text))
}

/// Attach per-commit line counts; commits whose stats cannot be read keep none.
fn with_stats(analyzer: &GitAnalyzer, commits: Vec<CommitRecord>) -> Vec<CommitRecord> {
    commits
        .into_iter()
        .map(|commit| match analyzer.commit_stats(&commit.hash) {
            Ok(stats) => commit.with_stats(stats),
            Err(e) => {
                debug!("No stats for {}: {}", commit.short_hash(), e);
                commit
            }
        })
        .collect()
}

async fn send_to_slack(
    config: &Config,
    repo_name: &str,
    days: u32,
    report_text: &str,
    commits: &[CommitRecord],
) -> Result<(), SlackError> {
    let webhook = config.slack_webhook().ok_or(SlackError::NotConfigured)?;
    SlackSender::new(webhook)?
        .send_report(repo_name, days, report_text, commits)
        .await
}
