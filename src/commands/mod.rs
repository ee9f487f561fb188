//! The user-facing workflows: status, commit, report and the wizard.

pub mod commit;
pub mod report;
pub mod status;
pub mod wizard;

use std::path::Path;

use anyhow::{Context, Result};

use crate::git::{DiffSummary, GitAnalyzer};
use crate::output::formatter;

pub use commit::{CommitOptions, run_commit};
pub use report::{ReportOptions, run_report};
pub use status::{StatusOptions, run_status};
pub use wizard::run_wizard;

/// Print the command header and open the repository at `path`.
fn open_repository(path: &Path, title: &str) -> Result<GitAnalyzer> {
    let analyzer = GitAnalyzer::open(path)
        .with_context(|| format!("Cannot open repository at {}", path.display()))?;
    formatter::print_header(title, Some(&format!("Repository: {}", analyzer.repo_name())));
    Ok(analyzer)
}

/// Stats line for the files the user kept.
fn selection_stats(files: &[String], diff: &DiffSummary) -> String {
    crate::git::diff::stats_line(files.len(), diff.total_additions, diff.total_deletions)
}
