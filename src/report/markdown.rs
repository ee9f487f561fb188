//! Markdown progress report files.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tempfile::NamedTempFile;

use crate::error::ReportError;
use crate::git::CommitRecord;

/// Everything a saved report contains.
pub struct ReportInput<'a> {
    pub repo_name: &'a str,
    pub days: u32,
    pub report_text: &'a str,
    pub commits: &'a [CommitRecord],
}

/// Average commits per day, rounded to one decimal place.
pub fn commits_per_day(total_commits: usize, days: u32) -> f64 {
    let avg = total_commits as f64 / f64::from(days.max(1));
    (avg * 10.0).round() / 10.0
}

/// Render the report as Markdown.
pub fn render_markdown(input: &ReportInput<'_>, generated_at: DateTime<Local>) -> String {
    let total = input.commits.len();
    let mut out = format!("# Progress Report: {}\n\n", input.repo_name);

    out.push_str(&format!(
        "_Generated {}_\n\n",
        generated_at.format("%Y-%m-%d %H:%M")
    ));
    out.push_str("| Metric | Value |\n|---|---|\n");
    out.push_str(&format!("| Repository | {} |\n", input.repo_name));
    out.push_str(&format!("| Period | Last {} days |\n", input.days));
    out.push_str(&format!("| Total commits | {} |\n", total));
    out.push_str(&format!(
        "| Average | {:.1} commits/day |\n\n",
        commits_per_day(total, input.days)
    ));

    out.push_str(input.report_text.trim());
    out.push_str("\n\n");

    if !input.commits.is_empty() {
        out.push_str("## Commits\n\n");
        out.push_str("| Date | Hash | Subject | Author | Changes |\n");
        out.push_str("|---|---|---|---|---|\n");
        for commit in input.commits {
            let changes = commit
                .stats
                .map(|s| format!("+{} / -{}", s.insertions, s.deletions))
                .unwrap_or_default();
            out.push_str(&format!(
                "| {} | `{}` | {} | {} | {} |\n",
                commit.date.format("%Y-%m-%d"),
                commit.short_hash(),
                escape_cell(&commit.subject),
                escape_cell(&commit.author),
                changes
            ));
        }
    }

    out
}

/// Keep table cells on one row.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

/// Write the report to `path`, replacing any existing file atomically.
///
/// The content goes to a temp file in the target directory first and is then
/// moved over the destination, so a failed write never leaves a partial file.
pub fn write_report(path: &Path, input: &ReportInput<'_>) -> Result<PathBuf, ReportError> {
    let content = render_markdown(input, Local::now());

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut tmp = NamedTempFile::new_in(&dir).map_err(ReportError::WriteFailed)?;
    tmp.write_all(content.as_bytes())
        .map_err(ReportError::WriteFailed)?;
    tmp.flush().map_err(ReportError::WriteFailed)?;
    tmp.persist(path)
        .map_err(|e| ReportError::PersistFailed(e.error))?;

    Ok(path.to_path_buf())
}
