//! Diff statistics parsing and truncation.

use std::sync::LazyLock;

use regex_lite::Regex;
use serde::Serialize;

/// Appended to a diff body that was cut to fit the character budget.
pub const TRUNCATION_MARKER: &str = "\n\n... (truncated)";

static INSERTIONS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+) insertions?\(\+\)").expect("valid insertions regex"));

static DELETIONS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+) deletions?\(-\)").expect("valid deletions regex"));

static FILES_CHANGED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+) files? changed").expect("valid files-changed regex"));

/// Summary of changes in a diff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    /// Changed paths in the order git reported them.
    pub files: Vec<String>,
    pub total_additions: usize,
    pub total_deletions: usize,
    /// Unified diff body, possibly truncated.
    pub raw_diff: String,
    pub truncated: bool,
}

impl DiffSummary {
    /// Whether any file changed.
    ///
    /// Pure renames have zero line counts but still list files, so this looks
    /// at the file list rather than the totals.
    pub fn has_changes(&self) -> bool {
        !self.files.is_empty()
    }

    /// One-line stats for prompts, e.g. `3 files changed, +10, -2`.
    pub fn stats_line(&self) -> String {
        stats_line(self.files.len(), self.total_additions, self.total_deletions)
    }
}

/// Format a stats line for an arbitrary file count.
pub fn stats_line(files: usize, additions: usize, deletions: usize) -> String {
    format!("{files} files changed, +{additions}, -{deletions}")
}

/// Line-change counts from a `--shortstat` style summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ShortStat {
    pub files_changed: usize,
    pub insertions: usize,
    pub deletions: usize,
}

/// Parse a unified diff body and its `--stat` output into a [`DiffSummary`].
///
/// Every stat line with a `|` contributes the trimmed text before it as a
/// path. Totals come from the `N insertion(s)(+)` and `N deletion(s)(-)`
/// summary; a missing pattern counts as zero.
pub fn parse_diff_stats(raw_diff: &str, stat_output: &str, max_chars: Option<usize>) -> DiffSummary {
    let files = stat_output
        .lines()
        .filter_map(|line| line.split_once('|'))
        .map(|(path, _)| path.trim().to_string())
        .collect();

    let stat = parse_shortstat(stat_output);
    let (raw_diff, truncated) = truncate_diff(raw_diff, max_chars);

    DiffSummary {
        files,
        total_additions: stat.insertions,
        total_deletions: stat.deletions,
        raw_diff,
        truncated,
    }
}

/// Extract files-changed, insertion and deletion counts from a summary.
pub fn parse_shortstat(text: &str) -> ShortStat {
    ShortStat {
        files_changed: capture_count(&FILES_CHANGED_RE, text),
        insertions: capture_count(&INSERTIONS_RE, text),
        deletions: capture_count(&DELETIONS_RE, text),
    }
}

fn capture_count(re: &Regex, text: &str) -> usize {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Cut `text` to `max_chars` characters and append [`TRUNCATION_MARKER`].
///
/// Text at or under the budget is returned unchanged. Counts characters, not
/// bytes, so multi-byte content is never split. Returns the text and whether it
/// was truncated.
pub fn truncate_diff(text: &str, max_chars: Option<usize>) -> (String, bool) {
    let Some(max) = max_chars else {
        return (text.to_string(), false);
    };

    match text.char_indices().nth(max) {
        Some((cut, _)) => {
            let mut out = String::with_capacity(cut + TRUNCATION_MARKER.len());
            out.push_str(&text[..cut]);
            out.push_str(TRUNCATION_MARKER);
            (out, true)
        }
        None => (text.to_string(), false),
    }
}
