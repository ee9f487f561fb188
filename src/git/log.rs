//! Commit log parsing.

use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use super::diff::ShortStat;

/// Separates fields within one log record.
pub const FIELD_SEPARATOR: char = '\x00';

/// Terminates each log record.
pub const RECORD_SEPARATOR: char = '\x01';

/// `--pretty=format:` string producing records [`parse_log`] understands.
///
/// Fields: hash, author name, author email, author date, subject, body.
pub const LOG_FORMAT: &str = "%H%x00%an%x00%ae%x00%ad%x00%s%x00%b%x00%x01";

/// Minimum number of fields for a usable record (body is optional).
const MIN_FIELDS: usize = 5;

/// Information about a single git commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitRecord {
    pub hash: String,
    pub author: String,
    pub email: String,
    pub date: DateTime<FixedOffset>,
    pub subject: String,
    pub body: String,
    pub stats: Option<ShortStat>,
}

impl CommitRecord {
    /// Abbreviated hash for display.
    pub fn short_hash(&self) -> &str {
        self.hash.get(..7).unwrap_or(&self.hash)
    }

    /// Return a copy carrying per-commit line counts.
    pub fn with_stats(self, stats: ShortStat) -> Self {
        Self {
            stats: Some(stats),
            ..self
        }
    }
}

/// Parse `git log` output produced with [`LOG_FORMAT`].
///
/// Records with fewer than five fields are dropped. A record whose date cannot
/// be parsed is kept with the current time instead.
pub fn parse_log(output: &str) -> Vec<CommitRecord> {
    output
        .split(RECORD_SEPARATOR)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(parse_record)
        .collect()
}

fn parse_record(entry: &str) -> Option<CommitRecord> {
    let parts: Vec<&str> = entry.split(FIELD_SEPARATOR).collect();

    if parts.len() < MIN_FIELDS {
        debug!("Dropping malformed log record with {} fields", parts.len());
        return None;
    }

    let date = parse_git_date(parts[3]).unwrap_or_else(|| {
        warn!(
            "Could not parse date '{}' for commit {}, using current time",
            parts[3].trim(),
            parts[0]
        );
        Utc::now().into()
    });

    Some(CommitRecord {
        hash: parts[0].to_string(),
        author: parts[1].to_string(),
        email: parts[2].to_string(),
        date,
        subject: parts[4].to_string(),
        body: parts.get(5).map(|b| b.trim().to_string()).unwrap_or_default(),
        stats: None,
    })
}

/// Parse a git timestamp into a timezone-aware datetime.
///
/// Accepts `--date=iso` output (`2024-01-15 10:30:00 +0100`) as well as strict
/// ISO 8601 (`2024-01-15T10:30:00+01:00`).
pub fn parse_git_date(text: &str) -> Option<DateTime<FixedOffset>> {
    let text = text.trim();

    DateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S %z")
        .or_else(|_| DateTime::parse_from_rfc3339(text))
        .ok()
}
