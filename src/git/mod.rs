//! Git operations by shelling out to the `git` binary.

pub mod analyzer;
pub mod diff;
pub mod log;
pub mod runner;
pub mod status;

pub use analyzer::{GitAnalyzer, MAX_DAYS, validate_days};
pub use diff::{DiffSummary, ShortStat, TRUNCATION_MARKER, parse_diff_stats, parse_shortstat, truncate_diff};
pub use log::{CommitRecord, parse_git_date, parse_log};
pub use runner::GitRunner;
pub use status::{RepoStatus, parse_status};
