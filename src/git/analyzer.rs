//! Repository queries built on [`GitRunner`] and the output parsers.

use std::path::Path;

use chrono::{DateTime, FixedOffset};
use tracing::debug;

use crate::error::GitError;

use super::diff::{DiffSummary, ShortStat, parse_diff_stats, parse_shortstat, truncate_diff};
use super::log::{CommitRecord, LOG_FORMAT, parse_git_date, parse_log};
use super::runner::GitRunner;
use super::status::{RepoStatus, parse_status};

/// Object id of git's empty tree.
const EMPTY_TREE: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";

/// Largest accepted report window.
pub const MAX_DAYS: i64 = 365;

/// Check a day window before it is handed to `--since`.
pub fn validate_days(days: i64) -> Result<u32, GitError> {
    if (1..=MAX_DAYS).contains(&days) {
        Ok(days as u32)
    } else {
        Err(GitError::InvalidWindow(days))
    }
}

/// Extracts status, diffs and history from a repository.
#[derive(Debug, Clone)]
pub struct GitAnalyzer {
    runner: GitRunner,
}

impl GitAnalyzer {
    /// Open the repository at `path`, failing if it is not a git repository.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GitError> {
        Ok(Self {
            runner: GitRunner::open(path)?,
        })
    }

    pub fn repo_path(&self) -> &Path {
        self.runner.repo_path()
    }

    /// Directory name of the repository, for headers and reports.
    pub fn repo_name(&self) -> String {
        self.repo_path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "repository".to_string())
    }

    /// Name of the checked-out branch (empty when detached).
    pub fn current_branch(&self) -> Result<String, GitError> {
        Ok(self.runner.run(&["branch", "--show-current"])?.trim().to_string())
    }

    pub fn repo_status(&self) -> Result<RepoStatus, GitError> {
        let output = self.runner.run(&["status", "--porcelain"])?;
        let branch = self.current_branch()?;
        Ok(parse_status(&output, &branch))
    }

    /// Diff of all uncommitted changes (staged and unstaged) against HEAD.
    ///
    /// Before the first commit the base is the empty tree, so staged files
    /// still show up.
    pub fn uncommitted_diff(&self, max_chars: Option<usize>) -> Result<DiffSummary, GitError> {
        self.uncommitted_diff_for(&[], max_chars)
    }

    /// Uncommitted diff limited to `paths`. An empty slice means every path.
    pub fn uncommitted_diff_for(
        &self,
        paths: &[String],
        max_chars: Option<usize>,
    ) -> Result<DiffSummary, GitError> {
        let base = self.diff_base()?;
        self.diff(&[base], paths, max_chars)
    }

    /// Diff of staged changes only.
    pub fn staged_diff(&self, max_chars: Option<usize>) -> Result<DiffSummary, GitError> {
        self.staged_diff_for(&[], max_chars)
    }

    /// Staged diff limited to `paths`. An empty slice means every path.
    pub fn staged_diff_for(
        &self,
        paths: &[String],
        max_chars: Option<usize>,
    ) -> Result<DiffSummary, GitError> {
        self.diff(&["--cached"], paths, max_chars)
    }

    /// `HEAD`, or the empty tree while HEAD is unborn.
    fn diff_base(&self) -> Result<&'static str, GitError> {
        let head = self
            .runner
            .run(&["rev-parse", "--verify", "--quiet", "HEAD"])?;
        if head.trim().is_empty() {
            debug!("HEAD is unborn, diffing against the empty tree");
            Ok(EMPTY_TREE)
        } else {
            Ok("HEAD")
        }
    }

    fn diff(
        &self,
        base: &[&str],
        paths: &[String],
        max_chars: Option<usize>,
    ) -> Result<DiffSummary, GitError> {
        let mut raw_args = vec!["diff"];
        // Wide enough that long paths are never abbreviated with "..."
        let mut stat_args = vec!["diff", "--stat=1000"];
        for args in [&mut raw_args, &mut stat_args] {
            args.extend_from_slice(base);
            if !paths.is_empty() {
                args.push("--");
                args.extend(paths.iter().map(String::as_str));
            }
        }

        let raw = self.runner.run(&raw_args)?;
        let stat = self.runner.run(&stat_args)?;
        Ok(parse_diff_stats(&raw, &stat, max_chars))
    }

    /// Commits reachable from HEAD made within the last `days` days.
    ///
    /// The window is passed to git's `--since` filter as-is; callers validate
    /// it with [`validate_days`].
    pub fn recent_commits(&self, days: u32) -> Result<Vec<CommitRecord>, GitError> {
        let since = format!("--since={days} days ago");
        let pretty = format!("--pretty=format:{LOG_FORMAT}");
        let output = self.runner.run(&["log", &since, &pretty, "--date=iso"])?;

        if output.trim().is_empty() {
            return Ok(Vec::new());
        }

        Ok(parse_log(&output))
    }

    /// Patch for a single commit, optionally truncated.
    pub fn commit_diff(&self, hash: &str, max_chars: Option<usize>) -> Result<String, GitError> {
        let diff = self
            .runner
            .run(&["show", hash, "--pretty=format:", "--patch"])?;
        Ok(truncate_diff(&diff, max_chars).0)
    }

    /// Files changed and line counts for a single commit.
    pub fn commit_stats(&self, hash: &str) -> Result<ShortStat, GitError> {
        let output = self
            .runner
            .run(&["show", "--shortstat", "--format=", hash])?;
        Ok(parse_shortstat(&output))
    }

    /// Number of commits on HEAD in the last `days` days.
    pub fn commit_count(&self, days: u32) -> Result<usize, GitError> {
        let since = format!("--since={days} days ago");
        let output = self.runner.run(&["rev-list", "--count", &since, "HEAD"])?;
        Ok(output.trim().parse().unwrap_or(0))
    }

    /// Timestamp of the most recent commit, if any.
    pub fn last_activity(&self) -> Result<Option<DateTime<FixedOffset>>, GitError> {
        let output = match self.runner.run(&["log", "-1", "--format=%ai"]) {
            Ok(output) => output,
            // A repository without commits has no activity yet
            Err(GitError::FatalCommand { .. }) => return Ok(None),
            Err(e) => return Err(e),
        };

        if output.trim().is_empty() {
            return Ok(None);
        }

        Ok(parse_git_date(&output))
    }

    /// Create a commit from the staged changes.
    pub fn commit(&self, message: &str) -> Result<(), GitError> {
        self.runner.run_checked(&["commit", "-m", message])?;
        Ok(())
    }
}
