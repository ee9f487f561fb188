//! Git subprocess execution.
//!
//! All repository queries shell out to the system `git` binary, inheriting the
//! user's git config. Nothing here has a timeout.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tracing::debug;

use crate::error::GitError;

/// Marker git writes to stderr for unrecoverable errors.
const FATAL_MARKER: &str = "fatal:";

/// Runs git commands inside a validated repository.
#[derive(Debug, Clone)]
pub struct GitRunner {
    repo_path: PathBuf,
}

impl GitRunner {
    /// Open the repository at `path`.
    ///
    /// The path is resolved to an absolute path and must contain a `.git`
    /// entry (directory, or file for worktrees and submodules).
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = path.as_ref();
        let repo_path = path
            .canonicalize()
            .map_err(|_| GitError::NotARepository(path.to_path_buf()))?;

        if !repo_path.join(".git").exists() {
            return Err(GitError::NotARepository(repo_path));
        }

        Ok(Self { repo_path })
    }

    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    /// Run a query command and return its stdout.
    ///
    /// Any `fatal:` marker on stderr is an error, whatever the exit status. A
    /// non-zero exit without it is tolerated and whatever was printed to stdout
    /// is returned, since some queries report partial data alongside a warning.
    pub fn run(&self, args: &[&str]) -> Result<String, GitError> {
        let output = self.spawn(args)?;
        let stderr = String::from_utf8_lossy(&output.stderr);

        if stderr.contains(FATAL_MARKER) {
            return Err(GitError::FatalCommand {
                command: args.join(" "),
                stderr: stderr.trim().to_string(),
            });
        }

        if !output.status.success() {
            debug!(
                "git {} exited with {}: {}",
                args.join(" "),
                output.status,
                stderr.trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Run a mutating command; any non-zero exit is an error.
    pub fn run_checked(&self, args: &[&str]) -> Result<String, GitError> {
        let output = self.spawn(args)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            // `git commit` reports "nothing to commit" on stdout
            let detail = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            return Err(GitError::CommandFailed {
                command: args.join(" "),
                stderr: detail,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn spawn(&self, args: &[&str]) -> Result<Output, GitError> {
        if which::which("git").is_err() {
            return Err(GitError::ToolMissing);
        }

        debug!("git {}", args.join(" "));

        Command::new("git")
            .args(args)
            .current_dir(&self.repo_path)
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => GitError::ToolMissing,
                _ => GitError::SpawnFailed(e),
            })
    }
}
