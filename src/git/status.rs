//! Working tree status from `git status --porcelain`.

use serde::Serialize;

/// Index status letters that mean the file has a staged change.
const STAGED_CODES: &str = "MADRC";

/// Worktree status letter for an unstaged modification.
const MODIFIED_CODE: char = 'M';

/// Porcelain code for untracked files.
const UNTRACKED_CODE: &str = "??";

/// Current status of the repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepoStatus {
    pub branch: String,
    pub staged: Vec<String>,
    pub modified: Vec<String>,
    pub untracked: Vec<String>,
}

impl RepoStatus {
    /// Whether there are staged or unstaged modifications.
    ///
    /// Untracked files alone do not make the tree dirty.
    pub fn is_dirty(&self) -> bool {
        !self.staged.is_empty() || !self.modified.is_empty()
    }
}

/// Parse porcelain status output.
///
/// Each line is a two-character status code, a space and a path. A line can
/// land in both `staged` and `modified` when the index and worktree columns
/// both report a change. Order and duplicates follow the input.
pub fn parse_status(output: &str, branch: &str) -> RepoStatus {
    let mut status = RepoStatus {
        branch: branch.to_string(),
        ..Default::default()
    };

    for line in output.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let mut chars = line.chars();
        let (Some(index), Some(worktree)) = (chars.next(), chars.next()) else {
            continue;
        };

        // Path starts after the two status columns and the separating space
        let Some(path) = line.get(3..) else {
            continue;
        };
        let path = path.to_string();

        if STAGED_CODES.contains(index) {
            status.staged.push(path.clone());
        }
        if worktree == MODIFIED_CODE {
            status.modified.push(path.clone());
        }
        if line.starts_with(UNTRACKED_CODE) {
            status.untracked.push(path);
        }
    }

    status
}
