//! Prompt templates for the summarization tasks.

use crate::git::CommitRecord;

/// File lists in prompts are capped at this many entries.
const MAX_PROMPT_FILES: usize = 20;

/// Render a bulleted file list, collapsing the tail past [`MAX_PROMPT_FILES`].
fn file_list(files: &[String]) -> String {
    let mut list = files
        .iter()
        .take(MAX_PROMPT_FILES)
        .map(|f| format!("  - {f}"))
        .collect::<Vec<_>>()
        .join("\n");

    if files.len() > MAX_PROMPT_FILES {
        list.push_str(&format!(
            "\n  ... and {} more files",
            files.len() - MAX_PROMPT_FILES
        ));
    }

    list
}

/// Prompt to summarize uncommitted changes.
pub fn status_summary(diff: &str, stats: &str, files: &[String]) -> String {
    let files = file_list(files);

    format!(
        r#"You are a helpful coding assistant analyzing git changes.
Analyze the following uncommitted changes and provide a concise, human-readable summary.

**Changed Files:**
{files}

**Statistics:**
{stats}

**Diff (may be truncated):**
```diff
{diff}
```

**Instructions:**
1. Describe WHAT the developer is working on in 2-3 sentences
2. List the key changes as bullet points (max 5 bullets)
3. Note any potential issues or incomplete work if visible

Format your response as:
## Summary
[2-3 sentence overview]

## Key Changes
- [change 1]
- [change 2]

## Notes
[Observations about incomplete work or potential issues. Skip if none.]
"#
    )
}

/// Prompt to generate a conventional commit message.
pub fn commit_message(diff: &str, stats: &str) -> String {
    format!(
        r#"You are a helpful coding assistant. Generate a conventional commit message for these changes.

**Statistics:**
{stats}

**Diff:**
```diff
{diff}
```

**Instructions:**
Generate a commit message following the Conventional Commits format:
- Type: feat, fix, docs, style, refactor, test, chore
- Scope: optional, in parentheses
- Description: imperative mood, lowercase, no period

Examples:
- feat(auth): add JWT token refresh mechanism
- fix: resolve null pointer in user validation
- docs: update API documentation for v2 endpoints

Respond with ONLY the commit message, nothing else.
"#
    )
}

/// Prompt to generate a progress report from a commit list.
pub fn progress_report(commits_summary: &str, total_commits: usize, days: u32) -> String {
    format!(
        r#"You are a helpful coding assistant creating a progress report.

**Period:** Last {days} days
**Total Commits:** {total_commits}

**Commit History:**
{commits_summary}

**Instructions:**
Create a brief, developer-friendly progress report that:
1. Summarizes the main accomplishments in 2-3 sentences
2. Groups related commits into categories/features
3. Highlights notable patterns (bug fixes, new features, refactoring)

Format your response as:

## Progress Summary
[2-3 sentence overview of accomplishments]

## Work Completed
### [Category]
- [accomplishment]

## Statistics
- Total commits: {total_commits}
- Period: {days} days
"#
    )
}

/// One line per commit for the report prompt: `- [date] subject (by author)`.
pub fn commits_summary(commits: &[CommitRecord]) -> String {
    commits
        .iter()
        .map(|c| {
            format!(
                "- [{}] {} (by {})",
                c.date.format("%Y-%m-%d"),
                c.subject,
                c.author
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
