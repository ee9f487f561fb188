//! Terminal rendering for status, diffs, commits and LLM output.

use std::time::Duration;

use chrono::{DateTime, FixedOffset, Utc};
use colored::{Color, Colorize};
use indicatif::{ProgressBar, ProgressStyle};

use crate::git::{CommitRecord, RepoStatus};

const RULE_WIDTH: usize = 60;
const LISTED_STAGED: usize = 5;
const LISTED_UNTRACKED: usize = 3;
const BAR_WIDTH: usize = 20;
pub const DIFF_PREVIEW_LINES: usize = 20;
pub const COMMIT_TABLE_ROWS: usize = 15;
pub const SUBJECT_WIDTH: usize = 50;

fn rule(color: Color) {
    println!("{}", "─".repeat(RULE_WIDTH).color(color));
}

/// A titled block between two rules.
fn panel(title: &str, body: &str, color: Color) {
    println!();
    println!("{}", title.color(color).bold());
    rule(color);
    println!("{}", body.trim_end());
    rule(color);
}

pub fn print_header(title: &str, subtitle: Option<&str>) {
    println!();
    rule(Color::Cyan);
    println!("  🚀 {}", title.cyan().bold());
    if let Some(subtitle) = subtitle {
        println!("  {}", subtitle.dimmed());
    }
    rule(Color::Cyan);
    println!();
}

fn print_file_group(label: String, files: &[String], limit: usize, bullet: colored::ColoredString) {
    if files.is_empty() {
        return;
    }
    println!("\n{}", label);
    for file in files.iter().take(limit) {
        println!("  {} {}", bullet, file);
    }
    if files.len() > limit {
        println!("  {}", format!("... and {} more", files.len() - limit).dimmed());
    }
}

/// Branch line plus the staged, modified and untracked lists.
pub fn print_status(status: &RepoStatus) {
    let state = if status.is_dirty() {
        "🔴 Has uncommitted changes"
    } else {
        "🟢 Clean"
    };
    println!("📍 {} {}", status.branch.cyan().bold(), state);

    print_file_group(
        format!("✓ Staged ({}):", status.staged.len()).green().bold().to_string(),
        &status.staged,
        LISTED_STAGED,
        "•".green(),
    );
    print_file_group(
        format!("● Modified ({}):", status.modified.len()).yellow().bold().to_string(),
        &status.modified,
        LISTED_STAGED,
        "•".yellow(),
    );
    print_file_group(
        format!("? Untracked ({}):", status.untracked.len()).dimmed().to_string(),
        &status.untracked,
        LISTED_UNTRACKED,
        "•".dimmed(),
    );
}

/// Human phrasing for the time between `then` and `now`.
pub fn format_relative_time(then: DateTime<FixedOffset>, now: DateTime<Utc>) -> String {
    let seconds = (now.timestamp() - then.timestamp()).max(0);
    let days = seconds / 86_400;
    let within_day = seconds % 86_400;

    match days {
        0 if within_day < 3600 => format!("{} minutes ago", within_day / 60),
        0 => format!("{} hours ago", within_day / 3600),
        1 => "Yesterday".to_string(),
        n => format!("{} days ago", n),
    }
}

pub fn print_last_activity(last_activity: Option<DateTime<FixedOffset>>) {
    let Some(when) = last_activity else {
        return;
    };
    println!(
        "🕐 Last activity: {} {}",
        format_relative_time(when, Utc::now()).bold(),
        format!("({})", when.format("%Y-%m-%d %H:%M")).dimmed()
    );
}

/// Bar lengths for additions and deletions, proportional to their share.
pub fn stat_bars(additions: usize, deletions: usize) -> (usize, usize) {
    let total = (additions + deletions).max(1);
    let scale = |n: usize| (n * BAR_WIDTH / total).min(BAR_WIDTH);
    (scale(additions), scale(deletions))
}

pub fn print_diff_stats(files: &[String], additions: usize, deletions: usize) {
    let (add_bar, del_bar) = stat_bars(additions, deletions);
    let plural = if files.len() == 1 { "" } else { "s" };

    println!();
    println!("{}", "📊 Change Statistics".bold());
    rule(Color::Magenta);
    println!(
        "  {:<16} {:>8}  {}",
        "📁 Files changed",
        files.len(),
        format!("{} file{}", files.len(), plural).dimmed()
    );
    println!(
        "  {:<16} {:>8}  {}",
        "+ Additions".green(),
        format!("+{}", additions).green(),
        "█".repeat(add_bar).green()
    );
    println!(
        "  {:<16} {:>8}  {}",
        "- Deletions".red(),
        format!("-{}", deletions).red(),
        "█".repeat(del_bar).red()
    );
    rule(Color::Magenta);
}

/// One entry of the changed-files tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEntry {
    File(String),
    Dir { path: String, files: Vec<String> },
}

/// Group paths by parent directory, keeping first-seen order.
pub fn group_by_directory(files: &[String]) -> Vec<TreeEntry> {
    let mut entries: Vec<TreeEntry> = Vec::new();

    for file in files {
        let normalized = file.replace('\\', "/");
        match normalized.rsplit_once('/') {
            None => entries.push(TreeEntry::File(normalized)),
            Some((dir, name)) => {
                let existing = entries.iter_mut().find_map(|e| match e {
                    TreeEntry::Dir { path, files } if path == dir => Some(files),
                    _ => None,
                });
                match existing {
                    Some(files) => files.push(name.to_string()),
                    None => entries.push(TreeEntry::Dir {
                        path: dir.to_string(),
                        files: vec![name.to_string()],
                    }),
                }
            }
        }
    }

    entries
}

pub fn file_icon(filename: &str) -> &'static str {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "rs" => "🦀",
        "py" => "🐍",
        "js" => "📜",
        "ts" => "📘",
        "jsx" | "tsx" => "⚛️",
        "json" => "📋",
        "md" => "📝",
        "css" => "🎨",
        "html" => "🌐",
        "yml" | "yaml" | "toml" => "⚙️",
        "sh" => "🔧",
        "sql" => "🗃️",
        _ => "📄",
    }
}

pub fn print_file_tree(files: &[String]) {
    if files.is_empty() {
        return;
    }

    println!();
    println!("{}", "📁 Changed Files".cyan().bold());
    for entry in group_by_directory(files) {
        match entry {
            TreeEntry::File(name) => println!("├── {} {}", file_icon(&name), name),
            TreeEntry::Dir { path, files } => {
                println!("├── {}", format!("📂 {}/", path).yellow().bold());
                for name in files {
                    println!("│   ├── {} {}", file_icon(&name), name);
                }
            }
        }
    }
}

/// First `max_lines` lines of `diff`, with a count of what was left out.
pub fn diff_preview(diff: &str, max_lines: usize) -> Option<String> {
    if diff.trim().is_empty() {
        return None;
    }

    let lines: Vec<&str> = diff.split('\n').collect();
    let mut preview = lines
        .iter()
        .take(max_lines)
        .copied()
        .collect::<Vec<_>>()
        .join("\n");
    if lines.len() > max_lines {
        preview.push_str(&format!("\n... ({} more lines)", lines.len() - max_lines));
    }
    Some(preview)
}

pub fn print_diff_preview(diff: &str) {
    let Some(preview) = diff_preview(diff, DIFF_PREVIEW_LINES) else {
        return;
    };

    println!();
    println!("{}", "📝 Diff Preview".bold());
    rule(Color::BrightBlack);
    for line in preview.lines() {
        let styled = if line.starts_with("+++") || line.starts_with("---") {
            line.bold()
        } else if line.starts_with('+') {
            line.green()
        } else if line.starts_with('-') {
            line.red()
        } else if line.starts_with("@@") {
            line.cyan()
        } else {
            line.normal()
        };
        println!("{}", styled);
    }
    rule(Color::BrightBlack);
}

/// Cut `text` to `max` characters, appending `...` when it was longer.
pub fn shorten(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max).collect();
    out.push_str("...");
    out
}

pub fn print_commits_table(commits: &[CommitRecord]) {
    if commits.is_empty() {
        return;
    }

    println!();
    println!("{}", "📜 Recent Commits".bold());
    rule(Color::Cyan);
    println!(
        "{:<4} {:<6} {:<53} {}",
        "#".dimmed(),
        "Date".magenta().bold(),
        "Message".bold(),
        "Author".cyan().bold()
    );
    for (i, commit) in commits.iter().take(COMMIT_TABLE_ROWS).enumerate() {
        println!(
            "{:<4} {:<6} {:<53} {}",
            (i + 1).to_string().dimmed(),
            commit.date.format("%m/%d").to_string().magenta(),
            shorten(&commit.subject, SUBJECT_WIDTH),
            commit.author.cyan()
        );
    }
    if commits.len() > COMMIT_TABLE_ROWS {
        println!(
            "{:<11} {}",
            "",
            format!("... and {} more", commits.len() - COMMIT_TABLE_ROWS).dimmed()
        );
    }
    rule(Color::Cyan);
}

pub fn print_summary(summary: &str, title: &str) {
    panel(&format!("🤖 {}", title), summary, Color::Green);
}

pub fn print_commit_message(message: &str) {
    panel(
        "💡 Suggested Commit Message",
        &message.yellow().bold().to_string(),
        Color::Yellow,
    );
    println!();
    println!("{}", "📋 Copy the message above or run:".dimmed());
    println!("  {}", format!("git commit -m \"{}\"", message).cyan());
}

pub fn print_report(report: &str, days: u32) {
    panel(
        &format!("📈 Progress Report (Last {} days)", days),
        report,
        Color::Blue,
    );
}

pub fn print_error(message: &str) {
    println!();
    eprintln!("{}", format!("❌ {}", message).red().bold());
}

pub fn print_warning(message: &str) {
    println!("{}", format!("⚠️  {}", message).yellow());
}

pub fn print_info(message: &str) {
    println!("{}", format!("ℹ️  {}", message).blue());
}

pub fn print_success(message: &str) {
    println!("{}", format!("✅ {}", message).green());
}

pub fn print_no_changes() {
    println!();
    println!(
        "{}",
        "✨ Working tree is clean. No uncommitted changes.".green()
    );
}

/// Spinner shown while waiting on the LLM. Call `finish_and_clear` when done.
pub fn create_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
