//! Interactive prompts built on dialoguer.

use std::path::PathBuf;

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, MultiSelect, Select};

use crate::git::{CommitRecord, MAX_DAYS};

use super::formatter::{SUBJECT_WIDTH, shorten};

const DAY_PRESETS: [(u32, &str); 5] = [
    (1, "Today only"),
    (3, "Last 3 days"),
    (7, "Last week"),
    (14, "Last 2 weeks"),
    (30, "Last month"),
];

pub const DEFAULT_REPORT_FILE: &str = "report.md";

/// Top-level wizard choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainAction {
    Status,
    Commit,
    Report,
    Exit,
}

impl MainAction {
    const ALL: [MainAction; 4] = [Self::Status, Self::Commit, Self::Report, Self::Exit];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Status => "📊 Status - Check uncommitted changes",
            Self::Commit => "💡 Commit - Generate commit message",
            Self::Report => "📈 Report - Generate progress report",
            Self::Exit => "👋 Exit",
        }
    }
}

/// Where a finished report should go besides the terminal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputOptions {
    pub save_path: Option<PathBuf>,
    pub slack: bool,
}

/// Checkbox label for a commit: `[MM/DD] subject`.
pub fn commit_label(commit: &CommitRecord) -> String {
    format!(
        "[{}] {}",
        commit.date.format("%m/%d"),
        shorten(&commit.subject, SUBJECT_WIDTH)
    )
}

/// Parse a custom day count typed by the user.
pub fn parse_days_input(input: &str) -> Result<u32, String> {
    let invalid = || format!("Please enter a number between 1 and {}", MAX_DAYS);
    let days: i64 = input.trim().parse().map_err(|_| invalid())?;
    if (1..=MAX_DAYS).contains(&days) {
        u32::try_from(days).map_err(|_| invalid())
    } else {
        Err(invalid())
    }
}

/// Map checked indices back to items, in input order.
fn pick<T: Clone>(items: &[T], mut indices: Vec<usize>) -> Vec<T> {
    indices.sort_unstable();
    indices.dedup();
    indices
        .into_iter()
        .filter_map(|i| items.get(i).cloned())
        .collect()
}

fn checklist(prompt: &str, labels: &[String]) -> Result<Vec<usize>, dialoguer::Error> {
    let defaults = vec![true; labels.len()];
    MultiSelect::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("{} (Space to toggle, Enter to confirm)", prompt))
        .items(labels)
        .defaults(&defaults)
        .interact()
}

/// Let the user uncheck files. Everything starts checked.
pub fn select_files(files: &[String]) -> Result<Vec<String>, dialoguer::Error> {
    if files.is_empty() {
        return Ok(Vec::new());
    }
    let chosen = checklist("Select files to include", files)?;
    Ok(pick(files, chosen))
}

/// Let the user uncheck commits. Everything starts checked.
pub fn select_commits(commits: &[CommitRecord]) -> Result<Vec<CommitRecord>, dialoguer::Error> {
    if commits.is_empty() {
        return Ok(Vec::new());
    }
    let labels: Vec<String> = commits.iter().map(commit_label).collect();
    let chosen = checklist("Select commits to include", &labels)?;
    Ok(pick(commits, chosen))
}

/// Pick a report window from the presets or type a custom one.
pub fn select_days(default: u32) -> Result<u32, dialoguer::Error> {
    let mut items: Vec<&str> = DAY_PRESETS.iter().map(|(_, label)| *label).collect();
    items.push("Custom...");

    let default_index = DAY_PRESETS
        .iter()
        .position(|(days, _)| *days == default)
        .unwrap_or(2);

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select time period for report")
        .items(&items)
        .default(default_index)
        .interact()?;

    if let Some((days, _)) = DAY_PRESETS.get(selection) {
        return Ok(*days);
    }

    let custom: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Enter number of days (1-{})", MAX_DAYS))
        .validate_with(|input: &String| parse_days_input(input).map(|_| ()))
        .interact_text()?;

    // Already validated above.
    Ok(parse_days_input(&custom).unwrap_or(default))
}

pub fn confirm(message: &str, default: bool) -> Result<bool, dialoguer::Error> {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(message)
        .default(default)
        .interact()
}

pub fn select_main_action() -> Result<MainAction, dialoguer::Error> {
    let labels: Vec<&str> = MainAction::ALL.iter().map(|a| a.label()).collect();
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(MainAction::ALL
        .get(selection)
        .copied()
        .unwrap_or(MainAction::Exit))
}

pub fn select_output_options() -> Result<OutputOptions, dialoguer::Error> {
    let items = [
        "🖥️  Terminal only",
        "💾 Save as Markdown file",
        "📤 Send to Slack",
        "💾+📤 Save and send to Slack",
    ];
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("How would you like to output the report?")
        .items(&items)
        .default(0)
        .interact()?;

    let save = matches!(selection, 1 | 3);
    let slack = matches!(selection, 2 | 3);

    let save_path = if save {
        let name: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Enter filename")
            .default(DEFAULT_REPORT_FILE.to_string())
            .interact_text()?;
        Some(PathBuf::from(name))
    } else {
        None
    };

    Ok(OutputOptions { save_path, slack })
}
