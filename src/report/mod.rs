//! Report artifacts: Markdown files and Slack messages.

pub mod markdown;
pub mod slack;

pub use markdown::{ReportInput, commits_per_day, render_markdown, write_report};
pub use slack::{SlackSender, build_report_payload, truncate_text};
