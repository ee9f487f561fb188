//! git-summarizer - CLI entry point.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use git_summarizer::Config;
use git_summarizer::commands::{
    CommitOptions, ReportOptions, StatusOptions, run_commit, run_report, run_status, run_wizard,
};
use git_summarizer::output::formatter;

/// AI-powered git progress reports and commit messages.
///
/// Run without a subcommand for the interactive wizard.
#[derive(Parser, Debug)]
#[command(name = "git-summarizer")]
#[command(about = "AI-powered git progress reports and commit messages")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarize uncommitted changes in the repository
    #[command(alias = "s")]
    Status {
        /// Path to the git repository
        #[arg(short, long, default_value = ".")]
        path: PathBuf,

        /// Choose which files to include
        #[arg(short, long)]
        interactive: bool,

        /// Show a diff preview
        #[arg(short = 'd', long)]
        show_diff: bool,
    },

    /// Suggest a commit message for staged changes
    #[command(alias = "c")]
    Commit {
        /// Path to the git repository
        #[arg(short, long, default_value = ".")]
        path: PathBuf,

        /// Choose files and offer to run the commit
        #[arg(short, long)]
        interactive: bool,
    },

    /// Generate a progress report for recent commits
    #[command(alias = "r")]
    Report {
        /// Path to the git repository
        #[arg(short, long, default_value = ".")]
        path: PathBuf,

        /// Number of days to include (1-365)
        #[arg(short, long, allow_negative_numbers = true)]
        days: Option<i64>,

        /// Choose the period and which commits to include
        #[arg(short, long)]
        interactive: bool,

        /// Save the report as a Markdown file
        #[arg(short, long = "save", value_name = "FILE")]
        save: Option<PathBuf>,

        /// Send the report to Slack (requires SLACK_WEBHOOK_URL)
        #[arg(long)]
        slack: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose { "debug" } else { "warn" })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!("Args: {:?}", cli);

    if let Err(e) = run(cli).await {
        formatter::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load();

    match cli.command {
        None => run_wizard(&config).await,
        Some(Command::Status {
            path,
            interactive,
            show_diff,
        }) => {
            let options = StatusOptions {
                path,
                interactive,
                show_diff,
            };
            run_status(&options, &config).await
        }
        Some(Command::Commit { path, interactive }) => {
            run_commit(&CommitOptions { path, interactive }, &config).await?;
            Ok(())
        }
        Some(Command::Report {
            path,
            days,
            interactive,
            save,
            slack,
        }) => {
            let options = ReportOptions {
                path,
                days,
                interactive,
                save_path: save,
                slack,
            };
            run_report(&options, &config).await?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_verifies() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_aliases() {
        let cli = Cli::try_parse_from(["git-summarizer", "s", "-d"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Status { show_diff: true, .. })));

        let cli = Cli::try_parse_from(["git-summarizer", "c", "-i"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Commit { interactive: true, .. })));

        let cli = Cli::try_parse_from(["git-summarizer", "r", "-d", "14", "--slack", "-s", "out.md"])
            .unwrap();
        match cli.command {
            Some(Command::Report {
                days, slack, save, ..
            }) => {
                assert_eq!(days, Some(14));
                assert!(slack);
                assert_eq!(save, Some(PathBuf::from("out.md")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_no_subcommand_runs_wizard() {
        let cli = Cli::try_parse_from(["git-summarizer", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.command.is_none());
    }
}
