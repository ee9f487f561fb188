//! Interactive mode when no subcommand is given.

use anyhow::{Context, Result};

use crate::config::Config;
use crate::output::{MainAction, formatter, select};

use super::{CommitOptions, ReportOptions, StatusOptions, run_commit, run_report, run_status};

pub async fn run_wizard(config: &Config) -> Result<()> {
    formatter::print_header("Git-Summarizer", Some("Interactive Mode"));

    match select::select_main_action().context("Menu selection failed")? {
        MainAction::Exit => {
            formatter::print_info("Goodbye! 👋");
        }
        MainAction::Status => {
            let options = StatusOptions {
                interactive: true,
                show_diff: true,
                ..Default::default()
            };
            run_status(&options, config).await?;
        }
        MainAction::Commit => {
            let options = CommitOptions {
                interactive: true,
                ..Default::default()
            };
            run_commit(&options, config).await?;
        }
        MainAction::Report => {
            let days = select::select_days(config.default_days).context("Day selection failed")?;
            let output = select::select_output_options().context("Output selection failed")?;
            let options = ReportOptions {
                days: Some(i64::from(days)),
                interactive: true,
                save_path: output.save_path,
                slack: output.slack,
                ..Default::default()
            };
            run_report(&options, config).await?;
        }
    }

    Ok(())
}
