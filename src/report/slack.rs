//! Slack incoming-webhook notifications.

use std::time::Duration;

use reqwest::Client;
use serde_json::{Value, json};
use tracing::debug;

use crate::error::SlackError;
use crate::git::CommitRecord;

use super::markdown::commits_per_day;

/// Timeout for webhook posts.
pub const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(30);

/// Slack caps a section's text; the narrative is cut to fit.
pub const MAX_SUMMARY_CHARS: usize = 2500;

const MAX_LISTED_COMMITS: usize = 5;
const MAX_SUBJECT_CHARS: usize = 50;

/// Shorten `text` to at most `max_chars` characters, ending in `...` when cut.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Build the Block Kit payload for a progress report.
pub fn build_report_payload(
    repo_name: &str,
    days: u32,
    report_text: &str,
    commits: &[CommitRecord],
) -> Value {
    let total = commits.len();

    let mut blocks = vec![
        json!({
            "type": "header",
            "text": {
                "type": "plain_text",
                "text": format!("📊 Progress Report: {}", repo_name),
                "emoji": true
            }
        }),
        json!({
            "type": "section",
            "fields": [
                {"type": "mrkdwn", "text": format!("*Repository:*\n{}", repo_name)},
                {"type": "mrkdwn", "text": format!("*Period:*\nLast {} days", days)},
                {"type": "mrkdwn", "text": format!("*Total Commits:*\n{}", total)},
                {"type": "mrkdwn", "text": format!("*Average:*\n{:.1}/day", commits_per_day(total, days))}
            ]
        }),
        json!({"type": "divider"}),
        json!({
            "type": "section",
            "text": {
                "type": "mrkdwn",
                "text": truncate_text(report_text.trim(), MAX_SUMMARY_CHARS)
            }
        }),
    ];

    if !commits.is_empty() {
        let mut lines: Vec<String> = commits
            .iter()
            .take(MAX_LISTED_COMMITS)
            .map(|c| {
                format!(
                    "• `{}` {}",
                    c.short_hash(),
                    truncate_text(&c.subject, MAX_SUBJECT_CHARS)
                )
            })
            .collect();
        if total > MAX_LISTED_COMMITS {
            lines.push(format!("_... and {} more_", total - MAX_LISTED_COMMITS));
        }

        blocks.push(json!({
            "type": "section",
            "text": {
                "type": "mrkdwn",
                "text": format!("*Recent Commits:*\n{}", lines.join("\n"))
            }
        }));
    }

    blocks.push(json!({"type": "divider"}));
    blocks.push(json!({
        "type": "context",
        "elements": [
            {"type": "mrkdwn", "text": "Generated by git-summarizer"}
        ]
    }));

    json!({
        "text": format!("Progress Report: {}", repo_name),
        "blocks": blocks
    })
}

/// Posts messages to a Slack incoming webhook.
pub struct SlackSender {
    client: Client,
    webhook_url: String,
}

impl SlackSender {
    /// Create a sender; an empty URL is rejected up front.
    pub fn new(webhook_url: impl Into<String>) -> Result<Self, SlackError> {
        let webhook_url = webhook_url.into();
        if webhook_url.trim().is_empty() {
            return Err(SlackError::NotConfigured);
        }

        let client = Client::builder()
            .timeout(WEBHOOK_TIMEOUT)
            .build()
            .map_err(SlackError::Request)?;

        Ok(Self {
            client,
            webhook_url,
        })
    }

    /// Send a formatted progress report.
    pub async fn send_report(
        &self,
        repo_name: &str,
        days: u32,
        report_text: &str,
        commits: &[CommitRecord],
    ) -> Result<(), SlackError> {
        let payload = build_report_payload(repo_name, days, report_text, commits);
        self.post(&payload).await
    }

    /// Send a plain text message.
    pub async fn send_simple_message(&self, text: &str) -> Result<(), SlackError> {
        self.post(&json!({ "text": text })).await
    }

    async fn post(&self, payload: &Value) -> Result<(), SlackError> {
        debug!("Posting to Slack webhook");
        let response = self
            .client
            .post(&self.webhook_url)
            .json(payload)
            .send()
            .await
            .map_err(SlackError::Request)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SlackError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};
    use wiremock::matchers::{body_json, body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn commits(n: usize) -> Vec<CommitRecord> {
        let date = FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2024, 6, 1, 9, 0, 0)
            .unwrap();
        (0..n)
            .map(|i| CommitRecord {
                hash: format!("{:040x}", i + 1),
                author: "Dev".to_string(),
                email: "dev@example.com".to_string(),
                date,
                subject: format!("feat: change number {i}"),
                body: String::new(),
                stats: None,
            })
            .collect()
    }

    #[test]
    fn test_truncate_text_short_unchanged() {
        assert_eq!(truncate_text("hello", 5), "hello");
        assert_eq!(truncate_text("", 5), "");
    }

    #[test]
    fn test_truncate_text_long() {
        let out = truncate_text(&"x".repeat(3000), MAX_SUMMARY_CHARS);
        assert_eq!(out.chars().count(), MAX_SUMMARY_CHARS);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn test_truncate_text_counts_chars() {
        assert_eq!(truncate_text("ééééé", 4), "é...");
    }

    #[test]
    fn test_payload_shape() {
        let payload = build_report_payload("repo", 7, "Did stuff", &commits(2));
        let blocks = payload["blocks"].as_array().unwrap();

        assert_eq!(blocks[0]["type"], "header");
        assert_eq!(blocks[1]["fields"].as_array().unwrap().len(), 4);
        assert_eq!(blocks[1]["fields"][2]["text"], "*Total Commits:*\n2");
        assert_eq!(blocks[1]["fields"][3]["text"], "*Average:*\n0.3/day");
        assert_eq!(blocks[3]["text"]["text"], "Did stuff");
        assert_eq!(blocks.last().unwrap()["type"], "context");
        assert_eq!(payload["text"], "Progress Report: repo");
    }

    #[test]
    fn test_payload_lists_first_five_commits() {
        let payload = build_report_payload("repo", 7, "x", &commits(8));
        let blocks = payload["blocks"].as_array().unwrap();
        let text = blocks[4]["text"]["text"].as_str().unwrap();

        assert_eq!(text.matches('•').count(), 5);
        assert!(text.contains("feat: change number 4"));
        assert!(!text.contains("feat: change number 5"));
        assert!(text.contains("... and 3 more"));
    }

    #[test]
    fn test_payload_without_commits_skips_list() {
        let payload = build_report_payload("repo", 1, "quiet week", &[]);
        let blocks = payload["blocks"].as_array().unwrap();
        assert_eq!(blocks.len(), 6);
        assert!(!payload.to_string().contains("Recent Commits"));
    }

    #[test]
    fn test_new_rejects_empty_url() {
        assert!(matches!(SlackSender::new(""), Err(SlackError::NotConfigured)));
        assert!(matches!(SlackSender::new("  "), Err(SlackError::NotConfigured)));
    }

    #[tokio::test]
    async fn test_send_simple_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/hook"))
            .and(body_json(json!({"text": "hello"})))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        let sender = SlackSender::new(format!("{}/hook", server.uri())).unwrap();
        sender.send_simple_message("hello").await.unwrap();
    }

    #[tokio::test]
    async fn test_send_report_posts_blocks() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/hook"))
            .and(body_partial_json(json!({"text": "Progress Report: demo"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let sender = SlackSender::new(format!("{}/hook", server.uri())).unwrap();
        sender
            .send_report("demo", 7, "summary", &commits(1))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_send_reports_http_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no_service"))
            .mount(&server)
            .await;

        let sender = SlackSender::new(server.uri()).unwrap();
        let err = sender.send_simple_message("x").await.unwrap_err();
        assert!(
            matches!(err, SlackError::Status { status: 404, ref body } if body == "no_service"),
            "got {err:?}"
        );
    }
}
