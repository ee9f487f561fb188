//! Integration tests for the status, commit and report workflows.
//!
//! Each test builds a temporary repository and points the OpenRouter backend
//! (and the Slack webhook where needed) at a wiremock server.

mod common;

use common::TestRepo;
use git_summarizer::commands::{
    CommitOptions, ReportOptions, StatusOptions, run_commit, run_report, run_status,
};
use git_summarizer::{Config, GitError};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> Config {
    Config {
        openrouter_api_key: "test-key".to_string(),
        openrouter_base_url: server.uri(),
        ..Default::default()
    }
}

async fn mock_completion(server: &MockServer, needle: &str, reply: &str) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains(needle))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": reply}}]
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_status_clean_repo_skips_llm() {
    let server = MockServer::start().await;
    let repo = TestRepo::new();
    repo.commit_file("a.txt", "a\n", "feat: a", 0);

    let options = StatusOptions {
        path: repo.path().to_path_buf(),
        ..Default::default()
    };
    run_status(&options, &config_for(&server)).await.unwrap();

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_status_summarizes_changes() {
    let server = MockServer::start().await;
    mock_completion(&server, "src/lib.rs", "## Summary\nAdded a library.").await;

    let repo = TestRepo::new();
    repo.commit_file("a.txt", "a\n", "feat: a", 0);
    repo.add_file("src/lib.rs", "pub fn x() {}\n");

    let options = StatusOptions {
        path: repo.path().to_path_buf(),
        show_diff: true,
        ..Default::default()
    };
    run_status(&options, &config_for(&server)).await.unwrap();
}

#[tokio::test]
async fn test_status_without_provider_is_not_an_error() {
    let repo = TestRepo::new();
    repo.commit_file("a.txt", "a\n", "feat: a", 0);
    repo.write_file("a.txt", "b\n");

    let options = StatusOptions {
        path: repo.path().to_path_buf(),
        ..Default::default()
    };
    run_status(&options, &Config::default()).await.unwrap();
}

#[tokio::test]
async fn test_status_before_first_commit() {
    let server = MockServer::start().await;
    mock_completion(&server, "+first line", "## Summary\nInitial file.").await;

    let repo = TestRepo::new();
    repo.add_file("a.txt", "first line\n");

    let options = StatusOptions {
        path: repo.path().to_path_buf(),
        ..Default::default()
    };
    run_status(&options, &config_for(&server)).await.unwrap();
}

#[tokio::test]
async fn test_status_on_non_repository_fails() {
    let dir = common::temp_test_dir();
    let options = StatusOptions {
        path: dir.path().to_path_buf(),
        ..Default::default()
    };
    let err = run_status(&options, &Config::default()).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<GitError>(),
        Some(GitError::NotARepository(_))
    ));
}

#[tokio::test]
async fn test_commit_uses_staged_changes() {
    let server = MockServer::start().await;
    mock_completion(&server, "+staged line", "```\nfeat: stage things\n```").await;

    let repo = TestRepo::new();
    repo.commit_file("a.txt", "a\n", "feat: a", 0);
    repo.add_file("s.txt", "staged line\n");
    repo.write_file("a.txt", "unstaged line\n");

    let options = CommitOptions {
        path: repo.path().to_path_buf(),
        interactive: false,
    };
    let message = run_commit(&options, &config_for(&server)).await.unwrap();
    assert_eq!(message.as_deref(), Some("feat: stage things"));
}

#[tokio::test]
async fn test_commit_falls_back_to_uncommitted() {
    let server = MockServer::start().await;
    mock_completion(&server, "+unstaged line", "fix: tweak a").await;

    let repo = TestRepo::new();
    repo.commit_file("a.txt", "a\n", "feat: a", 0);
    repo.write_file("a.txt", "unstaged line\n");

    let options = CommitOptions {
        path: repo.path().to_path_buf(),
        interactive: false,
    };
    let message = run_commit(&options, &config_for(&server)).await.unwrap();
    assert_eq!(message.as_deref(), Some("fix: tweak a"));
}

#[tokio::test]
async fn test_commit_without_changes_returns_none() {
    let server = MockServer::start().await;
    let repo = TestRepo::new();
    repo.commit_file("a.txt", "a\n", "feat: a", 0);

    let options = CommitOptions {
        path: repo.path().to_path_buf(),
        interactive: false,
    };
    assert_eq!(run_commit(&options, &config_for(&server)).await.unwrap(), None);
}

#[tokio::test]
async fn test_commit_without_provider_fails() {
    let repo = TestRepo::new();
    repo.commit_file("a.txt", "a\n", "feat: a", 0);
    repo.add_file("b.txt", "b\n");

    let options = CommitOptions {
        path: repo.path().to_path_buf(),
        interactive: false,
    };
    let err = run_commit(&options, &Config::default()).await.unwrap_err();
    assert!(err.to_string().contains("OPENROUTER_API_KEY"));
}

#[tokio::test]
async fn test_report_rejects_invalid_window() {
    let repo = TestRepo::new();
    repo.commit_file("a.txt", "a\n", "feat: a", 0);

    for days in [0, -5, 366] {
        let options = ReportOptions {
            path: repo.path().to_path_buf(),
            days: Some(days),
            ..Default::default()
        };
        let err = run_report(&options, &Config::default()).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GitError>(),
            Some(GitError::InvalidWindow(d)) if *d == days
        ));
    }
}

#[tokio::test]
async fn test_report_without_commits_in_window() {
    let server = MockServer::start().await;
    let repo = TestRepo::new();
    repo.commit_file("a.txt", "a\n", "feat: ancient", 40);

    let options = ReportOptions {
        path: repo.path().to_path_buf(),
        days: Some(7),
        ..Default::default()
    };
    assert_eq!(run_report(&options, &config_for(&server)).await.unwrap(), None);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_report_saves_markdown_and_posts_to_slack() {
    let server = MockServer::start().await;
    mock_completion(&server, "feat: recent work", "## Progress Summary\nGood week.").await;
    Mock::given(method("POST"))
        .and(path("/slack"))
        .and(body_string_contains("Progress Report"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let repo = TestRepo::new();
    repo.commit_file("old.txt", "old\n", "chore: old work", 30);
    repo.commit_file("new.txt", "one\ntwo\n", "feat: recent work", 1);

    let out_dir = common::temp_test_dir();
    let save_path = out_dir.path().join("report.md");
    let config = Config {
        slack_webhook_url: format!("{}/slack", server.uri()),
        ..config_for(&server)
    };
    let options = ReportOptions {
        path: repo.path().to_path_buf(),
        days: Some(7),
        save_path: Some(save_path.clone()),
        slack: true,
        ..Default::default()
    };

    let report = run_report(&options, &config).await.unwrap();
    assert_eq!(report.as_deref(), Some("## Progress Summary\nGood week."));

    let saved = std::fs::read_to_string(&save_path).unwrap();
    assert!(saved.contains("| Total commits | 1 |"));
    assert!(saved.contains("feat: recent work"));
    assert!(saved.contains("+2 / -0"));
    assert!(!saved.contains("chore: old work"));
}

#[tokio::test]
async fn test_report_slack_failure_is_soft() {
    let server = MockServer::start().await;
    mock_completion(&server, "feat: x", "report body").await;

    let repo = TestRepo::new();
    repo.commit_file("x.txt", "x\n", "feat: x", 0);

    // No webhook configured
    let options = ReportOptions {
        path: repo.path().to_path_buf(),
        days: Some(3),
        slack: true,
        ..Default::default()
    };
    let report = run_report(&options, &config_for(&server)).await.unwrap();
    assert_eq!(report.as_deref(), Some("report body"));
}
