mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{body_lines, finished_build, running_build};
use knope::adapters::MockBuildService;
use knope::cli::commands::overview::display_overview;
use knope::domain::models::Build;
use knope::domain::DomainError;
use knope::services::OverviewAggregator;

async fn render(service: MockBuildService, pattern: &str) -> anyhow::Result<String> {
    let aggregator = OverviewAggregator::new(Arc::new(service));
    let mut out = Vec::new();
    display_overview(&aggregator, pattern, false, false, &mut out).await?;
    Ok(String::from_utf8(out)?)
}

#[tokio::test]
async fn test_overview_rows_sorted_with_statuses() {
    common::setup_test_logging();
    let service = MockBuildService::new()
        .with_project("zeta", vec![finished_build("FAILED", "main")])
        .with_project("alpha", vec![finished_build("SUCCEEDED", "feature/x")])
        .with_project("mid", vec![running_build("develop")])
        .with_empty_project("beta");

    let output = render(service, ".*").await.unwrap();
    let lines = body_lines(&output);

    assert_eq!(lines.len(), 4);
    assert!(lines[0].contains("✅") && lines[0].contains("alpha") && lines[0].contains("feature/x"));
    assert!(lines[1].contains("🗂") && lines[1].contains("beta"));
    assert!(lines[2].contains("🏗") && lines[2].contains("mid"));
    assert!(lines[3].contains("❌") && lines[3].contains("zeta"));

    assert!(lines[0].contains("19-07-2019 23:00"));
    assert!(lines[0].contains("19-07-2019 23:10"));
    assert!(!lines[2].contains("23:10"));
}

#[tokio::test]
async fn test_overview_failures_become_unknown_rows() {
    let service = MockBuildService::new()
        .with_project("a", vec![finished_build("SUCCEEDED", "main")])
        .with_list_builds_failure("b")
        .with_project("c", vec![finished_build("SUCCEEDED", "main")])
        .with_batch_get_failure("c");

    let output = render(service, ".*").await.unwrap();
    let lines = body_lines(&output);

    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("✅"));
    assert!(lines[1].contains("❓") && lines[1].contains('b'));
    assert!(lines[2].contains("❓"));
}

#[tokio::test]
async fn test_overview_filter_selects_projects() {
    let service = MockBuildService::new()
        .with_project("api-prod", vec![finished_build("SUCCEEDED", "main")])
        .with_project("api-dev", vec![finished_build("STOPPED", "main")])
        .with_project("web-prod", vec![finished_build("SUCCEEDED", "main")]);

    let output = render(service, "^api-").await.unwrap();
    let lines = body_lines(&output);

    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("api-dev") && lines[0].contains("🕳"));
    assert!(lines[1].contains("api-prod"));
}

#[tokio::test]
async fn test_overview_filter_matching_nothing() {
    let service = MockBuildService::new().with_project("app", vec![finished_build("SUCCEEDED", "main")]);

    let output = render(service, "^nothing$").await.unwrap();
    assert_eq!(output.trim(), "No projects found.");
}

#[tokio::test]
async fn test_overview_invalid_filter_is_fatal() {
    let service = MockBuildService::new().with_project("app", vec![]);

    let err = render(service, "(unclosed").await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DomainError>(),
        Some(DomainError::InvalidFilter { .. })
    ));
}

#[tokio::test]
async fn test_overview_list_failure_is_fatal() {
    let service = MockBuildService::new().with_list_projects_failure("access denied");

    let err = render(service, ".*").await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DomainError>(),
        Some(DomainError::ProjectListFailed(_))
    ));
    assert!(format!("{err:#}").contains("access denied"));
}

#[tokio::test]
async fn test_overview_uses_only_the_latest_build() {
    let service = MockBuildService::new().with_project(
        "app",
        vec![
            finished_build("FAILED", "newest"),
            finished_build("SUCCEEDED", "older"),
        ],
    );

    let output = render(service, ".*").await.unwrap();
    let lines = body_lines(&output);

    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("❌") && lines[0].contains("newest"));
}

#[tokio::test]
async fn test_overview_build_without_status_is_success() {
    let build = Build {
        status: None,
        ..finished_build("", "main")
    };
    let service = MockBuildService::new().with_project("app", vec![build]);

    let output = render(service, ".*").await.unwrap();
    assert!(body_lines(&output)[0].contains("✅"));
}

#[tokio::test]
async fn test_overview_json_output() {
    let service = MockBuildService::new()
        .with_project("b", vec![finished_build("FAULT", "main")])
        .with_empty_project("a");
    let aggregator = OverviewAggregator::new(Arc::new(service));

    let mut out = Vec::new();
    display_overview(&aggregator, ".*", true, false, &mut out)
        .await
        .unwrap();

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let projects = value.as_array().unwrap();
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0]["name"], "a");
    assert_eq!(projects[0]["status"], "empty");
    assert_eq!(projects[1]["status"], "failure");
    assert_eq!(projects[1]["branch"], "main");
    assert_eq!(projects[1]["start"], "19-07-2019 23:00");
}

#[tokio::test(start_paused = true)]
async fn test_overview_slow_project_times_out() {
    let service = MockBuildService::new()
        .with_project("fast", vec![finished_build("SUCCEEDED", "main")])
        .with_project("slow", vec![finished_build("SUCCEEDED", "main")])
        .with_delay("slow", Duration::from_secs(120));
    let aggregator = OverviewAggregator::new(Arc::new(service))
        .with_lookup_timeout(Some(Duration::from_secs(5)));

    let mut out = Vec::new();
    display_overview(&aggregator, ".*", false, false, &mut out)
        .await
        .unwrap();

    let output = String::from_utf8(out).unwrap();
    let lines = body_lines(&output);
    assert!(lines[0].contains("fast") && lines[0].contains("✅"));
    assert!(lines[1].contains("slow") && lines[1].contains("❓"));
}
