mod common;

use common::{body_lines, finished_build, running_build};
use knope::adapters::MockBuildService;
use knope::cli::commands::builds::display_builds;
use knope::domain::DomainError;

async fn render(service: &MockBuildService, project: Option<&str>) -> anyhow::Result<String> {
    let mut out = Vec::new();
    display_builds(service, project, false, false, &mut out).await?;
    Ok(String::from_utf8(out)?)
}

#[tokio::test]
async fn test_builds_listed_newest_first() {
    let service = MockBuildService::new().with_project(
        "app",
        vec![
            running_build("feature/y"),
            finished_build("FAILED", "feature/x"),
            finished_build("SUCCEEDED", "main"),
        ],
    );

    let output = render(&service, Some("app")).await.unwrap();
    let header = output.lines().next().unwrap();
    for column in ["Status", "Name", "Branch", "Started", "Finished"] {
        assert!(header.contains(column));
    }

    let lines = body_lines(&output);
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("🏗") && lines[0].contains("app:0") && lines[0].contains("feature/y"));
    assert!(lines[1].contains("❌") && lines[1].contains("app:1"));
    assert!(lines[2].contains("✅") && lines[2].contains("app:2") && lines[2].contains("main"));
    assert_eq!(service.batch_get_calls(), 1);
}

#[tokio::test]
async fn test_builds_for_project_without_builds() {
    let service = MockBuildService::new().with_empty_project("app");

    let output = render(&service, Some("app")).await.unwrap();
    assert_eq!(output.trim(), "No builds found.");
    assert_eq!(service.batch_get_calls(), 0);
}

#[tokio::test]
async fn test_builds_missing_project_name() {
    let service = MockBuildService::new().with_empty_project("app");

    let err = render(&service, None).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DomainError>(),
        Some(DomainError::MissingProject)
    ));
    assert_eq!(err.to_string(), "please specify a project name");
    assert_eq!(service.list_builds_calls(), 0);
}

#[tokio::test]
async fn test_builds_listing_failure_is_fatal() {
    let service = MockBuildService::new().with_list_builds_failure("app");

    let err = render(&service, Some("app")).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DomainError>(),
        Some(DomainError::BuildLookupFailed { .. })
    ));

    let chain = format!("{err:#}");
    assert!(chain.starts_with("Unable to fetch builds for project app: "));
    assert_eq!(chain.matches("unable to list builds for project").count(), 1);
}

#[tokio::test]
async fn test_builds_unknown_project_is_fatal() {
    let service = MockBuildService::new();

    let err = render(&service, Some("ghost")).await.unwrap_err();
    assert!(format!("{err:#}").contains("ghost"));
}

#[tokio::test]
async fn test_builds_batch_failure_is_fatal() {
    let service = MockBuildService::new()
        .with_project("app", vec![finished_build("SUCCEEDED", "main")])
        .with_batch_get_failure("app");

    assert!(render(&service, Some("app")).await.is_err());
}

#[tokio::test]
async fn test_builds_json_output() {
    let service = MockBuildService::new().with_project(
        "app",
        vec![running_build("develop"), finished_build("TIMED_OUT", "main")],
    );

    let mut out = Vec::new();
    display_builds(&service, Some("app"), true, false, &mut out)
        .await
        .unwrap();

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let builds = value.as_array().unwrap();
    assert_eq!(builds.len(), 2);
    assert_eq!(builds[0]["name"], "app:0");
    assert_eq!(builds[0]["status"], "in_progress");
    assert_eq!(builds[0]["finish"], serde_json::Value::Null);
    assert_eq!(builds[1]["status"], "stale");
    assert_eq!(builds[1]["finish"], "19-07-2019 23:10");
}
