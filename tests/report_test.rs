use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use gh_report::app::{self, DetailOptions, ListOptions};
use gh_report::engine::{FailurePolicy, StubForge};
use gh_report::error::ReportError;
use gh_report::filter::{EntityKind, StateFilter};
use gh_report::relay::{Relay, deliver};
use gh_report::types::{ForgeComment, ForgeIssue, RepoRef};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
}

fn issue(hour: u32, number: u32, title: &str) -> ForgeIssue {
    ForgeIssue {
        updated_at: Utc.with_ymd_and_hms(2024, 3, 10, hour, 30, 0).unwrap(),
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
        html_url: format!("https://github.com/acme/api/issues/{number}"),
        title: title.to_owned(),
        body: format!("body of {number}"),
    }
}

fn list_options() -> ListOptions {
    ListOptions {
        kind: EntityKind::Issue,
        state: StateFilter::Open,
        limit: 20,
        since: String::new(),
        offset: "-48h".to_owned(),
        owner: "acme".to_owned(),
        assignees: String::new(),
        policy: FailurePolicy::Abort,
        concurrency: 4,
    }
}

fn repos(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| (*s).to_owned()).collect()
}

#[tokio::test]
async fn two_repositories_one_empty() {
    let forge = Arc::new(StubForge::new().with_search(
        "acme/api",
        vec![issue(11, 2, "Second bug"), issue(10, 1, "First bug")],
    ));

    let text = app::run_list(
        forge,
        &list_options(),
        &repos(&["api", "web"]),
        &[],
        now(),
    )
    .await
    .unwrap();

    assert_eq!(
        text,
        "acme/api\n\
         2024-03-10T11:30:00+00:00 https://github.com/acme/api/issues/2 Second bug\n\
         2024-03-10T10:30:00+00:00 https://github.com/acme/api/issues/1 First bug\n"
    );
}

#[tokio::test]
async fn list_query_carries_window_and_assignees() {
    let forge = Arc::new(StubForge::new());
    let opts = ListOptions {
        kind: EntityKind::PullRequest,
        state: StateFilter::Closed,
        assignees: "alice, bob,,carol".to_owned(),
        ..list_options()
    };

    app::run_list(Arc::clone(&forge), &opts, &repos(&["other/web"]), &[], now())
        .await
        .unwrap();

    assert_eq!(
        forge.queries(),
        vec![
            "repo:other/web is:pr state:closed updated:2024-03-08T12:00:00+00:00..* \
             assignee:alice assignee:bob assignee:carol"
                .to_owned()
        ]
    );
}

#[tokio::test]
async fn list_uses_configured_repositories_without_arguments() {
    let forge = Arc::new(StubForge::new());
    let defaults = vec![RepoRef::new("acme", "api"), RepoRef::new("acme", "web")];

    app::run_list(Arc::clone(&forge), &list_options(), &[], &defaults, now())
        .await
        .unwrap();

    assert_eq!(forge.queries().len(), 2);
}

#[tokio::test]
async fn list_without_any_repository_fails() {
    let err = app::run_list(Arc::new(StubForge::new()), &list_options(), &[], &[], now())
        .await
        .unwrap_err();
    assert!(matches!(err, ReportError::NoRepositoriesSpecified));
}

#[tokio::test]
async fn list_with_bad_offset_never_searches() {
    let forge = Arc::new(StubForge::new());
    let opts = ListOptions {
        offset: "yesterday".to_owned(),
        ..list_options()
    };

    let err = app::run_list(Arc::clone(&forge), &opts, &repos(&["api"]), &[], now())
        .await
        .unwrap_err();

    assert!(matches!(err, ReportError::InvalidDuration { .. }));
    assert!(forge.queries().is_empty());
}

#[tokio::test]
async fn partial_list_renders_failed_repository_inline() {
    let forge = Arc::new(
        StubForge::new()
            .with_search("acme/api", vec![issue(10, 1, "First bug")])
            .with_failure("acme/web"),
    );
    let opts = ListOptions {
        policy: FailurePolicy::Partial,
        ..list_options()
    };

    let text = app::run_list(forge, &opts, &repos(&["web", "api"]), &[], now())
        .await
        .unwrap();

    assert_eq!(
        text,
        "acme/web\n\
         error: searching acme/web: stub failure\n\
         acme/api\n\
         2024-03-10T10:30:00+00:00 https://github.com/acme/api/issues/1 First bug\n"
    );
}

#[tokio::test]
async fn detail_report_end_to_end() {
    let comments = (1..=5)
        .map(|n| ForgeComment {
            body: format!("comment {n}"),
        })
        .collect();
    let forge = StubForge::new().with_issue("acme/api", 1, issue(10, 1, "First bug"), comments);
    let opts = DetailOptions {
        kind: EntityKind::Issue,
        owner: String::new(),
        comments_limit: 3,
    };

    let text = app::run_detail(&forge, &opts, "acme/api", 1, &[])
        .await
        .unwrap();

    assert_eq!(
        text,
        "Title: First bug\n\
         Created at 2024-03-01T09:00:00+00:00\n\
         Message:\n body of 1\n\
         Comment:\n comment 1\n\
         Comment:\n comment 2\n\
         Comment:\n comment 3\n"
    );
}

#[tokio::test]
async fn detail_resolves_bare_name_from_defaults() {
    let forge = StubForge::new().with_issue("acme/api", 1, issue(10, 1, "First bug"), vec![]);
    let opts = DetailOptions {
        kind: EntityKind::Issue,
        owner: String::new(),
        comments_limit: 3,
    };

    let text = app::run_detail(&forge, &opts, "api", 1, &[RepoRef::new("acme", "api")])
        .await
        .unwrap();

    assert!(text.starts_with("Title: First bug\n"));
}

struct DownRelay;

impl Relay for DownRelay {
    async fn send(&self, _text: &str) -> Result<(), ReportError> {
        Err(ReportError::RelayDelivery {
            message: "slack is down".to_owned(),
        })
    }
}

#[tokio::test]
async fn relay_failure_after_local_output() {
    let forge = Arc::new(StubForge::new().with_search("acme/api", vec![issue(10, 1, "First bug")]));
    let text = app::run_list(forge, &list_options(), &repos(&["api"]), &[], now())
        .await
        .unwrap();

    let mut local = Vec::new();
    let err = deliver(&text, &mut local, Some(&DownRelay)).await.unwrap_err();

    assert!(matches!(err, ReportError::RelayDelivery { .. }));
    assert_eq!(String::from_utf8(local).unwrap(), text);
}
