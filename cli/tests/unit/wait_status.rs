//! `wait_for_status`: attempts, sleeps, and what counts as "not ready".

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::time::Duration;

use wspoll_cli::application::ports::{ApiResponse, HttpMethod};
use wspoll_cli::domain::PollerError;
use wspoll_common::{WorkspaceKey, WorkspaceStatus};

use crate::mocks::{ScriptedTransport, poller, status_body};

fn key() -> WorkspaceKey {
    WorkspaceKey::new("admin", "ws1").unwrap()
}

#[tokio::test]
async fn test_wait_status_immediate_match_makes_one_request_and_never_sleeps() {
    let p = poller(ScriptedTransport::with_responses([status_body("RUNNING")]), 5, 1000);

    p.wait_for_status(&key(), &WorkspaceStatus::Running)
        .await
        .expect("running on first attempt");

    let requests = p.client().transport().requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].is(HttpMethod::Get, "/api/workspace/admin:ws1"));
    assert!(p.sleeper().sleeps().is_empty());
}

#[tokio::test]
async fn test_wait_status_match_on_third_attempt_sleeps_twice() {
    let p = poller(
        ScriptedTransport::with_responses([
            status_body("STARTING"),
            status_body("STARTING"),
            status_body("RUNNING"),
        ]),
        5,
        1000,
    );

    p.wait_for_status(&key(), &WorkspaceStatus::Running)
        .await
        .expect("running on third attempt");

    assert_eq!(p.client().transport().count(HttpMethod::Get), 3);
    assert_eq!(
        p.sleeper().sleeps(),
        vec![Duration::from_millis(1000), Duration::from_millis(1000)]
    );
}

#[tokio::test]
async fn test_wait_status_exhaustion_times_out_after_max_attempts_and_max_minus_one_sleeps() {
    let p = poller(
        ScriptedTransport::with_responses((0..4).map(|_| status_body("STARTING"))),
        4,
        250,
    );

    let err = p
        .wait_for_status(&key(), &WorkspaceStatus::Running)
        .await
        .unwrap_err();

    match err.downcast_ref::<PollerError>() {
        Some(PollerError::Timeout {
            attempts,
            last_observed,
            ..
        }) => {
            assert_eq!(*attempts, 4);
            assert_eq!(last_observed, "STARTING");
        }
        other => panic!("expected Timeout, got {other:?}"),
    }
    assert_eq!(p.client().transport().count(HttpMethod::Get), 4);
    assert_eq!(p.sleeper().sleeps().len(), 3);
    assert_eq!(p.sleeper().total(), Duration::from_millis(750));
}

#[tokio::test]
async fn test_wait_status_non_200_consumes_an_attempt() {
    let p = poller(
        ScriptedTransport::with_responses([
            ApiResponse::new(404, "not found"),
            ApiResponse::new(503, ""),
            status_body("RUNNING"),
        ]),
        3,
        10,
    );

    p.wait_for_status(&key(), &WorkspaceStatus::Running)
        .await
        .expect("third attempt succeeds");
    assert_eq!(p.sleeper().sleeps().len(), 2);
}

#[tokio::test]
async fn test_wait_status_only_non_200_reports_last_http_code() {
    let p = poller(
        ScriptedTransport::with_responses([ApiResponse::new(404, ""), ApiResponse::new(500, "")]),
        2,
        10,
    );

    let err = p
        .wait_for_status(&key(), &WorkspaceStatus::Running)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("HTTP 500"), "got: {err}");
}

#[tokio::test]
async fn test_wait_status_transport_error_propagates_without_retry() {
    let p = poller(
        ScriptedTransport::with_script([Err("connection refused".to_string())]),
        5,
        10,
    );

    let err = p
        .wait_for_status(&key(), &WorkspaceStatus::Running)
        .await
        .unwrap_err();

    assert!(err.downcast_ref::<PollerError>().is_none());
    assert!(err.to_string().contains("connection refused"));
    assert_eq!(p.client().transport().requests().len(), 1);
    assert!(p.sleeper().sleeps().is_empty());
}

#[tokio::test]
async fn test_wait_status_undecodable_200_is_an_error() {
    let p = poller(
        ScriptedTransport::with_responses([ApiResponse::new(200, "<html>login</html>")]),
        5,
        10,
    );

    let err = p
        .wait_for_status(&key(), &WorkspaceStatus::Running)
        .await
        .unwrap_err();
    assert!(err.downcast_ref::<PollerError>().is_none());
    assert_eq!(p.client().transport().requests().len(), 1);
}

#[tokio::test]
async fn test_wait_status_matches_stopped_and_unknown_statuses() {
    let p = poller(ScriptedTransport::with_responses([status_body("STOPPED")]), 1, 10);
    p.wait_for_status(&key(), &WorkspaceStatus::Stopped)
        .await
        .expect("stopped");

    let p = poller(ScriptedTransport::with_responses([status_body("PAUSED")]), 1, 10);
    p.wait_for_status(&key(), &"paused".parse::<WorkspaceStatus>().unwrap())
        .await
        .expect("unknown status compared by name");
}
