//! `stop_workspace` and `remove_workspace`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::time::Duration;

use wspoll_cli::application::ports::{ApiResponse, HttpMethod};
use wspoll_cli::domain::PollerError;

use crate::mocks::{ScriptedTransport, no_content, poller, status_body};

// ── stop ──────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_stop_without_verification_sends_single_delete() {
    let p = poller(ScriptedTransport::with_responses([no_content()]), 5, 1000);

    p.stop_workspace("ws-1", false).await.expect("stop");

    let requests = p.client().transport().requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].is(HttpMethod::Delete, "/api/workspace/ws-1/runtime"));
    assert!(p.sleeper().sleeps().is_empty());
}

#[tokio::test]
async fn test_stop_non_204_is_unexpected_response_with_one_delete() {
    let p = poller(
        ScriptedTransport::with_responses([ApiResponse::new(500, "boom")]),
        5,
        1000,
    );

    let err = p.stop_workspace("ws-1", true).await.unwrap_err();

    match err.downcast_ref::<PollerError>() {
        Some(PollerError::UnexpectedResponse { code, body, .. }) => {
            assert_eq!(*code, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected UnexpectedResponse, got {other:?}"),
    }
    assert_eq!(p.client().transport().count(HttpMethod::Delete), 1);
    assert_eq!(p.client().transport().count(HttpMethod::Get), 0);
}

#[tokio::test]
async fn test_stop_with_verification_polls_until_stopped() {
    let p = poller(
        ScriptedTransport::with_responses([
            no_content(),
            status_body("STOPPING"),
            status_body("STOPPED"),
        ]),
        5,
        1000,
    );

    p.stop_workspace("ws-1", true).await.expect("stop and verify");

    let requests = p.client().transport().requests();
    assert_eq!(requests.len(), 3);
    assert!(requests[1].is(HttpMethod::Get, "/api/workspace/ws-1"));
    assert_eq!(p.sleeper().sleeps(), vec![Duration::from_millis(1000)]);
}

#[tokio::test]
async fn test_stop_verification_timeout() {
    let p = poller(
        ScriptedTransport::with_responses([
            no_content(),
            status_body("STOPPING"),
            status_body("STOPPING"),
        ]),
        2,
        10,
    );

    let err = p.stop_workspace("ws-1", true).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PollerError>(),
        Some(PollerError::Timeout { attempts: 2, .. })
    ));
}

#[tokio::test]
async fn test_stop_rejects_id_that_would_change_the_path() {
    let p = poller(ScriptedTransport::with_responses([]), 1, 1);
    let err = p.stop_workspace("../other", false).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PollerError>(),
        Some(PollerError::InvalidKey(_))
    ));
    assert!(p.client().transport().requests().is_empty());
}

// ── remove ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_remove_waits_for_stopped_then_deletes() {
    let p = poller(
        ScriptedTransport::with_responses([
            status_body("STOPPING"),
            status_body("STOPPING"),
            status_body("STOPPED"),
            no_content(),
        ]),
        5,
        1000,
    );

    p.remove_workspace("ws-1").await.expect("remove");

    let requests = p.client().transport().requests();
    assert_eq!(requests.len(), 4);
    assert!(
        requests[..3]
            .iter()
            .all(|r| r.is(HttpMethod::Get, "/api/workspace/ws-1"))
    );
    assert!(requests[3].is(HttpMethod::Delete, "/api/workspace/ws-1"));
    assert_eq!(p.sleeper().sleeps().len(), 2);
}

#[tokio::test]
async fn test_remove_never_deletes_when_stopped_not_observed() {
    let p = poller(
        ScriptedTransport::with_responses((0..3).map(|_| status_body("RUNNING"))),
        3,
        10,
    );

    let err = p.remove_workspace("ws-1").await.unwrap_err();

    match err.downcast_ref::<PollerError>() {
        Some(PollerError::Precondition {
            id,
            attempts,
            last_observed,
        }) => {
            assert_eq!(id, "ws-1");
            assert_eq!(*attempts, 3);
            assert_eq!(last_observed, "RUNNING");
        }
        other => panic!("expected Precondition, got {other:?}"),
    }
    assert_eq!(p.client().transport().count(HttpMethod::Delete), 0);
}

#[tokio::test]
async fn test_remove_precondition_non_200_consumes_attempts() {
    let p = poller(
        ScriptedTransport::with_responses([
            ApiResponse::new(404, ""),
            status_body("STOPPED"),
            no_content(),
        ]),
        2,
        10,
    );

    p.remove_workspace("ws-1").await.expect("second poll sees STOPPED");
    assert_eq!(p.client().transport().count(HttpMethod::Delete), 1);
}

#[tokio::test]
async fn test_remove_delete_non_204_is_unexpected_response() {
    let p = poller(
        ScriptedTransport::with_responses([status_body("STOPPED"), ApiResponse::new(409, "conflict")]),
        1,
        10,
    );

    let err = p.remove_workspace("ws-1").await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PollerError>(),
        Some(PollerError::UnexpectedResponse { code: 409, .. })
    ));
    assert!(err.to_string().starts_with("Can not remove workspace. Code: 409"));
}
