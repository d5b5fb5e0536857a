//! `create_from_devfile`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use wspoll_cli::application::ports::{ApiResponse, HttpMethod};
use wspoll_cli::domain::PollerError;
use wspoll_common::Devfile;

use crate::mocks::{ScriptedTransport, poller};

fn base() -> serde_json::Value {
    serde_json::to_value(Devfile::base(None)).unwrap()
}

#[tokio::test]
async fn test_create_posts_devfile_and_returns_id() {
    let p = poller(
        ScriptedTransport::with_responses([ApiResponse::new(
            201,
            r#"{"id":"workspaceabc123","status":"STOPPED"}"#,
        )]),
        1,
        1,
    );

    let id = p.create_from_devfile(&base(), false).await.expect("create");
    assert_eq!(id, "workspaceabc123");

    let requests = p.client().transport().requests();
    assert!(requests[0].is(HttpMethod::Post, "/api/workspace/devfile"));
    assert_eq!(
        requests[0].body,
        Some(serde_json::json!({"apiVersion": "1.0.0", "metadata": {"name": "test-workspace"}}))
    );
}

#[tokio::test]
async fn test_create_with_start_sets_query() {
    let p = poller(
        ScriptedTransport::with_responses([ApiResponse::new(
            200,
            r#"{"id":"ws-9","status":"STARTING"}"#,
        )]),
        1,
        1,
    );

    p.create_from_devfile(&base(), true).await.expect("create");
    assert_eq!(
        p.client().transport().requests()[0].path,
        "/api/workspace/devfile?start-after-create=true"
    );
}

#[tokio::test]
async fn test_create_rejected_devfile() {
    let p = poller(
        ScriptedTransport::with_responses([ApiResponse::new(400, "bad devfile")]),
        1,
        1,
    );

    let err = p.create_from_devfile(&base(), false).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PollerError>(),
        Some(PollerError::UnexpectedResponse { code: 400, .. })
    ));
}
