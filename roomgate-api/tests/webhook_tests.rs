/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Integration tests for the webhook endpoint.
//!
//! The deliverer must always get a 200 acknowledgement — verification
//! failures are an internal concern, never a transport error.

mod test_helpers;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use roomgate_types::responses::{Ack, APIResponse};
use tower::ServiceExt;

use test_helpers::{build_app, response_json};

const EGRESS_BODY: &str = r#"{"event":"egress_ended","egressId":"EG_1"}"#;

fn webhook_request(body: &str, auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/livekit/webhook")
        .header(header::CONTENT_TYPE, "application/webhook+json");
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[tokio::test]
async fn signed_event_is_acknowledged() {
    let (app, state) = build_app();
    let auth = state.webhooks.sign(EGRESS_BODY.as_bytes()).expect("sign");

    let resp = app
        .oneshot(webhook_request(EGRESS_BODY, Some(&auth)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: APIResponse<Ack> = response_json(resp).await;
    assert!(body.success);
}

#[tokio::test]
async fn altered_signature_is_still_acknowledged() {
    let (app, state) = build_app();
    let mut auth = state.webhooks.sign(EGRESS_BODY.as_bytes()).expect("sign");
    // Corrupt the signature segment.
    auth.pop();
    auth.push('x');

    let resp = app
        .oneshot(webhook_request(EGRESS_BODY, Some(&auth)))
        .await
        .unwrap();
    // Dropped internally, but the deliverer still sees success.
    assert_eq!(resp.status(), StatusCode::OK);
    let body: APIResponse<Ack> = response_json(resp).await;
    assert!(body.success);
}

#[tokio::test]
async fn tampered_body_is_still_acknowledged() {
    let (app, state) = build_app();
    let auth = state.webhooks.sign(EGRESS_BODY.as_bytes()).expect("sign");
    let tampered = EGRESS_BODY.replace("EG_1", "EG_2");

    let resp = app
        .oneshot(webhook_request(&tampered, Some(&auth)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_auth_header_is_still_acknowledged() {
    let (app, _state) = build_app();
    let resp = app
        .oneshot(webhook_request(EGRESS_BODY, None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_event_kind_is_acknowledged() {
    let (app, state) = build_app();
    let body = r#"{"event":"hologram_started","id":"EV_9"}"#;
    let auth = state.webhooks.sign(body.as_bytes()).expect("sign");

    let resp = app.oneshot(webhook_request(body, Some(&auth))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
