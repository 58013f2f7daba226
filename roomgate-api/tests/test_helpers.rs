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

//! Shared test helpers for roomgate integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{self, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use roomgate_api::{config::Config, routes, state::AppState};
use serde::de::DeserializeOwned;
use tower::ServiceExt;

pub const TEST_API_KEY: &str = "devkey";
pub const TEST_API_SECRET: &str = "test-secret-for-integration-tests";
pub const TEST_LIVEKIT_URL: &str = "http://localhost:7880";
pub const TEST_TOKEN_TTL: i64 = 21600;

/// Build the Axum router plus the state behind it, ready for
/// `tower::ServiceExt::oneshot`. Nothing here touches the network.
pub fn build_app() -> (Router, AppState) {
    let state = AppState::new(&Config {
        listen_addr: "127.0.0.1:0".to_string(),
        api_key: TEST_API_KEY.to_string(),
        api_secret: TEST_API_SECRET.to_string(),
        livekit_url: TEST_LIVEKIT_URL.to_string(),
        token_ttl_secs: TEST_TOKEN_TTL,
        webhook_max_age_secs: 300,
    });
    (routes::router().with_state(state.clone()), state)
}

/// Build a JSON POST request.
pub fn json_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("build request")
}

/// POST /login and return the `session=<handle>` cookie pair.
pub async fn login(app: &Router, user: &str, pass: &str) -> String {
    let resp = app
        .clone()
        .oneshot(json_request(
            "/login",
            &format!(r#"{{"user":"{user}","pass":"{pass}"}}"#),
        ))
        .await
        .expect("login request");
    assert_eq!(resp.status(), http::StatusCode::OK, "login should succeed");

    let set_cookie = resp
        .headers()
        .get(http::header::SET_COOKIE)
        .expect("login sets a session cookie")
        .to_str()
        .expect("cookie is valid UTF-8");
    set_cookie
        .split(';')
        .next()
        .expect("cookie has a value")
        .to_string()
}

/// Consume a response body and deserialize JSON into `T`.
pub async fn response_json<T: DeserializeOwned>(resp: Response) -> T {
    let bytes = resp
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("deserialize response body")
}
