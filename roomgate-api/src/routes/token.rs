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

//! Handlers for token issuance and the toy login/logout session flow.
//!
//! Two issuance variants:
//! - `POST /token` — unauthenticated, full-access grants.
//! - `POST /session/token` — requires a logged-in session; `can_publish`
//!   follows the user's role (publishers may publish, subscribers may not).

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use roomgate_types::{
    requests::{LoginRequest, TokenRequest},
    responses::{Ack, APIResponse, LoginResponse, TokenResponse},
    VideoGrants,
};

use crate::auth::SessionUser;
use crate::error::AppError;
use crate::state::AppState;
use crate::token::issue_access_token;

/// Pull a required field out of a token request, rejecting empty strings.
fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, AppError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::missing_parameter(field))
}

/// POST /token
///
/// Unauthenticated flow: anyone naming a room and a participant gets a
/// full-access token. Validity is enforced by the media server when the
/// token is presented, not here.
pub async fn basic_token(
    State(state): State<AppState>,
    body: Option<Json<TokenRequest>>,
) -> Result<Json<APIResponse<TokenResponse>>, AppError> {
    let req = body.map(|Json(b)| b).unwrap_or(TokenRequest {
        room_name: None,
        participant_name: None,
    });
    let room_name = required(&req.room_name, "roomName")?;
    let participant_name = required(&req.participant_name, "participantName")?;

    let metadata = json!({ "livekitUrl": state.livekit_url }).to_string();
    let token = issue_access_token(
        &state.keys,
        state.token_ttl_secs,
        participant_name,
        VideoGrants::full_access(room_name),
        metadata,
    )?;

    tracing::info!("Issued token for '{participant_name}' in room '{room_name}'");
    Ok(Json(APIResponse::ok(TokenResponse { token })))
}

/// POST /session/token
///
/// Role-based flow. The `SessionUser` extractor rejects unauthenticated
/// callers before any parameter is inspected. A session whose user has
/// vanished from the directory is treated as not authenticated.
pub async fn session_token(
    State(state): State<AppState>,
    user: SessionUser,
    body: Option<Json<TokenRequest>>,
) -> Result<Json<APIResponse<TokenResponse>>, AppError> {
    let role = state
        .users
        .role_of(&user.name)
        .ok_or_else(AppError::unauthorized)?;

    let req = body.map(|Json(b)| b).unwrap_or(TokenRequest {
        room_name: None,
        participant_name: None,
    });
    let room_name = required(&req.room_name, "roomName")?;
    let participant_name = required(&req.participant_name, "participantName")?;

    let metadata = json!({
        "livekitUrl": state.livekit_url,
        "user": user.name,
        "role": role.as_str(),
    })
    .to_string();

    let token = issue_access_token(
        &state.keys,
        state.token_ttl_secs,
        participant_name,
        VideoGrants::for_role(room_name, role.can_publish()),
        metadata,
    )?;

    tracing::info!(
        "Issued {} token for '{participant_name}' in room '{room_name}'",
        role.as_str()
    );
    Ok(Json(APIResponse::ok(TokenResponse { token })))
}

/// POST /login
///
/// Toy in-memory credential check. On success the session handle is set as
/// an `HttpOnly` cookie; it stays valid until logout.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, AppError> {
    let role = state
        .users
        .verify_login(&req.user, &req.pass)
        .ok_or_else(AppError::invalid_credentials)?;

    let handle = state.sessions.create(&req.user);
    tracing::info!("'{}' has logged in", req.user);

    let cookie = format!("session={handle}; Path=/; HttpOnly; SameSite=Lax");
    let body = Json(APIResponse::ok(LoginResponse {
        user: req.user,
        role: role.as_str().to_string(),
    }));
    Ok(([(header::SET_COOKIE, cookie)], body).into_response())
}

/// POST /logout
pub async fn logout(State(state): State<AppState>, user: SessionUser) -> Response {
    state.sessions.destroy(&user.session_id);
    tracing::info!("'{}' has logged out", user.name);

    let cookie = "session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0".to_string();
    let body = Json(APIResponse::ok(Ack::default()));
    ([(header::SET_COOKIE, cookie)], body).into_response()
}
