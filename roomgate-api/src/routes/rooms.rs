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

//! Room / participant / recording / ingress forwarding handlers.
//!
//! These endpoints hold no state of their own: each one validates its
//! parameters, calls the media server through [`RoomClient`], and wraps the
//! result in the standard response envelope.
//!
//! [`RoomClient`]: crate::livekit::RoomClient

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;

use roomgate_types::{
    requests::{
        CreateIngressRequest, CreateRoomRequest, MuteTrackRequest, StartRecordingRequest,
        UpdateSubscriptionsRequest,
    },
    responses::{Ack, APIResponse, IngressListResponse, RecordingListResponse, RoomListResponse},
    webhook::{EgressInfo, IngressInfo, RoomInfo},
};

use crate::error::AppError;
use crate::state::AppState;

/// POST /api/rooms
pub async fn create_room(
    State(state): State<AppState>,
    Json(req): Json<CreateRoomRequest>,
) -> Result<Json<APIResponse<RoomInfo>>, AppError> {
    if req.room_name.trim().is_empty() {
        return Err(AppError::missing_parameter("roomName"));
    }
    let room = state
        .rooms
        .create_room(req.room_name.trim(), req.metadata.as_deref())
        .await?;
    Ok(Json(APIResponse::ok(room)))
}

/// GET /api/rooms
pub async fn list_rooms(
    State(state): State<AppState>,
) -> Result<Json<APIResponse<RoomListResponse>>, AppError> {
    let rooms = state.rooms.list_rooms(&[]).await?;
    Ok(Json(APIResponse::ok(RoomListResponse { rooms })))
}

/// DELETE /api/rooms/{room}
pub async fn delete_room(
    State(state): State<AppState>,
    Path(room): Path<String>,
) -> Result<Json<APIResponse<Ack>>, AppError> {
    state.rooms.delete_room(&room).await?;
    Ok(Json(APIResponse::ok(Ack::default())))
}

/// POST /api/rooms/{room}/participants/{identity}/mute
pub async fn mute_track(
    State(state): State<AppState>,
    Path((room, identity)): Path<(String, String)>,
    Json(req): Json<MuteTrackRequest>,
) -> Result<Json<APIResponse<Ack>>, AppError> {
    if req.track_sid.is_empty() {
        return Err(AppError::missing_parameter("trackSid"));
    }
    state
        .rooms
        .mute_published_track(&room, &identity, &req.track_sid, req.muted)
        .await?;
    Ok(Json(APIResponse::ok(Ack::default())))
}

/// POST /api/rooms/{room}/participants/{identity}/subscriptions
pub async fn update_subscriptions(
    State(state): State<AppState>,
    Path((room, identity)): Path<(String, String)>,
    Json(req): Json<UpdateSubscriptionsRequest>,
) -> Result<Json<APIResponse<Ack>>, AppError> {
    state
        .rooms
        .update_subscriptions(&room, &identity, &req.track_sids, req.subscribe)
        .await?;
    Ok(Json(APIResponse::ok(Ack::default())))
}

/// DELETE /api/rooms/{room}/participants/{identity}
pub async fn remove_participant(
    State(state): State<AppState>,
    Path((room, identity)): Path<(String, String)>,
) -> Result<Json<APIResponse<Ack>>, AppError> {
    state.rooms.remove_participant(&room, &identity).await?;
    Ok(Json(APIResponse::ok(Ack::default())))
}

/// POST /api/rooms/{room}/recordings/start
pub async fn start_recording(
    State(state): State<AppState>,
    Path(room): Path<String>,
    body: Option<Json<StartRecordingRequest>>,
) -> Result<Json<APIResponse<EgressInfo>>, AppError> {
    let filepath = body
        .as_ref()
        .and_then(|b| b.filepath.clone())
        .unwrap_or_else(|| format!("{room}-{}.mp4", Utc::now().timestamp()));
    let egress = state.rooms.start_room_recording(&room, &filepath).await?;
    Ok(Json(APIResponse::ok(egress)))
}

/// POST /api/recordings/{egress_id}/stop
pub async fn stop_recording(
    State(state): State<AppState>,
    Path(egress_id): Path<String>,
) -> Result<Json<APIResponse<EgressInfo>>, AppError> {
    let egress = state.rooms.stop_egress(&egress_id).await?;
    Ok(Json(APIResponse::ok(egress)))
}

/// GET /api/rooms/{room}/recordings
pub async fn list_recordings(
    State(state): State<AppState>,
    Path(room): Path<String>,
) -> Result<Json<APIResponse<RecordingListResponse>>, AppError> {
    let recordings = state.rooms.list_egress(&room).await?;
    Ok(Json(APIResponse::ok(RecordingListResponse { recordings })))
}

/// POST /api/rooms/{room}/ingress
pub async fn create_ingress(
    State(state): State<AppState>,
    Path(room): Path<String>,
    Json(req): Json<CreateIngressRequest>,
) -> Result<Json<APIResponse<IngressInfo>>, AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::missing_parameter("name"));
    }
    if req.participant_identity.trim().is_empty() {
        return Err(AppError::missing_parameter("participantIdentity"));
    }
    let ingress = state
        .rooms
        .create_ingress(&room, req.name.trim(), req.participant_identity.trim())
        .await?;
    Ok(Json(APIResponse::ok(ingress)))
}

/// GET /api/rooms/{room}/ingress
pub async fn list_ingress(
    State(state): State<AppState>,
    Path(room): Path<String>,
) -> Result<Json<APIResponse<IngressListResponse>>, AppError> {
    let ingresses = state.rooms.list_ingress(&room).await?;
    Ok(Json(APIResponse::ok(IngressListResponse { ingresses })))
}

/// DELETE /api/ingress/{ingress_id}
pub async fn delete_ingress(
    State(state): State<AppState>,
    Path(ingress_id): Path<String>,
) -> Result<Json<APIResponse<IngressInfo>>, AppError> {
    let ingress = state.rooms.delete_ingress(&ingress_id).await?;
    Ok(Json(APIResponse::ok(ingress)))
}
