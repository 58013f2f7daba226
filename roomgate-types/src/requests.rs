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

//! Request types for the roomgate REST API.
//!
//! These types define the shape of request bodies. They are used by both
//! the server (for deserialization) and clients (for serialization).
//! Every field is explicitly typed and explicitly optional or required;
//! there are no string-keyed maps anywhere in the contract.

use serde::{Deserialize, Serialize};

/// Request body for `POST /token` and `POST /session/token`.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequest {
    /// Target room. Required; validated server-side so a missing field
    /// produces a structured error instead of a deserialization failure.
    #[serde(default)]
    pub room_name: Option<String>,

    /// Participant identity inside the room. Required.
    #[serde(default)]
    pub participant_name: Option<String>,
}

/// Request body for `POST /login`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoginRequest {
    pub user: String,
    pub pass: String,
}

/// Request body for `POST /api/rooms`.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    pub room_name: String,

    /// Opaque metadata stored on the room.
    #[serde(default)]
    pub metadata: Option<String>,
}

/// Request body for `POST /api/rooms/{room}/participants/{identity}/mute`.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MuteTrackRequest {
    pub track_sid: String,
    pub muted: bool,
}

/// Request body for `POST /api/rooms/{room}/participants/{identity}/subscriptions`.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubscriptionsRequest {
    pub track_sids: Vec<String>,
    pub subscribe: bool,
}

/// Request body for `POST /api/rooms/{room}/recordings/start`.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StartRecordingRequest {
    /// Output file path on the egress side. Defaults server-side to
    /// `"{room}-{timestamp}.mp4"` when omitted.
    #[serde(default)]
    pub filepath: Option<String>,
}

/// Request body for `POST /api/rooms/{room}/ingress`.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateIngressRequest {
    pub name: String,

    /// Identity the ingress participant appears as inside the room.
    pub participant_identity: String,
}
