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

//! Webhook event envelope posted by the media server.
//!
//! Events are delivered as JSON with an `event` discriminator and at most one
//! populated info record (`room`, `participant`, `egressInfo`, `ingressInfo`).
//! The envelope must tolerate event kinds this backend has never heard of:
//! the media server adds kinds over time and an unknown kind is not an error.

use serde::{Deserialize, Serialize};

/// A verified webhook event. Only constructed after the signature over the
/// raw body has been checked.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent {
    pub event: EventKind,

    /// Unique event id assigned by the media server.
    #[serde(default)]
    pub id: Option<String>,

    /// Event creation time (Unix seconds).
    #[serde(default)]
    pub created_at: Option<i64>,

    #[serde(default)]
    pub room: Option<RoomInfo>,

    #[serde(default)]
    pub participant: Option<ParticipantInfo>,

    #[serde(default)]
    pub egress_info: Option<EgressInfo>,

    #[serde(default)]
    pub ingress_info: Option<IngressInfo>,

    /// Some egress events carry the id at the top level as well.
    #[serde(default)]
    pub egress_id: Option<String>,
}

impl WebhookEvent {
    /// The room this event concerns, wherever the envelope carries it.
    pub fn room_name(&self) -> Option<&str> {
        self.room
            .as_ref()
            .map(|r| r.name.as_str())
            .or_else(|| self.egress_info.as_ref().map(|e| e.room_name.as_str()))
            .or_else(|| self.ingress_info.as_ref().map(|i| i.room_name.as_str()))
    }

    /// The egress id this event concerns, if any.
    pub fn egress_id(&self) -> Option<&str> {
        self.egress_info
            .as_ref()
            .map(|e| e.egress_id.as_str())
            .or(self.egress_id.as_deref())
    }
}

/// Known webhook event kinds, snake_case on the wire.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    RoomStarted,
    RoomFinished,
    ParticipantJoined,
    ParticipantLeft,
    TrackPublished,
    TrackUnpublished,
    EgressStarted,
    EgressUpdated,
    EgressEnded,
    IngressStarted,
    IngressEnded,
    /// Any kind this backend does not recognize. Kept so newer media server
    /// releases cannot break verification.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RoomInfo {
    #[serde(default)]
    pub sid: String,
    pub name: String,
    #[serde(default)]
    pub metadata: String,
    #[serde(default)]
    pub num_participants: u32,
    #[serde(default)]
    pub creation_time: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantInfo {
    #[serde(default)]
    pub sid: String,
    pub identity: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub metadata: String,
    #[serde(default)]
    pub state: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EgressInfo {
    pub egress_id: String,
    #[serde(default)]
    pub room_name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub started_at: i64,
    #[serde(default)]
    pub ended_at: i64,
    #[serde(default)]
    pub file_results: Vec<FileResult>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FileResult {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub duration: i64,
    #[serde(default)]
    pub size: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct IngressInfo {
    pub ingress_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub room_name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub stream_key: String,
}
