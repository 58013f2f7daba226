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

//! Webhook delivery endpoint.
//!
//! The media server expects an acknowledgement for every delivery; an error
//! status would put the event into an unbounded retry loop. So this endpoint
//! always answers 200: verified events are dispatched, everything else is
//! logged and dropped.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap},
    Json,
};

use roomgate_types::{
    responses::{Ack, APIResponse},
    EventKind, WebhookEvent,
};

use crate::state::AppState;

/// POST /livekit/webhook
pub async fn receive(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Json<APIResponse<Ack>> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    match state.webhooks.verify(&body, auth_header) {
        Ok(event) => dispatch(&event),
        Err(e) => tracing::warn!("Dropping webhook delivery: {e}"),
    }

    Json(APIResponse::ok(Ack::default()))
}

/// Forward a verified event to its handler. Handlers here only log; anything
/// heavier (recording bookkeeping, notifications) hangs off these match arms.
fn dispatch(event: &WebhookEvent) {
    match event.event {
        EventKind::RoomStarted | EventKind::RoomFinished => {
            tracing::info!(
                "{:?} for room '{}'",
                event.event,
                event.room_name().unwrap_or("<unknown>")
            );
        }
        EventKind::ParticipantJoined | EventKind::ParticipantLeft => {
            let identity = event
                .participant
                .as_ref()
                .map(|p| p.identity.as_str())
                .unwrap_or("<unknown>");
            tracing::info!(
                "{:?}: '{identity}' in room '{}'",
                event.event,
                event.room_name().unwrap_or("<unknown>")
            );
        }
        EventKind::EgressStarted | EventKind::EgressUpdated | EventKind::EgressEnded => {
            let status = event
                .egress_info
                .as_ref()
                .map(|e| e.status.as_str())
                .unwrap_or("");
            tracing::info!(
                "{:?}: egress '{}' ({status})",
                event.event,
                event.egress_id().unwrap_or("<unknown>")
            );
        }
        EventKind::IngressStarted | EventKind::IngressEnded => {
            let id = event
                .ingress_info
                .as_ref()
                .map(|i| i.ingress_id.as_str())
                .unwrap_or("<unknown>");
            tracing::info!("{:?}: ingress '{id}'", event.event);
        }
        EventKind::TrackPublished | EventKind::TrackUnpublished => {
            tracing::debug!(
                "{:?} in room '{}'",
                event.event,
                event.room_name().unwrap_or("<unknown>")
            );
        }
        EventKind::Unknown => {
            tracing::debug!("Ignoring unknown webhook event kind (id {:?})", event.id);
        }
    }
}
