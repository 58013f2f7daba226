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

//! Axum router configuration for the roomgate backend.

pub mod rooms;
pub mod token;
pub mod webhook;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::state::AppState;

/// Build the full application router.
pub fn router() -> Router<AppState> {
    Router::new()
        // Token issuance and sessions
        .route("/token", post(token::basic_token))
        .route("/login", post(token::login))
        .route("/logout", post(token::logout))
        .route("/session/token", post(token::session_token))
        // Media server webhooks
        .route("/livekit/webhook", post(webhook::receive))
        // Room management forwarding
        .route("/api/rooms", post(rooms::create_room))
        .route("/api/rooms", get(rooms::list_rooms))
        .route("/api/rooms/{room}", delete(rooms::delete_room))
        // Participant actions
        .route(
            "/api/rooms/{room}/participants/{identity}/mute",
            post(rooms::mute_track),
        )
        .route(
            "/api/rooms/{room}/participants/{identity}/subscriptions",
            post(rooms::update_subscriptions),
        )
        .route(
            "/api/rooms/{room}/participants/{identity}",
            delete(rooms::remove_participant),
        )
        // Recordings (egress)
        .route(
            "/api/rooms/{room}/recordings/start",
            post(rooms::start_recording),
        )
        .route("/api/rooms/{room}/recordings", get(rooms::list_recordings))
        .route(
            "/api/recordings/{egress_id}/stop",
            post(rooms::stop_recording),
        )
        // Ingress
        .route("/api/rooms/{room}/ingress", post(rooms::create_ingress))
        .route("/api/rooms/{room}/ingress", get(rooms::list_ingress))
        .route("/api/ingress/{ingress_id}", delete(rooms::delete_ingress))
}
