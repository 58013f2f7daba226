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

//! Response types for the roomgate REST API.
//!
//! Every endpoint returns an [`APIResponse<T>`] envelope:
//! - On success: `{ "success": true,  "result": <T> }`
//! - On failure: `{ "success": false, "result": <APIError> }`

use serde::{Deserialize, Serialize};

use crate::webhook::{EgressInfo, IngressInfo, RoomInfo};

// ---------------------------------------------------------------------------
// Generic envelope
// ---------------------------------------------------------------------------

/// Top-level API response envelope.
///
/// All roomgate endpoints wrap their payload in this structure so that
/// clients always see a consistent `{ "success", "result" }` shape.
///
/// # Success example
///
/// ```json
/// { "success": true, "result": { "token": "eyJhbGciOi..." } }
/// ```
///
/// # Error example
///
/// ```json
/// { "success": false, "result": { "code": "MISSING_PARAMETER", "message": "..." } }
/// ```
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct APIResponse<A: Serialize> {
    pub success: bool,
    pub result: A,
}

impl<A: Serialize> APIResponse<A> {
    /// Wrap a successful result.
    pub fn ok(result: A) -> Self {
        Self {
            success: true,
            result,
        }
    }
}

impl APIResponse<crate::error::APIError> {
    /// Wrap an error result.
    pub fn error(err: crate::error::APIError) -> Self {
        Self {
            success: false,
            result: err,
        }
    }
}

// ---------------------------------------------------------------------------
// Endpoint-specific response payloads
// ---------------------------------------------------------------------------

/// Response payload for `POST /token` and `POST /session/token`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenResponse {
    /// The signed room access token.
    pub token: String,
}

/// Response payload for `POST /login`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoginResponse {
    pub user: String,
    /// `"PUBLISHER"` or `"SUBSCRIBER"`.
    pub role: String,
}

/// Response payload for room listing/creation endpoints.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RoomListResponse {
    pub rooms: Vec<RoomInfo>,
}

/// Response payload for recording (egress) endpoints.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RecordingListResponse {
    pub recordings: Vec<EgressInfo>,
}

/// Response payload for ingress endpoints.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct IngressListResponse {
    pub ingresses: Vec<IngressInfo>,
}

/// Empty acknowledgement body. The webhook endpoint always returns this,
/// regardless of whether the event verified.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Ack {}
