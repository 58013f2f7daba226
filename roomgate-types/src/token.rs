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

//! Room access token (JWT) claims.
//!
//! A room access token is a signed JWT (HMAC-SHA256) that authorizes a client
//! to connect to the media server for a specific room with a specific set of
//! capabilities. The roomgate backend signs the token; the media server
//! validates the signature and extracts the claims. Nothing is encrypted —
//! the payload is readable by anyone holding the token, only the signature
//! is protected.

use serde::{Deserialize, Serialize};

/// JWT payload for a room access token.
///
/// The issuer (`iss`) is the API key identifier shared with the media server,
/// which uses it to select the secret for signature validation.
///
/// # Example payload
///
/// ```json
/// {
///   "iss": "devkey",
///   "sub": "alice",
///   "name": "alice",
///   "nbf": 1707004800,
///   "exp": 1707026400,
///   "metadata": "{\"role\":\"PUBLISHER\"}",
///   "video": { "roomJoin": true, "room": "lecture-1", "canPublish": true, "canSubscribe": true }
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AccessTokenClaims {
    /// API key identifier of the signing key.
    pub iss: String,

    /// Participant identity — their stable name inside the room.
    pub sub: String,

    /// Display name, defaults to the identity.
    pub name: String,

    /// Not-before timestamp (Unix seconds); effectively the issue time.
    pub nbf: i64,

    /// Expiration timestamp (Unix seconds). Token is rejected after this time.
    pub exp: i64,

    /// Opaque metadata echoed back to the joining client. Not interpreted
    /// by the backend.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub metadata: String,

    /// Capability grants for this token.
    pub video: VideoGrants,
}

/// Capability grants embedded in an access token.
///
/// Field names are camelCase on the wire to match the media server contract.
/// All flags default to `false` so new grants can be added without breaking
/// older tokens.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoGrants {
    /// Permission to join a room. Must be `true` for participant tokens.
    pub room_join: bool,

    /// The room this token is scoped to.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub room: String,

    pub can_publish: bool,
    pub can_subscribe: bool,

    /// Permission to start/stop recordings of the room.
    pub room_record: bool,

    // Administrative grants, used only by service tokens for backend RPC.
    pub room_create: bool,
    pub room_list: bool,
    pub room_admin: bool,
    pub ingress_admin: bool,
}

impl VideoGrants {
    /// Full-access participant grants for the unauthenticated token flow.
    pub fn full_access(room: &str) -> Self {
        Self {
            room_join: true,
            room: room.to_string(),
            can_publish: true,
            can_subscribe: true,
            ..Self::default()
        }
    }

    /// Role-derived participant grants: publishers may publish, subscribers
    /// may not; everyone may subscribe.
    pub fn for_role(room: &str, can_publish: bool) -> Self {
        Self {
            room_join: true,
            room: room.to_string(),
            can_publish,
            can_subscribe: true,
            ..Self::default()
        }
    }

    /// Administrative grants for server-to-server RPC tokens.
    pub fn service() -> Self {
        Self {
            room_create: true,
            room_list: true,
            room_admin: true,
            room_record: true,
            ingress_admin: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grants_serialize_camel_case() {
        let grants = VideoGrants::full_access("lecture-1");
        let json = serde_json::to_value(&grants).expect("serialize");
        assert_eq!(json["roomJoin"], true);
        assert_eq!(json["room"], "lecture-1");
        assert_eq!(json["canPublish"], true);
        assert_eq!(json["canSubscribe"], true);
        assert_eq!(json["roomAdmin"], false);
    }

    #[test]
    fn missing_grant_fields_default_to_false() {
        let grants: VideoGrants =
            serde_json::from_str(r#"{"roomJoin":true,"room":"r"}"#).expect("deserialize");
        assert!(grants.room_join);
        assert!(!grants.can_publish);
        assert!(!grants.ingress_admin);
    }

    #[test]
    fn subscriber_role_cannot_publish() {
        let grants = VideoGrants::for_role("r", false);
        assert!(!grants.can_publish);
        assert!(grants.can_subscribe);
        assert!(grants.room_join);
    }
}
