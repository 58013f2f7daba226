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

//! JWT room access token generation.
//!
//! The roomgate backend signs tokens with a shared secret; the media server
//! validates the signature and extracts the claims. Signing is a pure
//! function of the claims, the key material, and the current time — no I/O.

use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use roomgate_types::{AccessTokenClaims, VideoGrants};

use crate::error::AppError;
use crate::state::SigningKeys;

/// TTL for short-lived service tokens used on backend RPC calls.
const SERVICE_TOKEN_TTL_SECS: i64 = 600;

/// Sign a room access token for the given participant.
///
/// Fails with `INVALID_CLAIMS` when `identity` or the grant's room is empty,
/// and with a generic internal error when the key material is unusable.
pub fn issue_access_token(
    keys: &SigningKeys,
    ttl_secs: i64,
    identity: &str,
    grants: VideoGrants,
    metadata: String,
) -> Result<String, AppError> {
    if identity.is_empty() {
        return Err(AppError::invalid_claims("identity must not be empty"));
    }
    if grants.room_join && grants.room.is_empty() {
        return Err(AppError::invalid_claims("room must not be empty"));
    }
    if keys.api_secret.is_empty() {
        tracing::error!("Refusing to sign token: empty API secret");
        return Err(AppError::internal("signing key unavailable"));
    }

    let now = Utc::now().timestamp();
    let claims = AccessTokenClaims {
        iss: keys.api_key.clone(),
        sub: identity.to_string(),
        name: identity.to_string(),
        nbf: now,
        exp: now + ttl_secs,
        metadata,
        video: grants,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(keys.api_secret.as_bytes()),
    )
    .map_err(|e| {
        tracing::error!("Failed to sign JWT: {e}");
        AppError::internal("failed to generate room token")
    })
}

/// Sign a short-lived administrative token for server-to-server RPC.
pub fn issue_service_token(keys: &SigningKeys) -> Result<String, AppError> {
    issue_access_token(
        keys,
        SERVICE_TOKEN_TTL_SECS,
        &keys.api_key,
        VideoGrants::service(),
        String::new(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, DecodingKey, Validation};

    fn test_keys() -> SigningKeys {
        SigningKeys {
            api_key: "devkey".to_string(),
            api_secret: "super-secret-test-key".to_string(),
        }
    }

    fn decode_with(token: &str, secret: &str) -> jsonwebtoken::errors::Result<AccessTokenClaims> {
        let mut validation = Validation::default();
        validation.set_issuer(&["devkey"]);
        decode::<AccessTokenClaims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
    }

    #[test]
    fn token_round_trips_with_correct_claims() {
        let keys = test_keys();
        let token = issue_access_token(
            &keys,
            21600,
            "alice",
            VideoGrants::full_access("lecture-1"),
            String::new(),
        )
        .expect("should sign");

        let claims = decode_with(&token, &keys.api_secret).expect("should decode");
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.video.room, "lecture-1");
        assert!(claims.video.room_join);
        assert!(claims.video.can_publish);
        assert!(claims.video.can_subscribe);
        assert_eq!(claims.iss, "devkey");
    }

    #[test]
    fn metadata_survives_the_round_trip() {
        let keys = test_keys();
        let metadata = r#"{"livekitUrl":"http://localhost:7880","role":"PUBLISHER"}"#.to_string();
        let token = issue_access_token(
            &keys,
            600,
            "bob",
            VideoGrants::for_role("standup", true),
            metadata.clone(),
        )
        .expect("should sign");

        let claims = decode_with(&token, &keys.api_secret).expect("should decode");
        assert_eq!(claims.metadata, metadata);
    }

    #[test]
    fn exp_is_nbf_plus_ttl() {
        let keys = test_keys();
        let ttl = 21600_i64;
        let token = issue_access_token(&keys, ttl, "a", VideoGrants::full_access("r"), String::new())
            .expect("should sign");

        let claims = decode_with(&token, &keys.api_secret).expect("should decode");
        assert!(claims.nbf < claims.exp);
        assert_eq!(claims.exp - claims.nbf, ttl);
    }

    #[test]
    fn tampered_token_fails_to_decode() {
        let keys = test_keys();
        let token = issue_access_token(
            &keys,
            600,
            "alice",
            VideoGrants::full_access("lecture-1"),
            String::new(),
        )
        .expect("should sign");

        // Flip one character in every segment; each mutation must invalidate
        // the token under the original secret.
        let bytes = token.as_bytes();
        for idx in [5, token.len() / 2, token.len() - 2] {
            let mut tampered = bytes.to_vec();
            tampered[idx] = if tampered[idx] == b'A' { b'B' } else { b'A' };
            let tampered = String::from_utf8(tampered).unwrap();
            assert!(
                decode_with(&tampered, &keys.api_secret).is_err(),
                "tampering at byte {idx} should invalidate the token"
            );
        }
    }

    #[test]
    fn wrong_secret_fails_to_decode() {
        let keys = test_keys();
        let token = issue_access_token(&keys, 600, "a", VideoGrants::full_access("r"), String::new())
            .expect("should sign");
        assert!(decode_with(&token, "a-different-secret").is_err());
    }

    #[test]
    fn empty_identity_is_rejected() {
        let keys = test_keys();
        let err = issue_access_token(&keys, 600, "", VideoGrants::full_access("r"), String::new())
            .unwrap_err();
        assert_eq!(err.body.code, "INVALID_CLAIMS");
    }

    #[test]
    fn empty_room_is_rejected_for_join_tokens() {
        let keys = test_keys();
        let err = issue_access_token(&keys, 600, "a", VideoGrants::full_access(""), String::new())
            .unwrap_err();
        assert_eq!(err.body.code, "INVALID_CLAIMS");
    }

    #[test]
    fn empty_secret_is_a_signing_error() {
        let keys = SigningKeys {
            api_key: "devkey".to_string(),
            api_secret: String::new(),
        };
        let err = issue_access_token(&keys, 600, "a", VideoGrants::full_access("r"), String::new())
            .unwrap_err();
        assert_eq!(err.body.code, "INTERNAL_ERROR");
    }

    #[test]
    fn service_token_carries_admin_grants_without_room() {
        let keys = test_keys();
        let token = issue_service_token(&keys).expect("should sign");
        let claims = decode_with(&token, &keys.api_secret).expect("should decode");
        assert!(claims.video.room_admin);
        assert!(claims.video.room_create);
        assert!(!claims.video.room_join);
        assert!(claims.video.room.is_empty());
    }
}
