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

//! Webhook signature verification.
//!
//! The media server authenticates each webhook delivery with an
//! `Authorization` header carrying a JWT signed with the shared API secret.
//! The JWT's `sha256` claim is the base64-encoded SHA-256 digest of the raw
//! request body, so the signature covers the exact bytes received — the body
//! must never be re-serialized before verification.
//!
//! A typed [`WebhookEvent`](roomgate_types::WebhookEvent) is only produced
//! once the signature, digest, and freshness checks have all passed.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::Utc;
use jsonwebtoken::{
    decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use roomgate_types::WebhookEvent;

use crate::state::SigningKeys;

/// Claims of the JWT carried in the webhook `Authorization` header.
///
/// Same HMAC-SHA256 primitive as room access tokens, but the payload is a
/// digest of the event body instead of participant claims.
#[derive(Debug, Serialize, Deserialize)]
struct WebhookAuthClaims {
    /// API key identifier of the signing key.
    iss: String,
    /// Base64 (standard alphabet) SHA-256 digest of the raw body.
    sha256: String,
    exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    iat: Option<i64>,
}

/// Why a webhook delivery was rejected.
///
/// These are logged server-side and never surfaced to the deliverer: the
/// webhook endpoint acknowledges every delivery to avoid retry storms.
#[derive(Debug)]
pub enum WebhookError {
    /// The request carried no `Authorization` header.
    MissingHeader,
    /// The header JWT failed signature or issuer validation.
    InvalidToken(jsonwebtoken::errors::Error),
    /// The body digest does not match the signed digest.
    DigestMismatch,
    /// The event is older than the accepted replay window.
    Stale { age_secs: i64 },
    /// Signature checks passed but the body is not a valid event.
    Malformed(serde_json::Error),
}

impl std::fmt::Display for WebhookError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WebhookError::MissingHeader => write!(f, "missing Authorization header"),
            WebhookError::InvalidToken(e) => write!(f, "invalid webhook token: {e}"),
            WebhookError::DigestMismatch => write!(f, "body digest does not match signature"),
            WebhookError::Stale { age_secs } => {
                write!(f, "event is {age_secs}s old, outside the replay window")
            }
            WebhookError::Malformed(e) => write!(f, "verified body is not a valid event: {e}"),
        }
    }
}

impl std::error::Error for WebhookError {}

/// Verifies inbound webhook deliveries against the shared signing secret.
#[derive(Clone)]
pub struct WebhookReceiver {
    keys: SigningKeys,
    /// Maximum accepted age (seconds) of a delivery that carries `iat`.
    max_age_secs: i64,
}

impl WebhookReceiver {
    pub fn new(keys: SigningKeys, max_age_secs: i64) -> Self {
        Self { keys, max_age_secs }
    }

    /// Verify `raw_body` against the `Authorization` header and deserialize
    /// it into a typed event.
    ///
    /// Order of checks: JWT signature and issuer, body digest (constant
    /// time), freshness, then deserialization. An event is never produced
    /// from a body whose signature check failed.
    pub fn verify(
        &self,
        raw_body: &[u8],
        auth_header: Option<&str>,
    ) -> Result<WebhookEvent, WebhookError> {
        let token = auth_header
            .map(|h| h.strip_prefix("Bearer ").unwrap_or(h).trim())
            .filter(|t| !t.is_empty())
            .ok_or(WebhookError::MissingHeader)?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.keys.api_key]);
        let claims = decode::<WebhookAuthClaims>(
            token,
            &DecodingKey::from_secret(self.keys.api_secret.as_bytes()),
            &validation,
        )
        .map_err(WebhookError::InvalidToken)?
        .claims;

        let digest = Sha256::digest(raw_body);
        let claimed = BASE64
            .decode(&claims.sha256)
            .map_err(|_| WebhookError::DigestMismatch)?;
        // Constant-time comparison of the digests.
        if claimed.ct_eq(digest.as_slice()).unwrap_u8() != 1 {
            return Err(WebhookError::DigestMismatch);
        }

        if let Some(iat) = claims.iat {
            let age_secs = Utc::now().timestamp() - iat;
            if age_secs > self.max_age_secs {
                return Err(WebhookError::Stale { age_secs });
            }
        }

        serde_json::from_slice(raw_body).map_err(WebhookError::Malformed)
    }

    /// Sign a body the way the media server does.
    ///
    /// The inverse of [`verify`](Self::verify); used by the test suites and
    /// by local tooling that simulates deliveries.
    pub fn sign(&self, raw_body: &[u8]) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now().timestamp();
        let claims = WebhookAuthClaims {
            iss: self.keys.api_key.clone(),
            sha256: BASE64.encode(Sha256::digest(raw_body)),
            exp: now + 600,
            iat: Some(now),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.keys.api_secret.as_bytes()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomgate_types::EventKind;

    const BODY: &[u8] = br#"{"event":"egress_ended","egressId":"EG_1"}"#;

    fn receiver_with(secret: &str) -> WebhookReceiver {
        WebhookReceiver::new(
            SigningKeys {
                api_key: "devkey".to_string(),
                api_secret: secret.to_string(),
            },
            300,
        )
    }

    #[test]
    fn signed_body_verifies_and_parses() {
        let receiver = receiver_with("secret");
        let header = receiver.sign(BODY).expect("sign");
        let event = receiver.verify(BODY, Some(&header)).expect("verify");
        assert_eq!(event.event, EventKind::EgressEnded);
        assert_eq!(event.egress_id(), Some("EG_1"));
    }

    #[test]
    fn bearer_prefix_is_accepted() {
        let receiver = receiver_with("secret");
        let header = format!("Bearer {}", receiver.sign(BODY).expect("sign"));
        assert!(receiver.verify(BODY, Some(&header)).is_ok());
    }

    #[test]
    fn missing_header_is_rejected() {
        let receiver = receiver_with("secret");
        assert!(matches!(
            receiver.verify(BODY, None),
            Err(WebhookError::MissingHeader)
        ));
        assert!(matches!(
            receiver.verify(BODY, Some("")),
            Err(WebhookError::MissingHeader)
        ));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let signer = receiver_with("secret-a");
        let receiver = receiver_with("secret-b");
        let header = signer.sign(BODY).expect("sign");
        assert!(matches!(
            receiver.verify(BODY, Some(&header)),
            Err(WebhookError::InvalidToken(_))
        ));
    }

    #[test]
    fn tampered_body_is_rejected() {
        let receiver = receiver_with("secret");
        let header = receiver.sign(BODY).expect("sign");
        for idx in 0..BODY.len() {
            let mut tampered = BODY.to_vec();
            tampered[idx] ^= 0x01;
            assert!(
                matches!(
                    receiver.verify(&tampered, Some(&header)),
                    Err(WebhookError::DigestMismatch)
                ),
                "byte {idx} flip should be caught"
            );
        }
    }

    #[test]
    fn tampered_header_is_rejected() {
        let receiver = receiver_with("secret");
        let header = receiver.sign(BODY).expect("sign");
        let mut tampered = header.into_bytes();
        let last = tampered.len() - 1;
        tampered[last] = if tampered[last] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(tampered).unwrap();
        assert!(receiver.verify(BODY, Some(&tampered)).is_err());
    }

    #[test]
    fn stale_event_is_rejected() {
        // A token stamped further in the past than the tolerance window
        // must be rejected as stale even though its exp is still valid.
        let keys = SigningKeys {
            api_key: "devkey".to_string(),
            api_secret: "secret".to_string(),
        };
        let receiver = WebhookReceiver::new(keys.clone(), 300);

        let now = Utc::now().timestamp();
        let claims = WebhookAuthClaims {
            iss: keys.api_key.clone(),
            sha256: BASE64.encode(Sha256::digest(BODY)),
            exp: now + 600,
            iat: Some(now - 1000),
        };
        let header = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(keys.api_secret.as_bytes()),
        )
        .expect("sign");

        assert!(matches!(
            receiver.verify(BODY, Some(&header)),
            Err(WebhookError::Stale { .. })
        ));
    }

    #[test]
    fn token_without_iat_relies_on_exp_alone() {
        let keys = SigningKeys {
            api_key: "devkey".to_string(),
            api_secret: "secret".to_string(),
        };
        let receiver = WebhookReceiver::new(keys.clone(), 300);

        let claims = WebhookAuthClaims {
            iss: keys.api_key.clone(),
            sha256: BASE64.encode(Sha256::digest(BODY)),
            exp: Utc::now().timestamp() + 600,
            iat: None,
        };
        let header = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(keys.api_secret.as_bytes()),
        )
        .expect("sign");

        assert!(receiver.verify(BODY, Some(&header)).is_ok());
    }

    #[test]
    fn wrong_issuer_is_rejected() {
        let signer = WebhookReceiver::new(
            SigningKeys {
                api_key: "otherkey".to_string(),
                api_secret: "secret".to_string(),
            },
            300,
        );
        let receiver = receiver_with("secret");
        let header = signer.sign(BODY).expect("sign");
        assert!(matches!(
            receiver.verify(BODY, Some(&header)),
            Err(WebhookError::InvalidToken(_))
        ));
    }

    #[test]
    fn unknown_event_kind_still_verifies() {
        let receiver = receiver_with("secret");
        let body = br#"{"event":"hologram_started","id":"EV_9"}"#;
        let header = receiver.sign(body).expect("sign");
        let event = receiver.verify(body, Some(&header)).expect("verify");
        assert_eq!(event.event, EventKind::Unknown);
    }

    #[test]
    fn garbage_body_with_valid_signature_is_malformed() {
        let receiver = receiver_with("secret");
        let body = b"not json at all";
        let header = receiver.sign(body).expect("sign");
        assert!(matches!(
            receiver.verify(body, Some(&header)),
            Err(WebhookError::Malformed(_))
        ));
    }
}
