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

//! Shared application state passed to every Axum handler via `State`.

use crate::config::Config;
use crate::livekit::RoomClient;
use crate::users::{SessionStore, UserDirectory};
use crate::webhook::WebhookReceiver;

/// Process-wide signing key material, loaded once at startup and
/// immutable afterwards. Shared between token signing and webhook
/// verification, which use the same HMAC primitive.
#[derive(Debug, Clone)]
pub struct SigningKeys {
    /// Key identifier, sent as the JWT `iss` claim.
    pub api_key: String,
    /// Raw signing secret.
    pub api_secret: String,
}

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Signing key material shared with the media server.
    pub keys: SigningKeys,
    /// Access token time-to-live in seconds.
    pub token_ttl_secs: i64,
    /// Base URL of the media server, echoed in token metadata.
    pub livekit_url: String,
    /// Fixed user-to-role directory.
    pub users: UserDirectory,
    /// Opaque session handle to username store.
    pub sessions: SessionStore,
    /// Webhook signature verifier.
    pub webhooks: WebhookReceiver,
    /// RPC client for room/egress/ingress management.
    pub rooms: RoomClient,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let keys = SigningKeys {
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
        };
        Self {
            webhooks: WebhookReceiver::new(keys.clone(), config.webhook_max_age_secs),
            rooms: RoomClient::new(keys.clone(), config.livekit_url.clone()),
            keys,
            token_ttl_secs: config.token_ttl_secs,
            livekit_url: config.livekit_url.clone(),
            users: UserDirectory::with_default_users(),
            sessions: SessionStore::new(),
        }
    }
}
