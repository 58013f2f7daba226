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

//! Application configuration loaded from environment variables.

use std::env;

/// Configuration for the roomgate backend.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the HTTP server (e.g. "0.0.0.0:6080").
    pub listen_addr: String,
    /// API key identifier shared with the media server.
    pub api_key: String,
    /// Secret used to sign access tokens and verify webhooks (HMAC-SHA256).
    pub api_secret: String,
    /// Base URL of the media server (e.g. "http://localhost:7880").
    pub livekit_url: String,
    /// Access token time-to-live in seconds (default: 21600 = 6 hours).
    pub token_ttl_secs: i64,
    /// Maximum accepted age of a webhook event in seconds (default: 300).
    pub webhook_max_age_secs: i64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Required
    /// - `LIVEKIT_API_KEY`
    /// - `LIVEKIT_API_SECRET`
    /// - `LIVEKIT_URL`
    ///
    /// # Optional
    /// - `LISTEN_ADDR` (default: `"0.0.0.0:6080"`)
    /// - `TOKEN_TTL_SECS` (default: `"21600"`)
    /// - `WEBHOOK_MAX_AGE_SECS` (default: `"300"`)
    pub fn from_env() -> Result<Self, String> {
        let api_key = env::var("LIVEKIT_API_KEY")
            .map_err(|_| "LIVEKIT_API_KEY environment variable is required")?;
        let api_secret = env::var("LIVEKIT_API_SECRET")
            .map_err(|_| "LIVEKIT_API_SECRET environment variable is required")?;
        let livekit_url =
            env::var("LIVEKIT_URL").map_err(|_| "LIVEKIT_URL environment variable is required")?;

        let listen_addr = env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:6080".to_string());
        let token_ttl_secs = env::var("TOKEN_TTL_SECS")
            .unwrap_or_else(|_| "21600".to_string())
            .parse::<i64>()
            .map_err(|_| "TOKEN_TTL_SECS must be a valid integer")?;
        let webhook_max_age_secs = env::var("WEBHOOK_MAX_AGE_SECS")
            .unwrap_or_else(|_| "300".to_string())
            .parse::<i64>()
            .map_err(|_| "WEBHOOK_MAX_AGE_SECS must be a valid integer")?;

        Ok(Self {
            listen_addr,
            api_key,
            api_secret,
            livekit_url,
            token_ttl_secs,
            webhook_max_age_secs,
        })
    }
}
