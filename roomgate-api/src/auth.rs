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

//! Axum extractor that resolves the `session` cookie to a logged-in user.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::error::AppError;
use crate::state::AppState;

/// Extractor that resolves the `session` cookie against the session store.
///
/// Usage in a handler:
/// ```ignore
/// async fn my_handler(user: SessionUser) { ... }
/// ```
///
/// Rejects with `401 UNAUTHORIZED` when the cookie is missing or the handle
/// is unknown; handlers relying on this extractor therefore check
/// authentication before touching any other request parameter.
#[derive(Debug)]
pub struct SessionUser {
    /// Username the session belongs to.
    pub name: String,
    /// The opaque session handle, needed for logout.
    pub session_id: String,
}

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let cookie_header = parts
            .headers
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        for pair in cookie_header.split(';') {
            let pair = pair.trim();
            if let Some(value) = pair.strip_prefix("session=") {
                let handle = value.trim();
                if let Some(name) = state.sessions.resolve(handle) {
                    return Ok(SessionUser {
                        name,
                        session_id: handle.to_string(),
                    });
                }
            }
        }

        Err(AppError::unauthorized())
    }
}
