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

//! Shared API types for the roomgate room access backend.
//!
//! This crate defines the API contract between the roomgate backend
//! and its consumers (clients, frontend, integration tests).
//! It is intentionally framework-agnostic — no axum, no HTTP types.

pub mod error;
pub mod requests;
pub mod responses;
pub mod token;
pub mod webhook;

pub use error::APIError;
pub use responses::APIResponse;
pub use token::{AccessTokenClaims, VideoGrants};
pub use webhook::{EventKind, WebhookEvent};
