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

//! Fixed user/role directory and the in-memory session store.
//!
//! The directory is seeded at startup and never changes afterwards; the
//! session store is shared mutable state touched by concurrent requests,
//! so both sit on lock-free concurrent maps. Sessions live until explicit
//! logout — there is no expiry policy.

use std::sync::Arc;

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use dashmap::DashMap;
use uuid::Uuid;

/// What a user is allowed to do in a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Publisher,
    Subscriber,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Publisher => "PUBLISHER",
            Role::Subscriber => "SUBSCRIBER",
        }
    }

    /// Publishers may send media; subscribers may only receive.
    pub fn can_publish(&self) -> bool {
        matches!(self, Role::Publisher)
    }
}

#[derive(Debug, Clone)]
struct UserRecord {
    password_hash: String,
    role: Role,
}

/// Process-wide mapping from username to role and password hash.
///
/// Constructed once at bootstrap and injected into the handlers that need
/// it; nothing adds or removes users at runtime.
#[derive(Clone)]
pub struct UserDirectory {
    users: Arc<DashMap<String, UserRecord>>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self {
            users: Arc::new(DashMap::new()),
        }
    }

    /// The demo users every deployment starts with.
    pub fn with_default_users() -> Self {
        let dir = Self::new();
        dir.seed("publisher1", "pass", Role::Publisher);
        dir.seed("publisher2", "pass", Role::Publisher);
        dir.seed("subscriber", "pass", Role::Subscriber);
        dir
    }

    /// Insert a user, hashing the password with Argon2.
    pub fn seed(&self, name: &str, password: &str, role: Role) {
        let salt = SaltString::generate(&mut rand::rngs::OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .expect("failed to hash seed password")
            .to_string();
        self.users.insert(
            name.to_string(),
            UserRecord {
                password_hash,
                role,
            },
        );
    }

    /// Check credentials. Returns the user's role on success.
    pub fn verify_login(&self, name: &str, password: &str) -> Option<Role> {
        if name.is_empty() || password.is_empty() {
            return None;
        }
        let record = self.users.get(name)?;
        let parsed = PasswordHash::new(&record.password_hash).ok()?;
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .ok()?;
        Some(record.role)
    }

    /// Look up a user's role without checking credentials.
    pub fn role_of(&self, name: &str) -> Option<Role> {
        self.users.get(name).map(|r| r.role)
    }
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

/// Transient session store: opaque handle to logged-in username.
///
/// Created on successful login, destroyed on logout or explicit
/// invalidation. Safe for concurrent insert/lookup/delete.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<DashMap<String, String>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
        }
    }

    /// Create a session for `user` and return its opaque handle.
    pub fn create(&self, user: &str) -> String {
        let handle = Uuid::new_v4().to_string();
        self.sessions.insert(handle.clone(), user.to_string());
        handle
    }

    /// Resolve a handle to the logged-in username.
    pub fn resolve(&self, handle: &str) -> Option<String> {
        self.sessions.get(handle).map(|u| u.clone())
    }

    /// Destroy a session. Returns the username it belonged to, if any.
    pub fn destroy(&self, handle: &str) -> Option<String> {
        self.sessions.remove(handle).map(|(_, user)| user)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
