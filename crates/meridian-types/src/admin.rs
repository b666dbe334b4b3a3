//! Admin-user record used by the authentication layer.

use serde::{Deserialize, Serialize};

/// An operator account able to authenticate against the admin API.
///
/// `password_hash` is always an argon2id PHC string; nothing in this crate
/// or `meridian-api` ever holds a plaintext password longer than the
/// request handler that receives it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    /// Unique login name.
    pub username: String,
    /// Argon2id password hash, PHC string format.
    pub password_hash: String,
}

impl AdminUser {
    /// Build a new admin user record from a precomputed hash.
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }
}
