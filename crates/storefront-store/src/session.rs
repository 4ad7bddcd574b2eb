//! Admin session and shopper account records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storefront_commerce::UserId;

/// An opaque admin session token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Create a session ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random session ID.
    pub fn generate() -> Self {
        use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
        use rand::Rng;

        let bytes: [u8; 18] = rand::thread_rng().gen();
        Self(format!("sess_{}", URL_SAFE_NO_PAD.encode(bytes)))
    }

    /// Get the session ID as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Marker that an admin has logged in on this machine.
///
/// There is no credential check behind it; it only gates admin commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSession {
    pub token: SessionId,
    pub username: String,
    pub login_time: DateTime<Utc>,
}

impl AdminSession {
    /// Start a session for `username`.
    pub fn start(username: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            token: SessionId::generate(),
            username: username.into(),
            login_time: now,
        }
    }
}

/// Details supplied when registering a shopper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

/// A registered shopper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// `USR<millis>`.
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn from_new(user: NewUser, id: UserId, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: user.name,
            email: user.email,
            created_at,
        }
    }
}
