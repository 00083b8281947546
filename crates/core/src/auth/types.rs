use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payload carried inside the `session` cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub valid: bool,
    pub user: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl SessionClaims {
    /// Claims for a freshly authenticated admin.
    pub fn new(user: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            valid: true,
            user: user.into(),
            created_at,
        }
    }
}

/// The single admin credential pair.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .finish()
    }
}
