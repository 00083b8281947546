//! Application state for auth.

use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use chrono::{DateTime, Utc};
use folio_core::auth::{
    encode_session, validate_session, verify_credentials, SessionClaims, SessionError,
};

use crate::config::AuthConfig;

/// Shared state for auth handlers.
#[derive(Clone)]
pub struct AuthState {
    pub config: Arc<AuthConfig>,
}

impl AuthState {
    pub fn new(config: AuthConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Checks a username/password pair against the admin credential.
    pub fn check_credentials(&self, username: &str, password: &str) -> bool {
        verify_credentials(&self.config.credentials, username, password)
    }

    /// Issues a signed session token for the admin.
    pub fn issue_token(&self, now: DateTime<Utc>) -> Result<String, SessionError> {
        let claims = SessionClaims::new(self.config.credentials.username.clone(), now);
        encode_session(&claims, &self.config.secret)
    }

    /// Verifies a session token.
    pub fn validate_token(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<SessionClaims, SessionError> {
        validate_session(
            token,
            &self.config.secret,
            &self.config.credentials.username,
            self.config.session_ttl_chrono(),
            now,
        )
    }

    /// Returns the claims of a valid session cookie, if the jar has one.
    pub fn session_from_jar(&self, jar: &CookieJar) -> Option<SessionClaims> {
        let cookie = jar.get(&self.config.cookie_name)?;
        match self.validate_token(cookie.value(), Utc::now()) {
            Ok(claims) => Some(claims),
            Err(error) => {
                tracing::debug!(%error, "rejected session cookie");
                None
            }
        }
    }

    /// Builds the `session` cookie carrying `token`.
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((self.config.cookie_name.clone(), token))
            .path("/")
            .http_only(true)
            .secure(self.config.cookie_secure)
            .same_site(SameSite::Strict)
            .max_age(time::Duration::seconds(
                self.config.session_ttl.as_secs() as i64
            ))
            .build()
    }

    /// Removes the session cookie from `jar`.
    pub fn clear_session(&self, jar: CookieJar) -> CookieJar {
        jar.remove(
            Cookie::build((self.config.cookie_name.clone(), ""))
                .path("/")
                .build(),
        )
    }

    /// Issues a token and adds the session cookie to `jar`.
    pub fn start_session(&self, jar: CookieJar) -> Result<CookieJar, SessionError> {
        let token = self.issue_token(Utc::now())?;
        Ok(jar.add(self.session_cookie(token)))
    }
}

/// Allows AuthState to be extracted from a parent state.
impl<S> FromRef<S> for AuthState
where
    S: AsRef<AuthState>,
{
    fn from_ref(state: &S) -> Self {
        state.as_ref().clone()
    }
}
