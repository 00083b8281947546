//! Axum extractors for authentication.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::CookieJar;
use folio_core::auth::SessionClaims;

use crate::{AuthError, AuthState};

/// Extractor for the authenticated admin. Rejects with 401 otherwise.
pub struct AdminSession(pub SessionClaims);

impl<S> FromRequestParts<S> for AdminSession
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);

        auth_state
            .session_from_jar(&jar)
            .map(AdminSession)
            .ok_or(AuthError::Unauthorized)
    }
}

/// Extractor for an optional admin session. Never rejects.
pub struct OptionalAdmin(pub Option<SessionClaims>);

impl OptionalAdmin {
    pub fn is_admin(&self) -> bool {
        self.0.is_some()
    }
}

impl<S> FromRequestParts<S> for OptionalAdmin
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);

        Ok(OptionalAdmin(auth_state.session_from_jar(&jar)))
    }
}
