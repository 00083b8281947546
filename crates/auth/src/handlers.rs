//! HTTP handlers for auth routes.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Redirect},
    routing::post,
    Json, Router,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde_json::json;

use crate::error::AuthError;
use crate::AuthState;

/// Body of `POST /api/auth/login`.
#[derive(Debug, Deserialize, Default)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    /// Returns both fields when present and non-empty.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let username = self.username.as_deref().filter(|u| !u.is_empty())?;
        let password = self.password.as_deref().filter(|p| !p.is_empty())?;
        Some((username, password))
    }
}

/// Creates the auth router.
///
/// Routes:
/// - `POST /api/auth/login` - Verify credentials and set the session cookie
/// - `DELETE /api/auth/login` - Clear the session cookie
/// - `POST /auth/logout` - Clear the session cookie and go to the login page
pub fn auth_routes() -> Router<AuthState> {
    Router::new()
        .route("/api/auth/login", post(api_login).delete(api_logout))
        .route("/auth/logout", post(logout))
}

async fn api_login(
    State(state): State<AuthState>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AuthError> {
    let Json(request) = payload.unwrap_or_default();
    let (username, password) = request
        .credentials()
        .ok_or(AuthError::MissingCredentials)?;

    if !state.check_credentials(username, password) {
        tracing::warn!(username, "failed admin login");
        return Err(AuthError::InvalidCredentials);
    }

    let jar = state.start_session(jar)?;
    tracing::info!(username, "admin logged in");

    Ok((jar, Json(json!({ "success": true }))))
}

async fn api_logout(State(state): State<AuthState>, jar: CookieJar) -> impl IntoResponse {
    (state.clear_session(jar), Json(json!({ "success": true })))
}

async fn logout(State(state): State<AuthState>, jar: CookieJar) -> impl IntoResponse {
    tracing::info!("admin logged out");
    (state.clear_session(jar), Redirect::to("/auth/login"))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::state::tests::test_state;

    fn login_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn login_with_valid_credentials_sets_cookie() {
        let app = auth_routes().with_state(test_state());

        let response = app
            .oneshot(login_request(
                r#"{"username":"admin","password":"password123"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(cookie.starts_with("session="));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Strict"));
        assert_eq!(body_json(response).await, json!({ "success": true }));
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_unauthorized() {
        let app = auth_routes().with_state(test_state());

        let response = app
            .oneshot(login_request(r#"{"username":"admin","password":"nope"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Invalid credentials" })
        );
    }

    #[tokio::test]
    async fn login_with_missing_fields_is_bad_request() {
        for body in [r#"{"username":"admin"}"#, r#"{}"#, "not json"] {
            let app = auth_routes().with_state(test_state());
            let response = app.oneshot(login_request(body)).await.unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
            assert_eq!(
                body_json(response).await,
                json!({ "error": "Username and password are required" })
            );
        }
    }

    #[tokio::test]
    async fn delete_login_clears_cookie() {
        let app = auth_routes().with_state(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/auth/login")
                    .header(header::COOKIE, "session=whatever")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(cookie.starts_with("session="));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn logout_redirects_to_login_page() {
        let app = auth_routes().with_state(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/auth/logout")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/auth/login"
        );
    }
}
