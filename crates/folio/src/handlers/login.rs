//! Login page handlers.

use axum::{
    extract::{rejection::FormRejection, Query, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::CookieJar;
use folio_auth::{AuthState, OptionalAdmin};
use folio_core::auth::dashboard_return_to;
use serde::Deserialize;

use super::{
    flash::{redirect_with_flash, take_flash, FlashMessage},
    pages::{HtmlTemplate, LoginTemplate},
};

#[derive(Debug, Deserialize, Default)]
pub struct LoginQuery {
    pub return_to: Option<String>,
}

/// Body of the login form.
#[derive(Debug, Deserialize, Default)]
pub struct LoginForm {
    pub username: Option<String>,
    pub password: Option<String>,
    pub return_to: Option<String>,
}

/// Handler for GET /auth/login
///
/// - Unauthenticated: renders the login form
/// - Authenticated: redirects to the dashboard
pub async fn login_page(
    admin: OptionalAdmin,
    jar: CookieJar,
    Query(query): Query<LoginQuery>,
) -> Response {
    let return_to = dashboard_return_to(query.return_to.as_deref()).to_string();

    if admin.is_admin() {
        return Redirect::to(&return_to).into_response();
    }

    let (jar, flash) = take_flash(jar);
    (jar, HtmlTemplate(LoginTemplate { flash, return_to })).into_response()
}

/// Handler for POST /auth/login
///
/// Success sets the session cookie and redirects into the dashboard; failure
/// goes back to the form with an error flash.
pub async fn login_submit(
    State(auth): State<AuthState>,
    jar: CookieJar,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Response {
    let Form(form) = form.unwrap_or_default();
    let return_to = dashboard_return_to(form.return_to.as_deref()).to_string();
    let retry_url = format!("/auth/login?return_to={}", urlencoding::encode(&return_to));

    let username = form.username.as_deref().unwrap_or_default();
    let password = form.password.as_deref().unwrap_or_default();
    if username.is_empty() || password.is_empty() {
        return redirect_with_flash(
            &retry_url,
            FlashMessage::error("Username and password are required"),
        );
    }

    if !auth.check_credentials(username, password) {
        tracing::warn!(username, "failed admin login");
        return redirect_with_flash(&retry_url, FlashMessage::error("Invalid credentials"));
    }

    match auth.start_session(jar) {
        Ok(jar) => {
            tracing::info!(username, "admin logged in");
            (jar, Redirect::to(&return_to)).into_response()
        }
        Err(error) => {
            tracing::error!(%error, "failed to issue session");
            redirect_with_flash(&retry_url, FlashMessage::error("Login failed"))
        }
    }
}
