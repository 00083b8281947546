//! Dashboard access gate.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use folio_auth::OptionalAdmin;
use folio_core::auth::DEFAULT_RETURN_TO;

/// Lets admins through and sends everyone else to the login page.
///
/// GET requests keep their target in `return_to` so the admin lands back on
/// it after signing in.
pub async fn dashboard_gate(admin: OptionalAdmin, request: Request, next: Next) -> Response {
    if admin.is_admin() {
        return next.run(request).await;
    }

    let target = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or(DEFAULT_RETURN_TO);
    tracing::debug!(method = %request.method(), target, "unauthenticated dashboard request");

    if request.method() == axum::http::Method::GET && target != DEFAULT_RETURN_TO {
        let location = format!("/auth/login?return_to={}", urlencoding::encode(target));
        return Redirect::to(&location).into_response();
    }
    Redirect::to("/auth/login").into_response()
}
