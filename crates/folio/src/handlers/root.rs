//! Root route handler.

use axum::response::Redirect;
use folio_core::auth::DEFAULT_RETURN_TO;

/// Handler for GET / and GET /dashboard
///
/// Both land on the project list; the dashboard gate sends anonymous
/// visitors on to the login page.
pub async fn root_redirect() -> Redirect {
    Redirect::to(DEFAULT_RETURN_TO)
}
