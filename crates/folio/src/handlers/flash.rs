//! One-shot flash messages carried across redirects in a cookie.
//!
//! The dashboard sets a `flash_message` cookie before redirecting; the next
//! page render reads it and clears it.

use axum::http::header::SET_COOKIE;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

pub const FLASH_COOKIE: &str = "flash_message";

/// Flash message structure stored in cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashMessage {
    /// "error" or "success"
    #[serde(rename = "type")]
    pub message_type: String,
    pub message: String,
    /// Whether the message should auto-dismiss after a few seconds
    pub auto_dismiss: bool,
}

impl FlashMessage {
    /// Create an error flash message that requires manual dismissal.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message_type: "error".to_string(),
            message: message.into(),
            auto_dismiss: false,
        }
    }

    /// Create a success flash message that auto-dismisses.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message_type: "success".to_string(),
            message: message.into(),
            auto_dismiss: true,
        }
    }

    /// Serialize to JSON for cookie storage.
    pub fn to_cookie_value(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Build a Set-Cookie header value for the flash message.
    ///
    /// Cookie properties:
    /// - Path: / (accessible from any page)
    /// - SameSite: Lax (sent on navigation, not cross-site requests)
    /// - Max-Age: 60 (expires after 60 seconds as a safety net)
    pub fn to_set_cookie_header(&self) -> String {
        let encoded = urlencoding::encode(&self.to_cookie_value()).into_owned();
        format!("{FLASH_COOKIE}={encoded}; Path=/; SameSite=Lax; Max-Age=60")
    }

    /// Parses a cookie value written by [`Self::to_set_cookie_header`].
    pub fn from_cookie_value(value: &str) -> Option<Self> {
        let decoded = urlencoding::decode(value).ok()?;
        serde_json::from_str(&decoded).ok()
    }
}

/// Create a redirect response with a flash message cookie.
pub fn redirect_with_flash(url: &str, flash: FlashMessage) -> Response {
    let cookie_header = flash.to_set_cookie_header();

    ([(SET_COOKIE, cookie_header)], Redirect::to(url)).into_response()
}

/// Reads the pending flash message and removes its cookie from `jar`.
pub fn take_flash(jar: CookieJar) -> (CookieJar, Option<FlashMessage>) {
    let Some(value) = jar.get(FLASH_COOKIE).map(|c| c.value().to_string()) else {
        return (jar, None);
    };

    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/").build());
    (jar, FlashMessage::from_cookie_value(&value))
}

#[cfg(test)]
mod tests {
    use axum::http::{header, StatusCode};

    use super::*;

    #[test]
    fn test_to_cookie_value() {
        let flash = FlashMessage::error("Test message");
        let json = flash.to_cookie_value();
        assert!(json.contains("\"type\":\"error\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(json.contains("\"autoDismiss\":false"));
    }

    #[test]
    fn test_to_set_cookie_header() {
        let flash = FlashMessage::success("Project created successfully");
        let header = flash.to_set_cookie_header();
        assert!(header.starts_with("flash_message="));
        assert!(header.contains("Path=/"));
        assert!(header.contains("SameSite=Lax"));
        assert!(header.contains("Max-Age=60"));
    }

    #[test]
    fn cookie_value_round_trips_through_header_encoding() {
        let flash = FlashMessage::error("Slug already exists; try another");
        let header = flash.to_set_cookie_header();
        let value = header
            .strip_prefix("flash_message=")
            .and_then(|rest| rest.split(';').next())
            .unwrap();

        assert_eq!(FlashMessage::from_cookie_value(value), Some(flash));
    }

    #[test]
    fn take_flash_clears_cookie() {
        let flash = FlashMessage::success("Saved");
        let encoded = urlencoding::encode(&flash.to_cookie_value()).into_owned();
        let jar = CookieJar::new().add(Cookie::new(FLASH_COOKIE, encoded));

        let (jar, taken) = take_flash(jar);

        assert_eq!(taken, Some(flash));
        assert!(jar.get(FLASH_COOKIE).is_none());
    }

    #[test]
    fn take_flash_without_cookie() {
        let (_, taken) = take_flash(CookieJar::new());
        assert!(taken.is_none());
    }

    #[test]
    fn redirect_sets_cookie() {
        let response = redirect_with_flash("/dashboard/projects", FlashMessage::success("Done"));

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/dashboard/projects"
        );
        assert!(response.headers().get(header::SET_COOKIE).is_some());
    }
}
