/// Returns `path` if it is safe to redirect to after login.
///
/// Only same-origin absolute paths are accepted: the value must start with a
/// single `/`, contain no scheme separator and no control characters.
///
/// ```
/// use folio_core::auth::validate_return_to;
///
/// assert_eq!(validate_return_to("/dashboard/projects"), Some("/dashboard/projects"));
/// assert_eq!(validate_return_to("//evil.com"), None);
/// assert_eq!(validate_return_to("https://evil.com"), None);
/// ```
pub fn validate_return_to(path: &str) -> Option<&str> {
    let same_origin = path.starts_with('/') && !path.starts_with("//") && !path.starts_with("/\\");
    let clean = !path.contains("://") && !path.chars().any(char::is_control);

    (same_origin && clean).then_some(path)
}

/// Like [`validate_return_to`], but also confines the target to the dashboard.
pub fn dashboard_return_to(path: Option<&str>) -> &str {
    path.and_then(validate_return_to)
        .filter(|p| *p == "/dashboard" || p.starts_with("/dashboard/"))
        .unwrap_or(DEFAULT_RETURN_TO)
}

/// Where the admin lands after logging in.
pub const DEFAULT_RETURN_TO: &str = "/dashboard/projects";
