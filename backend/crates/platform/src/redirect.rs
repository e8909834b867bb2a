//! Post-authentication redirect targets
//!
//! A `next` parameter is only followed when it is a same-origin path.

/// Default landing page after signing in
pub const DEFAULT_REDIRECT: &str = "/feed";

/// `next` if it is a local path (`/...` but not `//...` or `/\...`), else `/feed`
pub fn safe_redirect_path(next: Option<&str>) -> &str {
    match next {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.starts_with("/\\")
                && !path.chars().any(char::is_control) =>
        {
            path
        }
        _ => DEFAULT_REDIRECT,
    }
}
