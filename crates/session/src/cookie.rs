//! The `session_id` cookie carrying a session token between client and
//! services.
//!
//! Set on register/login, cleared on logout and on an expired whoami. The
//! cookie is `HttpOnly`, `SameSite=Lax`, scoped to the whole site, with a
//! `Max-Age` equal to the store TTL.

use http::header::{HeaderMap, HeaderValue, COOKIE, SET_COOKIE};

use crate::SESSION_TTL_SECS;

/// Cookie name shared by the gateway and both services.
pub const SESSION_COOKIE_NAME: &str = "session_id";

/// Build the `Set-Cookie` value for a fresh session.
#[must_use]
pub fn build_session_cookie(token: &str) -> String {
    format!(
        "{SESSION_COOKIE_NAME}={token}; HttpOnly; SameSite=Lax; Path=/; Max-Age={SESSION_TTL_SECS}"
    )
}

/// Build the `Set-Cookie` value that clears the session cookie.
#[must_use]
pub fn build_clear_cookie() -> String {
    format!("{SESSION_COOKIE_NAME}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0")
}

/// Set the session cookie on response headers.
pub fn set_session_cookie(headers: &mut HeaderMap, token: &str) {
    if let Ok(value) = HeaderValue::from_str(&build_session_cookie(token)) {
        headers.insert(SET_COOKIE, value);
    }
}

/// Clear the session cookie on response headers.
pub fn clear_session_cookie(headers: &mut HeaderMap) {
    if let Ok(value) = HeaderValue::from_str(&build_clear_cookie()) {
        headers.insert(SET_COOKIE, value);
    }
}

/// Extract the session token from a request's `Cookie` header, if present.
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    let cookie_header = headers.get(COOKIE)?;
    let cookie_str = cookie_header.to_str().ok()?;

    // Parse cookie string (format: "name1=value1; name2=value2")
    for part in cookie_str.split(';') {
        let part = part.trim();
        if let Some(value) = part.strip_prefix(&format!("{SESSION_COOKIE_NAME}=")) {
            let value = value.trim();
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_cookie_carries_required_attributes() {
        let cookie = build_session_cookie("tok123");

        assert!(cookie.starts_with("session_id=tok123"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=3600"));
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        let cookie = build_clear_cookie();
        assert!(cookie.starts_with("session_id=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn extract_finds_token_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; session_id=abc123; lang=ko"),
        );

        assert_eq!(extract_session_token(&headers), Some("abc123".to_string()));
    }

    #[test]
    fn extract_returns_none_without_cookie_header() {
        let headers = HeaderMap::new();
        assert_eq!(extract_session_token(&headers), None);
    }

    #[test]
    fn extract_ignores_other_cookies_and_empty_values() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("other=value"));
        assert_eq!(extract_session_token(&headers), None);

        headers.insert(COOKIE, HeaderValue::from_static("session_id="));
        assert_eq!(extract_session_token(&headers), None);
    }

    #[test]
    fn set_and_clear_write_the_header() {
        let mut headers = HeaderMap::new();
        set_session_cookie(&mut headers, "tok");
        assert!(headers
            .get(SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .contains("session_id=tok"));

        clear_session_cookie(&mut headers);
        assert!(headers
            .get(SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .contains("Max-Age=0"));
    }
}
