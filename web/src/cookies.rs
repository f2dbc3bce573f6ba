//! Session cookie handling.
//!
//! The session token is carried in an HTTP-only cookie so page scripts
//! never see it. Logout is purely a client-side credential removal: the
//! server keeps no session state and the token stays valid at the
//! provider until natural expiry.

use axum::http::HeaderMap;
use axum::http::header::COOKIE;

/// Name of the session cookie.
pub const AUTH_COOKIE: &str = "auth_token";

/// Session cookie lifetime in seconds (one hour).
const MAX_AGE_SECS: u32 = 3600;

/// `SameSite` cookie policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSitePolicy {
    /// Strict (same-site only).
    Strict,

    /// Lax (cross-site GET allowed).
    Lax,

    /// None (cross-site allowed, requires Secure).
    None,
}

impl SameSitePolicy {
    /// Attribute value as written into the `Set-Cookie` header.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "Strict",
            Self::Lax => "Lax",
            Self::None => "None",
        }
    }
}

/// Build the `Set-Cookie` value that stores the session token.
///
/// HTTP-only, Secure, SameSite=Lax, one-hour lifetime, whole-site path.
#[must_use]
pub fn session_cookie(token: &str) -> String {
    format!(
        "{AUTH_COOKIE}={token}; Max-Age={MAX_AGE_SECS}; Path=/; HttpOnly; Secure; SameSite={}",
        SameSitePolicy::Lax.as_str()
    )
}

/// Build the `Set-Cookie` value that clears the session cookie.
#[must_use]
pub fn clearing_cookie() -> String {
    format!(
        "{AUTH_COOKIE}=; Max-Age=0; Path=/; HttpOnly; Secure; SameSite={}",
        SameSitePolicy::Lax.as_str()
    )
}

/// Extract the session token from the request's `Cookie` headers.
#[must_use]
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().strip_prefix(AUTH_COOKIE))
        .filter_map(|rest| rest.strip_prefix('='))
        .map(str::to_string)
        .next()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn session_cookie_is_http_only_and_bounded() {
        let cookie = session_cookie("jwt-token");
        assert!(cookie.starts_with("auth_token=jwt-token; "));
        assert!(cookie.contains("Max-Age=3600"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=Lax"));
    }

    #[test]
    fn clearing_cookie_expires_immediately() {
        let cookie = clearing_cookie();
        assert!(cookie.starts_with("auth_token=; "));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn token_is_found_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; auth_token=jwt-token; lang=en"),
        );
        assert_eq!(session_token(&headers), Some("jwt-token".to_string()));
    }

    #[test]
    fn missing_or_lookalike_cookies_yield_none() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=dark"));
        assert_eq!(session_token(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("auth_token_backup=nope"),
        );
        assert_eq!(session_token(&headers), None);
    }
}
