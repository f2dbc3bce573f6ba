//! Custom Axum extractors.
//!
//! - [`ClientIp`]: client address for rate-limit keys
//! - [`AuthToken`]: raw session token, cookie first then bearer header
//! - [`AuthUser`]: the authentication gate; verifies the token against
//!   the identity provider and rejects with a uniform 401
//!
//! # Examples
//!
//! ```ignore
//! async fn handler(
//!     State(state): State<AppState<S, I, N>>,
//!     AuthUser(staff): AuthUser,
//!     client_ip: ClientIp,
//! ) -> Result<Json<Response>, AppError> {
//!     tracing::info!(staff = %staff.email, ip = %client_ip.0, "handling");
//!     Ok(Json(response))
//! }
//! ```

use crate::cookies;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};
use maitred_core::providers::{DataStore, IdentityProvider, NotificationSink};
use maitred_core::{Error, StaffUser};
use std::net::IpAddr;

/// Client IP address.
///
/// Taken from `X-Forwarded-For` (first entry), then `X-Real-IP`, then a
/// loopback fallback. Only used as a rate-limit key, so a spoofable
/// header is acceptable: the quotas are a nuisance brake, not a security
/// boundary.
#[derive(Debug, Clone, Copy)]
pub struct ClientIp(pub IpAddr);

#[async_trait]
impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(client_ip(&parts.headers)))
    }
}

fn client_ip(headers: &HeaderMap) -> IpAddr {
    if let Some(forwarded) = headers.get("X-Forwarded-For") {
        if let Ok(list) = forwarded.to_str() {
            if let Some(first) = list.split(',').next() {
                if let Ok(ip) = first.trim().parse::<IpAddr>() {
                    return ip;
                }
            }
        }
    }
    if let Some(real_ip) = headers.get("X-Real-IP") {
        if let Ok(ip) = real_ip.to_str().unwrap_or_default().parse::<IpAddr>() {
            return ip;
        }
    }
    IpAddr::from([127, 0, 0, 1])
}

/// Raw session token, if any.
///
/// The cookie takes precedence over the `Authorization: Bearer` header
/// when both are present.
#[derive(Debug, Clone)]
pub struct AuthToken(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for AuthToken
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(extract_token(&parts.headers)))
    }
}

fn extract_token(headers: &HeaderMap) -> Option<String> {
    cookies::session_token(headers).or_else(|| bearer_token(headers))
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}

/// The authentication gate for staff-only operations.
///
/// Fails closed with one uniform 401: a missing token and a token the
/// provider rejects are indistinguishable to the caller.
#[derive(Debug, Clone)]
pub struct AuthUser(pub StaffUser);

#[async_trait]
impl<S, I, N> FromRequestParts<AppState<S, I, N>> for AuthUser
where
    S: DataStore + 'static,
    I: IdentityProvider + 'static,
    N: NotificationSink + 'static,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S, I, N>,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(&parts.headers)
            .ok_or_else(|| AppError::unauthorized(Error::Unauthenticated.to_string()))?;
        let user = state
            .identity
            .verify_token(&token)
            .await
            .map_err(|_| AppError::unauthorized(Error::Unauthenticated.to_string()))?;
        Ok(Self(user))
    }
}
