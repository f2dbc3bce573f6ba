//! Authentication endpoints.
//!
//! Login exchanges credentials at the identity provider and stores the
//! issued token in an HTTP-only cookie; logout clears the cookie and
//! nothing else (the server keeps no session state); the check endpoint
//! is a diagnostic for frontends.

use crate::cookies::{clearing_cookie, session_cookie};
use crate::error::AppError;
use crate::extractors::{AuthToken, ClientIp};
use crate::rate_limit::LOGIN_QUOTA;
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::AppendHeaders;
use maitred_core::StaffUser;
use maitred_core::providers::{DataStore, IdentityProvider, NotificationSink};
use serde::{Deserialize, Serialize};

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Staff email.
    pub email: String,

    /// Staff password.
    pub password: String,
}

/// Response body for a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Bearer token, also stored in the session cookie.
    pub access_token: String,

    /// Always `"bearer"`.
    pub token_type: String,

    /// The authenticated staff user.
    pub user: StaffUser,
}

/// Response body for logout.
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    /// Confirmation message.
    pub message: String,
}

/// Response body for the authentication diagnostic.
#[derive(Debug, Serialize)]
pub struct CheckResponse {
    /// Whether the presented credential verified.
    pub authenticated: bool,

    /// The verified identity, when authenticated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<StaffUser>,
}

/// `POST /auth/login`: verify credentials and set the session cookie.
///
/// # Errors
///
/// 401 with one uniform message for every failure mode, 429 over quota.
pub async fn login<S, I, N>(
    State(state): State<AppState<S, I, N>>,
    client_ip: ClientIp,
    Json(request): Json<LoginRequest>,
) -> Result<(AppendHeaders<[(axum::http::HeaderName, String); 1]>, Json<LoginResponse>), AppError>
where
    S: DataStore + 'static,
    I: IdentityProvider + 'static,
    N: NotificationSink + 'static,
{
    state
        .limiter
        .check_and_record("auth/login", client_ip.0, LOGIN_QUOTA)?;
    let session = state
        .identity
        .verify_credentials(&request.email, &request.password)
        .await?;
    Ok((
        AppendHeaders([(SET_COOKIE, session_cookie(&session.access_token))]),
        Json(LoginResponse {
            access_token: session.access_token,
            token_type: "bearer".to_string(),
            user: session.user,
        }),
    ))
}

/// `POST /auth/logout`: clear the session cookie.
///
/// Stateless on the server: the token stays valid at the provider until
/// natural expiry.
pub async fn logout() -> (
    AppendHeaders<[(axum::http::HeaderName, String); 1]>,
    Json<LogoutResponse>,
) {
    (
        AppendHeaders([(SET_COOKIE, clearing_cookie())]),
        Json(LogoutResponse {
            message: "Logged out successfully".to_string(),
        }),
    )
}

/// `GET /auth/check`: report whether the presented credential verifies.
///
/// Diagnostic only; always 200.
pub async fn check<S, I, N>(
    State(state): State<AppState<S, I, N>>,
    AuthToken(token): AuthToken,
) -> Json<CheckResponse>
where
    S: DataStore + 'static,
    I: IdentityProvider + 'static,
    N: NotificationSink + 'static,
{
    let user = match token {
        Some(token) => state.identity.verify_token(&token).await.ok(),
        None => None,
    };
    Json(CheckResponse {
        authenticated: user.is_some(),
        user,
    })
}
