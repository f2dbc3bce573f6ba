//! Subscription endpoint.

use crate::error::AppError;
use crate::extractors::ClientIp;
use crate::rate_limit::SUBSCRIBE_QUOTA;
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use maitred_core::providers::{DataStore, IdentityProvider, NotificationSink};
use maitred_core::{EmailAddress, Subscriber};
use serde::{Deserialize, Serialize};

/// Request body for a subscription.
#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    /// Email address to subscribe.
    pub email: String,
}

/// Response body for a successful subscription.
#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
    /// Confirmation message.
    pub message: String,

    /// The stored subscriber.
    pub subscriber: Subscriber,
}

/// `POST /subscribe`: add a subscriber (public, rate limited).
///
/// # Errors
///
/// 400 on a malformed address, 409 on a duplicate, 429 over quota.
pub async fn subscribe<S, I, N>(
    State(state): State<AppState<S, I, N>>,
    client_ip: ClientIp,
    Json(request): Json<SubscribeRequest>,
) -> Result<(StatusCode, Json<SubscribeResponse>), AppError>
where
    S: DataStore + 'static,
    I: IdentityProvider + 'static,
    N: NotificationSink + 'static,
{
    state
        .limiter
        .check_and_record("subscribe", client_ip.0, SUBSCRIBE_QUOTA)?;
    let email = EmailAddress::parse(&request.email)?;
    let subscriber = state.engine.subscribe(&email).await?;
    Ok((
        StatusCode::CREATED,
        Json(SubscribeResponse {
            message: "Subscription successful".to_string(),
            subscriber,
        }),
    ))
}
