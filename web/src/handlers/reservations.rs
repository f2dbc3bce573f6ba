//! Reservation endpoints.

use crate::error::AppError;
use crate::extractors::{AuthUser, ClientIp};
use crate::rate_limit::CREATE_QUOTA;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use maitred_core::providers::{DataStore, IdentityProvider, NotificationSink};
use maitred_core::{EmailAddress, NewReservation, Reservation, Status};
use serde::Deserialize;
use uuid::Uuid;

/// Query parameters for the admin list.
#[derive(Debug, Deserialize)]
pub struct AdminListQuery {
    /// Restrict the list to one status.
    pub status: Option<Status>,
}

/// Request body for a status update.
#[derive(Debug, Deserialize)]
pub struct StatusUpdateBody {
    /// The status to transition to.
    pub status: Status,
}

/// `POST /reservations`: create a reservation (public, rate limited).
///
/// Returns 201 with the stored record; the status is always `pending`.
///
/// # Errors
///
/// 400 on validation failure, 429 over quota, 504 on store timeout, or
/// the store's own error status.
pub async fn create<S, I, N>(
    State(state): State<AppState<S, I, N>>,
    client_ip: ClientIp,
    Json(submission): Json<NewReservation>,
) -> Result<(StatusCode, Json<Reservation>), AppError>
where
    S: DataStore + 'static,
    I: IdentityProvider + 'static,
    N: NotificationSink + 'static,
{
    state
        .limiter
        .check_and_record("reservations/create", client_ip.0, CREATE_QUOTA)?;
    let created = state.engine.create(submission).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /reservations/:email`: list a guest's reservations (public).
///
/// # Errors
///
/// 400 when the path segment is not an email address; store failures as
/// mapped by the gateway.
pub async fn list_by_email<S, I, N>(
    State(state): State<AppState<S, I, N>>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Reservation>>, AppError>
where
    S: DataStore + 'static,
    I: IdentityProvider + 'static,
    N: NotificationSink + 'static,
{
    let email = EmailAddress::parse(&email)?;
    let listed = state.engine.list_by_email(&email).await?;
    Ok(Json(listed))
}

/// `GET /reservations/status/:status`: list reservations in a status
/// (staff only).
///
/// # Errors
///
/// 401 without a verified identity, 400 on an unknown status.
pub async fn list_by_status<S, I, N>(
    State(state): State<AppState<S, I, N>>,
    AuthUser(_staff): AuthUser,
    Path(status): Path<String>,
) -> Result<Json<Vec<Reservation>>, AppError>
where
    S: DataStore + 'static,
    I: IdentityProvider + 'static,
    N: NotificationSink + 'static,
{
    let status: Status = status.parse()?;
    let listed = state.engine.list_by_status(status).await?;
    Ok(Json(listed))
}

/// `GET /admin/reservations?status=`: list all reservations (staff only).
///
/// # Errors
///
/// 401 without a verified identity; store failures as mapped by the
/// gateway.
pub async fn list_all<S, I, N>(
    State(state): State<AppState<S, I, N>>,
    AuthUser(_staff): AuthUser,
    Query(query): Query<AdminListQuery>,
) -> Result<Json<Vec<Reservation>>, AppError>
where
    S: DataStore + 'static,
    I: IdentityProvider + 'static,
    N: NotificationSink + 'static,
{
    let listed = state.engine.list_all(query.status).await?;
    Ok(Json(listed))
}

/// `PATCH /reservations/:id/status`: update a reservation's status
/// (staff only).
///
/// # Errors
///
/// 401 without a verified identity, 400 on a malformed id, 404 when the
/// store reports no matching record.
pub async fn update_status<S, I, N>(
    State(state): State<AppState<S, I, N>>,
    AuthUser(_staff): AuthUser,
    Path(id): Path<String>,
    Json(body): Json<StatusUpdateBody>,
) -> Result<Json<Reservation>, AppError>
where
    S: DataStore + 'static,
    I: IdentityProvider + 'static,
    N: NotificationSink + 'static,
{
    let id = Uuid::parse_str(&id).map_err(|_| AppError::bad_request("Invalid reservation id"))?;
    let updated = state.engine.update_status(id, body.status).await?;
    Ok(Json(updated))
}
