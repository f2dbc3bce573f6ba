//! Router composition.

use crate::handlers::{auth, reservations, subscribe};
use crate::state::AppState;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, patch, post};
use axum::Router;
use maitred_core::providers::{DataStore, IdentityProvider, NotificationSink};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Compose the full HTTP surface over the given state.
///
/// # Routes
///
/// - `POST /reservations` - create a reservation (rate limited)
/// - `GET /reservations/:email` - list by contact email
/// - `GET /reservations/status/:status` - list by status (staff)
/// - `GET /admin/reservations` - list all, `?status=` filter (staff)
/// - `PATCH /reservations/:id/status` - update status (staff)
/// - `POST /subscribe` - add a subscriber (rate limited)
/// - `POST /auth/login` - login (rate limited)
/// - `POST /auth/logout` - logout
/// - `GET /auth/check` - authentication diagnostic
pub fn router<S, I, N>(state: AppState<S, I, N>, allowed_origins: &[String]) -> Router
where
    S: DataStore + 'static,
    I: IdentityProvider + 'static,
    N: NotificationSink + 'static,
{
    Router::new()
        // Reservation routes
        .route("/reservations", post(reservations::create::<S, I, N>))
        .route(
            "/reservations/:email",
            get(reservations::list_by_email::<S, I, N>),
        )
        .route(
            "/reservations/status/:status",
            get(reservations::list_by_status::<S, I, N>),
        )
        // One path position can hold only one parameter name, so the id
        // segment reuses `:email`.
        .route(
            "/reservations/:email/status",
            patch(reservations::update_status::<S, I, N>),
        )
        .route("/admin/reservations", get(reservations::list_all::<S, I, N>))
        // Subscription route
        .route("/subscribe", post(subscribe::subscribe::<S, I, N>))
        // Auth routes
        .route("/auth/login", post(auth::login::<S, I, N>))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/check", get(auth::check::<S, I, N>))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Credentialed CORS restricted to the configured origins.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
