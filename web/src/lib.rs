//! # Maitred Web
//!
//! Axum HTTP surface for the Maitred reservation backend.
//!
//! The handlers are a thin imperative shell: they extract and parse
//! request data, enforce the per-route quotas and the authentication
//! gate, call the [`maitred_core::ReservationEngine`] or the identity
//! provider, and map the shared error taxonomy onto HTTP responses.
//!
//! # Surface
//!
//! ```text
//! POST  /reservations                create (public, rate limited)
//! GET   /reservations/:email         list by contact email (public)
//! GET   /reservations/status/:status list by status (staff)
//! GET   /admin/reservations?status=  list all (staff)
//! PATCH /reservations/:id/status     update status (staff)
//! POST  /subscribe                   subscribe (public, rate limited)
//! POST  /auth/login                  login, sets the session cookie
//! POST  /auth/logout                 clears the session cookie
//! GET   /auth/check                  authentication diagnostic
//! ```

pub mod cookies;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod rate_limit;
pub mod router;
pub mod state;

// Re-export key types for convenience
pub use error::AppError;
pub use extractors::{AuthUser, ClientIp};
pub use rate_limit::FixedWindowLimiter;
pub use router::router;
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
