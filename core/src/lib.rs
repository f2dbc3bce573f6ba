//! # Maitred Core
//!
//! Domain model, validation, configuration and the reservation lifecycle
//! engine for the Maitred reservation backend.
//!
//! The system is a thin, stateless orchestration layer over three external
//! services. This crate holds everything that is *not* a wire protocol:
//!
//! - **Model**: [`Reservation`], [`Status`], [`Subscriber`] and the staff
//!   identity types.
//! - **Validation**: the boundary rules gating entry into the status
//!   workflow ([`validate`]).
//! - **Providers**: traits for the three external collaborators: the data
//!   store gateway, the identity verifier and the notification sink
//!   ([`providers`]). Concrete implementations live in `maitred-store`,
//!   `maitred-auth` and `maitred-notify`.
//! - **Engine**: [`ReservationEngine`], the orchestrator that enforces the
//!   status workflow and fans lifecycle events out to the sink.
//!
//! ## Request flow
//!
//! ```text
//! HTTP handler (maitred-web)
//!     │ validated input
//!     ▼
//! ReservationEngine ──────► DataStore (persist transition)
//!     │ after commit
//!     └─ tokio::spawn ────► NotificationSink (best-effort, logged only)
//! ```
//!
//! The engine holds no state of its own; configuration is loaded once at
//! startup into an immutable [`config::Config`] and injected by reference
//! into component constructors.

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod providers;
pub mod validate;

#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

// Re-export main types for convenience
pub use engine::ReservationEngine;
pub use error::{Error, Result};
pub use model::{
    EmailAddress, LifecycleEvent, LoginSession, NewReservation, Reservation, StaffUser, Status,
    Subscriber,
};
