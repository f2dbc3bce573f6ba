//! The reservation lifecycle engine.
//!
//! A stateless orchestrator: it validates submissions, forces the initial
//! status, drives the store gateway, and fans lifecycle events out to the
//! notification sink without ever letting a dispatch failure touch the
//! caller's response. Validation and authentication rejection happen
//! before any external call; a failed store call fails the whole
//! operation immediately; there are no retries anywhere.

use crate::error::{Error, Result};
use crate::model::{
    EmailAddress, LifecycleEvent, NewReservation, Reservation, Status, Subscriber,
};
use crate::providers::{DataStore, NotificationSink};
use crate::validate::validate_new_reservation;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Orchestrates the reservation status workflow over injected providers.
///
/// The engine is cheap to share: handlers hold it behind an `Arc` and
/// call it concurrently; it owns no locks and no mutable state.
pub struct ReservationEngine<S, N> {
    store: S,
    sink: Arc<N>,
}

impl<S, N> ReservationEngine<S, N>
where
    S: DataStore,
    N: NotificationSink + 'static,
{
    /// Create an engine over the given gateway and notification sink.
    pub fn new(store: S, sink: N) -> Self {
        Self {
            store,
            sink: Arc::new(sink),
        }
    }

    /// Validate and persist a new reservation.
    ///
    /// The stored status is always [`Status::Pending`] regardless of any
    /// client-supplied value. After the store confirms the write, a
    /// "reservation received" notification is dispatched detached; its
    /// failure never fails or delays the create.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] before any store call; store failures as
    /// mapped by the gateway.
    pub async fn create(&self, submission: NewReservation) -> Result<Reservation> {
        validate_new_reservation(&submission)?;
        let created = self
            .store
            .create_reservation(&submission, Status::Pending)
            .await?;
        debug!(reservation = %created.id, "reservation created");
        self.dispatch(LifecycleEvent::Received, created.clone());
        Ok(created)
    }

    /// Apply a staff status change to an existing reservation.
    ///
    /// Any status may be assigned from any current status, including the
    /// one it already holds; entering [`Status::Confirmed`] or
    /// [`Status::Cancelled`] notifies the guest (again, if repeated).
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when the store reports no matching record;
    /// store failures as mapped by the gateway.
    pub async fn update_status(&self, id: Uuid, status: Status) -> Result<Reservation> {
        let updated = self
            .store
            .update_reservation_status(id, status)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Reservation {id} not found")))?;
        debug!(reservation = %updated.id, status = %status, "reservation status updated");
        if status.is_notifiable() {
            self.dispatch(LifecycleEvent::StatusChanged, updated.clone());
        }
        Ok(updated)
    }

    /// List reservations for a contact email, ordered by (date, time).
    ///
    /// # Errors
    ///
    /// Store failures as mapped by the gateway.
    pub async fn list_by_email(&self, email: &EmailAddress) -> Result<Vec<Reservation>> {
        self.store.list_by_email(email).await
    }

    /// List reservations in a status, ordered by (date, time).
    ///
    /// # Errors
    ///
    /// Store failures as mapped by the gateway.
    pub async fn list_by_status(&self, status: Status) -> Result<Vec<Reservation>> {
        self.store.list_by_status(status).await
    }

    /// List all reservations, optionally filtered by status, ordered by
    /// (date, time).
    ///
    /// # Errors
    ///
    /// Store failures as mapped by the gateway.
    pub async fn list_all(&self, status: Option<Status>) -> Result<Vec<Reservation>> {
        self.store.list_all(status).await
    }

    /// Subscribe an email address.
    ///
    /// # Errors
    ///
    /// [`Error::AlreadySubscribed`] on a store-reported duplicate; other
    /// store failures surface as-is.
    pub async fn subscribe(&self, email: &EmailAddress) -> Result<Subscriber> {
        self.store.create_subscriber(email).await
    }

    /// Fire-and-forget notification dispatch.
    ///
    /// Errors are caught at the task boundary and routed to the log only.
    fn dispatch(&self, event: LifecycleEvent, reservation: Reservation) {
        let sink = Arc::clone(&self.sink);
        tokio::spawn(async move {
            if let Err(err) = sink.notify(event, &reservation).await {
                warn!(
                    reservation = %reservation.id,
                    event = ?event,
                    error = %err,
                    "notification dispatch failed"
                );
            }
        });
    }
}
