//! Data store gateway trait.

use crate::error::Result;
use crate::model::{EmailAddress, NewReservation, Reservation, Status, Subscriber};
use std::future::Future;
use uuid::Uuid;

/// Gateway to the remote reservation and subscriber collections.
///
/// Implementations speak a filtered REST protocol (equality predicates,
/// multi-field ordering, return-representation writes) against a store
/// that is the sole source of truth; the engine holds no persistent state
/// of its own. List operations always order by (date ascending, time
/// ascending).
pub trait DataStore: Send + Sync {
    /// Persist a new reservation with the given status and return the
    /// stored representation, including the generated identifier.
    ///
    /// # Errors
    ///
    /// Timeouts map to [`crate::Error::UpstreamTimeout`]; any other store
    /// failure to [`crate::Error::Upstream`] or
    /// [`crate::Error::Transport`].
    fn create_reservation(
        &self,
        reservation: &NewReservation,
        status: Status,
    ) -> impl Future<Output = Result<Reservation>> + Send;

    /// Update the status of the reservation with the given id.
    ///
    /// Returns `Ok(None)` when no record matches the id.
    ///
    /// # Errors
    ///
    /// Same mapping as [`DataStore::create_reservation`].
    fn update_reservation_status(
        &self,
        id: Uuid,
        status: Status,
    ) -> impl Future<Output = Result<Option<Reservation>>> + Send;

    /// List reservations for a contact email.
    ///
    /// # Errors
    ///
    /// Same mapping as [`DataStore::create_reservation`].
    fn list_by_email(
        &self,
        email: &EmailAddress,
    ) -> impl Future<Output = Result<Vec<Reservation>>> + Send;

    /// List reservations currently in a status.
    ///
    /// # Errors
    ///
    /// Same mapping as [`DataStore::create_reservation`].
    fn list_by_status(
        &self,
        status: Status,
    ) -> impl Future<Output = Result<Vec<Reservation>>> + Send;

    /// List all reservations, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Same mapping as [`DataStore::create_reservation`].
    fn list_all(
        &self,
        status: Option<Status>,
    ) -> impl Future<Output = Result<Vec<Reservation>>> + Send;

    /// Create a subscriber.
    ///
    /// # Errors
    ///
    /// A store-reported unique-constraint conflict maps to
    /// [`crate::Error::AlreadySubscribed`]; everything else follows the
    /// mapping of [`DataStore::create_reservation`].
    fn create_subscriber(
        &self,
        email: &EmailAddress,
    ) -> impl Future<Output = Result<Subscriber>> + Send;
}
