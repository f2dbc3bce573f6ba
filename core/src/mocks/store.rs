//! Mock data store.

use crate::error::{Error, Result};
use crate::model::{EmailAddress, NewReservation, Reservation, Status, Subscriber};
use crate::providers::DataStore;
use std::sync::{Arc, Mutex, PoisonError};
use uuid::Uuid;

/// In-memory mock of the data store gateway.
///
/// Clones share the same storage, so a test can keep a handle for
/// inspection while the engine owns another. Lists are returned in
/// (date, time) ascending order, matching the gateway contract. A primed
/// failure makes every call return that error instead.
#[derive(Debug, Clone, Default)]
pub struct MockStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    reservations: Vec<Reservation>,
    subscribers: Vec<Subscriber>,
    fail_with: Option<Error>,
    create_calls: u32,
}

impl MockStore {
    /// Create an empty mock store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing reservations.
    #[must_use]
    pub fn with_reservations(self, reservations: Vec<Reservation>) -> Self {
        self.lock().reservations = reservations;
        self
    }

    /// Make every subsequent call fail with the given error.
    #[must_use]
    pub fn failing_with(self, error: Error) -> Self {
        self.lock().fail_with = Some(error);
        self
    }

    /// Number of reservation-create calls the store has received.
    #[must_use]
    pub fn create_calls(&self) -> u32 {
        self.lock().create_calls
    }

    /// Snapshot of all stored reservations.
    #[must_use]
    pub fn reservations(&self) -> Vec<Reservation> {
        self.lock().reservations.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_failure(&self) -> Result<()> {
        match &self.lock().fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn sorted(mut records: Vec<Reservation>) -> Vec<Reservation> {
        records.sort_by(|a, b| (a.date, &a.time).cmp(&(b.date, &b.time)));
        records
    }
}

impl DataStore for MockStore {
    async fn create_reservation(
        &self,
        reservation: &NewReservation,
        status: Status,
    ) -> Result<Reservation> {
        self.lock().create_calls += 1;
        self.check_failure()?;
        let stored = Reservation {
            id: Uuid::new_v4(),
            name: reservation.name.clone(),
            email: reservation.email.clone(),
            phone: reservation.phone.clone(),
            guests: reservation.guests.clone(),
            date: reservation.date,
            time: reservation.time.clone(),
            occasion: reservation.occasion.clone(),
            special_requests: reservation.special_requests.clone(),
            status,
        };
        self.lock().reservations.push(stored.clone());
        Ok(stored)
    }

    async fn update_reservation_status(
        &self,
        id: Uuid,
        status: Status,
    ) -> Result<Option<Reservation>> {
        self.check_failure()?;
        let mut inner = self.lock();
        Ok(inner.reservations.iter_mut().find(|r| r.id == id).map(
            |record| {
                record.status = status;
                record.clone()
            },
        ))
    }

    async fn list_by_email(&self, email: &EmailAddress) -> Result<Vec<Reservation>> {
        self.check_failure()?;
        let matching = self
            .lock()
            .reservations
            .iter()
            .filter(|r| r.email == email.as_str())
            .cloned()
            .collect();
        Ok(Self::sorted(matching))
    }

    async fn list_by_status(&self, status: Status) -> Result<Vec<Reservation>> {
        self.check_failure()?;
        let matching = self
            .lock()
            .reservations
            .iter()
            .filter(|r| r.status == status)
            .cloned()
            .collect();
        Ok(Self::sorted(matching))
    }

    async fn list_all(&self, status: Option<Status>) -> Result<Vec<Reservation>> {
        self.check_failure()?;
        let matching = self
            .lock()
            .reservations
            .iter()
            .filter(|r| status.is_none_or(|wanted| r.status == wanted))
            .cloned()
            .collect();
        Ok(Self::sorted(matching))
    }

    async fn create_subscriber(&self, email: &EmailAddress) -> Result<Subscriber> {
        self.check_failure()?;
        let mut inner = self.lock();
        if inner.subscribers.iter().any(|s| s.email == email.as_str()) {
            return Err(Error::AlreadySubscribed);
        }
        let subscriber = Subscriber {
            id: Uuid::new_v4(),
            email: email.as_str().to_string(),
        };
        inner.subscribers.push(subscriber.clone());
        Ok(subscriber)
    }
}
