//! Notification sink trait.

use crate::error::Result;
use crate::model::{LifecycleEvent, Reservation};
use std::future::Future;

/// Outbound notification channel for lifecycle events.
///
/// A sink renders and sends exactly one email to the reservation's
/// contact address and, when administrative recipients are configured,
/// exactly one joint copy to all of them.
pub trait NotificationSink: Send + Sync {
    /// Render and send the notifications for one lifecycle event.
    ///
    /// The engine treats dispatch as best-effort exactly-once: there is no
    /// retry queue and no idempotency key, and an `Err` here is logged at
    /// the dispatch task boundary, never surfaced to the API caller.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Notification`] when rendering or sending
    /// fails.
    fn notify(
        &self,
        event: LifecycleEvent,
        reservation: &Reservation,
    ) -> impl Future<Output = Result<()>> + Send;
}
