//! Recording notification sink.

use crate::error::{Error, Result};
use crate::model::{LifecycleEvent, Reservation};
use crate::providers::NotificationSink;
use tokio::sync::mpsc;

/// One recorded dispatch attempt.
#[derive(Debug, Clone)]
pub struct SinkEvent {
    /// The lifecycle event that triggered the dispatch.
    pub event: LifecycleEvent,

    /// The reservation the dispatch was rendered from.
    pub reservation: Reservation,
}

/// Notification sink that records every dispatch on a channel.
///
/// Dispatch is fire-and-forget in the engine, so tests receive from the
/// paired channel (with a timeout) instead of polling shared state.
#[derive(Debug, Clone)]
pub struct MockSink {
    tx: mpsc::UnboundedSender<SinkEvent>,
    fail: bool,
}

impl MockSink {
    /// Create a sink and the receiving end tests await on.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<SinkEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx, fail: false }, rx)
    }

    /// Create a sink whose every dispatch errors (after recording it).
    #[must_use]
    pub fn failing() -> (Self, mpsc::UnboundedReceiver<SinkEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx, fail: true }, rx)
    }
}

impl NotificationSink for MockSink {
    fn notify(
        &self,
        event: LifecycleEvent,
        reservation: &Reservation,
    ) -> impl std::future::Future<Output = Result<()>> + Send {
        // Record before the await point so the future borrows nothing.
        let _ = self.tx.send(SinkEvent {
            event,
            reservation: reservation.clone(),
        });
        let fail = self.fail;
        async move {
            if fail {
                Err(Error::Notification("mock dispatch failure".to_string()))
            } else {
                Ok(())
            }
        }
    }
}
