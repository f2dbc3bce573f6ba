//! Application state for Axum handlers.

use crate::rate_limit::FixedWindowLimiter;
use maitred_core::ReservationEngine;
use maitred_core::providers::{DataStore, IdentityProvider, NotificationSink};
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// Everything inside is behind an `Arc`, so cloning per request is a
/// pointer copy. There is no other shared mutable state between requests;
/// the limiter's windows are the single deliberate exception.
pub struct AppState<S, I, N> {
    /// The reservation lifecycle engine.
    pub engine: Arc<ReservationEngine<S, N>>,

    /// Identity provider for login and the token gate.
    pub identity: Arc<I>,

    /// Per-route request quotas.
    pub limiter: Arc<FixedWindowLimiter>,
}

impl<S, I, N> AppState<S, I, N>
where
    S: DataStore,
    I: IdentityProvider,
    N: NotificationSink + 'static,
{
    /// Assemble the state from its components.
    pub fn new(engine: ReservationEngine<S, N>, identity: I) -> Self {
        Self {
            engine: Arc::new(engine),
            identity: Arc::new(identity),
            limiter: Arc::new(FixedWindowLimiter::new()),
        }
    }
}

// Manual impl: `derive(Clone)` would needlessly require S/I/N: Clone.
impl<S, I, N> Clone for AppState<S, I, N> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            identity: Arc::clone(&self.identity),
            limiter: Arc::clone(&self.limiter),
        }
    }
}
