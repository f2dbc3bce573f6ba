//! Identity provider trait.

use crate::error::Result;
use crate::model::{LoginSession, StaffUser};
use std::future::Future;

/// External identity provider verifying staff credentials and tokens.
///
/// The provider is opaque: this system mints no tokens of its own,
/// maintains no revocation list, and persists nothing about sessions.
pub trait IdentityProvider: Send + Sync {
    /// Exchange an email/password pair for a session token and identity.
    ///
    /// # Errors
    ///
    /// Every failure mode (wrong password, unknown account, provider
    /// outage) maps uniformly to [`crate::Error::InvalidCredentials`].
    fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<LoginSession>> + Send;

    /// Validate a bearer token, yielding the verified identity.
    ///
    /// Fails closed: the caller must treat any error as "not
    /// authenticated".
    ///
    /// # Errors
    ///
    /// Every failure mode maps uniformly to
    /// [`crate::Error::Unauthenticated`].
    fn verify_token(&self, token: &str) -> impl Future<Output = Result<StaffUser>> + Send;
}
